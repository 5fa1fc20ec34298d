//! Manager configuration
//!
//! Read from a TOML file:
//!
//! ```toml
//! app_name = "Commotion"
//! settings_path = "/home/me/.config/Commotion/extensions.toml"
//!
//! [libraries]
//! core = "/opt/commotion/extensions"
//! user = "/home/me/.Commotion/extension_data"
//! ```
//!
//! Every field is optional. Unset library bindings fall back to the host
//! defaults of [`Libraries::defaults`].

use std::path::{Path, PathBuf};

use extman_settings::FileSettings;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::library::Libraries;

pub const DEFAULT_APP_NAME: &str = "extman";
pub const SETTINGS_FILE: &str = "extensions.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Application name used in library and settings paths.
    pub app_name: String,
    /// Location of the settings file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_path: Option<PathBuf>,
    /// Library directory overrides.
    pub libraries: Libraries,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            settings_path: None,
            libraries: Libraries::default(),
        }
    }
}

impl ManagerConfig {
    /// Load the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(extman_fs::Error::io(path, e).into()),
        };
        Self::from_toml(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Like [`ManagerConfig::load`], with defaults for a missing file.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(Error::ConfigNotFound { .. }) => {
                tracing::debug!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Library bindings: host defaults with the configured overrides applied.
    pub fn libraries(&self) -> Libraries {
        Libraries::defaults(&self.app_name).overlay(&self.libraries)
    }

    /// The settings file in use, if one can be determined.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.settings_path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join(&self.app_name).join(SETTINGS_FILE))
        })
    }

    /// Open the settings file.
    pub fn open_settings(&self) -> Result<FileSettings> {
        let path = self
            .settings_path()
            .ok_or_else(|| Error::Config {
                path: PathBuf::new(),
                message: "no settings path configured and no user config directory".into(),
            })?;
        Ok(FileSettings::open(path)?)
    }
}
