//! Building a manager from the command-line configuration.

use std::path::{Path, PathBuf};

use extman_core::{ExtensionManager, ManagerConfig};
use extman_settings::FileSettings;

use crate::error::Result;

pub struct Context {
    pub config: ManagerConfig,
}

impl Context {
    /// Load the configuration named on the command line, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => ManagerConfig::load(path)?,
            None => ManagerConfig::default(),
        };
        tracing::debug!(app = %config.app_name, "Loaded configuration");
        Ok(Self { config })
    }

    pub fn settings_path(&self) -> Option<PathBuf> {
        self.config.settings_path()
    }

    /// A manager over the configured settings file.
    pub fn manager(&self) -> Result<ExtensionManager<FileSettings>> {
        let settings = self.config.open_settings()?;
        Ok(ExtensionManager::from_config(&self.config, settings))
    }
}
