//! Library tiers and their directories.
//!
//! Each tier maps to one directory. `user` and `global` follow the
//! conventions of the host family; `core` sits next to the executable.
//!
//! | family  | user                                   | global                                              |
//! |---------|----------------------------------------|-----------------------------------------------------|
//! | Mac     | `~/Library/<App>/extension_data`       | `/Library/Application Support/<App>/extension_data` |
//! | Windows | `%APPDATA%/Local/<App>/extension_data` | `%ProgramData%/Local/<App>/extension_data`          |
//! | Posix   | `~/.<App>/extension_data`              | `/usr/share/<App>/extension_data`                   |

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use extman_fs::HostFamily;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATA_DIR: &str = "extension_data";
const CORE_DIR: &str = "extensions";

/// An ownership scope for extension packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryTier {
    /// Shipped with the application, read-only.
    Core,
    /// Shared by every user of the machine.
    Global,
    /// Private to the current user.
    User,
}

impl LibraryTier {
    pub const ALL: [LibraryTier; 3] = [Self::Core, Self::Global, Self::User];

    /// Tiers that are installed from, in install order.
    pub const INSTALLABLE: [LibraryTier; 2] = [Self::User, Self::Global];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Global => "global",
            Self::User => "user",
        }
    }
}

impl fmt::Display for LibraryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "core" => Ok(Self::Core),
            "global" => Ok(Self::Global),
            "user" => Ok(Self::User),
            other => Err(Error::InvalidTier(other.to_string())),
        }
    }
}

/// Host directories the defaults are derived from.
#[derive(Debug, Clone, Default)]
pub struct HostDirs {
    pub home: Option<PathBuf>,
    /// Per-user application data (`%APPDATA%` on Windows).
    pub data: Option<PathBuf>,
    /// Machine-wide application data (`%ProgramData%` on Windows).
    pub common_data: Option<PathBuf>,
    /// Directory holding the running executable.
    pub install: Option<PathBuf>,
}

impl HostDirs {
    pub fn detect() -> Self {
        let common_data = std::env::var_os("ProgramData")
            .map(PathBuf::from)
            .or_else(|| cfg!(windows).then(|| PathBuf::from(r"C:\ProgramData")));
        let install = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self {
            home: dirs::home_dir(),
            data: dirs::data_dir(),
            common_data,
            install,
        }
    }
}

/// Directory bindings for the three tiers. An unset binding means the tier
/// is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Libraries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub core: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PathBuf>,
}

impl Libraries {
    /// Defaults for the current host.
    pub fn defaults(app: &str) -> Self {
        Self::for_host(HostFamily::current(), app, &HostDirs::detect())
    }

    /// Defaults for `family`, computed from `dirs` without touching the
    /// filesystem.
    pub fn for_host(family: HostFamily, app: &str, dirs: &HostDirs) -> Self {
        let (user, global) = match family {
            HostFamily::Mac => (
                dirs.home
                    .as_ref()
                    .map(|home| home.join("Library").join(app).join(DATA_DIR)),
                Some(
                    PathBuf::from("/Library/Application Support")
                        .join(app)
                        .join(DATA_DIR),
                ),
            ),
            HostFamily::Windows => (
                dirs.data
                    .as_ref()
                    .map(|data| data.join("Local").join(app).join(DATA_DIR)),
                dirs.common_data
                    .as_ref()
                    .map(|common| common.join("Local").join(app).join(DATA_DIR)),
            ),
            HostFamily::Posix => (
                dirs.home
                    .as_ref()
                    .map(|home| home.join(format!(".{app}")).join(DATA_DIR)),
                Some(PathBuf::from("/usr/share").join(app).join(DATA_DIR)),
            ),
        };

        Self {
            core: dirs.install.as_ref().map(|dir| dir.join(CORE_DIR)),
            global,
            user,
        }
    }

    pub fn get(&self, tier: LibraryTier) -> Option<&Path> {
        match tier {
            LibraryTier::Core => self.core.as_deref(),
            LibraryTier::Global => self.global.as_deref(),
            LibraryTier::User => self.user.as_deref(),
        }
    }

    pub fn set(&mut self, tier: LibraryTier, path: impl Into<PathBuf>) {
        let slot = match tier {
            LibraryTier::Core => &mut self.core,
            LibraryTier::Global => &mut self.global,
            LibraryTier::User => &mut self.user,
        };
        *slot = Some(path.into());
    }

    /// Replace every binding that `overrides` sets.
    pub fn overlay(mut self, overrides: &Libraries) -> Self {
        for tier in LibraryTier::ALL {
            if let Some(path) = overrides.get(tier) {
                self.set(tier, path);
            }
        }
        self
    }

    /// Create the `user` and `global` directories.
    ///
    /// An unset binding is logged and skipped. A directory that can not be
    /// created is an error.
    pub fn init(&self) -> Result<()> {
        for tier in LibraryTier::INSTALLABLE {
            self.init_tier(tier)?;
        }
        Ok(())
    }

    /// Create the directory of one tier, if it is bound.
    pub fn init_tier(&self, tier: LibraryTier) -> Result<()> {
        match self.get(tier) {
            Some(path) => {
                extman_fs::io::ensure_dir(path)?;
                tracing::debug!(tier = %tier, path = %path.display(), "Library ready");
            }
            None => tracing::warn!(tier = %tier, "No directory configured for library"),
        }
        Ok(())
    }
}
