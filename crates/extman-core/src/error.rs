//! Error types for extman-core

use std::path::PathBuf;

use extman_package::ConfigKey;

use crate::library::LibraryTier;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the extension manager.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Extension is not in the settings store.
    #[error("extension '{0}' is not installed")]
    NotInstalled(String),

    /// Installed record lacks a field.
    #[error("extension '{name}' has no value for '{key}'")]
    PropertyMissing { name: String, key: ConfigKey },

    #[error("'{0}' is not a valid config key")]
    InvalidKey(String),

    #[error("'{0}' is not a library tier (expected core, global or user)")]
    InvalidTier(String),

    #[error("'{0}' is not a user interface kind (expected main, settings or toolbar)")]
    InvalidUiKind(String),

    /// Extension is installed but disabled.
    #[error("extension '{0}' is not initialized")]
    NotInitialized(String),

    /// An empty name would address every extension at once.
    #[error("extension name must not be empty")]
    EmptyName,

    #[error("core extensions are installed through the global library")]
    CoreNotInstallable,

    #[error("no directory configured for the {0} library")]
    LibraryNotConfigured(LibraryTier),

    /// Installed extension has no package in its library.
    #[error("package for extension '{name}' not found in the {tier} library")]
    PackageNotFound { name: String, tier: LibraryTier },

    #[error("extension '{name}' does not contain module '{module}'")]
    ModuleNotFound { name: String, module: String },

    /// The plugin loader could not build the user interface.
    #[error("failed to load extension '{name}': {message}")]
    Load { name: String, message: String },

    #[error("configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] extman_fs::Error),

    #[error(transparent)]
    Package(#[from] extman_package::Error),

    #[error(transparent)]
    Settings(#[from] extman_settings::Error),
}
