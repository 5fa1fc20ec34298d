//! Extension lifecycle orchestration
//!
//! Ties the library tiers, their manifest stores and the persistent settings
//! store together. [`ExtensionManager`] is the single entry point: it
//! discovers packages, installs their manifests, answers queries about
//! installed extensions and resolves user interface modules through a
//! [`PluginLoader`].
//!
//! # Example
//!
//! ```no_run
//! use extman_core::{ExtensionManager, ManagerConfig};
//! use extman_settings::MemorySettings;
//!
//! let config = ManagerConfig::default();
//! let mut manager = ExtensionManager::from_config(&config, MemorySettings::new());
//! let installed = manager.bootstrap()?;
//! println!("installed: {installed:?}");
//! # Ok::<(), extman_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod library;
pub mod loader;
pub mod manager;
pub mod record;

pub use config::ManagerConfig;
pub use error::{Error, Result};
pub use library::{HostDirs, Libraries, LibraryTier};
pub use loader::{
    BuiltinLoader, LoadRequest, PluginLoader, SettingsMenu, ToolBar, UserInterface, ViewPort,
};
pub use manager::{EXTENSIONS_GROUP, ExtensionManager};
pub use record::InstalledExtension;

pub use extman_package::{ConfigKey, ExtensionManifest, UiKind};
pub use extman_settings::{SettingValue, SettingsStore};
