//! Persistent settings store for the Extension Manager
//!
//! Settings form a tree of groups addressed by [`KeyPath`]s such as
//! `extensions/sample_ext/menu_level`. Leaves hold a [`SettingValue`].
//! Two stores are provided: [`MemorySettings`] for process-local state and
//! [`FileSettings`], which persists the tree as TOML.

pub mod error;
pub mod file;
pub mod memory;
pub mod path;
pub mod store;
mod tree;
pub mod value;

pub use error::{Error, Result};
pub use file::FileSettings;
pub use memory::MemorySettings;
pub use path::KeyPath;
pub use store::SettingsStore;
pub use value::SettingValue;
