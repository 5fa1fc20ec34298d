use std::path::PathBuf;

use crate::path::KeyPath;

/// Errors raised by settings stores.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The settings file is not valid TOML.
    #[error("failed to parse settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A write or removal addressed the root of the tree.
    #[error("settings path must not be empty")]
    EmptyPath,

    /// A segment of the path holds a value where a group is required.
    #[error("'{0}' is a value, not a group")]
    NotAGroup(KeyPath),

    #[error(transparent)]
    Fs(#[from] extman_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
