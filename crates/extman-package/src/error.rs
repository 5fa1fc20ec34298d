use std::path::PathBuf;

/// Errors that can occur while reading packages and manifests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Library directory does not exist.
    #[error("library directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    /// Library directory exists but holds no loadable package.
    #[error("no extension manifests found in {0}")]
    NoManifests(PathBuf),

    /// Package file does not exist.
    #[error("package not found: {0}")]
    PackageNotFound(PathBuf),

    /// File is not a gzip-compressed tar archive.
    #[error("{path} is not a valid package archive: {message}")]
    NotAnArchive { path: PathBuf, message: String },

    /// Package exceeds the size limit.
    #[error("package {path} is too large ({size} bytes)")]
    PackageTooLarge { path: PathBuf, size: u64 },

    /// A member escapes the package root.
    #[error("package {path} contains unsafe member '{member}'")]
    UnsafeMember { path: PathBuf, member: String },

    /// Package carries no manifest member.
    #[error("package {0} does not contain a manifest")]
    ManifestMissing(PathBuf),

    /// Package carries more than one manifest member.
    #[error("package {path} contains {count} manifests, expected exactly one")]
    ManifestAmbiguous { path: PathBuf, count: usize },

    /// Manifest member is not valid JSON for the manifest schema.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// Unknown config key.
    #[error("'{0}' is not a valid config key")]
    InvalidKey(String),

    /// Unknown user interface kind.
    #[error("'{0}' is not a user interface kind (expected main, settings or toolbar)")]
    InvalidUiKind(String),

    /// Filesystem error from extman-fs.
    #[error(transparent)]
    Fs(#[from] extman_fs::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs(extman_fs::Error::io(path, source))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
