//! Extension packages for the Extension Manager.
//!
//! This crate knows everything about a single library directory and the
//! packages inside it: reading package archives, parsing the manifest each
//! one carries, caching the manifests of a tier, and validating manifest
//! fields against the rules of the current host.

pub mod archive;
pub mod error;
pub mod key;
pub mod manifest;
pub mod store;
pub mod validate;

pub use archive::{MAX_PACKAGE_SIZE, PackageArchive};
pub use error::{Error, Result};
pub use key::{ConfigKey, UiKind};
pub use manifest::{ExtensionManifest, MANIFEST_SUFFIX};
pub use store::{DiscoveryStatus, LoadedManifest, ManifestStore};
pub use validate::ConfigValidator;
