//! Per-tier manifest discovery and caching.

use std::path::{Path, PathBuf};

use crate::archive::PackageArchive;
use crate::error::{Error, Result};
use crate::manifest::ExtensionManifest;

/// Outcome of the discovery run performed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    /// The store was built without a directory.
    NotScanned,
    /// The directory does not exist.
    DirectoryNotFound,
    /// The directory exists but holds no loadable package.
    NoManifests,
    /// This many manifests were loaded.
    Found(usize),
}

/// A manifest together with the package it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedManifest {
    pub manifest: ExtensionManifest,
    pub package: PathBuf,
}

impl LoadedManifest {
    pub fn name(&self) -> &str {
        &self.manifest.name
    }
}

/// All manifests found in one library directory.
///
/// Discovery happens once in [`ManifestStore::new`]; lookups afterwards are
/// served from the cache. A missing or empty directory is not an error for
/// the caller, it is recorded in [`ManifestStore::status`].
#[derive(Debug, Clone)]
pub struct ManifestStore {
    directory: Option<PathBuf>,
    configs: Vec<LoadedManifest>,
    status: DiscoveryStatus,
}

impl ManifestStore {
    pub fn new(directory: Option<&Path>) -> Self {
        let mut store = Self {
            directory: directory.map(Path::to_path_buf),
            configs: Vec::new(),
            status: DiscoveryStatus::NotScanned,
        };

        let Some(directory) = directory else {
            return store;
        };

        match Self::get_paths(directory) {
            Ok(paths) => {
                store.configs = Self::get(paths).collect();
                store.status = if store.configs.is_empty() {
                    DiscoveryStatus::NoManifests
                } else {
                    DiscoveryStatus::Found(store.configs.len())
                };
            }
            Err(Error::DirectoryNotFound(_)) => {
                tracing::warn!(directory = %directory.display(), "Library directory does not exist");
                store.status = DiscoveryStatus::DirectoryNotFound;
            }
            Err(e) => {
                tracing::info!(directory = %directory.display(), error = %e, "No extensions found");
                store.status = DiscoveryStatus::NoManifests;
            }
        }

        store
    }

    /// Package paths directly inside `directory` that carry exactly one
    /// manifest. Nested directories are not searched.
    pub fn get_paths(directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(Error::DirectoryNotFound(directory.to_path_buf()));
        }

        let entries = std::fs::read_dir(directory).map_err(|e| Error::io(directory, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(directory, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            match PackageArchive::open(&path).and_then(|archive| archive.manifest_member().map(|_| ())) {
                Ok(()) => paths.push(path),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Not an extension package");
                }
            }
        }

        if paths.is_empty() {
            return Err(Error::NoManifests(directory.to_path_buf()));
        }
        paths.sort();
        Ok(paths)
    }

    /// Lazily load the manifests of `paths`, skipping any that fail.
    pub fn get<I>(paths: I) -> impl Iterator<Item = LoadedManifest>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        paths.into_iter().filter_map(|package| {
            Self::load(&package).map(|manifest| LoadedManifest { manifest, package })
        })
    }

    /// Read the manifest of one package. Malformed input is logged and
    /// reported as `None`.
    pub fn load(package: &Path) -> Option<ExtensionManifest> {
        match PackageArchive::open(package).and_then(|archive| archive.read_manifest()) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!(package = %package.display(), error = %e, "Failed to load extension manifest");
                None
            }
        }
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn status(&self) -> DiscoveryStatus {
        self.status
    }

    pub fn has_configs(&self) -> bool {
        !self.configs.is_empty()
    }

    /// Every cached manifest, in package path order.
    pub fn all(&self) -> &[LoadedManifest] {
        &self.configs
    }

    /// The cached manifest named `name`.
    pub fn find(&self, name: &str) -> Option<&LoadedManifest> {
        self.configs.iter().find(|loaded| loaded.name() == name)
    }
}
