//! Reading extension package archives.
//!
//! A package is a gzip-compressed tar file. The whole archive is read into
//! memory once; packages are small and every consumer needs random access
//! to the member list.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use extman_fs::NormalizedPath;
use flate2::read::GzDecoder;

use crate::error::{Error, Result};
use crate::manifest::{ExtensionManifest, MANIFEST_SUFFIX};

/// Largest package file accepted, in bytes.
pub const MAX_PACKAGE_SIZE: u64 = 10 * 1024 * 1024;

/// The decoded contents of one package.
#[derive(Debug, Clone)]
pub struct PackageArchive {
    path: PathBuf,
    members: BTreeMap<NormalizedPath, Vec<u8>>,
}

impl PackageArchive {
    /// Open and decode the package at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::PackageNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        if !metadata.is_file() {
            return Err(Error::NotAnArchive {
                path: path.to_path_buf(),
                message: "not a regular file".into(),
            });
        }
        if metadata.len() > MAX_PACKAGE_SIZE {
            return Err(Error::PackageTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
            });
        }

        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::from_bytes(path, &bytes)
    }

    /// Decode a package already held in memory. `path` is only used to
    /// label errors and for [`PackageArchive::path`].
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self> {
        let not_archive = |e: std::io::Error| Error::NotAnArchive {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        // Bound the decompressed stream as well as the file.
        let decoder = GzDecoder::new(bytes).take(MAX_PACKAGE_SIZE * 4);
        let mut archive = tar::Archive::new(decoder);
        let mut members = BTreeMap::new();

        for entry in archive.entries().map_err(not_archive)? {
            let mut entry = entry.map_err(not_archive)?;
            let kind = entry.header().entry_type();
            if kind.is_dir() {
                continue;
            }

            let raw = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let member = NormalizedPath::new(&raw);
            if member.is_absolute() || member.escapes() {
                return Err(Error::UnsafeMember {
                    path: path.to_path_buf(),
                    member: raw,
                });
            }
            if member.is_empty() || !kind.is_file() {
                tracing::debug!(package = %path.display(), member = %raw, "Skipping non-file member");
                continue;
            }

            let mut data = Vec::new();
            entry.read_to_end(&mut data).map_err(not_archive)?;
            members.insert(member, data);
        }

        tracing::debug!(package = %path.display(), members = members.len(), "Read package");
        Ok(Self {
            path: path.to_path_buf(),
            members,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Member names in sorted order.
    pub fn members(&self) -> impl Iterator<Item = &NormalizedPath> {
        self.members.keys()
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains_key(&NormalizedPath::new(member))
    }

    /// Contents of one member.
    pub fn read(&self, member: &str) -> Option<&[u8]> {
        self.members
            .get(&NormalizedPath::new(member))
            .map(Vec::as_slice)
    }

    /// The single member carrying the manifest.
    pub fn manifest_member(&self) -> Result<&NormalizedPath> {
        let mut candidates = self
            .members
            .keys()
            .filter(|member| member.as_str().ends_with(MANIFEST_SUFFIX));

        let first = candidates
            .next()
            .ok_or_else(|| Error::ManifestMissing(self.path.clone()))?;
        let others = candidates.count();
        if others > 0 {
            return Err(Error::ManifestAmbiguous {
                path: self.path.clone(),
                count: others + 1,
            });
        }
        Ok(first)
    }

    /// Parse the manifest member.
    pub fn read_manifest(&self) -> Result<ExtensionManifest> {
        let member = self.manifest_member()?;
        let bytes = &self.members[member];
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The root-level member providing module `name`, if any.
    pub fn find_module(&self, name: &str) -> Option<&NormalizedPath> {
        self.members
            .keys()
            .find(|member| member.provides_module(name))
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.find_module(name).is_some()
    }
}
