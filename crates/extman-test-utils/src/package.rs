//! [`PackageBuilder`] for extension package fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{EntryType, Header};

/// Placeholder bytes written for module members.
pub const MODULE_BYTES: &[u8] = b"\0asm\x01\0\0\0";

enum Member {
    File(String, Vec<u8>),
    Directory(String),
    /// Written straight into the header so tar's own path checks are bypassed.
    Raw(String, Vec<u8>),
}

/// Builds a gzip-compressed tar package in memory.
///
/// # Example
///
/// ```rust,no_run
/// use extman_test_utils::PackageBuilder;
/// use serde_json::json;
///
/// let bytes = PackageBuilder::new()
///     .manifest(&json!({"name": "sample_ext"}))
///     .module("main")
///     .to_bytes();
/// ```
#[derive(Default)]
pub struct PackageBuilder {
    members: Vec<Member>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `manifest` as the `manifest.conf` member.
    pub fn manifest(self, manifest: &serde_json::Value) -> Self {
        self.manifest_named("manifest.conf", manifest)
    }

    /// Add `manifest` under a custom member name.
    pub fn manifest_named(self, member: &str, manifest: &serde_json::Value) -> Self {
        let content = serde_json::to_vec_pretty(manifest).unwrap();
        self.member(member, content)
    }

    /// Add a module member `<name>.wasm` with placeholder contents.
    pub fn module(self, name: &str) -> Self {
        self.member(&format!("{name}.wasm"), MODULE_BYTES)
    }

    pub fn member(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        self.members.push(Member::File(name.to_string(), content.into()));
        self
    }

    pub fn directory(mut self, name: &str) -> Self {
        self.members.push(Member::Directory(name.to_string()));
        self
    }

    /// Add a member whose name is not sanitized, such as `../escape` or
    /// `/etc/passwd`. The name must fit in 100 bytes.
    pub fn unchecked_member(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        assert!(name.len() < 100, "unchecked member names must fit the old header");
        self.members.push(Member::Raw(name.to_string(), content.into()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for member in &self.members {
            match member {
                Member::File(name, content) => {
                    let mut header = file_header(content.len());
                    builder
                        .append_data(&mut header, name, content.as_slice())
                        .unwrap();
                }
                Member::Directory(name) => {
                    let mut header = Header::new_gnu();
                    header.set_entry_type(EntryType::Directory);
                    header.set_mode(0o755);
                    header.set_size(0);
                    builder
                        .append_data(&mut header, name, std::io::empty())
                        .unwrap();
                }
                Member::Raw(name, content) => {
                    let mut header = file_header(content.len());
                    let field = &mut header.as_old_mut().name;
                    field.fill(0);
                    field[..name.len()].copy_from_slice(name.as_bytes());
                    header.set_cksum();
                    builder.append(&header, content.as_slice()).unwrap();
                }
            }
        }

        builder.into_inner().unwrap().finish().unwrap()
    }

    /// Write the package to `path` and return it.
    pub fn write_to(&self, path: &Path) -> PathBuf {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, self.to_bytes()).unwrap();
        path.to_path_buf()
    }
}

fn file_header(size: usize) -> Header {
    let mut header = Header::new_gnu();
    header.set_entry_type(EntryType::Regular);
    header.set_mode(0o644);
    header.set_size(size as u64);
    header
}
