//! [`TestLibrary`]: tier directories under one temporary root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::package::PackageBuilder;

/// A temporary root with one directory per library tier.
///
/// Tiers are addressed by name (`core`, `global`, `user`); directories are
/// created on first use.
///
/// # Example
///
/// ```rust,no_run
/// use extman_test_utils::TestLibrary;
/// use serde_json::json;
///
/// let library = TestLibrary::new();
/// library.add_extension("user", &json!({"name": "sample_ext", "parent": "Tools"}));
/// assert!(library.tier_dir("user").join("sample_ext.tar.gz").exists());
/// ```
pub struct TestLibrary {
    temp_dir: TempDir,
}

impl Default for TestLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLibrary {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory of `tier`, created if missing.
    pub fn tier_dir(&self, tier: &str) -> PathBuf {
        let dir = self.tier_path(tier);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Directory of `tier` without creating it.
    pub fn tier_path(&self, tier: &str) -> PathBuf {
        self.root().join(tier)
    }

    /// Suggested location for a settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.root().join("settings.toml")
    }

    /// Write `package` as `file_name` inside `tier`.
    pub fn add_package(&self, tier: &str, file_name: &str, package: &PackageBuilder) -> PathBuf {
        package.write_to(&self.tier_dir(tier).join(file_name))
    }

    /// Write a package for `manifest` that ships every module the manifest
    /// names, as `<name>.tar.gz` inside `tier`.
    pub fn add_extension(&self, tier: &str, manifest: &Value) -> PathBuf {
        let name = manifest["name"].as_str().unwrap_or("unnamed");
        let field = |key: &str| manifest[key].as_str().map(str::to_string);

        let main = field("main").unwrap_or_else(|| "main".to_string());
        let mut modules = vec![main.clone()];
        for key in ["settings", "toolbar"] {
            modules.push(field(key).unwrap_or_else(|| main.clone()));
        }
        modules.push(field("tests").unwrap_or_else(|| "tests".to_string()));
        modules.sort();
        modules.dedup();

        let package = modules
            .iter()
            .fold(PackageBuilder::new().manifest(manifest), |builder, module| {
                builder.module(module)
            });
        self.add_package(tier, &format!("{name}.tar.gz"), &package)
    }

    /// Write an arbitrary file into `tier`.
    pub fn add_file(&self, tier: &str, file_name: &str, content: &[u8]) -> PathBuf {
        let path = self.tier_dir(tier).join(file_name);
        fs::write(&path, content).unwrap();
        path
    }
}
