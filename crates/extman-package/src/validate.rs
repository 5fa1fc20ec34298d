//! Manifest field validation.
//!
//! Checks are pure functions of the manifest, the host family and, when one
//! is attached, the package archive. Path-like fields follow the naming rules
//! of the host so an extension that installs cleanly can also be unpacked.

use std::path::{Path, PathBuf};

use extman_fs::HostFamily;

use crate::archive::PackageArchive;
use crate::error::Result;
use crate::key::{ConfigKey, UiKind};
use crate::manifest::ExtensionManifest;

const LABEL_LEN: std::ops::RangeInclusive<usize> = 3..=40;
const MENU_LEVEL: std::ops::RangeInclusive<i64> = 1..=100;

/// Validates one manifest.
#[derive(Debug)]
pub struct ConfigValidator<'a> {
    manifest: &'a ExtensionManifest,
    archive: Option<PackageArchive>,
    package_dir: Option<PathBuf>,
    host: HostFamily,
    errors: Vec<ConfigKey>,
}

impl<'a> ConfigValidator<'a> {
    /// Validator without a package: module existence is not checked.
    pub fn new(manifest: &'a ExtensionManifest) -> Self {
        Self {
            manifest,
            archive: None,
            package_dir: None,
            host: HostFamily::current(),
            errors: Vec::new(),
        }
    }

    /// Validator that also checks modules against the package at `package`.
    pub fn with_package(manifest: &'a ExtensionManifest, package: &Path) -> Result<Self> {
        let archive = PackageArchive::open(package)?;
        Ok(Self::with_archive(manifest, archive))
    }

    pub fn with_archive(manifest: &'a ExtensionManifest, archive: PackageArchive) -> Self {
        let package_dir = archive.path().parent().map(Path::to_path_buf);
        Self {
            archive: Some(archive),
            package_dir,
            ..Self::new(manifest)
        }
    }

    /// Apply the rules of `host` instead of the current one.
    pub fn for_host(mut self, host: HostFamily) -> Self {
        self.host = host;
        self
    }

    pub fn host(&self) -> HostFamily {
        self.host
    }

    pub fn name(&self) -> bool {
        let name = &self.manifest.name;
        if name.is_empty() {
            tracing::debug!("Extension manifest has no name");
            return false;
        }
        self.path_value_ok(ConfigKey::Name, name)
    }

    pub fn menu_item(&self) -> bool {
        self.label_ok(ConfigKey::MenuItem, self.manifest.menu_item())
    }

    /// Whether the name, which stands in for a rejected menu item, is a
    /// valid menu item itself.
    pub fn menu_item_fallback(&self) -> bool {
        self.label_ok(ConfigKey::MenuItem, &self.manifest.name)
    }

    pub fn parent(&self) -> bool {
        self.label_ok(ConfigKey::Parent, self.manifest.parent())
    }

    pub fn menu_level(&self) -> bool {
        let level = self.manifest.menu_level();
        let ok = MENU_LEVEL.contains(&level);
        if !ok {
            tracing::debug!(extension = %self.manifest.name, menu_level = level, "menu_level out of range");
        }
        ok
    }

    /// The tests module follows path rules; its absence from the package
    /// is only reported.
    pub fn tests(&self) -> bool {
        let tests = self.manifest.tests();
        if !self.path_value_ok(ConfigKey::Tests, tests) {
            return false;
        }
        if let Some(archive) = &self.archive {
            if !archive.has_module(tests) {
                tracing::info!(
                    extension = %self.manifest.name,
                    module = tests,
                    "Extension does not ship its tests module"
                );
            }
        }
        true
    }

    /// A user interface module follows path rules and, with a package
    /// attached, must exist inside it.
    pub fn gui(&self, kind: UiKind) -> bool {
        let module = self.manifest.gui(kind);
        if !self.path_value_ok(kind.key(), module) {
            return false;
        }
        match &self.archive {
            Some(archive) if !archive.has_module(module) => {
                tracing::debug!(
                    extension = %self.manifest.name,
                    kind = %kind,
                    module,
                    "Module missing from package"
                );
                false
            }
            _ => true,
        }
    }

    /// Run the check for a single key. Manager-owned keys always pass.
    pub fn check(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::Name => self.name(),
            ConfigKey::Main => self.gui(UiKind::Main),
            ConfigKey::Settings => self.gui(UiKind::Settings),
            ConfigKey::Toolbar => self.gui(UiKind::Toolbar),
            ConfigKey::Tests => self.tests(),
            ConfigKey::Parent => self.parent(),
            ConfigKey::MenuItem => self.menu_item(),
            ConfigKey::MenuLevel => self.menu_level(),
            ConfigKey::Type | ConfigKey::Initialized => true,
        }
    }

    /// Run every check, record the failing keys and report whether all
    /// of them passed.
    pub fn validate_all(&mut self) -> bool {
        const ORDER: [ConfigKey; 8] = [
            ConfigKey::Name,
            ConfigKey::Tests,
            ConfigKey::MenuLevel,
            ConfigKey::MenuItem,
            ConfigKey::Parent,
            ConfigKey::Main,
            ConfigKey::Settings,
            ConfigKey::Toolbar,
        ];

        let errors: Vec<ConfigKey> = ORDER.into_iter().filter(|key| !self.check(*key)).collect();
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Keys that failed the last [`ConfigValidator::validate_all`].
    pub fn errors(&self) -> &[ConfigKey] {
        &self.errors
    }

    fn label_ok(&self, key: ConfigKey, value: &str) -> bool {
        let ok = LABEL_LEN.contains(&value.chars().count());
        if !ok {
            tracing::debug!(extension = %self.manifest.name, key = %key, value, "Label length out of range");
        }
        ok
    }

    fn path_value_ok(&self, key: ConfigKey, value: &str) -> bool {
        if value.is_empty() || value == "." || value == ".." {
            tracing::debug!(extension = %self.manifest.name, key = %key, "Empty or relative path value");
            return false;
        }
        if !self.host.allows_chars(value) {
            tracing::debug!(extension = %self.manifest.name, key = %key, host = %self.host, "Reserved character in value");
            return false;
        }
        if !self.host.allows_length(value, self.package_dir.as_deref()) {
            tracing::debug!(extension = %self.manifest.name, key = %key, host = %self.host, "Value too long");
            return false;
        }
        true
    }
}
