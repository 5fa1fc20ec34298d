//! The extension manager.
//!
//! Lifecycle of one extension name:
//!
//! ```text
//!  [not found] --discover--> Loaded --validate + merge--> Installed(initialized)
//!  Installed(initialized) <--enable / disable--> Installed(disabled)
//!  Installed(*) --remove_extension_settings--> [not found]
//! ```
//!
//! Only initialized extensions can resolve user interface modules.

use std::collections::BTreeMap;
use std::path::PathBuf;

use extman_fs::HostFamily;
use extman_package::{
    ConfigKey, ConfigValidator, ExtensionManifest, ManifestStore, PackageArchive, UiKind,
};
use extman_settings::{KeyPath, SettingValue, SettingsStore};

use crate::config::ManagerConfig;
use crate::error::{Error, Result};
use crate::library::{Libraries, LibraryTier};
use crate::loader::{BuiltinLoader, LoadRequest, PluginLoader, UserInterface};
use crate::record::InstalledExtension;

/// Settings group holding one subgroup per installed extension.
pub const EXTENSIONS_GROUP: &str = "extensions";

/// Discovers, installs and resolves extensions.
///
/// The manager assumes calls are serialized by its owner.
pub struct ExtensionManager<S: SettingsStore> {
    settings: S,
    libraries: Libraries,
    stores: BTreeMap<LibraryTier, ManifestStore>,
    loader: Box<dyn PluginLoader>,
    host: HostFamily,
}

impl<S: SettingsStore> ExtensionManager<S> {
    pub fn new(settings: S, libraries: Libraries) -> Self {
        Self {
            settings,
            libraries,
            stores: BTreeMap::new(),
            loader: Box::new(BuiltinLoader::new()),
            host: HostFamily::current(),
        }
    }

    /// Manager with the library bindings of `config`.
    pub fn from_config(config: &ManagerConfig, settings: S) -> Self {
        Self::new(settings, config.libraries())
    }

    pub fn with_loader(mut self, loader: impl PluginLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Validate manifests against the naming rules of `host`.
    pub fn with_host(mut self, host: HostFamily) -> Self {
        self.host = host;
        self
    }

    pub fn settings(&self) -> &S {
        &self.settings
    }

    pub fn into_settings(self) -> S {
        self.settings
    }

    pub fn libraries(&self) -> &Libraries {
        &self.libraries
    }

    /// Rebind `tier` to `path`. Its cached manifests are dropped.
    pub fn set_library(&mut self, tier: LibraryTier, path: impl Into<PathBuf>) {
        self.libraries.set(tier, path);
        self.stores.remove(&tier);
    }

    /// Create the writable library directories.
    pub fn init_libraries(&self) -> Result<()> {
        self.libraries.init()
    }

    /// The manifest store of `tier`, if it has been built.
    pub fn manifest_store(&self, tier: LibraryTier) -> Option<&ManifestStore> {
        self.stores.get(&tier)
    }

    fn store(&mut self, tier: LibraryTier) -> &ManifestStore {
        let libraries = &self.libraries;
        self.stores
            .entry(tier)
            .or_insert_with(|| ManifestStore::new(libraries.get(tier)))
    }

    /// (Re)build the manifest store of `tier`, or of every tier.
    pub fn init_extension_config(&mut self, tier: Option<LibraryTier>) {
        let tiers = match tier {
            Some(tier) => vec![tier],
            None => LibraryTier::ALL.to_vec(),
        };
        for tier in tiers {
            let directory = self.libraries.get(tier);
            if directory.is_none() {
                tracing::warn!(tier = %tier, "No directory configured for library");
            }
            let store = ManifestStore::new(directory);
            tracing::debug!(tier = %tier, status = ?store.status(), "Built manifest store");
            self.stores.insert(tier, store);
        }
    }

    /// Run the start-up sequence and return the newly installed names.
    ///
    /// A library directory that can not be created is logged and the
    /// remaining tiers are still discovered and installed.
    pub fn bootstrap(&mut self) -> Result<Vec<String>> {
        for tier in LibraryTier::INSTALLABLE {
            if let Err(e) = self.libraries.init_tier(tier) {
                tracing::warn!(tier = %tier, error = %e, "Library unavailable, continuing without it");
            }
        }
        self.init_extension_config(None);
        self.load_core()?;
        self.install_loaded(None)
    }

    fn extension_path(name: &str) -> KeyPath {
        KeyPath::from(EXTENSIONS_GROUP).child(name)
    }

    /// Parse a manifest field name. Manager-owned fields are read through
    /// [`ExtensionManager::get_config`].
    fn parse_key(key: &str) -> Result<ConfigKey> {
        match key.parse::<ConfigKey>() {
            Ok(parsed) if parsed.is_manifest() => Ok(parsed),
            _ => Err(Error::InvalidKey(key.to_string())),
        }
    }

    /// Whether `name`, or with `None` any extension, is installed.
    pub fn check_installed(&self, name: Option<&str>) -> bool {
        let installed = self.settings.groups(&KeyPath::from(EXTENSIONS_GROUP));
        match name {
            Some(name) => installed.iter().any(|group| group == name),
            None => !installed.is_empty(),
        }
    }

    /// Every installed extension and the tier it came from. Records with
    /// a missing or unknown tier are skipped.
    pub fn get_installed(&self) -> BTreeMap<String, LibraryTier> {
        let root = KeyPath::from(EXTENSIONS_GROUP);
        self.settings
            .groups(&root)
            .into_iter()
            .filter_map(|name| {
                let value = self
                    .settings
                    .get(&root.child(name.as_str()).child(ConfigKey::Type.as_str()));
                match value.as_ref().and_then(SettingValue::as_str).map(str::parse::<LibraryTier>) {
                    Some(Ok(tier)) => Some((name, tier)),
                    _ => {
                        tracing::warn!(extension = %name, "Installed extension has no valid type");
                        None
                    }
                }
            })
            .collect()
    }

    /// Copy core packages missing from the global library into it.
    ///
    /// A core extension is skipped when it is already installed or the
    /// global library already carries it. Returns the names copied.
    pub fn load_core(&mut self) -> Result<Vec<String>> {
        let Some(global_dir) = self.libraries.get(LibraryTier::Global).map(PathBuf::from) else {
            tracing::warn!("No global library to seed from core");
            return Ok(Vec::new());
        };

        let core = self.store(LibraryTier::Core).all().to_vec();
        let mut copied = Vec::new();
        for loaded in core {
            let name = loaded.name();
            if name.is_empty()
                || self.check_installed(Some(name))
                || self.store(LibraryTier::Global).find(name).is_some()
            {
                continue;
            }

            let Some(file_name) = loaded.package.file_name() else {
                continue;
            };
            let dest = global_dir.join(file_name);
            if dest.exists() {
                tracing::warn!(
                    extension = %name,
                    path = %dest.display(),
                    "Global library holds a different package under the same file name"
                );
                continue;
            }

            match extman_fs::io::copy_atomic(&loaded.package, &dest) {
                Ok(()) => {
                    tracing::info!(extension = %name, path = %dest.display(), "Copied core extension to global library");
                    copied.push(name.to_string());
                }
                Err(e) => {
                    tracing::warn!(extension = %name, error = %e, "Failed to copy core extension");
                }
            }
        }

        if !copied.is_empty() {
            self.init_extension_config(Some(LibraryTier::Global));
        }
        Ok(copied)
    }

    /// Install every loaded manifest of `tier`, or of `user` then `global`,
    /// that is not installed yet. Returns the newly installed names.
    ///
    /// Installed extensions are never touched. A manifest that fails to
    /// install is logged and skipped.
    pub fn install_loaded(&mut self, tier: Option<LibraryTier>) -> Result<Vec<String>> {
        let tiers = match tier {
            Some(LibraryTier::Core) => return Err(Error::CoreNotInstallable),
            Some(tier) => vec![tier],
            None => LibraryTier::INSTALLABLE.to_vec(),
        };

        let mut installed = Vec::new();
        for tier in tiers {
            let manifests: Vec<ExtensionManifest> = self
                .store(tier)
                .all()
                .iter()
                .map(|loaded| loaded.manifest.clone())
                .collect();

            for manifest in manifests {
                if self.check_installed(Some(manifest.name.as_str())) {
                    tracing::debug!(extension = %manifest.name, tier = %tier, "Already installed");
                    continue;
                }
                match self.save_settings(&manifest, tier) {
                    Ok(true) => installed.push(manifest.name.clone()),
                    Ok(false) => {
                        tracing::warn!(extension = %manifest.name, tier = %tier, "Extension failed validation, skipped");
                    }
                    Err(e) => {
                        tracing::warn!(extension = %manifest.name, tier = %tier, error = %e, "Failed to install extension");
                    }
                }
            }
        }

        if !installed.is_empty() {
            tracing::info!(count = installed.len(), "Installed extensions");
        }
        Ok(installed)
    }

    /// Validate `manifest` and write its record.
    ///
    /// Returns `Ok(false)` when a required field fails validation or `tier`
    /// is `core`; nothing is written then. Failing optional fields are
    /// replaced by their defaults, which must be valid themselves. The
    /// record is written in one step, so a failed write leaves no trace. When `tier` has a package for the
    /// manifest, module references are checked against it.
    pub fn save_settings(&mut self, manifest: &ExtensionManifest, tier: LibraryTier) -> Result<bool> {
        if tier == LibraryTier::Core {
            tracing::warn!(extension = %manifest.name, "Refusing to install from the core library");
            return Ok(false);
        }

        let package = self
            .store(tier)
            .find(&manifest.name)
            .map(|loaded| loaded.package.clone());
        let validator = match package {
            Some(package) => match ConfigValidator::with_package(manifest, &package) {
                Ok(validator) => validator,
                Err(e) => {
                    tracing::warn!(extension = %manifest.name, error = %e, "Package unreadable");
                    return Ok(false);
                }
            },
            None => ConfigValidator::new(manifest),
        };
        let mut validator = validator.for_host(self.host);

        if !validator.validate_all() {
            if let Some(key) = validator.errors().iter().find(|key| key.is_required()) {
                tracing::warn!(extension = %manifest.name, key = %key, "Required field is invalid");
                return Ok(false);
            }
            if validator.errors().contains(&ConfigKey::MenuItem) && !validator.menu_item_fallback() {
                tracing::warn!(extension = %manifest.name, "Name is not a valid menu item");
                return Ok(false);
            }
            for key in validator.errors() {
                tracing::warn!(extension = %manifest.name, key = %key, "Invalid value replaced by default");
            }
        }

        let record = InstalledExtension::from_manifest(manifest, tier, validator.errors());
        let values = ConfigKey::ALL
            .into_iter()
            .map(|key| (key.as_str().to_string(), record.value(key)))
            .collect();
        self.settings
            .replace_group(&Self::extension_path(&record.name), values)?;

        tracing::info!(extension = %record.name, tier = %tier, "Saved extension settings");
        Ok(true)
    }

    /// Delete the record of `name`. Returns whether one existed.
    pub fn remove_extension_settings(&mut self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let removed = self.settings.remove(&Self::extension_path(name))?;
        if removed {
            tracing::info!(extension = %name, "Removed extension settings");
        }
        Ok(removed)
    }

    /// One stored field of an installed extension.
    pub fn get_property(&self, name: &str, key: &str) -> Result<SettingValue> {
        let key = Self::parse_key(key)?;
        if !self.check_installed(Some(name)) {
            return Err(Error::NotInstalled(name.to_string()));
        }
        self.settings
            .get(&Self::extension_path(name).child(key.as_str()))
            .ok_or_else(|| Error::PropertyMissing {
                name: name.to_string(),
                key,
            })
    }

    /// Every installed extension, in name order, whose `key` matches
    /// `value`.
    pub fn get_extension_from_property(
        &self,
        key: &str,
        value: &SettingValue,
    ) -> Result<Vec<String>> {
        let key = Self::parse_key(key)?;
        let root = KeyPath::from(EXTENSIONS_GROUP);
        Ok(self
            .settings
            .groups(&root)
            .into_iter()
            .filter(|name| {
                self.settings
                    .get(&root.child(name.as_str()).child(key.as_str()))
                    .is_some_and(|stored| stored.matches(value))
            })
            .collect())
    }

    /// The full record of an installed extension.
    pub fn get_config(&self, name: &str) -> Result<InstalledExtension> {
        if !self.check_installed(Some(name)) {
            return Err(Error::NotInstalled(name.to_string()));
        }
        let group = Self::extension_path(name);
        let field = |key: ConfigKey| {
            self.settings
                .get(&group.child(key.as_str()))
                .ok_or_else(|| Error::PropertyMissing {
                    name: name.to_string(),
                    key,
                })
        };
        let text = |key: ConfigKey| -> Result<String> { Ok(field(key)?.to_string()) };

        let menu_level = match field(ConfigKey::MenuLevel)? {
            SettingValue::Integer(level) => level,
            other => other.to_string().parse::<i64>().map_err(|_| Error::PropertyMissing {
                name: name.to_string(),
                key: ConfigKey::MenuLevel,
            })?,
        };
        let initialized = match field(ConfigKey::Initialized)? {
            SettingValue::Bool(flag) => flag,
            other => other.to_string() == "true",
        };

        Ok(InstalledExtension {
            name: text(ConfigKey::Name)?,
            main: text(ConfigKey::Main)?,
            settings: text(ConfigKey::Settings)?,
            toolbar: text(ConfigKey::Toolbar)?,
            tests: text(ConfigKey::Tests)?,
            parent: text(ConfigKey::Parent)?,
            menu_item: text(ConfigKey::MenuItem)?,
            menu_level,
            tier: text(ConfigKey::Type)?.parse()?,
            initialized,
        })
    }

    /// Enable or disable an installed extension.
    pub fn set_initialized(&mut self, name: &str, enabled: bool) -> Result<()> {
        if !self.check_installed(Some(name)) {
            return Err(Error::NotInstalled(name.to_string()));
        }
        let path = Self::extension_path(name).child(ConfigKey::Initialized.as_str());
        self.settings.set(&path, enabled.into())?;
        tracing::info!(extension = %name, enabled, "Changed extension state");
        Ok(())
    }

    /// Build the `kind` interface (`main`, `settings` or `toolbar`) of an
    /// installed, initialized extension.
    pub fn load_user_interface(&mut self, name: &str, kind: &str) -> Result<UserInterface> {
        let kind: UiKind = kind
            .parse()
            .map_err(|_| Error::InvalidUiKind(kind.to_string()))?;
        let record = self.get_config(name)?;
        if !record.initialized {
            return Err(Error::NotInitialized(name.to_string()));
        }

        if self.libraries.get(record.tier).is_none() {
            return Err(Error::LibraryNotConfigured(record.tier));
        }
        let package = self
            .store(record.tier)
            .find(name)
            .map(|loaded| loaded.package.clone())
            .ok_or_else(|| Error::PackageNotFound {
                name: name.to_string(),
                tier: record.tier,
            })?;
        let archive = PackageArchive::open(&package)?;

        let module = record.module(kind);
        if !archive.has_module(module) {
            return Err(Error::ModuleNotFound {
                name: name.to_string(),
                module: module.to_string(),
            });
        }

        let request = LoadRequest {
            extension: &record,
            kind,
            module,
            package: &archive,
        };
        let interface = self.loader.load(&request)?;
        tracing::debug!(extension = %name, kind = %kind, module, "Loaded user interface");
        Ok(interface)
    }
}
