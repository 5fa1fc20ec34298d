//! The persisted projection of an installed extension.

use extman_package::{ConfigKey, ExtensionManifest, UiKind};
use extman_settings::SettingValue;
use serde::{Deserialize, Serialize};

use crate::library::LibraryTier;

/// An installed extension as stored under `extensions/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstalledExtension {
    pub name: String,
    pub main: String,
    pub settings: String,
    pub toolbar: String,
    pub tests: String,
    pub parent: String,
    pub menu_item: String,
    pub menu_level: i64,
    /// Tier the extension was installed from.
    #[serde(rename = "type")]
    pub tier: LibraryTier,
    /// Whether the extension is enabled.
    pub initialized: bool,
}

impl InstalledExtension {
    /// Resolve every field of `manifest`. Keys listed in `rejected` take
    /// their default instead of the manifest's value.
    pub fn from_manifest(
        manifest: &ExtensionManifest,
        tier: LibraryTier,
        rejected: &[ConfigKey],
    ) -> Self {
        let mut resolved = manifest.clone();
        for key in rejected {
            match key {
                ConfigKey::Tests => resolved.tests = None,
                ConfigKey::Parent => resolved.parent = None,
                ConfigKey::MenuItem => resolved.menu_item = None,
                ConfigKey::MenuLevel => resolved.menu_level = None,
                _ => {}
            }
        }

        Self {
            name: resolved.name.clone(),
            main: resolved.main().to_string(),
            settings: resolved.gui(UiKind::Settings).to_string(),
            toolbar: resolved.gui(UiKind::Toolbar).to_string(),
            tests: resolved.tests().to_string(),
            parent: resolved.parent().to_string(),
            menu_item: resolved.menu_item().to_string(),
            menu_level: resolved.menu_level(),
            tier,
            initialized: true,
        }
    }

    /// The module serving `kind`.
    pub fn module(&self, kind: UiKind) -> &str {
        match kind {
            UiKind::Main => &self.main,
            UiKind::Settings => &self.settings,
            UiKind::Toolbar => &self.toolbar,
        }
    }

    /// The stored form of one field.
    pub fn value(&self, key: ConfigKey) -> SettingValue {
        match key {
            ConfigKey::Name => self.name.as_str().into(),
            ConfigKey::Main => self.main.as_str().into(),
            ConfigKey::Settings => self.settings.as_str().into(),
            ConfigKey::Toolbar => self.toolbar.as_str().into(),
            ConfigKey::Tests => self.tests.as_str().into(),
            ConfigKey::Parent => self.parent.as_str().into(),
            ConfigKey::MenuItem => self.menu_item.as_str().into(),
            ConfigKey::MenuLevel => self.menu_level.into(),
            ConfigKey::Type => self.tier.as_str().into(),
            ConfigKey::Initialized => self.initialized.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejected_optional_fields_take_defaults() {
        let mut manifest = ExtensionManifest::new("sample_ext");
        manifest.parent = Some("X".into());
        manifest.menu_level = Some(0);
        manifest.menu_item = Some("Sample".into());

        let record = InstalledExtension::from_manifest(
            &manifest,
            LibraryTier::User,
            &[ConfigKey::Parent, ConfigKey::MenuLevel],
        );

        assert_eq!(record.parent, "Extensions");
        assert_eq!(record.menu_level, 10);
        assert_eq!(record.menu_item, "Sample");
        assert!(record.initialized);
    }

    #[test]
    fn serializes_tier_as_type() {
        let record = InstalledExtension::from_manifest(
            &ExtensionManifest::new("sample_ext"),
            LibraryTier::Global,
            &[],
        );
        assert_eq!(record.value(ConfigKey::Type), SettingValue::from("global"));
        assert_eq!(record.value(ConfigKey::Initialized), SettingValue::from(true));
        assert_eq!(record.module(UiKind::Toolbar), "main");
    }
}
