//! Process-local settings.

use crate::error::Result;
use crate::path::KeyPath;
use crate::store::SettingsStore;
use crate::tree::SettingsTree;
use crate::value::SettingValue;

/// A settings store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    tree: SettingsTree,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the current tree as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self.tree.table())?)
    }
}

impl SettingsStore for MemorySettings {
    fn groups(&self, path: &KeyPath) -> Vec<String> {
        self.tree.groups(path)
    }

    fn keys(&self, path: &KeyPath) -> Vec<String> {
        self.tree.keys(path)
    }

    fn get(&self, path: &KeyPath) -> Option<SettingValue> {
        self.tree.get(path)
    }

    fn set(&mut self, path: &KeyPath, value: SettingValue) -> Result<()> {
        self.tree.set(path, value)
    }

    fn replace_group(&mut self, path: &KeyPath, values: Vec<(String, SettingValue)>) -> Result<()> {
        self.tree.replace_group(path, values)
    }

    fn remove(&mut self, path: &KeyPath) -> Result<bool> {
        self.tree.remove(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(text: &str) -> KeyPath {
        KeyPath::from(text)
    }

    #[test]
    fn values_round_trip() {
        let mut settings = MemorySettings::new();
        settings.set(&path("extensions/a_ext/menu_level"), 10_i64.into()).unwrap();
        settings.set(&path("extensions/a_ext/initialized"), true.into()).unwrap();

        assert_eq!(
            settings.get(&path("extensions/a_ext/menu_level")),
            Some(SettingValue::Integer(10))
        );
        assert_eq!(
            settings.get(&path("extensions/a_ext/initialized")),
            Some(SettingValue::Bool(true))
        );
        assert_eq!(settings.get(&path("extensions/a_ext/missing")), None);
    }

    #[test]
    fn remove_drops_whole_group() {
        let mut settings = MemorySettings::new();
        settings.set(&path("extensions/a_ext/main"), "main".into()).unwrap();
        settings.set(&path("extensions/b_ext/main"), "main".into()).unwrap();

        assert!(settings.remove(&path("extensions/a_ext")).unwrap());
        assert!(!settings.remove(&path("extensions/a_ext")).unwrap());
        assert_eq!(settings.groups(&path("extensions")), vec!["b_ext"]);
    }

    #[test]
    fn contains_group_checks_parent_listing() {
        let mut settings = MemorySettings::new();
        settings.set(&path("extensions/a_ext/main"), "main".into()).unwrap();

        assert!(settings.contains_group(&path("extensions/a_ext")));
        assert!(!settings.contains_group(&path("extensions/a_ext/main")));
        assert!(!settings.contains_group(&path("extensions/b_ext")));
    }

    #[test]
    fn renders_nested_tables() {
        let mut settings = MemorySettings::new();
        settings.set(&path("extensions/a_ext/parent"), "Tools".into()).unwrap();

        let rendered = settings.to_toml().unwrap();
        assert!(rendered.contains("[extensions.a_ext]"), "{rendered}");
        assert!(rendered.contains("parent = \"Tools\""), "{rendered}");
    }
}
