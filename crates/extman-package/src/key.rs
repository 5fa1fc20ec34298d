//! The closed sets of record keys and user interface kinds.

use std::str::FromStr;

use crate::error::Error;

/// A field of an installed extension record.
///
/// The first eight variants mirror the manifest; `Type` and `Initialized`
/// are owned by the manager and only exist on installed records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    Name,
    Main,
    Settings,
    Toolbar,
    Tests,
    Parent,
    MenuItem,
    MenuLevel,
    Type,
    Initialized,
}

impl ConfigKey {
    /// Fields that come from a manifest.
    pub const MANIFEST: [ConfigKey; 8] = [
        Self::Name,
        Self::Main,
        Self::Settings,
        Self::Toolbar,
        Self::Tests,
        Self::Parent,
        Self::MenuItem,
        Self::MenuLevel,
    ];

    /// Every field of an installed record.
    pub const ALL: [ConfigKey; 10] = [
        Self::Name,
        Self::Main,
        Self::Settings,
        Self::Toolbar,
        Self::Tests,
        Self::Parent,
        Self::MenuItem,
        Self::MenuLevel,
        Self::Type,
        Self::Initialized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Main => "main",
            Self::Settings => "settings",
            Self::Toolbar => "toolbar",
            Self::Tests => "tests",
            Self::Parent => "parent",
            Self::MenuItem => "menu_item",
            Self::MenuLevel => "menu_level",
            Self::Type => "type",
            Self::Initialized => "initialized",
        }
    }

    /// Whether this field comes from a manifest rather than the manager.
    pub fn is_manifest(&self) -> bool {
        Self::MANIFEST.contains(self)
    }

    /// Whether a failure on this field rejects a whole install.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Name | Self::Main | Self::Settings | Self::Toolbar)
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::InvalidKey(s.to_string()))
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the three user interface entry points an extension exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKind {
    Main,
    Settings,
    Toolbar,
}

impl UiKind {
    pub const ALL: [UiKind; 3] = [Self::Main, Self::Settings, Self::Toolbar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Settings => "settings",
            Self::Toolbar => "toolbar",
        }
    }

    /// The record field naming the module for this kind.
    pub fn key(&self) -> ConfigKey {
        match self {
            Self::Main => ConfigKey::Main,
            Self::Settings => ConfigKey::Settings,
            Self::Toolbar => ConfigKey::Toolbar,
        }
    }
}

impl FromStr for UiKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidUiKind(s.to_string()))
    }
}

impl std::fmt::Display for UiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_names() {
        for key in ConfigKey::ALL {
            assert_eq!(key.as_str().parse::<ConfigKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "bogus_field".parse::<ConfigKey>().unwrap_err();
        assert!(matches!(err, Error::InvalidKey(ref k) if k == "bogus_field"));
    }

    #[test]
    fn only_name_and_gui_fields_are_required() {
        let required: Vec<_> = ConfigKey::ALL.into_iter().filter(ConfigKey::is_required).collect();
        assert_eq!(
            required,
            vec![ConfigKey::Name, ConfigKey::Main, ConfigKey::Settings, ConfigKey::Toolbar]
        );
    }

    #[test]
    fn manager_owned_keys_are_not_manifest_fields() {
        assert!(ConfigKey::MenuLevel.is_manifest());
        assert!(!ConfigKey::Type.is_manifest());
        assert!(!ConfigKey::Initialized.is_manifest());
    }

    #[test]
    fn ui_kinds_map_to_their_fields() {
        assert_eq!("toolbar".parse::<UiKind>().unwrap().key(), ConfigKey::Toolbar);
        assert!(matches!(
            "pineapple".parse::<UiKind>(),
            Err(Error::InvalidUiKind(_))
        ));
    }
}
