//! Extension manifest parsing.
//!
//! Every package carries exactly one manifest member whose name ends with
//! [`MANIFEST_SUFFIX`]. The member holds a JSON object describing how the
//! host should expose the extension.
//!
//! # Example
//!
//! ```json
//! {
//!   "name": "sample_ext",
//!   "main": "main",
//!   "toolbar": "test_bar",
//!   "tests": "units",
//!   "parent": "Tools",
//!   "menu_item": "Sample",
//!   "menu_level": 10
//! }
//! ```
//!
//! Only `name` is mandatory. Absent fields resolve to their defaults through
//! the accessor methods; the raw `Option`s are kept so callers can tell a
//! default apart from an explicit value.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::key::UiKind;

/// Suffix identifying the manifest member inside a package.
pub const MANIFEST_SUFFIX: &str = ".conf";

pub const DEFAULT_MAIN: &str = "main";
pub const DEFAULT_TESTS: &str = "tests";
pub const DEFAULT_PARENT: &str = "Extensions";
pub const DEFAULT_MENU_LEVEL: i64 = 10;

/// A parsed extension manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionManifest {
    /// Unique extension name. Empty when the manifest omitted it.
    #[serde(default)]
    pub name: String,
    /// Module holding the main view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// Module holding the settings menu. Defaults to `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    /// Module holding the toolbar. Defaults to `main`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toolbar: Option<String>,
    /// Module holding the extension's test entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tests: Option<String>,
    /// Menu grouping label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Menu entry text. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_item: Option<String>,
    /// Ordering weight inside the parent menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_level: Option<i64>,
}

impl ExtensionManifest {
    /// Create a manifest carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Serialize the manifest back to JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether the manifest names its extension at all.
    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn main(&self) -> &str {
        self.main.as_deref().unwrap_or(DEFAULT_MAIN)
    }

    /// Module for a user interface kind, falling back to `main`.
    pub fn gui(&self, kind: UiKind) -> &str {
        let explicit = match kind {
            UiKind::Main => self.main.as_deref(),
            UiKind::Settings => self.settings.as_deref(),
            UiKind::Toolbar => self.toolbar.as_deref(),
        };
        explicit.unwrap_or_else(|| self.main())
    }

    pub fn tests(&self) -> &str {
        self.tests.as_deref().unwrap_or(DEFAULT_TESTS)
    }

    pub fn parent(&self) -> &str {
        self.parent.as_deref().unwrap_or(DEFAULT_PARENT)
    }

    pub fn menu_item(&self) -> &str {
        self.menu_item.as_deref().unwrap_or(&self.name)
    }

    pub fn menu_level(&self) -> i64 {
        self.menu_level.unwrap_or(DEFAULT_MENU_LEVEL)
    }
}
