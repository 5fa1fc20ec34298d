//! Scalar values stored at the leaves of the settings tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar setting.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Loose comparison: equal values, or values with the same text form.
    ///
    /// `Text("10")` matches `Integer(10)`; `Text("true")` matches `Bool(true)`.
    pub fn matches(&self, other: &SettingValue) -> bool {
        self == other || self.to_string() == other.to_string()
    }

    /// Convert a TOML value. Tables, arrays, floats and datetimes have no
    /// setting counterpart.
    pub fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::String(text) => Some(Self::Text(text.clone())),
            toml::Value::Integer(value) => Some(Self::Integer(*value)),
            toml::Value::Boolean(value) => Some(Self::Bool(*value)),
            _ => None,
        }
    }
}

impl From<SettingValue> for toml::Value {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Text(text) => toml::Value::String(text),
            SettingValue::Integer(value) => toml::Value::Integer(value),
            SettingValue::Bool(value) => toml::Value::Boolean(value),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
