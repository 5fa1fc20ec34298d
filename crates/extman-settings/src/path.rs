//! Slash-separated paths into the settings tree.

use std::fmt;

/// A path into the settings tree.
///
/// Paths are explicit on every store call; there is no cursor into the tree.
///
/// ```
/// use extman_settings::KeyPath;
///
/// let path = KeyPath::from("extensions").child("sample_ext").child("main");
/// assert_eq!(path.to_string(), "extensions/sample_ext/main");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The root of the tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from individual segments. Empty segments are dropped.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|segment: &String| !segment.is_empty())
                .collect(),
        }
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        let segment = segment.into();
        if !segment.is_empty() {
            path.segments.push(segment);
        }
        path
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<KeyPath> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::new(path.split('/'))
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self::from(path.as_str())
    }
}
