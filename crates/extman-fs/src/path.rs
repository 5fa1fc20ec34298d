//! Normalized member paths for package archives

use std::path::Path;

/// A path normalized to use forward slashes internally.
///
/// Package archives are produced on every host family, so member names may
/// arrive with backslashes, `./` prefixes or doubled separators. All of them
/// are reduced to a single canonical form before lookup. `..` segments are
/// kept verbatim so callers can reject them with [`NormalizedPath::escapes`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
    absolute: bool,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/') || has_drive_prefix(&raw);
        let inner = raw
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self { inner, absolute }
    }

    /// Get the internal normalized string representation.
    ///
    /// A leading `/` is never part of the representation; use
    /// [`NormalizedPath::is_absolute`] to recover that information.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether the original path was rooted (`/x`, `C:/x`).
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Whether any segment walks up the tree.
    pub fn escapes(&self) -> bool {
        self.segments().any(|segment| segment == "..")
    }

    /// Whether the path is empty after normalization (`.`, `./`, ``).
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether the path names an entry directly at the archive root.
    pub fn is_root_level(&self) -> bool {
        !self.inner.is_empty() && !self.inner.contains('/')
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let joined = if self.inner.is_empty() {
            segment.to_string()
        } else {
            format!("{}/{}", self.inner, segment)
        };
        let mut path = Self::new(joined);
        path.absolute = self.absolute;
        path
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Check whether this root-level member provides the module `stem`.
    ///
    /// `main` is provided by a member named `main` or `main.<anything>`.
    pub fn provides_module(&self, stem: &str) -> bool {
        if stem.is_empty() || !self.is_root_level() {
            return false;
        }
        match self.inner.strip_prefix(stem) {
            Some("") => true,
            Some(rest) => rest.len() > 1 && rest.starts_with('.'),
            None => false,
        }
    }
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.absolute && !has_drive_prefix(&self.inner) {
            write!(f, "/{}", self.inner)
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("./main.py", "main.py")]
    #[case("ui//test.ui", "ui/test.ui")]
    #[case("ui\\Ui_test.py", "ui/Ui_test.py")]
    #[case("./", "")]
    #[case("a/./b", "a/b")]
    fn normalizes_member_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(NormalizedPath::new(input).as_str(), expected);
    }

    #[test]
    fn detects_absolute_and_traversal() {
        assert!(NormalizedPath::new("/etc/passwd").is_absolute());
        assert!(NormalizedPath::new("C:\\Windows").is_absolute());
        assert!(!NormalizedPath::new("main.py").is_absolute());

        assert!(NormalizedPath::new("../outside").escapes());
        assert!(NormalizedPath::new("a/../../b").escapes());
        assert!(!NormalizedPath::new("a/..b/c").escapes());
    }

    #[rstest]
    #[case("main", "main", true)]
    #[case("main.py", "main", true)]
    #[case("main.tar.gz", "main", true)]
    #[case("mainline.py", "main", false)]
    #[case("main.", "main", false)]
    #[case("ui/main.py", "main", false)]
    #[case("main.py", "", false)]
    fn module_lookup_matches_stem(#[case] member: &str, #[case] stem: &str, #[case] hit: bool) {
        assert_eq!(NormalizedPath::new(member).provides_module(stem), hit);
    }

    #[test]
    fn display_restores_root() {
        assert_eq!(NormalizedPath::new("/a/b").to_string(), "/a/b");
        assert_eq!(NormalizedPath::new("a/b").join("c.conf").to_string(), "a/b/c.conf");
    }

    #[test]
    fn extension_and_file_name() {
        let path = NormalizedPath::new("ui/test.conf");
        assert_eq!(path.file_name(), Some("test.conf"));
        assert_eq!(path.extension(), Some("conf"));
        assert_eq!(NormalizedPath::new(".hidden").extension(), None);
    }
}
