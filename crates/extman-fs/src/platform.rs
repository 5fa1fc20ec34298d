//! Host operating system families and their file naming rules.

use std::path::Path;

/// Longest bare file name accepted by POSIX-like file systems.
pub const NAME_MAX: usize = 255;

/// Longest full path accepted by Windows-like file systems.
pub const WINDOWS_MAX_PATH: usize = 260;

/// The desktop platform families the manager knows how to lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostFamily {
    /// Windows and Windows-like hosts.
    Windows,
    /// The macOS family.
    Mac,
    /// Linux and every other POSIX host.
    Posix,
}

/// How long a path-like value may be on a host family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathLimit {
    /// Limit applies to the full path, directory included.
    FullPath(usize),
    /// Limit applies to the bare file name.
    FileName(usize),
}

impl HostFamily {
    /// The family of the host this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Posix
        }
    }

    /// Characters that may not appear in a file name on this family.
    pub fn reserved_chars(&self) -> &'static [char] {
        match self {
            Self::Windows => &['|', '\\', '?', '*', '<', '"', ':', '>', '+', '[', ']', '/'],
            Self::Mac => &[':'],
            Self::Posix => &['/', '\0'],
        }
    }

    /// The length limit that applies on this family.
    pub fn path_limit(&self) -> PathLimit {
        match self {
            Self::Windows => PathLimit::FullPath(WINDOWS_MAX_PATH),
            Self::Mac | Self::Posix => PathLimit::FileName(NAME_MAX),
        }
    }

    /// Check that `name` only uses characters allowed on this family.
    pub fn allows_chars(&self, name: &str) -> bool {
        let reserved = self.reserved_chars();
        !name
            .chars()
            .any(|c| c.is_control() || reserved.contains(&c))
    }

    /// Check that `name`, placed inside `dir`, fits the length limit.
    ///
    /// Without a directory the full-path rule degrades to checking the
    /// bare name against the same limit.
    pub fn allows_length(&self, name: &str, dir: Option<&Path>) -> bool {
        match self.path_limit() {
            PathLimit::FileName(max) => name.len() <= max,
            PathLimit::FullPath(max) => {
                let full = match dir {
                    Some(dir) => dir.join(name).to_string_lossy().chars().count(),
                    None => name.chars().count(),
                };
                full <= max
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Posix => "posix",
        }
    }
}

impl std::fmt::Display for HostFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(HostFamily::Windows, "bad:name", false)]
    #[case(HostFamily::Windows, "what?", false)]
    #[case(HostFamily::Windows, "sample_ext", true)]
    #[case(HostFamily::Mac, "bad:name", false)]
    #[case(HostFamily::Mac, "slash/ok-on-hfs", true)]
    #[case(HostFamily::Posix, "a/b", false)]
    #[case(HostFamily::Posix, "nul\0byte", false)]
    #[case(HostFamily::Posix, "colon:fine", true)]
    fn reserved_characters_per_family(
        #[case] family: HostFamily,
        #[case] name: &str,
        #[case] allowed: bool,
    ) {
        assert_eq!(family.allows_chars(name), allowed);
    }

    #[test]
    fn control_characters_rejected_everywhere() {
        for family in [HostFamily::Windows, HostFamily::Mac, HostFamily::Posix] {
            assert!(!family.allows_chars("tab\there"), "{family} accepted a tab");
        }
    }

    #[test]
    fn file_name_limit_on_posix() {
        let family = HostFamily::Posix;
        assert!(family.allows_length(&"a".repeat(NAME_MAX), None));
        assert!(!family.allows_length(&"a".repeat(NAME_MAX + 1), None));
    }

    #[test]
    fn full_path_limit_on_windows_counts_directory() {
        let family = HostFamily::Windows;
        let dir = Path::new("C:/Users/someone/AppData/Local/App/extension_data");
        let name = "a".repeat(WINDOWS_MAX_PATH - 10);
        assert!(family.allows_length(&name, None));
        assert!(!family.allows_length(&name, Some(dir)));
    }
}
