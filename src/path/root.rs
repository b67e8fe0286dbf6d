//! Root detection strategies.
//!
//! A `RootResolver` decides whether a path is anchored and where its root prefix
//! ends. The strategy is picked once (config, CLI or host default) and handed to
//! the normalizer and the tree operations, which stay platform-agnostic.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub trait RootResolver: Send + Sync {
    /// Offset of the root `/` when `path` is rooted, `None` otherwise.
    fn root_offset(&self, path: &str) -> Option<usize>;

    /// Rewrite host separators into the canonical `/`.
    fn to_wire<'a>(&self, path: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(path)
    }

    fn is_rooted(&self, path: &str) -> bool {
        self.root_offset(path).is_some()
    }
}

/// `/` is the only anchor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixRoot;

impl RootResolver for PosixRoot {
    fn root_offset(&self, path: &str) -> Option<usize> {
        (path.as_bytes().first() == Some(&b'/')).then_some(0)
    }
}

/// `C:/` style anchors; plain `/` is still rooted. Backslashes are separators.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriveLetterRoot;

impl RootResolver for DriveLetterRoot {
    fn root_offset(&self, path: &str) -> Option<usize> {
        let b = path.as_bytes();
        let offset = if b.len() >= 2 && b[0].is_ascii_alphabetic() && b[1] == b':' {
            2
        } else {
            0
        };
        (b.get(offset) == Some(&b'/')).then_some(offset)
    }

    fn to_wire<'a>(&self, path: &'a str) -> Cow<'a, str> {
        if path.contains('\\') {
            Cow::Owned(path.replace('\\', "/"))
        } else {
            Cow::Borrowed(path)
        }
    }
}

/// User-selectable root strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootStyle {
    /// Drive letters on Windows, POSIX elsewhere.
    #[default]
    Host,
    Posix,
    DriveLetter,
}

static POSIX: PosixRoot = PosixRoot;
static DRIVE_LETTER: DriveLetterRoot = DriveLetterRoot;

impl RootStyle {
    /// Parse common names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "host" | "native" | "auto" => Some(RootStyle::Host),
            "posix" | "unix" => Some(RootStyle::Posix),
            "drive" | "drive-letter" | "windows" | "win32" => Some(RootStyle::DriveLetter),
            _ => None,
        }
    }

    /// Resolve `Host` into the concrete strategy for this build.
    pub fn effective(self) -> RootStyle {
        match self {
            RootStyle::Host if cfg!(windows) => RootStyle::DriveLetter,
            RootStyle::Host => RootStyle::Posix,
            other => other,
        }
    }

    pub fn resolver(self) -> &'static dyn RootResolver {
        match self.effective() {
            RootStyle::DriveLetter => &DRIVE_LETTER,
            _ => &POSIX,
        }
    }
}

impl fmt::Display for RootStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RootStyle::Host => "host",
            RootStyle::Posix => "posix",
            RootStyle::DriveLetter => "drive",
        };
        f.write_str(s)
    }
}

impl FromStr for RootStyle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid root style: '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_roots() {
        assert_eq!(PosixRoot.root_offset("/"), Some(0));
        assert_eq!(PosixRoot.root_offset("/usr/lib"), Some(0));
        assert_eq!(PosixRoot.root_offset("usr/lib"), None);
        assert_eq!(PosixRoot.root_offset(""), None);
        assert_eq!(PosixRoot.root_offset("C:/x"), None);
    }

    #[test]
    fn drive_letter_roots() {
        let r = DriveLetterRoot;
        assert_eq!(r.root_offset("C:/"), Some(2));
        assert_eq!(r.root_offset("z:/temp"), Some(2));
        assert_eq!(r.root_offset("C:temp"), None);
        assert_eq!(r.root_offset("C:"), None);
        assert_eq!(r.root_offset("/temp"), Some(0));
        assert_eq!(r.root_offset("1:/temp"), None);
        assert_eq!(r.root_offset("temp"), None);
    }

    #[test]
    fn drive_letter_rewrites_backslashes() {
        assert_eq!(DriveLetterRoot.to_wire(r"C:\a\b"), "C:/a/b");
        assert!(matches!(DriveLetterRoot.to_wire("C:/a"), Cow::Borrowed(_)));
        assert_eq!(PosixRoot.to_wire(r"a\b"), r"a\b");
    }

    #[test]
    fn style_parse_and_display() {
        assert_eq!(RootStyle::parse("POSIX"), Some(RootStyle::Posix));
        assert_eq!(RootStyle::parse("drive"), Some(RootStyle::DriveLetter));
        assert_eq!(RootStyle::parse("host"), Some(RootStyle::Host));
        assert_eq!(RootStyle::parse("mars"), None);
        for s in [RootStyle::Host, RootStyle::Posix, RootStyle::DriveLetter] {
            assert_eq!(s.to_string().parse::<RootStyle>().unwrap(), s);
        }
        assert_ne!(RootStyle::Host.effective(), RootStyle::Host);
        assert!(RootStyle::DriveLetter.resolver().is_rooted("D:/"));
        assert!(!RootStyle::Posix.resolver().is_rooted("D:/"));
    }
}
