//! Operating system identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Operating system families a release asset can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Darwin,
    Linux,
    FreeBsd,
    NetBsd,
    OpenBsd,
    Dragonfly,
    Solaris,
    Illumos,
    Android,
    Ios,
    Unknown,
}

impl Os {
    /// Operating system the running binary was compiled for.
    pub fn current() -> Self {
        Self::from_rust_name(std::env::consts::OS).unwrap_or(Self::Unknown)
    }

    /// Spelling used in release asset names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::FreeBsd => "freebsd",
            Self::NetBsd => "netbsd",
            Self::OpenBsd => "openbsd",
            Self::Dragonfly => "dragonfly",
            Self::Solaris => "solaris",
            Self::Illumos => "illumos",
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }

    fn from_rust_name(name: &str) -> Option<Self> {
        let os = match name {
            "windows" => Self::Windows,
            "macos" | "darwin" => Self::Darwin,
            "linux" => Self::Linux,
            "freebsd" => Self::FreeBsd,
            "netbsd" => Self::NetBsd,
            "openbsd" => Self::OpenBsd,
            "dragonfly" => Self::Dragonfly,
            "solaris" => Self::Solaris,
            "illumos" => Self::Illumos,
            "android" => Self::Android,
            "ios" => Self::Ios,
            _ => return None,
        };
        Some(os)
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            other => Self::from_rust_name(other).ok_or_else(|| Error::UnknownOs(s.to_string())),
        }
    }
}
