//! Architecture identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// CPU architectures a release asset can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Arm64,
    Riscv64,
    Ppc64,
    Ppc64le,
    S390x,
    Mips,
    Mipsle,
    Mips64,
    Mips64le,
    Loong64,
    Wasm32,
    Unknown,
}

impl Arch {
    /// Architecture the running binary was compiled for.
    pub fn current() -> Self {
        // consts::ARCH does not carry endianness
        let little = cfg!(target_endian = "little");
        match std::env::consts::ARCH {
            "powerpc64" if little => Self::Ppc64le,
            "mips" if little => Self::Mipsle,
            "mips64" if little => Self::Mips64le,
            arch => Self::from_name(arch).unwrap_or(Self::Unknown),
        }
    }

    /// Spelling used in release asset names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86 => "386",
            Self::X86_64 => "amd64",
            Self::Arm => "arm",
            Self::Arm64 => "arm64",
            Self::Riscv64 => "riscv64",
            Self::Ppc64 => "ppc64",
            Self::Ppc64le => "ppc64le",
            Self::S390x => "s390x",
            Self::Mips => "mips",
            Self::Mipsle => "mipsle",
            Self::Mips64 => "mips64",
            Self::Mips64le => "mips64le",
            Self::Loong64 => "loong64",
            Self::Wasm32 => "wasm",
            Self::Unknown => "unknown",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let arch = match name {
            "386" | "x86" | "i386" | "i586" | "i686" => Self::X86,
            "amd64" | "x86_64" => Self::X86_64,
            "arm" | "armv7" | "armv7l" => Self::Arm,
            "arm64" | "aarch64" => Self::Arm64,
            "riscv64" => Self::Riscv64,
            "ppc64" | "powerpc64" => Self::Ppc64,
            "ppc64le" | "powerpc64le" => Self::Ppc64le,
            "s390x" => Self::S390x,
            "mips" => Self::Mips,
            "mipsle" | "mipsel" => Self::Mipsle,
            "mips64" => Self::Mips64,
            "mips64le" | "mips64el" => Self::Mips64le,
            "loong64" | "loongarch64" => Self::Loong64,
            "wasm" | "wasm32" => Self::Wasm32,
            _ => return None,
        };
        Some(arch)
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(Self::Unknown),
            other => Self::from_name(other).ok_or_else(|| Error::UnknownArch(s.to_string())),
        }
    }
}
