use std::fmt;
use std::str::FromStr;

use crate::arch::Arch;
use crate::error::Error;
use crate::os::Os;

/// The operating system and architecture an executable is looked up for.
///
/// Passed explicitly to name matching so that any combination can be
/// exercised without depending on the machine running the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetPlatform {
    os: Os,
    arch: Arch,
}

impl TargetPlatform {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Platform of the running binary.
    pub fn current() -> Self {
        Self::new(Os::current(), Arch::current())
    }

    pub fn os(&self) -> Os {
        self.os
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    /// Names under which a release asset may ship `command` for this
    /// platform, besides the bare name.
    ///
    /// Returns `command_os_arch` then `command-os-arch`, each with an `.exe`
    /// extension on Windows.
    pub fn qualified_names(&self, command: &str) -> [String; 2] {
        let ext = if self.os.is_windows() { ".exe" } else { "" };
        ['_', '-'].map(|sep| format!("{command}{sep}{}{sep}{}{ext}", self.os, self.arch))
    }
}

impl Default for TargetPlatform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

impl FromStr for TargetPlatform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (os, arch) = s
            .split_once('/')
            .ok_or_else(|| Error::InvalidTarget(s.to_string()))?;
        Ok(Self::new(os.parse()?, arch.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn qualified_names_unix() {
        let platform = TargetPlatform::new(Os::Darwin, Arch::X86_64);
        assert_eq!(
            platform.qualified_names("foo"),
            ["foo_darwin_amd64".to_string(), "foo-darwin-amd64".to_string()]
        );
    }

    #[test]
    fn qualified_names_windows_have_exe() {
        let platform = TargetPlatform::new(Os::Windows, Arch::Arm64);
        assert_eq!(
            platform.qualified_names("foo"),
            [
                "foo_windows_arm64.exe".to_string(),
                "foo-windows-arm64.exe".to_string()
            ]
        );
    }

    #[test]
    fn parse_target() {
        let platform: TargetPlatform = "linux/arm64".parse().unwrap();
        assert_eq!(platform, TargetPlatform::new(Os::Linux, Arch::Arm64));
        assert_eq!(platform.to_string(), "linux/arm64");

        let platform: TargetPlatform = "macos/x86_64".parse().unwrap();
        assert_eq!(platform.to_string(), "darwin/amd64");
    }

    #[test]
    fn parse_target_errors() {
        assert_eq!(
            "linux".parse::<TargetPlatform>(),
            Err(Error::InvalidTarget("linux".to_string()))
        );
        assert_eq!(
            "linux/z80".parse::<TargetPlatform>(),
            Err(Error::UnknownArch("z80".to_string()))
        );
    }

    proptest! {
        #[test]
        fn qualified_names_keep_command_prefix(command in "[a-z][a-z0-9_-]{0,15}") {
            let platform = TargetPlatform::new(Os::Linux, Arch::Riscv64);
            for name in platform.qualified_names(&command) {
                prop_assert!(name.starts_with(&command));
                prop_assert!(name.ends_with("linux_riscv64") || name.ends_with("linux-riscv64"));
            }
        }
    }
}
