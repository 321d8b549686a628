use selfup_platform::TargetPlatform;

/// Settings for a single extraction call.
#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub platform: TargetPlatform,
}

impl ExtractOptions {
    /// Platform whose qualified executable names are accepted.
    /// Defaults to the platform of the running binary.
    pub fn platform(mut self, platform: TargetPlatform) -> Self {
        self.platform = platform;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfup_platform::{Arch, Os};

    #[test]
    fn default_targets_current_platform() {
        assert_eq!(ExtractOptions::default().platform, TargetPlatform::current());
    }

    #[test]
    fn platform_override() {
        let platform = TargetPlatform::new(Os::Windows, Arch::X86);
        let options = ExtractOptions::default().platform(platform);
        assert_eq!(options.platform, platform);
    }
}
