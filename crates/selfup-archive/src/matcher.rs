//! Executable name matching.

use selfup_platform::TargetPlatform;

/// Whether `candidate` names the executable for `command` on `platform`.
///
/// The bare command name always matches. Release assets that ship one
/// binary per platform often name it `command_os_arch` or
/// `command-os-arch` (with `.exe` on Windows), so those match too.
pub fn matches(command: &str, candidate: &str, platform: &TargetPlatform) -> bool {
    command == candidate
        || platform
            .qualified_names(command)
            .iter()
            .any(|name| name == candidate)
}

/// File name portion of an archive member path.
///
/// Both separators are honoured since zip archives produced on Windows may
/// store `\` in member names.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
