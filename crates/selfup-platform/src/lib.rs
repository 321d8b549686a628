//! Target platform identifiers used to recognise platform-qualified
//! executables inside release assets.
//!
//! Identifiers follow the spelling release assets commonly embed in file
//! names (`darwin`, `amd64`, ...), while parsing also accepts the Rust
//! target spelling (`macos`, `x86_64`, ...).

pub use arch::Arch;
pub use error::{Error, Result};
pub use os::Os;
pub use platform::TargetPlatform;

pub mod arch;
mod error;
pub mod os;
pub mod platform;
