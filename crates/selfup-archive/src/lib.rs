//! Locate a command's executable inside a downloaded release asset.
//!
//! Given the raw bytes of an asset, the URL (or file name) it came from and
//! the command being updated, [`extract_command`] unwraps whatever
//! compression or archive the URL's suffix announces and returns a reader
//! over the executable's bytes.
//!
//! # Architecture
//!
//! - `format.rs` - Suffix table, pipeline selection and stage tagging
//! - `matcher.rs` - Executable name matching per target platform
//! - `extract/` - Per-format scanners and the returned reader
//! - `options.rs` - Per-call settings

pub use error::{Error, Result};
pub use extract::{CommandReader, extract_command, extract_command_with};
pub use format::{Pipeline, SUFFIXES, Stage};
pub use matcher::{base_name, matches};
pub use options::ExtractOptions;
pub use selfup_platform::{Arch, Os, TargetPlatform};

mod error;
pub mod extract;
pub mod format;
pub mod matcher;
pub mod options;
