//! Format dispatch and the reader handed back to callers.

use std::fmt;
use std::io::{self, Read};

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::Pipeline;
use crate::options::ExtractOptions;

#[cfg(feature = "gzip")]
mod gzip;
#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "xz")]
mod xz;
#[cfg(feature = "zip")]
mod zip;

/// Readable executable content located inside a source stream.
///
/// Tar members are read straight from the decompressed stream and bounded
/// to the member, so the rest of the container is never decoded.
pub enum CommandReader<R: Read> {
    /// The source needed no unpacking.
    Passthrough(R),
    #[cfg(feature = "gzip")]
    Gzip(Box<flate2::read::MultiGzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<io::BufReader<xz2::read::XzDecoder<R>>>),
    /// Member data of a tar archive, bounded to the member's size.
    #[cfg(feature = "tar")]
    TarMember(io::Take<crate::format::StageReader<crate::format::Decoder<R>>>),
    /// Member content decoded into memory (zip members, sparse tar members).
    Buffered {
        pipeline: Pipeline,
        data: io::Cursor<Vec<u8>>,
    },
}

impl<R: Read> CommandReader<R> {
    /// Pipeline that produced this reader.
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::Passthrough(_) => Pipeline::Passthrough,
            #[cfg(feature = "gzip")]
            Self::Gzip(_) => Pipeline::Gzip,
            #[cfg(feature = "xz")]
            Self::Xz(_) => Pipeline::Xz,
            #[cfg(feature = "tar")]
            Self::TarMember(member) => member.get_ref().get_ref().pipeline(),
            Self::Buffered { pipeline, .. } => *pipeline,
        }
    }
}

impl<R: Read> fmt::Debug for CommandReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandReader")
            .field("pipeline", &self.pipeline())
            .finish_non_exhaustive()
    }
}

impl<R: Read> Read for CommandReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            #[cfg(feature = "gzip")]
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
            #[cfg(feature = "tar")]
            Self::TarMember(m) => m.read(buf),
            Self::Buffered { data, .. } => data.read(buf),
        }
    }
}

/// Locate the executable for `command` in `reader`, using the platform of
/// the running binary for qualified name matching.
///
/// See [`extract_command_with`].
pub fn extract_command<R: Read>(
    reader: R,
    source_id: &str,
    command: &str,
) -> Result<CommandReader<R>> {
    extract_command_with(reader, source_id, command, &ExtractOptions::default())
}

/// Locate the executable for `command` in `reader`.
///
/// The format is chosen from the suffix of `source_id` alone (see
/// [`Pipeline::detect`]); `source_id` is otherwise only used in errors.
/// Archives are scanned in stored order and the first member whose base
/// name matches wins.
///
/// # Memory
///
/// Zip archives keep their central directory at the end, so `.zip` sources
/// are read fully into memory before scanning, and the matched member is
/// then decompressed into a second buffer: O(archive size + member size).
/// Every other pipeline streams.
pub fn extract_command_with<R: Read>(
    reader: R,
    source_id: &str,
    command: &str,
    options: &ExtractOptions,
) -> Result<CommandReader<R>> {
    if command.is_empty() {
        return Err(Error::EmptyCommand);
    }

    let pipeline = Pipeline::detect(source_id);
    debug!(%source_id, %pipeline, %command, "selected decoding pipeline");

    #[cfg_attr(not(any(feature = "zip", feature = "gzip")), allow(unused_variables))]
    let platform = &options.platform;

    match pipeline {
        Pipeline::Passthrough => {
            debug!(%source_id, "source is not compressed");
            Ok(CommandReader::Passthrough(reader))
        }
        #[cfg(feature = "zip")]
        Pipeline::Zip => zip::find(reader, source_id, command, platform),
        #[cfg(feature = "tar")]
        Pipeline::TarGz => {
            let decoder = crate::format::gzip_decoder(reader).map_err(|err| {
                Error::decode(crate::format::Stage::Gzip, source_id, err)
            })?;
            let decoder = crate::format::Decoder::Gzip(Box::new(decoder));
            tar::find(decoder, source_id, command, platform)
        }
        #[cfg(all(feature = "tar", feature = "xz"))]
        Pipeline::TarXz => {
            let decoder = xz2::read::XzDecoder::new_multi_decoder(reader);
            let decoder = crate::format::Decoder::Xz(Box::new(decoder));
            tar::find(decoder, source_id, command, platform)
        }
        #[cfg(feature = "gzip")]
        Pipeline::Gzip => gzip::find(reader, source_id, command, platform),
        #[cfg(feature = "xz")]
        Pipeline::Xz => xz::open(reader, source_id, command),
        #[allow(unreachable_patterns)]
        unsupported => Err(Error::UnsupportedFormat {
            pipeline: unsupported,
            source_id: source_id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selfup_platform::{Arch, Os, TargetPlatform};

    #[test]
    fn empty_command_is_rejected() {
        let result = extract_command(&b"binary"[..], "https://x/tool", "");
        assert!(matches!(result, Err(Error::EmptyCommand)));
    }

    #[test]
    fn passthrough_returns_input_untouched() {
        let mut input = io::Cursor::new(b"#!/bin/sh\necho hi\n".to_vec());
        let reader = extract_command(&mut input, "https://x/releases/tool_linux_amd64", "tool")
            .unwrap();
        assert_eq!(reader.pipeline(), Pipeline::Passthrough);
        drop(reader);
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn passthrough_ignores_command_name() {
        let options =
            ExtractOptions::default().platform(TargetPlatform::new(Os::Linux, Arch::Arm64));
        let mut reader =
            extract_command_with(&b"payload"[..], "tool.exe", "other", &options).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "payload");
    }
}
