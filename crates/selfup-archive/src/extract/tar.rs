use std::io::{self, Cursor, Read};

use selfup_platform::TargetPlatform;
use tracing::{info, trace};

use super::CommandReader;
use crate::error::{Error, Result};
use crate::format::{Decoder, Stage, StageReader, fault_stage};
use crate::matcher::{base_name, matches};

enum Hit {
    /// Member data follows in the stream.
    Stream(u64),
    /// Sparse member, reassembled by the tar reader.
    Buffered(Vec<u8>),
}

/// Walk tar members in stream order and stop at the first executable match,
/// leaving the stream positioned at that member's data.
pub(super) fn find<R: Read>(
    decoder: Decoder<R>,
    source_id: &str,
    command: &str,
    platform: &TargetPlatform,
) -> Result<CommandReader<R>> {
    let pipeline = decoder.pipeline();
    let stage = decoder.stage();
    let mut archive = tar::Archive::new(StageReader::new(decoder, stage));

    // failures not raised by the decompressor belong to the tar layer
    let decode = |err: io::Error| {
        let stage = fault_stage(&err).unwrap_or(Stage::Tar);
        Error::decode(stage, source_id, err)
    };

    let hit = {
        let mut hit = None;
        for entry in archive.entries().map_err(decode)? {
            let mut entry = entry.map_err(decode)?;
            let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let entry_type = entry.header().entry_type();

            if !(entry_type.is_file() || entry_type.is_contiguous() || entry_type.is_gnu_sparse())
            {
                trace!(member = %path, ?entry_type, "skipping non-regular tar member");
                continue;
            }
            if !matches(command, base_name(&path), platform) {
                trace!(member = %path, "tar member does not match");
                continue;
            }

            info!(member = %path, %pipeline, %source_id, "executable found in tar archive");
            hit = Some(if entry_type.is_gnu_sparse() {
                let mut data = Vec::new();
                entry.read_to_end(&mut data).map_err(decode)?;
                Hit::Buffered(data)
            } else {
                Hit::Stream(entry.size())
            });
            break;
        }
        hit
    };

    match hit {
        Some(Hit::Stream(size)) => Ok(CommandReader::TarMember(archive.into_inner().take(size))),
        Some(Hit::Buffered(data)) => Ok(CommandReader::Buffered {
            pipeline,
            data: Cursor::new(data),
        }),
        None => Err(Error::not_found(command, source_id)),
    }
}
