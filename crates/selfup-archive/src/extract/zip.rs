use std::io::{self, Cursor, Read};

use selfup_platform::TargetPlatform;
use tracing::{debug, info, trace};
use zip::ZipArchive;

use super::CommandReader;
use crate::error::{Error, Result};
use crate::format::{Pipeline, Stage};
use crate::matcher::{base_name, matches};

/// Buffer the whole archive, then walk the central directory in stored
/// order for the first non-directory member that matches.
pub(super) fn find<R: Read>(
    mut reader: R,
    source_id: &str,
    command: &str,
    platform: &TargetPlatform,
) -> Result<CommandReader<R>> {
    let decode = |err: io::Error| Error::decode(Stage::Zip, source_id, err);
    let corrupt = |err: zip::result::ZipError| decode(io::Error::other(err));

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer).map_err(decode)?;
    debug!(%source_id, bytes = buffer.len(), "buffered zip archive");

    let mut archive = ZipArchive::new(Cursor::new(buffer)).map_err(corrupt)?;

    for index in 0..archive.len() {
        // raw access reads metadata without setting up decompression
        let (name, is_dir) = {
            let file = archive.by_index_raw(index).map_err(corrupt)?;
            (file.name().to_string(), file.is_dir())
        };

        if is_dir {
            trace!(member = %name, "skipping zip directory entry");
            continue;
        }
        if !matches(command, base_name(&name), platform) {
            trace!(member = %name, "zip member does not match");
            continue;
        }

        info!(member = %name, %source_id, "executable found in zip archive");
        let mut file = archive.by_index(index).map_err(corrupt)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(decode)?;
        return Ok(CommandReader::Buffered {
            pipeline: Pipeline::Zip,
            data: Cursor::new(data),
        });
    }

    Err(Error::not_found(command, source_id))
}
