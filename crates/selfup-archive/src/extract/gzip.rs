use std::io::Read;

use selfup_platform::TargetPlatform;
use tracing::info;

use super::CommandReader;
use crate::error::{Error, Result};
use crate::format::{Stage, gzip_decoder};
use crate::matcher::matches;

/// A lone gzip file names its content in the header of its first member;
/// that name is the only candidate. The field is ISO 8859-1, so every byte
/// maps to the code point of the same value.
pub(super) fn find<R: Read>(
    reader: R,
    source_id: &str,
    command: &str,
    platform: &TargetPlatform,
) -> Result<CommandReader<R>> {
    let decoder =
        gzip_decoder(reader).map_err(|err| Error::decode(Stage::Gzip, source_id, err))?;

    let name: String = decoder
        .header()
        .and_then(|header| header.filename())
        .unwrap_or_default()
        .iter()
        .map(|&byte| char::from(byte))
        .collect();

    if !matches(command, &name, platform) {
        return Err(Error::NameMismatch {
            name,
            command: command.to_string(),
            source_id: source_id.to_string(),
        });
    }

    info!(%name, %source_id, "executable found in gzip file");
    Ok(CommandReader::Gzip(Box::new(decoder)))
}
