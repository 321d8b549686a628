use std::io::{BufRead, BufReader, Read};

use tracing::warn;
use xz2::read::XzDecoder;

use super::CommandReader;
use crate::error::{Error, Result};
use crate::format::Stage;

/// xz has no file name field, so the content is taken to be the
/// executable without any name check. Concatenated streams are decoded
/// back to back.
pub(super) fn open<R: Read>(reader: R, source_id: &str, command: &str) -> Result<CommandReader<R>> {
    let mut decoder = BufReader::new(XzDecoder::new_multi_decoder(reader));
    // first fill decodes the stream header
    decoder
        .fill_buf()
        .map_err(|err| Error::decode(Stage::Xz, source_id, err))?;

    warn!(%command, %source_id, "xz stream carries no file name, assuming it is the executable");
    Ok(CommandReader::Xz(Box::new(decoder)))
}
