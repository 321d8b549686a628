use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Read};

/// Decoding pipeline selected from a source identifier's suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pipeline {
    /// Whole archive buffered, members read through the central directory.
    Zip,
    TarGz,
    /// A single gzip-compressed file, named by its gzip header.
    Gzip,
    TarXz,
    /// A single xz-compressed file, assumed to be the executable.
    Xz,
    /// Not compressed: the source is the executable itself.
    Passthrough,
}

/// Suffix table, most specific suffix first. `.tar.gz` has to be tried
/// before `.gz` and `.tar.xz` before `.xz`.
pub const SUFFIXES: &[(&str, Pipeline)] = &[
    (".zip", Pipeline::Zip),
    (".tar.gz", Pipeline::TarGz),
    (".tgz", Pipeline::TarGz),
    (".tar.xz", Pipeline::TarXz),
    (".gzip", Pipeline::Gzip),
    (".gz", Pipeline::Gzip),
    (".xz", Pipeline::Xz),
];

impl Pipeline {
    /// Pick the pipeline for `source_id`. Matching is a case-sensitive
    /// suffix test; the content is never inspected.
    pub fn detect(source_id: &str) -> Self {
        SUFFIXES
            .iter()
            .find(|(suffix, _)| source_id.ends_with(suffix))
            .map_or(Self::Passthrough, |&(_, pipeline)| pipeline)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarGz => "tar.gz",
            Self::Gzip => "gzip",
            Self::TarXz => "tar.xz",
            Self::Xz => "xz",
            Self::Passthrough => "uncompressed",
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layer of a pipeline that can fail to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Zip,
    Gzip,
    Xz,
    Tar,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zip => "zip",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Tar => "tar",
        })
    }
}

/// An I/O failure raised by a decompression layer.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stream is corrupted: {source}")]
pub struct StageFault {
    pub stage: Stage,
    source: io::Error,
}

/// Reader that tags failures of the wrapped decoder with its [`Stage`], so a
/// container parser reading through it can tell decompression faults from
/// its own.
#[derive(Debug)]
pub struct StageReader<R> {
    inner: R,
    stage: Stage,
}

impl<R> StageReader<R> {
    pub fn new(inner: R, stage: Stage) -> Self {
        Self { inner, stage }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }
}

impl<R: Read> Read for StageReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(|err| {
            if fault_stage(&err).is_some() {
                return err;
            }
            let kind = err.kind();
            io::Error::new(
                kind,
                StageFault {
                    stage: self.stage,
                    source: err,
                },
            )
        })
    }
}

/// Stage recorded by the innermost [`StageReader`] the error passed through.
pub fn fault_stage(err: &io::Error) -> Option<Stage> {
    let mut next = err.get_ref().map(|e| e as &(dyn StdError + 'static));
    while let Some(cause) = next {
        if let Some(fault) = cause.downcast_ref::<StageFault>() {
            return Some(fault.stage);
        }
        // io::Error::source skips its own payload, so unwrap it by hand
        next = match cause.downcast_ref::<io::Error>() {
            Some(inner) => inner.get_ref().map(|e| e as &(dyn StdError + 'static)),
            None => cause.source(),
        };
    }
    None
}

/// Open a gzip stream and parse its first member header up front.
///
/// Concatenated members are decoded as one stream. The decoder defers a
/// header error to the first read, which would let a corrupt header surface
/// as an unrelated failure further down the pipeline.
#[cfg(feature = "gzip")]
pub(crate) fn gzip_decoder<R: Read>(reader: R) -> io::Result<flate2::read::MultiGzDecoder<R>> {
    let mut decoder = flate2::read::MultiGzDecoder::new(reader);
    if decoder.header().is_none() {
        return Err(match decoder.read(&mut []) {
            Err(err) => err,
            Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "missing gzip header"),
        });
    }
    Ok(decoder)
}

/// Decompression layer underneath a tar container.
#[cfg(feature = "tar")]
pub enum Decoder<R: Read> {
    Gzip(Box<flate2::read::MultiGzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::read::XzDecoder<R>>),
}

#[cfg(feature = "tar")]
impl<R: Read> Decoder<R> {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Gzip(_) => Stage::Gzip,
            #[cfg(feature = "xz")]
            Self::Xz(_) => Stage::Xz,
        }
    }

    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::Gzip(_) => Pipeline::TarGz,
            #[cfg(feature = "xz")]
            Self::Xz(_) => Pipeline::TarXz,
        }
    }
}

#[cfg(feature = "tar")]
impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn detect_known_suffixes() {
        let cases = [
            ("https://x/tool.zip", Pipeline::Zip),
            ("https://x/tool.tar.gz", Pipeline::TarGz),
            ("https://x/tool.tgz", Pipeline::TarGz),
            ("https://x/tool.gz", Pipeline::Gzip),
            ("https://x/tool.gzip", Pipeline::Gzip),
            ("https://x/tool.tar.xz", Pipeline::TarXz),
            ("https://x/tool.xz", Pipeline::Xz),
            ("https://x/tool", Pipeline::Passthrough),
            ("https://x/tool.tar", Pipeline::Passthrough),
            ("https://x/tool.ZIP", Pipeline::Passthrough),
            ("", Pipeline::Passthrough),
        ];
        for (source, expected) in cases {
            assert_eq!(Pipeline::detect(source), expected, "{source}");
        }
    }

    #[test]
    fn specific_suffix_precedes_generic_one() {
        let position = |suffix: &str| SUFFIXES.iter().position(|(s, _)| *s == suffix).unwrap();
        assert!(position(".tar.gz") < position(".gz"));
        assert!(position(".tar.xz") < position(".xz"));
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad block"))
        }
    }

    #[test]
    fn stage_reader_tags_errors() {
        let mut reader = StageReader::new(Failing, Stage::Xz);
        let err = reader.read(&mut [0u8; 8]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(fault_stage(&err), Some(Stage::Xz));
    }

    #[test]
    fn innermost_stage_wins() {
        let mut reader = StageReader::new(StageReader::new(Failing, Stage::Gzip), Stage::Tar);
        let err = reader.read(&mut [0u8; 8]).unwrap_err();
        assert_eq!(fault_stage(&err), Some(Stage::Gzip));
    }

    #[test]
    fn fault_stage_sees_through_wrapping() {
        let mut reader = StageReader::new(Failing, Stage::Gzip);
        let err = reader.read(&mut [0u8; 8]).unwrap_err();
        let wrapped = io::Error::other(err);
        assert_eq!(fault_stage(&wrapped), Some(Stage::Gzip));
    }

    #[test]
    fn untagged_error_has_no_stage() {
        let err = io::Error::new(io::ErrorKind::Other, "checksum mismatch");
        assert_eq!(fault_stage(&err), None);
    }

    #[test]
    #[cfg(feature = "gzip")]
    fn gzip_header_errors_are_eager() {
        struct Unread;

        impl Read for Unread {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                panic!("read past the fixed gzip header");
            }
        }

        let input = (&b"not gzip at all"[..]).chain(Unread);
        let err = gzip_decoder(input).err().unwrap();
        assert!(
            matches!(err.kind(), io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData),
            "{err}"
        );
    }

    #[test]
    #[cfg(feature = "gzip")]
    fn gzip_header_is_parsed_before_body() {
        use std::io::Write;

        let mut encoder = flate2::GzBuilder::new()
            .filename("tool")
            .write(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"body").unwrap();
        let data = encoder.finish().unwrap();

        let decoder = gzip_decoder(&data[..]).unwrap();
        let name = decoder.header().and_then(|header| header.filename());
        assert_eq!(name, Some(&b"tool"[..]));
    }

    proptest! {
        #[test]
        fn unknown_suffix_is_passthrough(stem in "[a-zA-Z0-9/:._-]{0,24}", ext in "[a-y]{1,4}") {
            let source = format!("{stem}.{ext}");
            prop_assume!(!SUFFIXES.iter().any(|(s, _)| source.ends_with(s)));
            prop_assert_eq!(Pipeline::detect(&source), Pipeline::Passthrough);
        }
    }
}
