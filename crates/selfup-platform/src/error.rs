use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unknown operating system: {0}")]
    UnknownOs(String),

    #[error("unknown architecture: {0}")]
    UnknownArch(String),

    #[error("invalid target '{0}', expected <os>/<arch>")]
    InvalidTarget(String),
}
