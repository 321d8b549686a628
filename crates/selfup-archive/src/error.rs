use std::io;

use crate::format::{Pipeline, Stage};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("command name must not be empty")]
    EmptyCommand,

    #[error("failed to decode {stage} data from {source_id}: {source}")]
    Decode {
        stage: Stage,
        source_id: String,
        source: io::Error,
    },

    #[error("file '{command}' for the command is not found in {source_id}")]
    NotFound { command: String, source_id: String },

    #[error("file name '{name}' does not match command '{command}' in {source_id}")]
    NameMismatch {
        name: String,
        command: String,
        source_id: String,
    },

    #[error("{pipeline} support is not compiled in, cannot unpack {source_id}")]
    UnsupportedFormat {
        pipeline: Pipeline,
        source_id: String,
    },
}

impl Error {
    pub(crate) fn decode(stage: Stage, source_id: &str, source: io::Error) -> Self {
        Self::Decode {
            stage,
            source_id: source_id.to_string(),
            source,
        }
    }

    pub(crate) fn not_found(command: &str, source_id: &str) -> Self {
        Self::NotFound {
            command: command.to_string(),
            source_id: source_id.to_string(),
        }
    }

    /// Stage that failed, for decode errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Decode { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
