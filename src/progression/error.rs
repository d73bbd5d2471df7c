use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProgressionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode progression record: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    VersionMismatch { expected: u64, found: u64 },

    #[error("checksum verification failed")]
    ChecksumMismatch,

    #[error("could not determine the save directory")]
    NoSaveDirectory,

    #[error("cannot commit an encounter that has not ended")]
    EncounterInProgress,
}

pub type ProgressionResult<T> = Result<T, ProgressionError>;
