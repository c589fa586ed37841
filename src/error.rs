//! Error types for the image uploader

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Submit was pressed with nothing staged
    #[error("No image files selected")]
    EmptyBatch,

    /// A submission is already in flight
    #[error("An upload is already in progress")]
    AlreadyUploading,

    /// The batch cannot change while its contents are being sent
    #[error("Files cannot be changed while an upload is in progress")]
    BatchLocked,

    #[error("No file at position {index} (batch has {len} files)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The request never produced a usable response
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
