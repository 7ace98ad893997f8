//! Error types for message serialization/deserialization

use crate::stream::StreamType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "{stream} stream overrun: advancing {requested} bytes at offset {position} with {remaining} remaining"
    )]
    StreamOverrun {
        stream: StreamType,
        position: usize,
        requested: usize,
        remaining: usize,
    },

    #[error("length {0} does not fit a 4-byte prefix")]
    LengthOverflow(usize),

    #[error("{0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl Error {
    /// Whether this error came from a bounds check on a stream advance.
    pub fn is_overrun(&self) -> bool {
        matches!(self, Error::StreamOverrun { .. })
    }
}
