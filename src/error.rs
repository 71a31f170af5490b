use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompressorError {
    /// A dictionary read or write targeted the reserved range or an index
    /// beyond the configured maximum.
    #[error("dictionary index {index} outside valid range [2, {max_len})")]
    OutOfRange { index: usize, max_len: usize },

    /// A reference token named an index the dictionary cannot serve.
    /// Treated as a corrupt or malicious stream.
    #[error("stream references dictionary index {index} outside valid range [2, {max_len})")]
    InvalidDictionaryAccess { index: usize, max_len: usize },

    /// The stream is truncated mid-token or a token carries an impossible
    /// length.
    #[error("malformed stream at offset {offset}: {reason}")]
    MalformedStream { offset: usize, reason: String },

    /// The encoder's own output failed to decode back to its input.
    #[error("compressed stream failed round-trip verification: {0}")]
    CompressionIntegrity(String),

    /// A word handed to the administrative interface is wider than a
    /// dictionary slot.
    #[error("word of {0} bytes exceeds the 32 byte slot width")]
    OversizedWord(usize),

    /// The dispatcher rejected or failed to execute the reconstructed
    /// payload.
    #[error("dispatch failed: {0}")]
    Dispatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
}

pub type Result<T> = std::result::Result<T, CompressorError>;
