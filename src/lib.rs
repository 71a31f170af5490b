//! Dictionary-based calldata compression for fee-metered execution.
//!
//! Frequently-recurring 32-byte words are replaced with short references into
//! a shared, pre-seeded dictionary. Encoding runs off the execution path;
//! decoding runs inside the fee-metered invocation and reconstructs the
//! original payload byte for byte.
//!
//! - `dictionary`: the shared word table and its read-only snapshot view
//! - `codec`: token model, weighted cost model, encoder, decoder
//! - `gateway`: administrative interface and execution-time entry points
//! - `error`: structured failure taxonomy

pub mod codec;
pub mod dictionary;
pub mod error;
pub mod gateway;

pub use codec::{
    compress, compress_batch, decode, payload_cost, CompressionResult, CompressionStats, Token,
};
pub use dictionary::{
    word_from_bytes, word_from_hex, DictSnapshot, DictionaryStore, Word, MAX_DICT_LEN,
    RESERVED_INDICES, WORD_LEN,
};
pub use error::{CompressorError, Result};
pub use gateway::{Dispatcher, Gateway};
