//! Compression codec: token model, cost model, encoder, and decoder.

pub mod cost;
pub mod decoder;
pub mod encoder;
pub mod token;

pub use cost::{byte_cost, payload_cost, NONZERO_BYTE_COST, ZERO_BYTE_COST};
pub use decoder::decode;
pub use encoder::{compress, compress_batch, CompressionResult, CompressionStats};
pub use token::{literal_wire_cost, reference_wire_cost, Token, MAX_REFERENCE_LEN};
