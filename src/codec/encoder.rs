//! Payload compressor.
//!
//! Runs off the reconstruction path, so it can afford the dictionary scan the
//! decoder never pays for. The encoder is pure with respect to the dictionary
//! snapshot and verifies its own output round-trips before returning it.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::dictionary::{DictSnapshot, RESERVED_INDICES};
use crate::error::{CompressorError, Result};

use super::cost::payload_cost;
use super::decoder::decode;
use super::token::{
    literal_wire_cost, reference_wire_cost, Token, MAX_REFERENCE_LEN, WIRE_INDEX_LIMIT,
};

/// Effectiveness counters gathered while encoding. Reporting only; the
/// decoder never sees them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompressionStats {
    /// Payload length in bytes.
    pub original_len: usize,
    /// Stream length in bytes, end marker included.
    pub compressed_len: usize,
    /// Payload bytes carried verbatim in literal tokens.
    pub literal_bytes: usize,
    /// Payload bytes reproduced through dictionary references.
    pub referenced_bytes: usize,
    /// Distinct dictionary indices the stream references.
    pub distinct_indices: usize,
    /// Weighted cost of the uncompressed payload.
    pub original_cost: u64,
    /// Weighted cost of the stream.
    pub compressed_cost: u64,
}

/// A compressed stream together with its effectiveness counters.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub stream: Vec<u8>,
    pub stats: CompressionStats,
}

/// Compresses `payload` against a read-only dictionary snapshot.
///
/// Scans left to right; at each position the longest dictionary prefix match
/// is weighed against carrying the same bytes as a literal token, and a
/// reference is emitted only when its wire bytes are strictly cheaper. Ties
/// on match length prefer the lowest index. The result always decodes to
/// `payload` byte for byte against the same snapshot, which the encoder
/// checks itself before returning.
pub fn compress<D: DictSnapshot>(payload: &[u8], dict: &D) -> Result<CompressionResult> {
    let buckets = candidate_buckets(dict);

    let mut stream = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut literal_bytes = 0usize;
    let mut referenced_bytes = 0usize;
    let mut used_indices: HashSet<u16> = HashSet::new();

    let mut pos = 0;
    while pos < payload.len() {
        let window = &payload[pos..];
        let candidates = &buckets[window[0] as usize];
        if let Some((index, length)) = longest_match(dict, window, candidates) {
            let reference = reference_wire_cost(index, length as u8);
            let literal = literal_wire_cost(&window[..length]);
            if reference < literal {
                if !pending.is_empty() {
                    literal_bytes += pending.len();
                    Token::Literal(std::mem::take(&mut pending)).write_into(&mut stream)?;
                }
                Token::Reference {
                    index,
                    length: length as u8,
                }
                .write_into(&mut stream)?;
                referenced_bytes += length;
                used_indices.insert(index);
                pos += length;
                continue;
            }
        }
        pending.push(window[0]);
        pos += 1;
    }
    if !pending.is_empty() {
        literal_bytes += pending.len();
        Token::Literal(std::mem::take(&mut pending)).write_into(&mut stream)?;
    }
    Token::End.write_into(&mut stream)?;

    let decoded = decode(&stream, dict)?;
    if decoded != payload {
        return Err(CompressorError::CompressionIntegrity(format!(
            "decoded to {} bytes, expected {}",
            decoded.len(),
            payload.len()
        )));
    }

    let stats = CompressionStats {
        original_len: payload.len(),
        compressed_len: stream.len(),
        literal_bytes,
        referenced_bytes,
        distinct_indices: used_indices.len(),
        original_cost: payload_cost(payload),
        compressed_cost: payload_cost(&stream),
    };
    tracing::debug!(
        "compressed {} bytes to {} ({} literal, {} referenced, {} dictionary words)",
        stats.original_len,
        stats.compressed_len,
        stats.literal_bytes,
        stats.referenced_bytes,
        stats.distinct_indices
    );
    Ok(CompressionResult { stream, stats })
}

/// Compresses independent payloads in parallel against one shared snapshot.
pub fn compress_batch<D: DictSnapshot + Sync>(
    payloads: &[Vec<u8>],
    dict: &D,
) -> Result<Vec<CompressionResult>> {
    payloads
        .par_iter()
        .map(|payload| compress(payload, dict))
        .collect()
}

/// Groups encodable data indices by their word's first byte, so the scan only
/// compares against words that can match at all. Duplicate words keep their
/// lowest index.
fn candidate_buckets<D: DictSnapshot>(dict: &D) -> Vec<Vec<u16>> {
    let mut buckets = vec![Vec::new(); 256];
    let mut seen: HashSet<[u8; 32]> = HashSet::new();
    for index in RESERVED_INDICES..dict.max_len().min(WIRE_INDEX_LIMIT) {
        let word = dict.word(index);
        if seen.insert(word) {
            buckets[word[0] as usize].push(index as u16);
        }
    }
    buckets
}

/// Longest common prefix between `window` and any candidate word, capped at
/// the reference length limit. Candidates are visited in ascending index
/// order and only strictly longer matches replace the running best, which
/// keeps the lowest index on ties.
fn longest_match<D: DictSnapshot>(
    dict: &D,
    window: &[u8],
    candidates: &[u16],
) -> Option<(u16, usize)> {
    let cap = window.len().min(MAX_REFERENCE_LEN);
    let mut best: Option<(u16, usize)> = None;
    for &index in candidates {
        let word = dict.word(index as usize);
        let mut len = 0;
        while len < cap && word[len] == window[len] {
            len += 1;
        }
        if len > 0 && best.map_or(true, |(_, best_len)| len > best_len) {
            best = Some((index, len));
        }
    }
    best
}
