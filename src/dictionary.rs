//! Shared dictionary of fixed-width words.
//!
//! The dictionary is an indexed table of 32-byte words seeded by an
//! administrator and read by every compress/decompress call. Indices 0 and 1
//! are permanently reserved for stream control codes and never hold data.

use std::fs;
use std::path::Path;

use crate::error::{CompressorError, Result};

/// Width of a dictionary word in bytes.
pub const WORD_LEN: usize = 32;

/// First valid data index; 0 and 1 are reserved.
pub const RESERVED_INDICES: usize = 2;

/// Default maximum number of dictionary slots, reserved range included.
pub const MAX_DICT_LEN: usize = 1024;

/// A fixed-width dictionary word. Words shorter than 32 bytes are stored
/// zero-filled at the tail, so meaningful bytes occupy the prefix.
pub type Word = [u8; WORD_LEN];

/// Read-only dictionary view handed to the encoder and decoder.
///
/// Both sides of the codec only ever need bounded random access to words, so
/// tests can substitute a table without going through [`DictionaryStore`].
pub trait DictSnapshot {
    /// Total number of slots, reserved range included.
    fn max_len(&self) -> usize;

    /// Word stored at `index`. Callers validate the range first; unwritten
    /// slots read as the zero word.
    fn word(&self, index: usize) -> Word;
}

/// Indexed table of dictionary words with a configured maximum size.
///
/// All slots exist from construction and read as the zero word until
/// overwritten, so reads of seeded and unseeded indices are uniform.
/// Mutations validate the full target range before touching any slot.
#[derive(Debug, Clone)]
pub struct DictionaryStore {
    words: Vec<Word>,
}

impl DictionaryStore {
    /// Creates a zero-filled store with [`MAX_DICT_LEN`] slots.
    pub fn new() -> Self {
        Self::with_max_len(MAX_DICT_LEN)
    }

    /// Creates a zero-filled store with `max_len` slots.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            words: vec![[0u8; WORD_LEN]; max_len],
        }
    }

    pub fn max_len(&self) -> usize {
        self.words.len()
    }

    /// Writes one word at `index`.
    pub fn set(&mut self, index: usize, word: Word) -> Result<()> {
        if index < RESERVED_INDICES || index >= self.words.len() {
            return Err(CompressorError::OutOfRange {
                index,
                max_len: self.words.len(),
            });
        }
        self.words[index] = word;
        Ok(())
    }

    /// Writes a contiguous block of words starting at `start`.
    ///
    /// Fails without touching the store if any covered index falls outside
    /// the data range. An empty block is a no-op.
    pub fn set_range(&mut self, start: usize, words: &[Word]) -> Result<()> {
        if words.is_empty() {
            return Ok(());
        }
        let end = start.saturating_add(words.len());
        if start < RESERVED_INDICES || end > self.words.len() {
            return Err(CompressorError::OutOfRange {
                index: if start < RESERVED_INDICES { start } else { end - 1 },
                max_len: self.words.len(),
            });
        }
        self.words[start..end].copy_from_slice(words);
        Ok(())
    }

    /// Returns the words at `[begin, end)`.
    ///
    /// The reserved range is unreadable even vacuously, so `begin < 2` fails
    /// before the empty-range check; `begin >= end` then yields an empty
    /// sequence rather than an error.
    pub fn get(&self, begin: usize, end: usize) -> Result<Vec<Word>> {
        if begin < RESERVED_INDICES {
            return Err(CompressorError::OutOfRange {
                index: begin,
                max_len: self.words.len(),
            });
        }
        if begin >= end {
            return Ok(Vec::new());
        }
        if end > self.words.len() {
            return Err(CompressorError::OutOfRange {
                index: end - 1,
                max_len: self.words.len(),
            });
        }
        Ok(self.words[begin..end].to_vec())
    }

    /// Loads a dictionary file: a JSON array of hex words occupying the data
    /// range from index 2 upward.
    pub fn load(path: &Path) -> Result<Self> {
        let mut store = Self::new();
        let entries: Vec<String> = serde_json::from_str(&fs::read_to_string(path)?)?;
        for (offset, entry) in entries.iter().enumerate() {
            store.set(RESERVED_INDICES + offset, word_from_hex(entry)?)?;
        }
        Ok(store)
    }

    /// Saves the data range as a JSON array of hex words, trimming the
    /// unwritten zero tail.
    pub fn save(&self, path: &Path) -> Result<()> {
        let words = self.get(RESERVED_INDICES, self.words.len())?;
        let written = words
            .iter()
            .rposition(|w| w != &[0u8; WORD_LEN])
            .map_or(0, |i| i + 1);
        let entries: Vec<String> = words[..written]
            .iter()
            .map(|w| format!("0x{}", hex::encode(w)))
            .collect();
        fs::write(path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

impl Default for DictionaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DictSnapshot for DictionaryStore {
    fn max_len(&self) -> usize {
        self.words.len()
    }

    fn word(&self, index: usize) -> Word {
        self.words[index]
    }
}

/// Builds a word from up to 32 bytes, zero-filling the tail.
pub fn word_from_bytes(bytes: &[u8]) -> Result<Word> {
    if bytes.len() > WORD_LEN {
        return Err(CompressorError::OversizedWord(bytes.len()));
    }
    let mut word = [0u8; WORD_LEN];
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(word)
}

/// Builds a word from a hex string, `0x` prefix optional.
pub fn word_from_hex(input: &str) -> Result<Word> {
    let bytes = hex::decode(input.trim().trim_start_matches("0x"))?;
    word_from_bytes(&bytes)
}
