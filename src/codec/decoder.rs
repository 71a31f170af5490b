//! Stream decoder.
//!
//! Runs on the fee-metered reconstruction path: a single left-to-right pass
//! over the stream, linear in stream length and reference count, with no
//! state beyond the cursor and the output buffer. Failures abort the call
//! with nothing delivered.

use crate::dictionary::{DictSnapshot, RESERVED_INDICES};
use crate::error::{CompressorError, Result};

use super::token::Token;

/// Reconstructs the original payload from `stream` against `dict`.
///
/// Decoding stops at the explicit end marker; any trailing bytes are left to
/// the transport envelope. A stream that runs out of bytes at a token
/// boundary terminates the same way, since the envelope owns the byte count.
/// An empty stream decodes to an empty payload.
pub fn decode<D: DictSnapshot>(stream: &[u8], dict: &D) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut offset = 0;

    while offset < stream.len() {
        let (token, next) = Token::read_from(stream, offset)?;
        match token {
            Token::End => break,
            Token::Literal(bytes) => out.extend_from_slice(&bytes),
            Token::Reference { index, length } => {
                let index = index as usize;
                if index < RESERVED_INDICES || index >= dict.max_len() {
                    return Err(CompressorError::InvalidDictionaryAccess {
                        index,
                        max_len: dict.max_len(),
                    });
                }
                let word = dict.word(index);
                out.extend_from_slice(&word[..length as usize]);
            }
        }
        offset = next;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionaryStore, Word, WORD_LEN};

    fn seeded_store() -> DictionaryStore {
        let mut store = DictionaryStore::with_max_len(8);
        let mut word: Word = [0u8; WORD_LEN];
        word[..4].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        store.set(2, word).unwrap();
        store
    }

    fn stream_of(tokens: &[Token]) -> Vec<u8> {
        let mut out = Vec::new();
        for token in tokens {
            token.write_into(&mut out).unwrap();
        }
        out
    }

    #[test]
    fn test_empty_stream_decodes_to_empty_payload() {
        let store = seeded_store();
        assert!(decode(&[], &store).unwrap().is_empty());
        assert!(decode(&stream_of(&[Token::End]), &store).unwrap().is_empty());
    }

    #[test]
    fn test_literal_and_reference_expansion() {
        let store = seeded_store();
        let stream = stream_of(&[
            Token::Literal(vec![0x01, 0x02]),
            Token::Reference { index: 2, length: 3 },
            Token::End,
        ]);
        assert_eq!(decode(&stream, &store).unwrap(), vec![0x01, 0x02, 0xDE, 0xAD, 0xBE]);
    }

    #[test]
    fn test_trailing_bytes_after_end_ignored() {
        let store = seeded_store();
        let mut stream = stream_of(&[Token::Literal(vec![0x42]), Token::End]);
        stream.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(decode(&stream, &store).unwrap(), vec![0x42]);
    }

    #[test]
    fn test_missing_end_terminates_at_boundary() {
        let store = seeded_store();
        let stream = stream_of(&[Token::Literal(vec![0x42])]);
        assert_eq!(decode(&stream, &store).unwrap(), vec![0x42]);
    }

    #[test]
    fn test_reference_beyond_dictionary_rejected() {
        let store = seeded_store();
        let stream = stream_of(&[Token::Reference { index: 10, length: 1 }]);
        assert!(matches!(
            decode(&stream, &store),
            Err(CompressorError::InvalidDictionaryAccess { index: 10, max_len: 8 })
        ));
    }

    #[test]
    fn test_truncated_stream_rejected() {
        let store = seeded_store();
        // A literal declaring two bytes but carrying none.
        assert!(matches!(
            decode(&[0x00, 0x02], &store),
            Err(CompressorError::MalformedStream { .. })
        ));
        // A lone half of a token key.
        assert!(decode(&[0x00], &store).is_err());
    }

    #[test]
    fn test_failed_decode_returns_no_partial_output() {
        let store = seeded_store();
        let stream = stream_of(&[
            Token::Literal(vec![0x01]),
            Token::Reference { index: 10, length: 1 },
        ]);
        assert!(decode(&stream, &store).is_err());
    }
}
