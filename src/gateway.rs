//! Invocation gateway: dictionary administration plus the two execution-time
//! entry points.
//!
//! The gateway owns the process-wide dictionary behind a read-write lock, so
//! administrative writes are atomic with respect to concurrent decodes, and
//! hands reconstructed payloads to an injected [`Dispatcher`].

use std::sync::{Arc, RwLock};

use crate::codec::decode;
use crate::dictionary::{DictionaryStore, Word};
use crate::error::Result;

/// Re-executes the target operation with a reconstructed payload as its
/// invocation input. The gateway's obligation ends at delivering the payload
/// byte-exact; whatever the dispatcher returns or raises propagates unchanged
/// to the original caller.
pub trait Dispatcher {
    fn dispatch(&mut self, payload: &[u8]) -> Result<Vec<u8>>;
}

/// Entry point surface around one shared dictionary and one dispatcher.
pub struct Gateway<D> {
    dict: Arc<RwLock<DictionaryStore>>,
    dispatcher: D,
}

impl<D: Dispatcher> Gateway<D> {
    /// Gateway over a fresh zero-filled dictionary.
    pub fn new(dispatcher: D) -> Self {
        Self::with_dictionary(DictionaryStore::new(), dispatcher)
    }

    pub fn with_dictionary(dict: DictionaryStore, dispatcher: D) -> Self {
        Self {
            dict: Arc::new(RwLock::new(dict)),
            dispatcher,
        }
    }

    /// Writes one dictionary word. Fails fast without mutating on an invalid
    /// index.
    pub fn set_data(&self, index: usize, word: Word) -> Result<()> {
        self.dict.write().unwrap().set(index, word)
    }

    /// Writes a contiguous block of dictionary words as one atomic state
    /// transition.
    pub fn set_data_array(&self, start: usize, words: &[Word]) -> Result<()> {
        self.dict.write().unwrap().set_range(start, words)
    }

    /// Reads the words at `[begin, end)`.
    pub fn get_data(&self, begin: usize, end: usize) -> Result<Vec<Word>> {
        self.dict.read().unwrap().get(begin, end)
    }

    /// Clone of the current dictionary state for off-path encoding.
    pub fn snapshot(&self) -> DictionaryStore {
        self.dict.read().unwrap().clone()
    }

    /// Reconstruction entry point: decodes the trailing stream against the
    /// current dictionary and re-invokes the target logic with the payload.
    ///
    /// A decode failure aborts before the dispatcher sees anything.
    pub fn execute(&mut self, stream: &[u8]) -> Result<Vec<u8>> {
        let payload = {
            let dict = self.dict.read().unwrap();
            decode(stream, &*dict)?
        };
        tracing::debug!("decoded {} byte payload from {} byte stream", payload.len(), stream.len());
        self.dispatcher.dispatch(&payload)
    }

    /// Inspection entry point: decodes the trailing stream and returns the
    /// payload without dispatching. With no trailing bytes this returns the
    /// empty byte sequence.
    pub fn inspect(&self, stream: &[u8]) -> Result<Vec<u8>> {
        let dict = self.dict.read().unwrap();
        decode(stream, &*dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress;
    use crate::error::CompressorError;

    /// Records every payload it is handed and echoes it back.
    #[derive(Default)]
    struct RecordingDispatcher {
        payloads: Vec<Vec<u8>>,
    }

    impl Dispatcher for RecordingDispatcher {
        fn dispatch(&mut self, payload: &[u8]) -> Result<Vec<u8>> {
            self.payloads.push(payload.to_vec());
            Ok(payload.to_vec())
        }
    }

    struct FailingDispatcher;

    impl Dispatcher for FailingDispatcher {
        fn dispatch(&mut self, _payload: &[u8]) -> Result<Vec<u8>> {
            Err(CompressorError::Dispatch("target reverted".into()))
        }
    }

    #[test]
    fn test_execute_delivers_exact_payload() {
        let mut gateway = Gateway::new(RecordingDispatcher::default());
        let payload = vec![0xAB, 0xAA, 0xBB, 0xCC, 0x01, 0x02];
        let stream = compress(&payload, &gateway.snapshot()).unwrap().stream;

        let returned = gateway.execute(&stream).unwrap();
        assert_eq!(returned, payload);
        assert_eq!(gateway.dispatcher.payloads, vec![payload]);
    }

    #[test]
    fn test_dispatcher_failure_propagates() {
        let mut gateway = Gateway::new(FailingDispatcher);
        let stream = compress(&[0x01], &gateway.snapshot()).unwrap().stream;
        assert!(matches!(
            gateway.execute(&stream),
            Err(CompressorError::Dispatch(_))
        ));
    }

    #[test]
    fn test_decode_failure_never_reaches_dispatcher() {
        let mut gateway = Gateway::new(RecordingDispatcher::default());
        // Truncated literal token.
        assert!(gateway.execute(&[0x00, 0x05, 0x01]).is_err());
        assert!(gateway.dispatcher.payloads.is_empty());
    }

    #[test]
    fn test_inspect_without_trailing_bytes_is_empty() {
        let gateway = Gateway::new(RecordingDispatcher::default());
        assert!(gateway.inspect(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_admin_writes_visible_to_decode() {
        let mut gateway = Gateway::new(RecordingDispatcher::default());
        let mut word = [0u8; 32];
        word[..2].copy_from_slice(&[0xCA, 0xFE]);
        gateway.set_data(2, word).unwrap();

        let payload = vec![0xCA, 0xFE, 0xCA, 0xFE];
        let stream = compress(&payload, &gateway.snapshot()).unwrap().stream;
        assert_eq!(gateway.execute(&stream).unwrap(), payload);
    }
}
