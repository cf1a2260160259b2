use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// In-memory score store
///
/// Maps receipt identifiers to their points. A single mutex covers reads and
/// writes alike, and is only held for one map operation. Nothing is persisted:
/// scores live until the process exits.
#[derive(Debug, Default)]
pub struct ScoreStore {
    scores: Mutex<HashMap<String, u64>>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the points for a receipt, replacing any previous value
    pub fn put(&self, id: impl Into<String>, points: u64) {
        self.lock().insert(id.into(), points);
    }

    /// Points for a receipt, if it has been processed
    pub fn get(&self, id: &str) -> Option<u64> {
        self.lock().get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can't leave a single insert half-done,
    // so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.scores
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
