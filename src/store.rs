use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::models::domain::Predictions;

/// Holds the predictions from the most recent successful upload.
///
/// Readers get an immutable snapshot; a new upload swaps in a whole new one,
/// so a reader never sees half of one upload and half of another. Concurrent
/// uploads are last-write-wins.
#[derive(Debug, Default)]
pub struct PredictionStore {
    current: RwLock<Arc<Predictions>>,
}

impl PredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<Predictions> {
        // A poisoned lock still guards a complete snapshot.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, predictions: Predictions) {
        let next = Arc::new(predictions);
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
        debug!("Prediction snapshot replaced");
    }
}
