//! Host lifecycle seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Lifecycle controls provided by the runtime hosting the worker.
pub trait WorkerHost: Send + Sync {
    /// Make this worker version eligible for activation without waiting for
    /// clients of the previous version to close.
    fn skip_waiting(&self);

    /// Start controlling already open clients.
    fn claim_clients(&self);
}

/// Host that only counts lifecycle calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    skip_waiting: Arc<AtomicUsize>,
    claim_clients: Arc<AtomicUsize>,
}

impl RecordingHost {
    /// Create a new recording host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `skip_waiting` calls.
    pub fn skip_waiting_calls(&self) -> usize {
        self.skip_waiting.load(Ordering::SeqCst)
    }

    /// Number of `claim_clients` calls.
    pub fn claim_calls(&self) -> usize {
        self.claim_clients.load(Ordering::SeqCst)
    }
}

impl WorkerHost for RecordingHost {
    fn skip_waiting(&self) {
        self.skip_waiting.fetch_add(1, Ordering::SeqCst);
    }

    fn claim_clients(&self) {
        self.claim_clients.fetch_add(1, Ordering::SeqCst);
    }
}
