//! LogReactor - records every notification via tracing

use std::sync::{Mutex, MutexGuard, PoisonError};

use contracts::{Content, ContractError, Reactor, DEFAULT_LOGGER_RETAIN};
use ringbuf::{traits::*, HeapRb};
use tracing::{info, instrument};

/// Passive audit reactor
///
/// Emits each notification through `tracing` and keeps the most recent
/// rendered texts in memory, in notification order. Once the ring is full
/// the oldest text is overwritten.
pub struct LogReactor {
    name: String,
    entries: Mutex<Entries>,
}

struct Entries {
    ring: HeapRb<String>,
    dropped: u64,
}

impl LogReactor {
    /// Create a LogReactor keeping the default number of texts
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_retain(name, DEFAULT_LOGGER_RETAIN)
    }

    /// Create a LogReactor keeping at most `retain` texts (at least one)
    pub fn with_retain(name: impl Into<String>, retain: usize) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(Entries {
                ring: HeapRb::new(retain.max(1)),
                dropped: 0,
            }),
        }
    }

    /// Retained texts, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.lock_entries().ring.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().ring.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock_entries().ring.capacity().get()
    }

    /// Texts overwritten because the ring was full
    pub fn dropped_count(&self) -> u64 {
        self.lock_entries().dropped
    }

    fn lock_entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Reactor for LogReactor {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_reactor_update", skip_all, fields(reactor = %self.name))]
    fn on_update(&self, content: &dyn Content) -> Result<(), ContractError> {
        let text = content.read();
        info!(reactor = %self.name, text = %text, "Notification logged");
        let mut entries = self.lock_entries();
        if entries.ring.push_overwrite(text).is_some() {
            entries.dropped += 1;
        }
        Ok(())
    }
}
