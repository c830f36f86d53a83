//! Append-only submission history

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use contracts::Content;

/// One recorded submission
///
/// The content is the decorated object itself, shared with the hub.
#[derive(Clone)]
pub struct HistoryEntry {
    /// 1-based, strictly increasing
    pub sequence: u64,
    pub submitted_at: DateTime<Utc>,
    pub content: Arc<dyn Content>,
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("sequence", &self.sequence)
            .field("submitted_at", &self.submitted_at)
            .field("content", &self.content.read())
            .finish()
    }
}

/// Backing store; only the service appends to it
#[derive(Default)]
pub(crate) struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub(crate) fn append(&mut self, content: Arc<dyn Content>) -> u64 {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(HistoryEntry {
            sequence,
            submitted_at: Utc::now(),
            content,
        });
        sequence
    }

    pub(crate) fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
