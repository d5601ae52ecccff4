use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use crate::processing::types::{FilterSet, Variant};

/// Ticket identifying one submission. Issued monotonically; the newest
/// issued ticket is the only one allowed to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Serialisable view of the display slots for the frontend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    /// All six slot sources, or `None` while the display is empty.
    pub slots: Option<FilterSet>,
}

/// The six display slots plus the stale-response guard.
///
/// The slots change as one unit: a committed result replaces all six,
/// clear empties all six. A response whose ticket has been superseded by
/// a newer submission is refused instead of overwriting.
pub struct DisplaySlots {
    slots: Mutex<Option<FilterSet>>,
    next_ticket: AtomicU64,
    newest: AtomicU64,
}

impl DisplaySlots {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(None),
            next_ticket: AtomicU64::new(1),
            newest: AtomicU64::new(0),
        }
    }

    /// Register a new in-flight submission.
    pub fn begin_request(&self) -> RequestTicket {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.newest.fetch_max(ticket, Ordering::AcqRel);
        RequestTicket(ticket)
    }

    /// Commit a result, replacing all six slots together.
    ///
    /// Returns `false` — leaving the slots untouched — when the ticket is
    /// no longer the newest issued.
    pub fn commit(&self, ticket: RequestTicket, set: FilterSet) -> bool {
        let mut slots = self.slots.lock();
        if self.newest.load(Ordering::Acquire) != ticket.0 {
            return false;
        }
        *slots = Some(set);
        true
    }

    /// Empty all six slots.
    pub fn clear(&self) {
        *self.slots.lock() = None;
    }

    /// Whether the display is currently empty.
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_none()
    }

    /// Source currently shown in one slot, if populated.
    pub fn get(&self, variant: Variant) -> Option<String> {
        self.slots
            .lock()
            .as_ref()
            .map(|set| set.get(variant).to_string())
    }

    /// Snapshot for the frontend.
    pub fn state(&self) -> DisplayState {
        DisplayState {
            slots: self.slots.lock().clone(),
        }
    }
}

impl Default for DisplaySlots {
    fn default() -> Self {
        Self::new()
    }
}
