use std::sync::atomic::{AtomicU64, Ordering};

/// Issued when a request for a region starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Per-region request counter. Only the most recently issued ticket may write
/// its response into the region.
#[derive(Debug, Default)]
pub struct RegionSequencer {
    latest: AtomicU64,
}

impl RegionSequencer {
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}
