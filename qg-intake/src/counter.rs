//! Process-local waitlist position counter
//!
//! Positions start at 1 and increase by one per accepted submission for the
//! lifetime of the process. They are not durable and not unique across
//! restarts or across multiple service instances.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomically incremented position counter, owned by the service instance
#[derive(Debug)]
pub struct PositionCounter {
    next: AtomicU64,
}

impl PositionCounter {
    /// Counter whose first assigned position is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Counter whose first assigned position is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Take the next position
    ///
    /// Every caller observes a distinct value, even under concurrent calls.
    pub fn next_position(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Position the next caller will receive
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for PositionCounter {
    fn default() -> Self {
        Self::new()
    }
}
