//! Process-wide monotonic logical clock
//!
//! Every committed state-changing operation is stamped with the next tick.
//! Ticks are strictly increasing across the whole ledger, independent of any
//! caller's wall clock, so history entries on one product and counters on
//! another always agree on commit order.

use crate::types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic logical clock.
///
/// Allocation is atomic and non-blocking. A tick handed out for an operation
/// that later fails validation is simply never observed; consumers must not
/// assume timestamps on records are contiguous.
#[derive(Debug, Default)]
pub struct LogicalClock {
    next: AtomicU64,
}

impl LogicalClock {
    /// Create a clock starting at tick 1.
    pub fn new() -> Self {
        LogicalClock {
            next: AtomicU64::new(0),
        }
    }

    /// Allocate the next tick. First call returns `Timestamp(1)`.
    pub fn tick(&self) -> Timestamp {
        Timestamp(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// The most recently allocated tick, 0 if none yet.
    pub fn current(&self) -> Timestamp {
        Timestamp(self.next.load(Ordering::SeqCst))
    }
}
