//! Per-product storage cell
//!
//! All of a product's mutable state — the record itself, its provenance
//! history, its sequence counter, temperature readings, the alert slot, the
//! recall slot, and its verification-id list — lives in one `ProductCell`.
//! The engine locks the cell for the duration of an operation, which gives
//! each state-changing operation exclusive access to everything it
//! reads-and-writes on that product, while operations on distinct products
//! share nothing.
//!
//! ## Sequence discipline
//!
//! `next_sequence` starts at 1. Appending a history entry stamps it with
//! the current counter and then increments, so entries are dense, 1-based,
//! and strictly increasing. Temperature readings are keyed by the counter's
//! *current* value without incrementing it; a second reading with no
//! intervening history append overwrites the first. One reading slot per
//! sequence, always the latest.

use chaintrace_core::records::{Alert, HistoryEntry, Product, Recall, TemperatureReading};
use chaintrace_core::types::VerificationId;
use rustc_hash::FxHashMap;

/// A product's record plus everything appended to it over its lifetime.
#[derive(Debug)]
pub struct ProductCell {
    /// The product record. Creation facts immutable, current state mutable.
    pub product: Product,
    /// Sequence the next history entry will receive.
    next_sequence: u64,
    /// Dense history: entry with sequence `k` sits at index `k - 1`.
    history: Vec<HistoryEntry>,
    /// Temperature readings keyed by sequence.
    temperature: FxHashMap<u64, TemperatureReading>,
    /// Single active alert slot.
    pub alert: Option<Alert>,
    /// Single recall record slot.
    pub recall: Option<Recall>,
    /// Verification ids in insertion order (= creation order).
    pub verifications: Vec<VerificationId>,
}

impl ProductCell {
    /// Create a cell for a freshly issued product. The first history entry
    /// is appended by the engine, not here.
    pub fn new(product: Product) -> Self {
        ProductCell {
            product,
            next_sequence: 1,
            history: Vec::new(),
            temperature: FxHashMap::default(),
            alert: None,
            recall: None,
            verifications: Vec::new(),
        }
    }

    /// Sequence the next history entry will receive. Also the key a
    /// temperature reading recorded right now would be stored under.
    pub fn current_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Append a history entry, stamping it with the next sequence.
    ///
    /// Returns the sequence assigned. The caller provides the entry with
    /// `sequence` unset (any value); it is overwritten here so the log can
    /// never carry a gap or a repeat.
    pub fn append_history(&mut self, mut entry: HistoryEntry) -> u64 {
        let sequence = self.next_sequence;
        entry.sequence = sequence;
        self.history.push(entry);
        self.next_sequence += 1;
        debug_assert_eq!(self.history.len() as u64, self.next_sequence - 1);
        sequence
    }

    /// Point lookup of a history entry by 1-based sequence.
    pub fn history_entry(&self, sequence: u64) -> Option<&HistoryEntry> {
        if sequence == 0 {
            return None;
        }
        self.history.get((sequence - 1) as usize)
    }

    /// Number of history entries written so far.
    pub fn history_len(&self) -> u64 {
        self.history.len() as u64
    }

    /// Full history in sequence order.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Store a temperature reading at its sequence key, overwriting any
    /// reading already at that key.
    pub fn put_reading(&mut self, reading: TemperatureReading) {
        self.temperature.insert(reading.sequence, reading);
    }

    /// Point lookup of a temperature reading by sequence key.
    pub fn reading(&self, sequence: u64) -> Option<&TemperatureReading> {
        self.temperature.get(&sequence)
    }
}
