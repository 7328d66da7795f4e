//! Sequential id allocators
//!
//! Batch, product, and verification ids are process-wide sequential
//! counters starting at 1. Allocation is atomic and non-blocking; the
//! engine only allocates after validation has passed, so issued ids are
//! contiguous in practice.

use chaintrace_core::types::{BatchId, ProductId, VerificationId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Allocators for the three global id spaces.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_batch: AtomicU64,
    next_product: AtomicU64,
    next_verification: AtomicU64,
}

impl IdAllocator {
    /// Create allocators whose first issued id is 1 in each space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next batch id.
    pub fn next_batch(&self) -> BatchId {
        BatchId(self.next_batch.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Allocate the next product id.
    pub fn next_product(&self) -> ProductId {
        ProductId(self.next_product.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Allocate the next global verification id.
    pub fn next_verification(&self) -> VerificationId {
        VerificationId(self.next_verification.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
