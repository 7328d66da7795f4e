//! Recall subsystem
//!
//! Forces a product into `Recalled` regardless of its current status (the
//! one sanctioned bypass of the transition table, consistent with RECALLED
//! being reachable from every state) and records a recall record. At most
//! one recall record exists per product; re-initiating overwrites it.

use crate::Engine;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::records::{HistoryEntry, Recall, RecallStatus};
use chaintrace_core::types::{BatchId, ProductId, ProductStatus, StakeholderId};

impl Engine {
    /// Recall a product.
    ///
    /// Forces `status = Recalled` and `is_recalled = true` unconditionally,
    /// writes the recall record with status `Active`, and appends one
    /// history entry carrying the reason with `verification_required` set.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::NotAuthorized`] unless the caller is the product's
    ///   manufacturer or the owner
    pub fn initiate_recall(
        &self,
        caller: &StakeholderId,
        product_id: ProductId,
        reason: String,
        affected_batches: Vec<BatchId>,
        severity: u8,
    ) -> Result<()> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;
        let mut guard = cell.lock();

        if caller != &guard.product.manufacturer && caller != self.owner() {
            return Err(Error::NotAuthorized(format!(
                "{caller} may not recall product {product_id}"
            )));
        }

        let now = self.clock.tick();
        guard.product.status = ProductStatus::Recalled;
        guard.product.is_recalled = true;
        guard.recall = Some(Recall {
            reason: reason.clone(),
            recalled_at: now,
            affected_batches,
            severity,
            initiator: caller.clone(),
            status: RecallStatus::Active,
            consumer_notification: true,
        });

        let holder = guard.product.holder.clone();
        let location = guard.product.location.clone();
        guard.append_history(HistoryEntry {
            sequence: 0,
            from_holder: holder.clone(),
            to_holder: holder,
            status_at_event: ProductStatus::Recalled,
            location,
            timestamp: now,
            temperature: None,
            humidity: None,
            notes: reason,
            transaction_hash: None,
            verification_required: true,
        });

        tracing::info!(product = %product_id, initiator = %caller, severity, "product recalled");
        Ok(())
    }

    /// Snapshot of a product's recall record, if any.
    pub fn get_recall(&self, product_id: ProductId) -> Option<Recall> {
        self.stores
            .product_cell(product_id)
            .and_then(|cell| cell.lock().recall.clone())
    }
}
