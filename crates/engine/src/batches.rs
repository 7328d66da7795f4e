//! Batch ledger
//!
//! Batch id → production metadata and remaining issuable quantity.
//! `remaining_quantity` changes through exactly one path: the lifecycle
//! engine calling [`Engine::issue_one`] during product creation.

use crate::Engine;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::records::{Batch, BatchDraft};
use chaintrace_core::types::{BatchId, Role, StakeholderId};

impl Engine {
    /// Create a production batch. Manufacturer role required.
    ///
    /// # Errors
    /// - [`Error::NotAuthorized`] unless the caller's registered role is
    ///   Manufacturer
    /// - [`Error::InvalidQuantity`] if `total_quantity` is zero
    pub fn create_batch(
        &self,
        caller: &StakeholderId,
        draft: BatchDraft,
        total_quantity: u64,
    ) -> Result<BatchId> {
        self.ensure_active()?;

        let is_manufacturer = self
            .stores
            .stakeholders
            .get(caller)
            .map(|record| record.role == Role::Manufacturer)
            .unwrap_or(false);
        if !is_manufacturer {
            return Err(Error::NotAuthorized(format!(
                "{caller} is not a registered manufacturer"
            )));
        }
        if total_quantity == 0 {
            return Err(Error::InvalidQuantity(
                "batch must contain at least one unit".into(),
            ));
        }

        let id = self.stores.ids.next_batch();
        let produced_at = self.clock.tick();
        self.stores.batches.insert(
            id,
            Batch {
                id,
                manufacturer: caller.clone(),
                batch_number: draft.batch_number,
                quality_grade: draft.quality_grade,
                production_location: draft.production_location,
                raw_materials: draft.raw_materials,
                certifications: draft.certifications,
                total_quantity,
                remaining_quantity: total_quantity,
                produced_at,
                is_active: true,
            },
        );
        tracing::debug!(batch = %id, manufacturer = %caller, total_quantity, "batch created");
        Ok(id)
    }

    /// Issue one unit from a batch, decrementing `remaining_quantity`.
    ///
    /// Crate-internal: only product creation may call this. The check and
    /// the decrement happen under the batch entry's write guard, so two
    /// concurrent creations can never issue the same last unit.
    pub(crate) fn issue_one(&self, batch_id: BatchId) -> Result<()> {
        let mut batch = self
            .stores
            .batches
            .get_mut(&batch_id)
            .ok_or_else(|| Error::NotFound(format!("batch {batch_id}")))?;
        if batch.remaining_quantity == 0 {
            return Err(Error::InvalidQuantity(format!(
                "batch {batch_id} has no remaining units"
            )));
        }
        batch.remaining_quantity -= 1;
        Ok(())
    }

    /// Snapshot of a batch record.
    pub fn get_batch(&self, id: BatchId) -> Option<Batch> {
        self.stores.batches.get(&id).map(|record| record.clone())
    }
}
