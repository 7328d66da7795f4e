//! Product lifecycle engine
//!
//! Owns product records, validates and applies status/custody transitions,
//! and is the sole writer of provenance history entries. Every successful
//! state-changing operation on a product appends exactly one entry, so
//! replaying a product's history 1..N reconstructs its current status,
//! location, and holder.
//!
//! Transition legality lives on [`ProductStatus::can_transition_to`]; this
//! module enforces it and the authorization rule: a product may be updated
//! by its manufacturer, its current holder, or a stakeholder holding an
//! explicit can-update grant.

use crate::Engine;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::records::{HistoryEntry, Product, ProductDraft, StatusChange};
use chaintrace_core::types::{BatchId, ProductId, ProductStatus, StakeholderId};
use chaintrace_storage::ProductCell;
use parking_lot::Mutex;
use std::sync::Arc;

impl Engine {
    /// Create a product against a batch, issuing one unit from it.
    ///
    /// On success the product starts in `Created` with the caller as holder,
    /// the batch's remaining quantity drops by 1, and history entry #1
    /// (`from = to = caller`, notes "Product created") is written.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the batch does not exist
    /// - [`Error::NotAuthorized`] unless the caller is the batch's manufacturer
    /// - [`Error::InvalidQuantity`] if the batch has no remaining units
    pub fn create_product(
        &self,
        caller: &StakeholderId,
        batch_id: BatchId,
        draft: ProductDraft,
    ) -> Result<ProductId> {
        self.ensure_active()?;

        {
            let batch = self
                .stores
                .batches
                .get(&batch_id)
                .ok_or_else(|| Error::NotFound(format!("batch {batch_id}")))?;
            if caller != &batch.manufacturer {
                return Err(Error::NotAuthorized(format!(
                    "{caller} is not the manufacturer of batch {batch_id}"
                )));
            }
        }

        // The decrement re-checks remaining quantity under the batch entry's
        // write guard; after it succeeds nothing below can fail.
        self.issue_one(batch_id)?;

        let id = self.stores.ids.next_product();
        let now = self.clock.tick();
        let product = Product {
            id,
            name: draft.name,
            category: draft.category,
            batch_id,
            manufacturer: caller.clone(),
            origin_country: draft.origin_country,
            expiry_date: draft.expiry_date,
            description: draft.description,
            base_price: draft.base_price,
            created_at: now,
            status: ProductStatus::Created,
            location: draft.initial_location.clone(),
            holder: caller.clone(),
            is_recalled: false,
            total_verifications: 0,
        };

        let mut cell = ProductCell::new(product);
        cell.append_history(HistoryEntry {
            sequence: 0,
            from_holder: caller.clone(),
            to_holder: caller.clone(),
            status_at_event: ProductStatus::Created,
            location: draft.initial_location,
            timestamp: now,
            temperature: None,
            humidity: None,
            notes: "Product created".into(),
            transaction_hash: None,
            verification_required: false,
        });
        self.stores
            .products
            .insert(id, Arc::new(Mutex::new(cell)));

        tracing::debug!(product = %id, batch = %batch_id, manufacturer = %caller, "product created");
        Ok(id)
    }

    /// Apply a status transition to a product.
    ///
    /// Mutates status, location, and holder, and appends one history entry
    /// recording the *previous* holder as `from` and the new holder as `to`.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist (checked first)
    /// - [`Error::NotAuthorized`] unless the caller is authorized for the product
    /// - [`Error::InvalidTransition`] if the (current, new) pair is illegal
    pub fn update_status(
        &self,
        caller: &StakeholderId,
        product_id: ProductId,
        change: StatusChange,
    ) -> Result<()> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;
        let mut guard = cell.lock();

        if !self.is_authorized_for_product(caller, &guard.product) {
            return Err(Error::NotAuthorized(format!(
                "{caller} may not update product {product_id}"
            )));
        }
        let from = guard.product.status;
        if !from.can_transition_to(change.new_status) {
            return Err(Error::InvalidTransition {
                from,
                to: change.new_status,
            });
        }

        let now = self.clock.tick();
        let previous_holder = std::mem::replace(&mut guard.product.holder, change.holder.clone());
        guard.product.status = change.new_status;
        guard.product.location = change.location.clone();
        guard.append_history(HistoryEntry {
            sequence: 0,
            from_holder: previous_holder,
            to_holder: change.holder,
            status_at_event: change.new_status,
            location: change.location,
            timestamp: now,
            temperature: change.temperature,
            humidity: change.humidity,
            notes: change.notes,
            transaction_hash: None,
            verification_required: false,
        });

        tracing::debug!(
            product = %product_id,
            from = %from,
            to = %change.new_status,
            "status updated"
        );
        Ok(())
    }

    /// Transfer custody of a product without changing its status.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::NotAuthorized`] unless the caller is the current holder
    /// - [`Error::InvalidStakeholder`] if the new owner is not registered
    pub fn transfer(
        &self,
        caller: &StakeholderId,
        product_id: ProductId,
        new_owner: StakeholderId,
        new_location: String,
        notes: String,
    ) -> Result<()> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;
        let mut guard = cell.lock();

        if caller != &guard.product.holder {
            return Err(Error::NotAuthorized(format!(
                "{caller} does not hold product {product_id}"
            )));
        }
        if !self.stores.stakeholder_exists(&new_owner) {
            return Err(Error::InvalidStakeholder(format!(
                "transfer target {new_owner} is not registered"
            )));
        }

        let now = self.clock.tick();
        let previous_holder = std::mem::replace(&mut guard.product.holder, new_owner.clone());
        guard.product.location = new_location.clone();
        let status = guard.product.status;
        guard.append_history(HistoryEntry {
            sequence: 0,
            from_holder: previous_holder,
            to_holder: new_owner.clone(),
            status_at_event: status,
            location: new_location,
            timestamp: now,
            temperature: None,
            humidity: None,
            notes,
            transaction_hash: None,
            verification_required: false,
        });

        tracing::debug!(product = %product_id, to = %new_owner, "custody transferred");
        Ok(())
    }

    /// Whether `identity` may record events for `product`.
    ///
    /// True iff the identity is the product's manufacturer, its current
    /// holder, or holds an explicit can-update grant. Pure function of the
    /// caller, the product snapshot, and the grant table — no ambient
    /// caller context.
    pub fn is_authorized_for_product(&self, identity: &StakeholderId, product: &Product) -> bool {
        identity == &product.manufacturer
            || identity == &product.holder
            || self.stores.can_update(identity, product.id)
    }

    /// Snapshot of a product record.
    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.stores
            .product_cell(id)
            .map(|cell| cell.lock().product.clone())
    }

    /// Point lookup of one history entry by (product, 1-based sequence).
    pub fn get_history_entry(&self, id: ProductId, sequence: u64) -> Option<HistoryEntry> {
        self.stores
            .product_cell(id)
            .and_then(|cell| cell.lock().history_entry(sequence).cloned())
    }

    /// Number of history entries for a product.
    pub fn history_len(&self, id: ProductId) -> Option<u64> {
        self.stores.product_cell(id).map(|cell| cell.lock().history_len())
    }

    /// Snapshot of a product's full history, in sequence order.
    pub fn get_product_history(&self, id: ProductId) -> Option<Vec<HistoryEntry>> {
        self.stores
            .product_cell(id)
            .map(|cell| cell.lock().history().to_vec())
    }
}
