//! Sharded entity stores
//!
//! One DashMap per entity kind. Reads are lock-free; writes lock only the
//! target shard. Product cells are held as `Arc<Mutex<ProductCell>>` so the
//! engine can take the cell lock without pinning a DashMap shard, and so
//! two operations on the same product serialize while operations on
//! different products run concurrently.
//!
//! # Thread Safety
//!
//! All stores are `Send + Sync`. Callers that mutate more than one record
//! in a single operation (engine only) must finish all validation before
//! the first write; the stores themselves enforce nothing.

use crate::alloc::IdAllocator;
use crate::cell::ProductCell;
use chaintrace_core::records::{Batch, PermissionGrant, Stakeholder, Verification};
use chaintrace_core::types::{BatchId, ProductId, StakeholderId, VerificationId};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// All ledger state.
#[derive(Debug, Default)]
pub struct Stores {
    /// Registered stakeholders by identity.
    pub stakeholders: DashMap<StakeholderId, Stakeholder>,
    /// Production batches by id.
    pub batches: DashMap<BatchId, Batch>,
    /// Product cells by id. Never removed.
    pub products: DashMap<ProductId, Arc<Mutex<ProductCell>>>,
    /// Global verification records by id.
    pub verifications: DashMap<VerificationId, Verification>,
    /// Delegated can-update grants, keyed (grantee, product).
    pub permissions: DashMap<(StakeholderId, ProductId), PermissionGrant>,
    /// Sequential id allocators.
    pub ids: IdAllocator,
}

impl Stores {
    /// Create empty stores.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone out a product's cell handle, if the product exists.
    ///
    /// Cloning the `Arc` releases the DashMap shard before the caller takes
    /// the cell lock, so a long-held cell never blocks unrelated products.
    pub fn product_cell(&self, id: ProductId) -> Option<Arc<Mutex<ProductCell>>> {
        self.products.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether an identity is a registered stakeholder.
    pub fn stakeholder_exists(&self, id: &StakeholderId) -> bool {
        self.stakeholders.contains_key(id)
    }

    /// Whether a (grantee, product) pair holds an explicit can-update grant.
    pub fn can_update(&self, grantee: &StakeholderId, product: ProductId) -> bool {
        self.permissions
            .get(&(grantee.clone(), product))
            .map(|grant| grant.can_update)
            .unwrap_or(false)
    }
}
