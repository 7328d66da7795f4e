//! Main ledger entry point
//!
//! This module provides the [`ChainTrace`] struct, the primary entry point
//! for all ledger operations. Each subsystem is exposed as a cheap handle
//! over one shared engine, so a `ChainTrace` can be cloned into as many
//! call sites as needed.

use chaintrace_api::Queries;
use chaintrace_core::error::Result;
use chaintrace_core::records::{
    Alert, Batch, BatchDraft, HistoryEntry, Product, ProductDraft, Recall, Stakeholder,
    StakeholderProfile, StatusChange, TemperatureReading, TemperatureSample, Verification,
    VerificationDraft,
};
use chaintrace_core::types::{
    BatchId, ProductId, Role, StakeholderId, VerificationId,
};
use chaintrace_engine::Engine;
use std::sync::Arc;

/// The chaintrace ledger.
///
/// # Example
///
/// ```
/// use chaintrace::prelude::*;
///
/// let ledger = ChainTrace::new(StakeholderId::new("ST1OWNER"));
/// assert!(!ledger.is_paused());
/// ```
#[derive(Debug, Clone)]
pub struct ChainTrace {
    engine: Arc<Engine>,

    /// Stakeholder registration and permission grants
    pub registry: Registry,

    /// Production batches
    pub batches: Batches,

    /// Product lifecycle: creation, status transitions, transfers, history
    pub products: Products,

    /// Verifications, temperature readings, alerts
    pub monitor: Monitor,

    /// Recall handling
    pub recalls: Recalls,

    /// Read-only reports and point lookups
    pub queries: Queries,
}

impl ChainTrace {
    /// Create an empty ledger with `owner` as the fixed privileged identity.
    pub fn new(owner: StakeholderId) -> Self {
        let engine = Arc::new(Engine::new(owner));
        ChainTrace {
            registry: Registry {
                engine: Arc::clone(&engine),
            },
            batches: Batches {
                engine: Arc::clone(&engine),
            },
            products: Products {
                engine: Arc::clone(&engine),
            },
            monitor: Monitor {
                engine: Arc::clone(&engine),
            },
            recalls: Recalls {
                engine: Arc::clone(&engine),
            },
            queries: Queries::new(Arc::clone(&engine)),
            engine,
        }
    }

    /// The fixed owner identity.
    pub fn owner(&self) -> &StakeholderId {
        self.engine.owner()
    }

    /// Whether the ledger is paused.
    pub fn is_paused(&self) -> bool {
        self.engine.is_paused()
    }

    /// Pause or resume the ledger. Owner only; reads stay available.
    pub fn set_paused(&self, caller: &StakeholderId, paused: bool) -> Result<()> {
        self.engine.set_paused(caller, paused)
    }
}

/// Stakeholder registry handle.
#[derive(Debug, Clone)]
pub struct Registry {
    engine: Arc<Engine>,
}

impl Registry {
    /// Register a stakeholder. See [`Engine::register_stakeholder`].
    pub fn register(
        &self,
        identity: StakeholderId,
        role: Role,
        profile: StakeholderProfile,
    ) -> Result<StakeholderId> {
        self.engine.register_stakeholder(identity, role, profile)
    }

    /// Mark a stakeholder verified. Owner only.
    pub fn mark_verified(&self, caller: &StakeholderId, target: &StakeholderId) -> Result<()> {
        self.engine.mark_verified(caller, target)
    }

    /// Grant or revoke a can-update capability on a product.
    pub fn grant_permission(
        &self,
        caller: &StakeholderId,
        grantee: &StakeholderId,
        product: ProductId,
        can_update: bool,
    ) -> Result<()> {
        self.engine
            .grant_permission(caller, grantee, product, can_update)
    }

    /// Stakeholder record by identity.
    pub fn get(&self, identity: &StakeholderId) -> Option<Stakeholder> {
        self.engine.get_stakeholder(identity)
    }
}

/// Batch ledger handle.
#[derive(Debug, Clone)]
pub struct Batches {
    engine: Arc<Engine>,
}

impl Batches {
    /// Create a production batch. Manufacturer role required.
    pub fn create(
        &self,
        caller: &StakeholderId,
        draft: BatchDraft,
        total_quantity: u64,
    ) -> Result<BatchId> {
        self.engine.create_batch(caller, draft, total_quantity)
    }

    /// Batch record by id.
    pub fn get(&self, id: BatchId) -> Option<Batch> {
        self.engine.get_batch(id)
    }
}

/// Product lifecycle handle.
#[derive(Debug, Clone)]
pub struct Products {
    engine: Arc<Engine>,
}

impl Products {
    /// Create a product against a batch, issuing one unit from it.
    pub fn create(
        &self,
        caller: &StakeholderId,
        batch: BatchId,
        draft: ProductDraft,
    ) -> Result<ProductId> {
        self.engine.create_product(caller, batch, draft)
    }

    /// Apply a status transition.
    pub fn update_status(
        &self,
        caller: &StakeholderId,
        product: ProductId,
        change: StatusChange,
    ) -> Result<()> {
        self.engine.update_status(caller, product, change)
    }

    /// Transfer custody without changing status.
    pub fn transfer(
        &self,
        caller: &StakeholderId,
        product: ProductId,
        new_owner: StakeholderId,
        new_location: String,
        notes: String,
    ) -> Result<()> {
        self.engine
            .transfer(caller, product, new_owner, new_location, notes)
    }

    /// Product record by id.
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.engine.get_product(id)
    }

    /// One history entry by (product, 1-based sequence).
    pub fn history_entry(&self, id: ProductId, sequence: u64) -> Option<HistoryEntry> {
        self.engine.get_history_entry(id, sequence)
    }

    /// Full history in sequence order.
    pub fn history(&self, id: ProductId) -> Option<Vec<HistoryEntry>> {
        self.engine.get_product_history(id)
    }
}

/// Verification & monitoring handle.
#[derive(Debug, Clone)]
pub struct Monitor {
    engine: Arc<Engine>,
}

impl Monitor {
    /// Record an attestation. Verifier or Manufacturer role required.
    pub fn add_verification(
        &self,
        caller: &StakeholderId,
        product: ProductId,
        draft: VerificationDraft,
    ) -> Result<VerificationId> {
        self.engine.add_verification(caller, product, draft)
    }

    /// Record an environmental reading; out-of-range raises an alert.
    pub fn record_temperature(
        &self,
        caller: &StakeholderId,
        product: ProductId,
        sample: TemperatureSample,
    ) -> Result<()> {
        self.engine.record_temperature(caller, product, sample)
    }

    /// Verification record by global id.
    pub fn verification(&self, id: VerificationId) -> Option<Verification> {
        self.engine.get_verification(id)
    }

    /// Temperature reading by (product, sequence).
    pub fn reading(&self, product: ProductId, sequence: u64) -> Option<TemperatureReading> {
        self.engine.get_temperature_reading(product, sequence)
    }

    /// The product's active alert, if any.
    pub fn active_alert(&self, product: ProductId) -> Option<Alert> {
        self.engine.get_active_alert(product)
    }
}

/// Recall handle.
#[derive(Debug, Clone)]
pub struct Recalls {
    engine: Arc<Engine>,
}

impl Recalls {
    /// Recall a product. Manufacturer of the product or owner only.
    pub fn initiate(
        &self,
        caller: &StakeholderId,
        product: ProductId,
        reason: String,
        affected_batches: Vec<BatchId>,
        severity: u8,
    ) -> Result<()> {
        self.engine
            .initiate_recall(caller, product, reason, affected_batches, severity)
    }

    /// Recall record by product id.
    pub fn get(&self, product: ProductId) -> Option<Recall> {
        self.engine.get_recall(product)
    }
}
