//! Read-only queries over the ledger
//!
//! `Queries` holds only an `Arc<Engine>`. Point lookups return cloned
//! snapshots; the two report queries are total functions that return an
//! empty report for a missing product rather than an error, so consumers
//! can render "unknown product" without an error path.

use chaintrace_core::records::{
    Alert, Batch, HistoryEntry, Product, Recall, Stakeholder, TemperatureReading, Verification,
};
use chaintrace_core::types::{
    BatchId, ProductId, ProductStatus, StakeholderId, Timestamp, VerificationId,
};
use chaintrace_engine::monitoring::authenticity_score;
use chaintrace_engine::Engine;
use serde::Serialize;
use std::sync::Arc;

/// Result of `verify_product_authenticity`.
///
/// `exists == false` means the product id is unknown and every other field
/// holds its empty value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthenticityReport {
    pub exists: bool,
    pub manufacturer: Option<StakeholderId>,
    pub batch_id: Option<BatchId>,
    pub status: Option<ProductStatus>,
    pub is_recalled: bool,
    pub verification_count: u64,
    /// Capped confidence metric: `min(100, verification_count * 10)`.
    pub authenticity_score: u32,
}

/// Result of `get_supply_chain_summary`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SupplyChainSummary {
    pub product_id: ProductId,
    pub status: Option<ProductStatus>,
    pub location: String,
    pub holder: Option<StakeholderId>,
    pub manufacturer: Option<StakeholderId>,
    pub created_at: Timestamp,
    pub total_verifications: u64,
    pub is_recalled: bool,
}

/// Read-only query facade.
#[derive(Debug, Clone)]
pub struct Queries {
    engine: Arc<Engine>,
}

impl Queries {
    /// Wrap an engine handle.
    pub fn new(engine: Arc<Engine>) -> Self {
        Queries { engine }
    }

    /// Stakeholder record by identity.
    pub fn stakeholder(&self, id: &StakeholderId) -> Option<Stakeholder> {
        self.engine.get_stakeholder(id)
    }

    /// Batch record by id.
    pub fn batch(&self, id: BatchId) -> Option<Batch> {
        self.engine.get_batch(id)
    }

    /// Product record by id.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.engine.get_product(id)
    }

    /// One history entry by (product, 1-based sequence).
    pub fn history_entry(&self, id: ProductId, sequence: u64) -> Option<HistoryEntry> {
        self.engine.get_history_entry(id, sequence)
    }

    /// Number of history entries for a product.
    pub fn history_len(&self, id: ProductId) -> Option<u64> {
        self.engine.history_len(id)
    }

    /// Full history for a product, in sequence order.
    pub fn product_history(&self, id: ProductId) -> Option<Vec<HistoryEntry>> {
        self.engine.get_product_history(id)
    }

    /// Verification record by global id.
    pub fn verification(&self, id: VerificationId) -> Option<Verification> {
        self.engine.get_verification(id)
    }

    /// A product's verification ids, in creation order.
    pub fn product_verifications(&self, id: ProductId) -> Option<Vec<VerificationId>> {
        self.engine.get_product_verifications(id)
    }

    /// Temperature reading by (product, sequence).
    pub fn temperature_reading(&self, id: ProductId, sequence: u64) -> Option<TemperatureReading> {
        self.engine.get_temperature_reading(id, sequence)
    }

    /// The product's active alert, if any.
    pub fn active_alert(&self, id: ProductId) -> Option<Alert> {
        self.engine.get_active_alert(id)
    }

    /// The product's recall record, if any.
    pub fn recall(&self, id: ProductId) -> Option<Recall> {
        self.engine.get_recall(id)
    }

    /// Authenticity check: existence, provenance anchors, and the capped
    /// verification-derived score.
    pub fn verify_product_authenticity(&self, id: ProductId) -> AuthenticityReport {
        match self.engine.get_product(id) {
            None => AuthenticityReport::default(),
            Some(product) => AuthenticityReport {
                exists: true,
                manufacturer: Some(product.manufacturer),
                batch_id: Some(product.batch_id),
                status: Some(product.status),
                is_recalled: product.is_recalled,
                verification_count: product.total_verifications,
                authenticity_score: authenticity_score(product.total_verifications),
            },
        }
    }

    /// Current position of a product in the supply chain.
    pub fn supply_chain_summary(&self, id: ProductId) -> SupplyChainSummary {
        match self.engine.get_product(id) {
            None => SupplyChainSummary {
                product_id: id,
                ..SupplyChainSummary::default()
            },
            Some(product) => SupplyChainSummary {
                product_id: id,
                status: Some(product.status),
                location: product.location,
                holder: Some(product.holder),
                manufacturer: Some(product.manufacturer),
                created_at: product.created_at,
                total_verifications: product.total_verifications,
                is_recalled: product.is_recalled,
            },
        }
    }
}
