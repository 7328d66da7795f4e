//! Entity records and request drafts
//!
//! Records are the durable state of the ledger. A few rules hold everywhere:
//!
//! - Creation facts are immutable; mutable fields are only ever changed by
//!   the owning engine component, never set directly by a caller.
//! - [`HistoryEntry`] and [`Verification`] are immutable once written.
//! - Derived counters (`total_verifications`, `verification_count`) are
//!   maintained strictly inside the owning component's mutation path.
//!
//! The `*Draft` structs carry caller-supplied fields into create operations,
//! keeping operation signatures flat.

use crate::types::{
    BatchId, ProductId, ProductStatus, Role, StakeholderId, Timestamp, VerificationId,
    VerificationType,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Stakeholders
// =============================================================================

/// Caller-supplied profile fields for a stakeholder registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeholderProfile {
    pub company_name: String,
    pub contact_info: String,
    pub certifications: Vec<String>,
}

/// A registered supply-chain participant.
///
/// Identity and role are immutable after registration. `is_verified` is set
/// only by the registry owner; `verification_count` only by the monitoring
/// subsystem when this stakeholder records a verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stakeholder {
    pub id: StakeholderId,
    pub role: Role,
    pub profile: StakeholderProfile,
    pub is_verified: bool,
    pub is_active: bool,
    pub registered_at: Timestamp,
    pub verification_count: u64,
}

impl Stakeholder {
    /// Create an unverified, active record at registration time.
    pub fn new(
        id: StakeholderId,
        role: Role,
        profile: StakeholderProfile,
        registered_at: Timestamp,
    ) -> Self {
        Stakeholder {
            id,
            role,
            profile,
            is_verified: false,
            is_active: true,
            registered_at,
            verification_count: 0,
        }
    }
}

/// Delegated per-(stakeholder, product) capability, consulted read-only by
/// the lifecycle engine's authorization check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub can_update: bool,
}

// =============================================================================
// Batches
// =============================================================================

/// Caller-supplied production metadata for a new batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDraft {
    pub batch_number: String,
    pub quality_grade: String,
    pub production_location: String,
    pub raw_materials: Vec<String>,
    pub certifications: Vec<String>,
}

/// A production run of a manufacturer.
///
/// `remaining_quantity` starts equal to `total_quantity`, decrements by
/// exactly 1 each time a product is issued against the batch, and never
/// increases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub manufacturer: StakeholderId,
    pub batch_number: String,
    pub quality_grade: String,
    pub production_location: String,
    pub raw_materials: Vec<String>,
    pub certifications: Vec<String>,
    pub total_quantity: u64,
    pub remaining_quantity: u64,
    pub produced_at: Timestamp,
    pub is_active: bool,
}

// =============================================================================
// Products
// =============================================================================

/// Caller-supplied fields for a new product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub expiry_date: Timestamp,
    pub origin_country: String,
    pub description: String,
    pub base_price: u64,
    pub initial_location: String,
}

/// A trackable unit with a lifecycle status, location, and current holder.
///
/// Owned exclusively by the lifecycle engine; every mutation goes through a
/// validated transition and produces exactly one history entry. Products are
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub batch_id: BatchId,
    pub manufacturer: StakeholderId,
    pub origin_country: String,
    pub expiry_date: Timestamp,
    pub description: String,
    pub base_price: u64,
    pub created_at: Timestamp,
    // Mutable current state
    pub status: ProductStatus,
    pub location: String,
    pub holder: StakeholderId,
    pub is_recalled: bool,
    pub total_verifications: u64,
}

/// Requested status change, passed to `update_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub new_status: ProductStatus,
    pub location: String,
    pub holder: StakeholderId,
    pub temperature: Option<i64>,
    pub humidity: Option<i64>,
    pub notes: String,
}

// =============================================================================
// Provenance history
// =============================================================================

/// One entry in a product's provenance history.
///
/// Keyed by (product, sequence); sequences are dense and 1-based. Entries
/// are immutable once written — the log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based position in the product's history.
    pub sequence: u64,
    pub from_holder: StakeholderId,
    pub to_holder: StakeholderId,
    pub status_at_event: ProductStatus,
    pub location: String,
    pub timestamp: Timestamp,
    pub temperature: Option<i64>,
    pub humidity: Option<i64>,
    pub notes: String,
    pub transaction_hash: Option<String>,
    pub verification_required: bool,
}

// =============================================================================
// Verifications & monitoring
// =============================================================================

/// Caller-supplied fields for a new verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDraft {
    pub kind: VerificationType,
    pub result: bool,
    pub data: String,
    pub expires_at: Option<Timestamp>,
    pub certificate_hash: Option<String>,
    pub notes: String,
}

/// An attestation recorded against a product. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub id: VerificationId,
    pub product_id: ProductId,
    pub verifier: StakeholderId,
    pub kind: VerificationType,
    pub result: bool,
    pub data: String,
    pub recorded_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub certificate_hash: Option<String>,
    pub notes: String,
}

/// Caller-supplied environmental sample, passed to `record_temperature`.
///
/// Temperatures are fixed-point integers (e.g. tenths of a degree); the
/// ledger only compares them against the declared range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureSample {
    pub temperature: i64,
    pub humidity: i64,
    pub location: String,
    pub min_temp: i64,
    pub max_temp: i64,
}

/// A stored environmental reading, keyed by (product, sequence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub sequence: u64,
    pub temperature: i64,
    pub humidity: i64,
    pub location: String,
    pub min_temp: i64,
    pub max_temp: i64,
    pub is_within_range: bool,
    pub recorder: StakeholderId,
    pub recorded_at: Timestamp,
}

impl TemperatureReading {
    /// Build a reading from a sample, deriving `is_within_range`.
    pub fn from_sample(
        sample: TemperatureSample,
        sequence: u64,
        recorder: StakeholderId,
        recorded_at: Timestamp,
    ) -> Self {
        let is_within_range =
            sample.temperature >= sample.min_temp && sample.temperature <= sample.max_temp;
        TemperatureReading {
            sequence,
            temperature: sample.temperature,
            humidity: sample.humidity,
            location: sample.location,
            min_temp: sample.min_temp,
            max_temp: sample.max_temp,
            is_within_range,
            recorder,
            recorded_at,
        }
    }
}

/// Category of an alert raised against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    Temperature,
}

impl AlertKind {
    /// Canonical uppercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Temperature => "TEMPERATURE_ALERT",
        }
    }
}

/// An active alert for a product.
///
/// One slot per product: a new alert overwrites the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: u8,
    pub message: String,
    pub raised_at: Timestamp,
    pub is_resolved: bool,
    pub resolver: Option<StakeholderId>,
}

// =============================================================================
// Recalls
// =============================================================================

/// Lifecycle of a recall record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecallStatus {
    Active,
    Closed,
}

/// A forced withdrawal of a product. At most one record per product;
/// re-initiating a recall overwrites the previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recall {
    pub reason: String,
    pub recalled_at: Timestamp,
    pub affected_batches: Vec<BatchId>,
    pub severity: u8,
    pub initiator: StakeholderId,
    pub status: RecallStatus,
    pub consumer_notification: bool,
}
