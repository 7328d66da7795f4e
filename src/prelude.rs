//! Convenience re-exports.
//!
//! ```
//! use chaintrace::prelude::*;
//! ```

pub use crate::ledger::{Batches, ChainTrace, Monitor, Products, Recalls, Registry};
pub use chaintrace_api::{AuthenticityReport, Queries, SupplyChainSummary, WireError};
pub use chaintrace_core::error::{Error, Result};
pub use chaintrace_core::records::{
    Alert, AlertKind, Batch, BatchDraft, HistoryEntry, PermissionGrant, Product, ProductDraft,
    Recall, RecallStatus, Stakeholder, StakeholderProfile, StatusChange, TemperatureReading,
    TemperatureSample, Verification, VerificationDraft,
};
pub use chaintrace_core::types::{
    BatchId, ProductId, ProductStatus, Role, StakeholderId, Timestamp, VerificationId,
    VerificationType,
};
