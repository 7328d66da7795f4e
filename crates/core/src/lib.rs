//! Core types for the chaintrace provenance ledger
//!
//! This crate defines the vocabulary shared by every other workspace member:
//! - [`types`]: identifiers, roles, lifecycle statuses, logical timestamps
//! - [`records`]: the entity records and the request ("draft") structs
//! - [`error`]: the closed error taxonomy with canonical wire codes
//! - [`clock`]: the process-wide monotonic logical clock
//!
//! It has no dependency on any other workspace crate.

pub mod clock;
pub mod error;
pub mod records;
pub mod types;

pub use clock::LogicalClock;
pub use error::{Error, Result};
pub use types::{
    BatchId, ProductId, ProductStatus, Role, StakeholderId, Timestamp, VerificationId,
    VerificationType,
};
