//! Unified error types for the provenance ledger
//!
//! Every failing operation reports exactly one of these kinds, synchronously,
//! with no partial state left behind. None of them are retryable by the core
//! itself; the caller decides whether to resubmit with corrected input.
//!
//! ## Error Codes (Canonical)
//!
//! These codes are frozen and must not change:
//!
//! | Code | Description |
//! |------|-------------|
//! | NotAuthorized | Caller lacks the required role or relationship |
//! | NotFound | Referenced stakeholder, batch, product, or verification is absent |
//! | AlreadyExists | Duplicate registration of an identity |
//! | InvalidStakeholder | Transfer target or grantee is not a registered stakeholder |
//! | InvalidQuantity | Batch has no issuable units (or was created with none) |
//! | InvalidTransition | Requested status change is not in the legal set |
//! | Paused | Ledger is paused; mutations are rejected |

use crate::types::ProductStatus;
use thiserror::Error;

/// All ledger errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Caller lacks the required role or relationship for the operation.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// Referenced entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate registration of an identity already present.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Target of a transfer or grant is not a registered stakeholder.
    #[error("invalid stakeholder: {0}")]
    InvalidStakeholder(String),

    /// Batch has no remaining issuable units.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Requested status change is not in the legal transition set.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the product is currently in
        from: ProductStatus,
        /// Status that was requested
        to: ProductStatus,
    },

    /// The ledger is paused; state-changing operations are rejected.
    #[error("ledger is paused")]
    Paused,
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the canonical error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::NotAuthorized(_) => "NotAuthorized",
            Error::NotFound(_) => "NotFound",
            Error::AlreadyExists(_) => "AlreadyExists",
            Error::InvalidStakeholder(_) => "InvalidStakeholder",
            Error::InvalidQuantity(_) => "InvalidQuantity",
            Error::InvalidTransition { .. } => "InvalidTransition",
            Error::Paused => "Paused",
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if this is an authorization failure.
    pub fn is_not_authorized(&self) -> bool {
        matches!(self, Error::NotAuthorized(_))
    }

    /// Check if this is a transition-table rejection.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, Error::InvalidTransition { .. })
    }
}
