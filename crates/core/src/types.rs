//! Identifiers, roles, and the product lifecycle status machine
//!
//! This module defines the fundamental types used throughout the system:
//! - [`StakeholderId`]: opaque identity of a registered participant
//! - [`BatchId`] / [`ProductId`] / [`VerificationId`]: sequential entity ids
//! - [`Role`]: the fixed participant role set
//! - [`ProductStatus`]: lifecycle states plus the legal transition table
//! - [`Timestamp`]: monotonic logical time assigned at operation commit

use serde::{Deserialize, Serialize};

/// Opaque identity of a supply-chain participant.
///
/// Identities are assigned by the caller at registration time (e.g. a
/// wallet address or an organization handle) and are immutable afterwards.
/// The ledger only ever compares them for exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StakeholderId(String);

impl StakeholderId {
    /// Wrap a caller-supplied identity string.
    pub fn new(id: impl Into<String>) -> Self {
        StakeholderId(id.into())
    }

    /// The raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StakeholderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StakeholderId {
    fn from(s: &str) -> Self {
        StakeholderId(s.to_string())
    }
}

macro_rules! sequential_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            /// The raw numeric id.
            pub fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

sequential_id! {
    /// Sequentially assigned batch id, starting at 1.
    BatchId
}
sequential_id! {
    /// Sequentially assigned product id, starting at 1.
    ProductId
}
sequential_id! {
    /// Sequentially assigned, globally unique verification id, starting at 1.
    VerificationId
}

/// Monotonic logical time.
///
/// Every committed state-changing operation is stamped with the next tick of
/// the process-wide [`crate::clock::LogicalClock`]. Timestamps are
/// caller-clock-independent: two entries compare by commit order, never by
/// wall time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(pub u64);

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Role of a registered stakeholder. Immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manufacturer,
    Supplier,
    Distributor,
    Retailer,
    Consumer,
    Verifier,
    Logistics,
}

impl Role {
    /// Canonical uppercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "MANUFACTURER",
            Role::Supplier => "SUPPLIER",
            Role::Distributor => "DISTRIBUTOR",
            Role::Retailer => "RETAILER",
            Role::Consumer => "CONSUMER",
            Role::Verifier => "VERIFIER",
            Role::Logistics => "LOGISTICS",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a product.
///
/// The variants are ordered by typical forward progression. Which (from, to)
/// pairs are legal is decided by [`ProductStatus::can_transition_to`]; every
/// other pair is rejected with
/// [`Error::InvalidTransition`](crate::error::Error::InvalidTransition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductStatus {
    Created,
    InProduction,
    QualityCheck,
    Packaged,
    InTransit,
    AtWarehouse,
    AtRetailer,
    Sold,
    Recalled,
    Expired,
}

/// The directed edges of the normal forward lifecycle.
///
/// `InTransit ⇄ AtWarehouse` is the only two-way pair: goods may shuttle
/// between warehouses before reaching a retailer.
const FORWARD_TRANSITIONS: &[(ProductStatus, ProductStatus)] = &[
    (ProductStatus::Created, ProductStatus::InProduction),
    (ProductStatus::InProduction, ProductStatus::QualityCheck),
    (ProductStatus::QualityCheck, ProductStatus::Packaged),
    (ProductStatus::Packaged, ProductStatus::InTransit),
    (ProductStatus::InTransit, ProductStatus::AtWarehouse),
    (ProductStatus::AtWarehouse, ProductStatus::InTransit),
    (ProductStatus::InTransit, ProductStatus::AtRetailer),
    (ProductStatus::AtRetailer, ProductStatus::Sold),
];

impl ProductStatus {
    /// All statuses, in forward-progression order.
    pub const ALL: [ProductStatus; 10] = [
        ProductStatus::Created,
        ProductStatus::InProduction,
        ProductStatus::QualityCheck,
        ProductStatus::Packaged,
        ProductStatus::InTransit,
        ProductStatus::AtWarehouse,
        ProductStatus::AtRetailer,
        ProductStatus::Sold,
        ProductStatus::Recalled,
        ProductStatus::Expired,
    ];

    /// Whether `self -> to` is a legal status transition.
    ///
    /// Two overrides sit on top of the forward table:
    /// - `Recalled` is reachable from **any** status, including `Sold`.
    /// - `Expired` is reachable only from `AtWarehouse` or `AtRetailer`.
    pub fn can_transition_to(&self, to: ProductStatus) -> bool {
        if to == ProductStatus::Recalled {
            return true;
        }
        if to == ProductStatus::Expired {
            return matches!(self, ProductStatus::AtWarehouse | ProductStatus::AtRetailer);
        }
        FORWARD_TRANSITIONS
            .iter()
            .any(|&(from, next)| from == *self && next == to)
    }

    /// Canonical uppercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Created => "CREATED",
            ProductStatus::InProduction => "IN_PRODUCTION",
            ProductStatus::QualityCheck => "QUALITY_CHECK",
            ProductStatus::Packaged => "PACKAGED",
            ProductStatus::InTransit => "IN_TRANSIT",
            ProductStatus::AtWarehouse => "AT_WAREHOUSE",
            ProductStatus::AtRetailer => "AT_RETAILER",
            ProductStatus::Sold => "SOLD",
            ProductStatus::Recalled => "RECALLED",
            ProductStatus::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of attestation recorded against a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationType {
    Quality,
    Authenticity,
    Temperature,
    Quantity,
    Certification,
}

impl VerificationType {
    /// Canonical uppercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::Quality => "QUALITY",
            VerificationType::Authenticity => "AUTHENTICITY",
            VerificationType::Temperature => "TEMPERATURE",
            VerificationType::Quantity => "QUANTITY",
            VerificationType::Certification => "CERTIFICATION",
        }
    }
}

impl std::fmt::Display for VerificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
