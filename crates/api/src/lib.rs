//! Read-only query surface and wire error format
//!
//! This crate is a stateless facade over the engine: it owns no data and
//! takes no locks of its own. It exposes the point lookups and the two
//! derived reports (authenticity, supply-chain summary), plus the canonical
//! wire encoding of errors.

pub mod queries;
pub mod wire;

pub use queries::{AuthenticityReport, Queries, SupplyChainSummary};
pub use wire::WireError;
