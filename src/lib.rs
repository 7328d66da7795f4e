//! # chaintrace
//!
//! Embedded provenance ledger for multi-party supply chains: stakeholder
//! registry, production batches, a product lifecycle state machine, an
//! append-only per-product provenance history, verification and temperature
//! monitoring with derived alerts, and recall handling.
//!
//! ## Example
//!
//! ```
//! use chaintrace::prelude::*;
//!
//! let ledger = ChainTrace::new(StakeholderId::new("ST1OWNER"));
//!
//! let acme = ledger.registry.register(
//!     StakeholderId::new("ST1ACME"),
//!     Role::Manufacturer,
//!     StakeholderProfile::default(),
//! )?;
//! let batch = ledger.batches.create(&acme, BatchDraft::default(), 100)?;
//! let product = ledger.products.create(&acme, batch, ProductDraft::default())?;
//!
//! let entry = ledger.queries.history_entry(product, 1).unwrap();
//! assert_eq!(entry.status_at_event, ProductStatus::Created);
//! # Ok::<(), chaintrace::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - Every successful state change on a product appends exactly one history
//!   entry; sequences are dense and 1-based; entries are never edited.
//! - Replaying a product's history reconstructs its current status,
//!   location, and holder.
//! - Operations are atomic: a failed operation leaves no partial state.
//! - Operations on distinct products never contend.

pub mod ledger;
pub mod prelude;

pub use chaintrace_core::error::{Error, Result};
pub use ledger::ChainTrace;
