//! In-memory sharded storage for the chaintrace ledger
//!
//! Replaces a single global map + lock with DashMap-sharded per-entity
//! stores. Distinct products never contend: all of a product's mutable
//! state lives in one [`ProductCell`] behind its own mutex.
//!
//! This crate holds data only. Validation, authorization, and every rule
//! about *when* a record may change live in `chaintrace-engine`.

pub mod alloc;
pub mod cell;
pub mod stores;

pub use alloc::IdAllocator;
pub use cell::ProductCell;
pub use stores::Stores;
