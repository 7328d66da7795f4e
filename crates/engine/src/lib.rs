//! The chaintrace engine: sole writer of all ledger state
//!
//! `Engine` owns the stores, the logical clock, the deployment-fixed owner
//! identity, and the pause switch. Every state-changing operation:
//!
//! 1. rejects immediately if the ledger is paused,
//! 2. resolves and locks the records it will touch (product cell first),
//! 3. finishes **all** validation before the first write,
//! 4. applies its writes and appends at most one history entry,
//! 5. stamps everything with one tick of the logical clock.
//!
//! Failures are synchronous and leave no partial state. Operations on the
//! same product serialize on the product cell's mutex; operations on
//! distinct products share only the lock-free store maps and the atomic
//! counters.
//!
//! The operation surface is split by component, mirroring the subsystem
//! boundaries of the system design:
//! - [`registry`]: stakeholder registration, owner verification, grants
//! - [`batches`]: batch creation and the decrement-on-issue rule
//! - [`lifecycle`]: product creation, status transitions, transfers,
//!   and every write to the provenance history log
//! - [`monitoring`]: verifications, temperature readings, alerts
//! - [`recall`]: forced recall override

pub mod batches;
pub mod lifecycle;
pub mod monitoring;
pub mod recall;
pub mod registry;

use chaintrace_core::clock::LogicalClock;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::types::StakeholderId;
use chaintrace_storage::Stores;
use std::sync::atomic::{AtomicBool, Ordering};

/// The provenance ledger engine.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct Engine {
    pub(crate) stores: Stores,
    pub(crate) clock: LogicalClock,
    owner: StakeholderId,
    paused: AtomicBool,
}

impl Engine {
    /// Create an empty ledger.
    ///
    /// `owner` is the single privileged identity, fixed for the life of the
    /// engine. It alone may verify stakeholders and pause the ledger, and it
    /// may initiate recalls alongside each product's manufacturer. It is
    /// compared by exact identity equality and needs no registration.
    pub fn new(owner: StakeholderId) -> Self {
        Engine {
            stores: Stores::new(),
            clock: LogicalClock::new(),
            owner,
            paused: AtomicBool::new(false),
        }
    }

    /// The privileged owner identity.
    pub fn owner(&self) -> &StakeholderId {
        &self.owner
    }

    /// Whether the ledger is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Pause or resume the ledger. Owner only.
    ///
    /// While paused, every state-changing operation fails with
    /// [`Error::Paused`]; reads are unaffected.
    pub fn set_paused(&self, caller: &StakeholderId, paused: bool) -> Result<()> {
        if caller != &self.owner {
            return Err(Error::NotAuthorized(format!(
                "only the owner may pause or resume, not {caller}"
            )));
        }
        self.paused.store(paused, Ordering::SeqCst);
        tracing::info!(paused, "ledger pause switch changed");
        Ok(())
    }

    /// Reject the operation if the ledger is paused.
    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.is_paused() {
            return Err(Error::Paused);
        }
        Ok(())
    }
}
