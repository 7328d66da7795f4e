//! Stakeholder registry
//!
//! Identity → role and verification status, consumed by every authorization
//! check in the other components. Identities are unique; role is immutable
//! after registration; `is_verified` is settable only by the owner.

use crate::Engine;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::records::{PermissionGrant, Stakeholder, StakeholderProfile};
use chaintrace_core::types::{ProductId, Role, StakeholderId};

impl Engine {
    /// Register a new stakeholder.
    ///
    /// Creates an unverified, active record and returns the identity.
    ///
    /// # Errors
    /// - [`Error::AlreadyExists`] if the identity is already registered
    /// - [`Error::Paused`] while the ledger is paused
    pub fn register_stakeholder(
        &self,
        identity: StakeholderId,
        role: Role,
        profile: StakeholderProfile,
    ) -> Result<StakeholderId> {
        self.ensure_active()?;

        // Entry-level insert keeps the uniqueness check and the write atomic.
        match self.stores.stakeholders.entry(identity.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(Error::AlreadyExists(format!("stakeholder {identity}")))
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let registered_at = self.clock.tick();
                slot.insert(Stakeholder::new(
                    identity.clone(),
                    role,
                    profile,
                    registered_at,
                ));
                tracing::debug!(%identity, %role, "stakeholder registered");
                Ok(identity)
            }
        }
    }

    /// Mark a stakeholder as verified. Owner only; no self-verification.
    ///
    /// # Errors
    /// - [`Error::NotAuthorized`] unless the caller is the owner
    /// - [`Error::NotFound`] if the target is not registered
    pub fn mark_verified(&self, caller: &StakeholderId, target: &StakeholderId) -> Result<()> {
        self.ensure_active()?;
        if caller != self.owner() {
            return Err(Error::NotAuthorized(format!(
                "only the owner may verify stakeholders, not {caller}"
            )));
        }
        let mut record = self
            .stores
            .stakeholders
            .get_mut(target)
            .ok_or_else(|| Error::NotFound(format!("stakeholder {target}")))?;
        record.is_verified = true;
        tracing::debug!(stakeholder = %target, "stakeholder verified");
        Ok(())
    }

    /// Snapshot of a stakeholder record.
    pub fn get_stakeholder(&self, identity: &StakeholderId) -> Option<Stakeholder> {
        self.stores
            .stakeholders
            .get(identity)
            .map(|record| record.clone())
    }

    /// Grant or revoke a delegated can-update capability on one product.
    ///
    /// Only the product's manufacturer may change grants for it. Revocation
    /// is a grant with `can_update = false`.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::NotAuthorized`] unless the caller is the manufacturer
    /// - [`Error::InvalidStakeholder`] if the grantee is not registered
    pub fn grant_permission(
        &self,
        caller: &StakeholderId,
        grantee: &StakeholderId,
        product_id: ProductId,
        can_update: bool,
    ) -> Result<()> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;
        let guard = cell.lock();
        if caller != &guard.product.manufacturer {
            return Err(Error::NotAuthorized(format!(
                "only the manufacturer may grant permissions on product {product_id}"
            )));
        }
        if !self.stores.stakeholder_exists(grantee) {
            return Err(Error::InvalidStakeholder(format!(
                "grantee {grantee} is not registered"
            )));
        }
        self.stores
            .permissions
            .insert((grantee.clone(), product_id), PermissionGrant { can_update });
        tracing::debug!(%grantee, %product_id, can_update, "permission grant updated");
        Ok(())
    }
}
