//! Verification & monitoring subsystem
//!
//! Records third-party attestations and environmental readings against a
//! product, derives alerts from out-of-range readings, and maintains the
//! rollup counters (`total_verifications` on the product,
//! `verification_count` on the verifier). Verifications are a parallel
//! record, not a custody event: they never touch the provenance history.
//!
//! The alert slot is single-occupancy: a new alert overwrites the previous
//! one. Consumers that need a full alert trail should subscribe upstream;
//! the slot only answers "is this product currently alerting".

use crate::Engine;
use chaintrace_core::error::{Error, Result};
use chaintrace_core::records::{
    Alert, AlertKind, TemperatureReading, TemperatureSample, Verification, VerificationDraft,
};
use chaintrace_core::types::{ProductId, Role, StakeholderId, VerificationId};

/// Severity assigned to every synthesized temperature alert.
const TEMPERATURE_ALERT_SEVERITY: u8 = 3;
/// Fixed message carried by every synthesized temperature alert.
const TEMPERATURE_ALERT_MESSAGE: &str = "Temperature out of acceptable range";

/// Capped, verification-count-derived confidence metric (0–100).
pub fn authenticity_score(total_verifications: u64) -> u32 {
    (total_verifications.saturating_mul(10)).min(100) as u32
}

impl Engine {
    /// Record an attestation against a product.
    ///
    /// Assigns the next global verification id, appends it to the product's
    /// verification list, and bumps both rollup counters. Does not append a
    /// history entry.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::NotAuthorized`] unless the caller's registered role is
    ///   Verifier or Manufacturer
    pub fn add_verification(
        &self,
        caller: &StakeholderId,
        product_id: ProductId,
        draft: VerificationDraft,
    ) -> Result<VerificationId> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;

        let caller_may_verify = self
            .stores
            .stakeholders
            .get(caller)
            .map(|record| matches!(record.role, Role::Verifier | Role::Manufacturer))
            .unwrap_or(false);
        if !caller_may_verify {
            return Err(Error::NotAuthorized(format!(
                "{caller} is neither a verifier nor a manufacturer"
            )));
        }

        let mut guard = cell.lock();
        let id = self.stores.ids.next_verification();
        let recorded_at = self.clock.tick();
        self.stores.verifications.insert(
            id,
            Verification {
                id,
                product_id,
                verifier: caller.clone(),
                kind: draft.kind,
                result: draft.result,
                data: draft.data,
                recorded_at,
                expires_at: draft.expires_at,
                certificate_hash: draft.certificate_hash,
                notes: draft.notes,
            },
        );
        guard.verifications.push(id);
        guard.product.total_verifications += 1;

        if let Some(mut verifier) = self.stores.stakeholders.get_mut(caller) {
            verifier.verification_count += 1;
        }

        tracing::debug!(
            verification = %id,
            product = %product_id,
            verifier = %caller,
            kind = %draft.kind,
            "verification recorded"
        );
        Ok(id)
    }

    /// Record an environmental reading for a product.
    ///
    /// The reading is keyed by the product's current history sequence (read
    /// without incrementing). An out-of-range temperature synthesizes a
    /// severity-3 temperature alert, overwriting the product's alert slot.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if the product does not exist
    /// - [`Error::NotAuthorized`] under the same rule as `update_status`
    pub fn record_temperature(
        &self,
        caller: &StakeholderId,
        product_id: ProductId,
        sample: TemperatureSample,
    ) -> Result<()> {
        self.ensure_active()?;
        let cell = self
            .stores
            .product_cell(product_id)
            .ok_or_else(|| Error::NotFound(format!("product {product_id}")))?;
        let mut guard = cell.lock();

        if !self.is_authorized_for_product(caller, &guard.product) {
            return Err(Error::NotAuthorized(format!(
                "{caller} may not record readings for product {product_id}"
            )));
        }

        let sequence = guard.current_sequence();
        let recorded_at = self.clock.tick();
        let reading =
            TemperatureReading::from_sample(sample, sequence, caller.clone(), recorded_at);
        let in_range = reading.is_within_range;
        guard.put_reading(reading);

        if !in_range {
            guard.alert = Some(Alert {
                kind: AlertKind::Temperature,
                severity: TEMPERATURE_ALERT_SEVERITY,
                message: TEMPERATURE_ALERT_MESSAGE.into(),
                raised_at: recorded_at,
                is_resolved: false,
                resolver: None,
            });
            tracing::warn!(product = %product_id, sequence, "temperature out of range, alert raised");
        } else {
            tracing::debug!(product = %product_id, sequence, "temperature recorded");
        }
        Ok(())
    }

    /// Derived authenticity score for a product.
    pub fn authenticity_score(&self, product_id: ProductId) -> Option<u32> {
        self.get_product(product_id)
            .map(|product| authenticity_score(product.total_verifications))
    }

    /// Snapshot of a verification record.
    pub fn get_verification(&self, id: VerificationId) -> Option<Verification> {
        self.stores.verifications.get(&id).map(|record| record.clone())
    }

    /// A product's verification ids, in insertion order.
    pub fn get_product_verifications(&self, product_id: ProductId) -> Option<Vec<VerificationId>> {
        self.stores
            .product_cell(product_id)
            .map(|cell| cell.lock().verifications.clone())
    }

    /// Point lookup of a temperature reading by (product, sequence).
    pub fn get_temperature_reading(
        &self,
        product_id: ProductId,
        sequence: u64,
    ) -> Option<TemperatureReading> {
        self.stores
            .product_cell(product_id)
            .and_then(|cell| cell.lock().reading(sequence).cloned())
    }

    /// The product's active alert, if any.
    pub fn get_active_alert(&self, product_id: ProductId) -> Option<Alert> {
        self.stores
            .product_cell(product_id)
            .and_then(|cell| cell.lock().alert.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaintrace_core::records::{BatchDraft, ProductDraft, StakeholderProfile};
    use chaintrace_core::types::{Timestamp, VerificationType};

    fn setup() -> (Engine, StakeholderId, StakeholderId, ProductId) {
        let engine = Engine::new(StakeholderId::new("ST1OWNER"));
        let m = StakeholderId::new("ST1M");
        let v = StakeholderId::new("ST1V");
        engine
            .register_stakeholder(m.clone(), Role::Manufacturer, StakeholderProfile::default())
            .unwrap();
        engine
            .register_stakeholder(v.clone(), Role::Verifier, StakeholderProfile::default())
            .unwrap();
        let batch = engine.create_batch(&m, BatchDraft::default(), 5).unwrap();
        let product = engine
            .create_product(&m, batch, ProductDraft::default())
            .unwrap();
        (engine, m, v, product)
    }

    fn verification_draft() -> VerificationDraft {
        VerificationDraft {
            kind: VerificationType::Quality,
            result: true,
            data: "visual inspection".into(),
            expires_at: Some(Timestamp(9999)),
            certificate_hash: None,
            notes: String::new(),
        }
    }

    fn sample(t: i64) -> TemperatureSample {
        TemperatureSample {
            temperature: t,
            humidity: 55,
            location: "Reefer 3".into(),
            min_temp: 2,
            max_temp: 8,
        }
    }

    #[test]
    fn verification_updates_both_rollup_counters() {
        let (engine, _, v, product) = setup();
        let id = engine
            .add_verification(&v, product, verification_draft())
            .unwrap();
        assert_eq!(id, VerificationId(1));

        assert_eq!(engine.get_product(product).unwrap().total_verifications, 1);
        assert_eq!(engine.get_stakeholder(&v).unwrap().verification_count, 1);
        assert_eq!(
            engine.get_product_verifications(product).unwrap(),
            vec![VerificationId(1)]
        );

        let record = engine.get_verification(id).unwrap();
        assert_eq!(record.product_id, product);
        assert_eq!(record.verifier, v);
        assert!(record.result);
    }

    #[test]
    fn verification_list_stays_in_creation_order() {
        let (engine, m, v, product) = setup();
        let a = engine.add_verification(&v, product, verification_draft()).unwrap();
        let b = engine.add_verification(&m, product, verification_draft()).unwrap();
        let c = engine.add_verification(&v, product, verification_draft()).unwrap();
        assert_eq!(
            engine.get_product_verifications(product).unwrap(),
            vec![a, b, c]
        );
        assert_eq!(engine.get_product(product).unwrap().total_verifications, 3);
    }

    #[test]
    fn verifier_or_manufacturer_roles_only() {
        let (engine, _, _, product) = setup();
        let consumer = StakeholderId::new("ST1C");
        engine
            .register_stakeholder(consumer.clone(), Role::Consumer, StakeholderProfile::default())
            .unwrap();

        for caller in [&consumer, &StakeholderId::new("ST1UNREGISTERED")] {
            let err = engine
                .add_verification(caller, product, verification_draft())
                .unwrap_err();
            assert!(err.is_not_authorized(), "caller {caller}");
        }
    }

    #[test]
    fn score_is_capped_at_one_hundred() {
        assert_eq!(authenticity_score(0), 0);
        assert_eq!(authenticity_score(3), 30);
        assert_eq!(authenticity_score(10), 100);
        assert_eq!(authenticity_score(25), 100);
        assert_eq!(authenticity_score(u64::MAX), 100);
    }

    #[test]
    fn in_range_reading_raises_no_alert() {
        let (engine, m, _, product) = setup();
        engine.record_temperature(&m, product, sample(5)).unwrap();
        assert!(engine.get_active_alert(product).is_none());

        let reading = engine.get_temperature_reading(product, 2).unwrap();
        assert!(reading.is_within_range);
        assert_eq!(reading.temperature, 5);
    }

    #[test]
    fn out_of_range_reading_overwrites_single_alert_slot() {
        let (engine, m, _, product) = setup();
        engine.record_temperature(&m, product, sample(15)).unwrap();
        let first = engine.get_active_alert(product).unwrap();
        assert_eq!(first.severity, 3);
        assert_eq!(first.message, "Temperature out of acceptable range");
        assert!(!first.is_resolved);

        engine.record_temperature(&m, product, sample(-4)).unwrap();
        let second = engine.get_active_alert(product).unwrap();
        // Overwritten, not duplicated: the slot now holds the later alert.
        assert!(second.raised_at > first.raised_at);
    }

    #[test]
    fn reading_keyed_by_current_sequence_without_increment() {
        let (engine, m, _, product) = setup();
        // History has one entry, so the counter sits at 2.
        engine.record_temperature(&m, product, sample(5)).unwrap();
        engine.record_temperature(&m, product, sample(7)).unwrap();

        // Second reading overwrote the first at sequence 2.
        assert_eq!(engine.get_temperature_reading(product, 2).unwrap().temperature, 7);
        assert!(engine.get_temperature_reading(product, 1).is_none());
        assert_eq!(engine.history_len(product), Some(1));
    }

    #[test]
    fn monitoring_respects_product_authorization() {
        let (engine, _, v, product) = setup();
        // A verifier may attest but not record readings unless authorized
        // for the product (manufacturer, holder, or grant).
        let err = engine.record_temperature(&v, product, sample(5)).unwrap_err();
        assert!(err.is_not_authorized());

        let err = engine
            .record_temperature(&v, ProductId(99), sample(5))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
