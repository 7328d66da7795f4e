//! Verification rollups, authenticity scoring, and temperature alerts.

mod common;

use chaintrace::prelude::*;
use common::TestLedger;

fn quality_check(result: bool) -> VerificationDraft {
    VerificationDraft {
        kind: VerificationType::Quality,
        result,
        data: "batch sampling".into(),
        expires_at: None,
        certificate_hash: Some("a1b2c3".into()),
        notes: String::new(),
    }
}

fn sample(temperature: i64) -> TemperatureSample {
    TemperatureSample {
        temperature,
        humidity: 60,
        location: "Reefer 3".into(),
        min_temp: 2,
        max_temp: 8,
    }
}

#[test]
fn verification_count_always_equals_list_length() {
    let t = TestLedger::new();
    let product = t.product();

    for round in 1..=12u64 {
        t.ledger
            .monitor
            .add_verification(&t.verifier, product, quality_check(true))
            .unwrap();

        let record = t.ledger.products.get(product).unwrap();
        let list = t.ledger.queries.product_verifications(product).unwrap();
        assert_eq!(record.total_verifications, round);
        assert_eq!(list.len() as u64, round);
    }
}

#[test]
fn authenticity_score_is_monotone_and_capped() {
    let t = TestLedger::new();
    let product = t.product();

    let mut last = 0;
    for round in 1..=15u64 {
        t.ledger
            .monitor
            .add_verification(&t.verifier, product, quality_check(round % 2 == 0))
            .unwrap();
        let score = t
            .ledger
            .queries
            .verify_product_authenticity(product)
            .authenticity_score;
        assert!(score >= last, "score decreased: {last} -> {score}");
        assert!(score <= 100);
        last = score;
    }
    assert_eq!(last, 100);
}

#[test]
fn verifications_do_not_touch_history() {
    let t = TestLedger::new();
    let product = t.product();
    let before = t.ledger.products.history(product).unwrap().len();

    t.ledger
        .monitor
        .add_verification(&t.verifier, product, quality_check(true))
        .unwrap();

    assert_eq!(t.ledger.products.history(product).unwrap().len(), before);
}

#[test]
fn verifier_counter_tracks_their_attestations() {
    let t = TestLedger::new();
    let p1 = t.product();
    let p2 = t.product();

    t.ledger.monitor.add_verification(&t.verifier, p1, quality_check(true)).unwrap();
    t.ledger.monitor.add_verification(&t.verifier, p2, quality_check(true)).unwrap();
    t.ledger
        .monitor
        .add_verification(&t.manufacturer, p1, quality_check(true))
        .unwrap();

    assert_eq!(t.ledger.registry.get(&t.verifier).unwrap().verification_count, 2);
    assert_eq!(
        t.ledger.registry.get(&t.manufacturer).unwrap().verification_count,
        1
    );
}

#[test]
fn verification_ids_are_global_across_products() {
    let t = TestLedger::new();
    let p1 = t.product();
    let p2 = t.product();

    let a = t.ledger.monitor.add_verification(&t.verifier, p1, quality_check(true));
    let b = t.ledger.monitor.add_verification(&t.verifier, p2, quality_check(true));
    let c = t.ledger.monitor.add_verification(&t.verifier, p1, quality_check(false));
    assert_eq!(a.unwrap(), VerificationId(1));
    assert_eq!(b.unwrap(), VerificationId(2));
    assert_eq!(c.unwrap(), VerificationId(3));

    assert_eq!(
        t.ledger.queries.product_verifications(p1).unwrap(),
        vec![VerificationId(1), VerificationId(3)]
    );
    let record = t.ledger.monitor.verification(VerificationId(3)).unwrap();
    assert_eq!(record.product_id, p1);
    assert!(!record.result);
}

#[test]
fn out_of_range_reading_creates_exactly_one_alert() {
    let t = TestLedger::new();
    let product = t.product();

    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(5))
        .unwrap();
    assert!(t.ledger.monitor.active_alert(product).is_none());

    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(14))
        .unwrap();
    let first = t.ledger.monitor.active_alert(product).unwrap();
    assert_eq!(first.kind, AlertKind::Temperature);
    assert_eq!(first.severity, 3);
    assert_eq!(first.message, "Temperature out of acceptable range");

    // A second breach overwrites the slot rather than duplicating it.
    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(-7))
        .unwrap();
    let second = t.ledger.monitor.active_alert(product).unwrap();
    assert!(second.raised_at > first.raised_at);
}

#[test]
fn alert_slots_are_per_product() {
    let t = TestLedger::new();
    let hot = t.product();
    let fine = t.product();

    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, hot, sample(30))
        .unwrap();
    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, fine, sample(4))
        .unwrap();

    assert!(t.ledger.monitor.active_alert(hot).is_some());
    assert!(t.ledger.monitor.active_alert(fine).is_none());
}

#[test]
fn readings_between_history_events_share_a_sequence_key() {
    let t = TestLedger::new();
    let product = t.product();

    // Creation wrote history entry 1, so readings land at sequence 2.
    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(3))
        .unwrap();
    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(6))
        .unwrap();
    assert_eq!(t.ledger.monitor.reading(product, 2).unwrap().temperature, 6);

    // A history event advances the key for later readings.
    t.ledger
        .products
        .update_status(&t.manufacturer, product, t.change(ProductStatus::InProduction))
        .unwrap();
    t.ledger
        .monitor
        .record_temperature(&t.manufacturer, product, sample(7))
        .unwrap();
    assert_eq!(t.ledger.monitor.reading(product, 3).unwrap().temperature, 7);
    // The earlier reading is untouched.
    assert_eq!(t.ledger.monitor.reading(product, 2).unwrap().temperature, 6);
}

#[test]
fn holders_and_grantees_may_record_readings() {
    let t = TestLedger::new();
    let product = t.product();

    // The verifier is neither manufacturer nor holder: rejected.
    let err = t
        .ledger
        .monitor
        .record_temperature(&t.verifier, product, sample(5))
        .unwrap_err();
    assert_eq!(err.error_code(), "NotAuthorized");

    // The current holder qualifies.
    t.ledger
        .products
        .transfer(
            &t.manufacturer,
            product,
            t.distributor.clone(),
            "DC".into(),
            String::new(),
        )
        .unwrap();
    t.ledger
        .monitor
        .record_temperature(&t.distributor, product, sample(5))
        .unwrap();

    // So does an explicit grantee.
    t.ledger
        .registry
        .grant_permission(&t.manufacturer, &t.verifier, product, true)
        .unwrap();
    t.ledger
        .monitor
        .record_temperature(&t.verifier, product, sample(5))
        .unwrap();
}

#[test]
fn wire_errors_expose_canonical_codes() {
    let t = TestLedger::new();
    let err = t
        .ledger
        .monitor
        .add_verification(&t.distributor, t.product(), quality_check(true))
        .unwrap_err();

    let wire = WireError::from(&err);
    assert_eq!(wire.code, "NotAuthorized");
    let json = serde_json::to_value(&wire).unwrap();
    assert!(json["message"].as_str().unwrap().contains("ST1DISTRIBUTOR"));
}
