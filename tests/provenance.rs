//! Provenance history properties: dense sequences and exact replay.

mod common;

use chaintrace::prelude::*;
use common::TestLedger;
use proptest::prelude::*;

/// Replay a product's history 1..N and return the reconstructed
/// (status, location, holder).
fn replay(history: &[HistoryEntry]) -> (ProductStatus, String, StakeholderId) {
    let mut status = ProductStatus::Created;
    let mut location = String::new();
    let mut holder = StakeholderId::new("");
    for entry in history {
        status = entry.status_at_event;
        location = entry.location.clone();
        holder = entry.to_holder.clone();
    }
    (status, location, holder)
}

fn assert_invariants(t: &TestLedger, product: ProductId) {
    let record = t.ledger.products.get(product).unwrap();
    let history = t.ledger.products.history(product).unwrap();

    // Dense, 1-based, no gaps or repeats.
    for (index, entry) in history.iter().enumerate() {
        assert_eq!(entry.sequence, index as u64 + 1);
    }
    // Point lookups agree with the snapshot and stop at the end.
    assert!(t
        .ledger
        .products
        .history_entry(product, history.len() as u64 + 1)
        .is_none());

    // Replay reconstructs the current state exactly.
    let (status, location, holder) = replay(&history);
    assert_eq!(status, record.status);
    assert_eq!(location, record.location);
    assert_eq!(holder, record.holder);
}

/// One randomized step against a product. Failures are expected and must
/// leave no trace; invariants are checked after every step.
#[derive(Debug, Clone)]
enum Step {
    /// Attempt a transition to an arbitrary status (often illegal).
    Update(usize),
    /// Transfer from the current holder to one of the cast.
    Transfer(usize),
    /// Recall the product.
    Recall,
    /// Record a temperature, alternating in and out of range.
    Temperature(i64),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..10usize).prop_map(Step::Update),
        (0..3usize).prop_map(Step::Transfer),
        Just(Step::Recall),
        (-20..40i64).prop_map(Step::Temperature),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_under_arbitrary_operation_mixes(steps in proptest::collection::vec(step_strategy(), 1..40)) {
        let t = TestLedger::new();
        let product = t.product();
        let cast = [t.manufacturer.clone(), t.distributor.clone(), t.retailer.clone()];

        for step in steps {
            match step {
                Step::Update(raw) => {
                    let to = ProductStatus::ALL[raw % ProductStatus::ALL.len()];
                    let _ = t.ledger.products.update_status(
                        &t.manufacturer,
                        product,
                        t.change(to),
                    );
                }
                Step::Transfer(raw) => {
                    let holder = t.ledger.products.get(product).unwrap().holder;
                    let _ = t.ledger.products.transfer(
                        &holder,
                        product,
                        cast[raw % cast.len()].clone(),
                        "somewhere".into(),
                        String::new(),
                    );
                }
                Step::Recall => {
                    t.ledger
                        .recalls
                        .initiate(&t.manufacturer, product, "random recall".into(), vec![], 3)
                        .unwrap();
                }
                Step::Temperature(temp) => {
                    let _ = t.ledger.monitor.record_temperature(
                        &t.manufacturer,
                        product,
                        TemperatureSample {
                            temperature: temp,
                            humidity: 50,
                            location: "probe".into(),
                            min_temp: 0,
                            max_temp: 10,
                        },
                    );
                }
            }
            assert_invariants(&t, product);
        }
    }

    #[test]
    fn history_length_equals_successful_mutations(extra in 0..6usize) {
        let t = TestLedger::new();
        let product = t.product();

        // Creation wrote entry 1; each legal forward step adds one.
        let path = [
            ProductStatus::InProduction,
            ProductStatus::QualityCheck,
            ProductStatus::Packaged,
            ProductStatus::InTransit,
            ProductStatus::AtWarehouse,
        ];
        for status in path.iter().take(extra.min(path.len())) {
            t.ledger
                .products
                .update_status(&t.manufacturer, product, t.change(*status))
                .unwrap();
        }
        let expected = 1 + extra.min(path.len()) as u64;
        prop_assert_eq!(t.ledger.products.history(product).unwrap().len() as u64, expected);

        // Failed transitions never consume a sequence number.
        let _ = t
            .ledger
            .products
            .update_status(&t.manufacturer, product, t.change(ProductStatus::Sold));
        prop_assert_eq!(t.ledger.products.history(product).unwrap().len() as u64, expected);
    }
}

#[test]
fn replay_after_full_journey_matches_current_state() {
    let t = TestLedger::new();
    let product = t.product();
    t.drive_to(product, ProductStatus::AtRetailer);
    t.ledger
        .products
        .transfer(
            &t.manufacturer,
            product,
            t.retailer.clone(),
            "Store 4".into(),
            "shelf".into(),
        )
        .unwrap();
    t.ledger
        .recalls
        .initiate(&t.manufacturer, product, "glass shards".into(), vec![], 5)
        .unwrap();

    assert_invariants(&t, product);
    let record = t.ledger.products.get(product).unwrap();
    assert_eq!(record.status, ProductStatus::Recalled);
    assert_eq!(record.holder, t.retailer);
}

#[test]
fn entries_are_immutable_snapshots() {
    let t = TestLedger::new();
    let product = t.product();
    let before = t.ledger.products.history_entry(product, 1).unwrap();

    t.drive_to(product, ProductStatus::QualityCheck);

    // Later operations never rewrite earlier entries.
    let after = t.ledger.products.history_entry(product, 1).unwrap();
    assert_eq!(before, after);
}
