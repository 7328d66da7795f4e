//! Shared fixtures for the integration tests.

use chaintrace::prelude::*;

pub const OWNER: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";

/// A ledger with the usual cast of registered parties.
pub struct TestLedger {
    pub ledger: ChainTrace,
    pub owner: StakeholderId,
    pub manufacturer: StakeholderId,
    pub distributor: StakeholderId,
    pub retailer: StakeholderId,
    pub verifier: StakeholderId,
}

impl TestLedger {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let owner = StakeholderId::new(OWNER);
        let ledger = ChainTrace::new(owner.clone());

        let manufacturer = StakeholderId::new("ST1MANUFACTURER123456789ABCDEFGH");
        let distributor = StakeholderId::new("ST1DISTRIBUTOR123456789ABCDEFG");
        let retailer = StakeholderId::new("ST1RETAILER123456789ABCDEFGHIJ");
        let verifier = StakeholderId::new("ST1VERIFIER123456789ABCDEFGHIJ");

        for (id, role) in [
            (&manufacturer, Role::Manufacturer),
            (&distributor, Role::Distributor),
            (&retailer, Role::Retailer),
            (&verifier, Role::Verifier),
        ] {
            ledger
                .registry
                .register(id.clone(), role, StakeholderProfile::default())
                .unwrap();
        }

        TestLedger {
            ledger,
            owner,
            manufacturer,
            distributor,
            retailer,
            verifier,
        }
    }

    /// Create a batch of `quantity` units owned by the manufacturer.
    pub fn batch(&self, quantity: u64) -> BatchId {
        self.ledger
            .batches
            .create(
                &self.manufacturer,
                BatchDraft {
                    batch_number: "LOT-2024-001".into(),
                    quality_grade: "A".into(),
                    production_location: "Plant 1".into(),
                    raw_materials: vec!["steel".into()],
                    certifications: vec!["ISO-9001".into()],
                },
                quantity,
            )
            .unwrap()
    }

    /// Create one product against a fresh batch of ten units.
    pub fn product(&self) -> ProductId {
        let batch = self.batch(10);
        self.ledger
            .products
            .create(
                &self.manufacturer,
                batch,
                ProductDraft {
                    name: "Premium Coffee".into(),
                    category: "Food".into(),
                    expiry_date: Timestamp(100_000),
                    origin_country: "CO".into(),
                    description: "1kg whole beans".into(),
                    base_price: 2_500,
                    initial_location: "Plant 1".into(),
                },
            )
            .unwrap()
    }

    /// A status change keeping the manufacturer as holder.
    pub fn change(&self, to: ProductStatus) -> StatusChange {
        StatusChange {
            new_status: to,
            location: format!("at {}", to),
            holder: self.manufacturer.clone(),
            temperature: None,
            humidity: None,
            notes: String::new(),
        }
    }

    /// Walk a product along a legal forward path to `target`.
    ///
    /// Panics if `target` is not on the straight path
    /// Created → … → Sold (with a warehouse stop).
    pub fn drive_to(&self, product: ProductId, target: ProductStatus) {
        let path = [
            ProductStatus::InProduction,
            ProductStatus::QualityCheck,
            ProductStatus::Packaged,
            ProductStatus::InTransit,
            ProductStatus::AtWarehouse,
            ProductStatus::InTransit,
            ProductStatus::AtRetailer,
            ProductStatus::Sold,
        ];
        for status in path {
            self.ledger
                .products
                .update_status(&self.manufacturer, product, self.change(status))
                .unwrap();
            if status == target {
                return;
            }
        }
        panic!("{target} is not on the forward path");
    }
}
