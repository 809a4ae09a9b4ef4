pub mod connection;
pub mod helpers;
mod migrations;
pub mod models;
mod repositories;
pub mod seed;

pub use connection::Database;
pub use models::{Lead, LeadDraft, LeadStatus, Package, PackageDraft, Partner};

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::{
        models::{PackageDraft, Partner},
        Database,
    };

    pub(crate) struct TestRefs {
        pub pkg1: String,
        pub pkg2: String,
    }

    pub(crate) fn open_test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = Database::new(dir.path().join("wanderlust.sqlite3")).expect("open database");
        (dir, db)
    }

    /// Two partners with one package each, mirroring the demo fixtures.
    pub(crate) async fn seed_reference(db: &Database) -> TestRefs {
        for (id, name, email) in [
            ("p1", "Himalayan Adventures", "himalaya@partner.com"),
            ("p2", "Tropical Getaways", "tropical@partner.com"),
        ] {
            db.insert_partner(Partner {
                id: id.into(),
                name: name.into(),
                email: email.into(),
                phone: "+10000000000".into(),
                is_active: true,
                joined_at: Utc::now(),
            })
            .await
            .expect("insert partner");
        }

        let pkg1 = db
            .create_package(PackageDraft {
                title: "Majestic Manali Escape".into(),
                region: "Himachal".into(),
                price_from: 299.0,
                duration_days: 5,
                itinerary: "Day 1: Arrival in Manali.".into(),
                inclusions: vec!["Accommodation".into()],
                exclusions: vec!["Flights".into()],
                partner_id: "p1".into(),
            })
            .await
            .expect("create package");

        let pkg2 = db
            .create_package(PackageDraft {
                title: "Goa Beach Party Week".into(),
                region: "Goa".into(),
                price_from: 499.0,
                duration_days: 4,
                itinerary: "Day 1: North Goa Beaches.".into(),
                inclusions: vec!["Resort Stay".into()],
                exclusions: vec!["Flights".into()],
                partner_id: "p2".into(),
            })
            .await
            .expect("create package");

        TestRefs {
            pkg1: pkg1.id,
            pkg2: pkg2.id,
        }
    }
}
