//! Demo fixtures installed into an empty store on first run.

use chrono::{Duration, Utc};
use log::info;
use rusqlite::params;

use crate::db::connection::Database;
use crate::error::Result;

/// Install the demo partners, packages and leads when the store is empty.
///
/// Runs as a single task on the database worker thread; returns true when the
/// fixtures were installed, false when data already existed.
pub async fn install_seed_data(db: &Database) -> Result<bool> {
    db.execute(|conn| {
        let partner_count: i64 =
            conn.query_row("SELECT COUNT(*) FROM partners", [], |row| row.get(0))?;
        if partner_count > 0 {
            return Ok(false);
        }

        let now = Utc::now();

        for (id, name, email, phone) in [
            (
                "p1",
                "Himalayan Adventures",
                "himalaya@partner.com",
                "+919876543210",
            ),
            (
                "p2",
                "Tropical Getaways",
                "tropical@partner.com",
                "+13055550199",
            ),
        ] {
            conn.execute(
                "INSERT INTO partners (id, name, email, phone, is_active, joined_at)
                 VALUES (?1, ?2, ?3, ?4, 1, ?5)",
                params![id, name, email, phone, now.to_rfc3339()],
            )?;
        }

        let packages: [(&str, &str, &str, f64, u32, &str, &[&str], &[&str], &str); 4] = [
            (
                "pkg1",
                "Majestic Manali Escape",
                "Himachal",
                299.0,
                5,
                "Day 1: Arrival in Manali. Day 2: Solang Valley. Day 3: Rohtang Pass. \
                 Day 4: Local Sightseeing. Day 5: Departure.",
                &["Accommodation", "Breakfast & Dinner", "Private Cab", "Welcome Drink"],
                &["Flights", "Lunch", "Personal Expenses"],
                "p1",
            ),
            (
                "pkg2",
                "Goa Beach Party Week",
                "Goa",
                499.0,
                4,
                "Day 1: North Goa Beaches. Day 2: Water Sports. Day 3: South Goa \
                 Historic Tour. Day 4: Departure.",
                &["Resort Stay", "Airport Pickup", "Breakfast"],
                &["Flights", "Water Sports Fees", "Alcohol"],
                "p2",
            ),
            (
                "pkg3",
                "Kerala Backwater Bliss",
                "Kerala",
                350.0,
                6,
                "Day 1: Cochin arrival. Day 2: Munnar. Day 3: Thekkady. Day 4: Alleppey \
                 Houseboat. Day 5: Kovalam. Day 6: Departure.",
                &["Houseboat Stay", "All Meals on Houseboat", "AC Car"],
                &["Airfare", "Entry Fees"],
                "p2",
            ),
            (
                "pkg4",
                "Rajasthan Royal Heritage",
                "Rajasthan",
                600.0,
                7,
                "Jaipur -> Jodhpur -> Udaipur tour.",
                &["Heritage Hotels", "Camel Ride", "Guide"],
                &["Tips", "Shopping"],
                "p1",
            ),
        ];

        for (id, title, region, price_from, duration_days, itinerary, inclusions, exclusions, partner_id) in
            packages
        {
            conn.execute(
                "INSERT INTO packages (id, title, region, price_from, duration_days, \
                 itinerary, inclusions, exclusions, partner_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    id,
                    title,
                    region,
                    price_from,
                    duration_days,
                    itinerary,
                    serde_json::to_string(inclusions).map_err(anyhow::Error::new)?,
                    serde_json::to_string(exclusions).map_err(anyhow::Error::new)?,
                    partner_id,
                ],
            )?;
        }

        // Two sample inquiries: a fresh one listed first, and an older
        // converted one with its commission already settled.
        conn.execute(
            "INSERT INTO leads (id, package_id, partner_id, customer_name, customer_email, \
             customer_phone, travelers, travel_date, special_requirements, status, \
             commission_received, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                "l1",
                "pkg1",
                "p1",
                "John Doe",
                "john@example.com",
                "555-0123",
                2,
                "2023-12-01",
                "Vegetarian food only",
                "New",
                false,
                2,
                (now - Duration::days(1)).to_rfc3339(),
            ],
        )?;
        conn.execute(
            "INSERT INTO leads (id, package_id, partner_id, customer_name, customer_email, \
             customer_phone, travelers, travel_date, special_requirements, status, \
             commission_received, position, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                "l2",
                "pkg2",
                "p2",
                "Alice Smith",
                "alice@example.com",
                "555-0987",
                4,
                "2024-01-15",
                "Honeymoon suite",
                "Converted",
                true,
                1,
                (now - Duration::days(2)).to_rfc3339(),
            ],
        )?;

        info!("Installed seed data (2 partners, 4 packages, 2 leads)");
        Ok(true)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil::open_test_db;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let (_dir, db) = open_test_db();

        assert!(install_seed_data(&db).await.unwrap());
        assert!(!install_seed_data(&db).await.unwrap());

        assert_eq!(db.list_partners().await.unwrap().len(), 2);
        assert_eq!(db.list_packages().await.unwrap().len(), 4);
        assert_eq!(db.list_leads(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_leads_list_newest_first() {
        let (_dir, db) = open_test_db();
        install_seed_data(&db).await.unwrap();

        let leads = db.list_leads(None).await.unwrap();
        assert_eq!(leads[0].id, "l1");
        assert_eq!(leads[1].id, "l2");
        assert!(leads[1].commission_received);
    }
}
