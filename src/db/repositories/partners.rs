use rusqlite::{params, OptionalExtension, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::Partner};
use crate::error::{Error, Result};

fn row_to_partner(row: &Row) -> Result<Partner> {
    let joined_at: String = row.get("joined_at")?;

    Ok(Partner {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        is_active: row.get("is_active")?,
        joined_at: parse_datetime(&joined_at, "joined_at")?,
    })
}

const PARTNER_COLUMNS: &str = "id, name, email, phone, is_active, joined_at";

impl Database {
    pub async fn insert_partner(&self, partner: Partner) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO partners (id, name, email, phone, is_active, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    partner.id,
                    partner.name,
                    partner.email,
                    partner.phone,
                    partner.is_active,
                    partner.joined_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_partner(&self, partner_id: &str) -> Result<Partner> {
        let partner_id = partner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PARTNER_COLUMNS} FROM partners WHERE id = ?1"
            ))?;
            let row = stmt
                .query_row(params![partner_id], |row| Ok(row_to_partner(row)))
                .optional()?
                .transpose()?;

            row.ok_or_else(|| Error::not_found("partner", partner_id))
        })
        .await
    }

    /// Look up a partner by login email. Returns None rather than an error
    /// because a miss here is the normal "no such account" path.
    pub async fn find_partner_by_email(&self, email: &str) -> Result<Option<Partner>> {
        let email = email.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PARTNER_COLUMNS} FROM partners WHERE email = ?1"
            ))?;
            stmt.query_row(params![email], |row| Ok(row_to_partner(row)))
                .optional()?
                .transpose()
        })
        .await
    }

    pub async fn list_partners(&self) -> Result<Vec<Partner>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PARTNER_COLUMNS} FROM partners ORDER BY rowid ASC"
            ))?;

            let mut rows = stmt.query([])?;
            let mut partners = Vec::new();
            while let Some(row) = rows.next()? {
                partners.push(row_to_partner(row)?);
            }

            Ok(partners)
        })
        .await
    }
}
