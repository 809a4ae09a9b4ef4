use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_date, parse_datetime},
    models::{Lead, LeadDraft, LeadStatus},
};
use crate::error::{Error, Result};

fn row_to_lead(row: &Row) -> Result<Lead> {
    let travel_date: String = row.get("travel_date")?;
    let created_at: String = row.get("created_at")?;
    let status: String = row.get("status")?;

    Ok(Lead {
        id: row.get("id")?,
        package_id: row.get("package_id")?,
        partner_id: row.get("partner_id")?,
        customer_name: row.get("customer_name")?,
        customer_email: row.get("customer_email")?,
        customer_phone: row.get("customer_phone")?,
        travelers: row.get("travelers")?,
        travel_date: parse_date(&travel_date, "travel_date")?,
        special_requirements: row.get("special_requirements")?,
        status: LeadStatus::parse(&status)?,
        commission_received: row.get("commission_received")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

const LEAD_COLUMNS: &str = "id, package_id, partner_id, customer_name, customer_email, \
     customer_phone, travelers, travel_date, special_requirements, status, \
     commission_received, created_at";

fn load_lead(conn: &rusqlite::Connection, lead_id: &str) -> Result<Lead> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LEAD_COLUMNS} FROM leads WHERE id = ?1"
    ))?;
    let row = stmt
        .query_row(params![lead_id], |row| {
            Ok(row_to_lead(row))
        })
        .optional()?
        .transpose()?;

    row.ok_or_else(|| Error::not_found("lead", lead_id))
}

impl Database {
    /// Create a lead from a public inquiry submission.
    ///
    /// The partner assignment is snapshotted from the referenced package at
    /// this moment and never tracks later package edits. The new lead always
    /// starts as New with no commission recorded, and takes the next position
    /// so listings stay most-recent-first.
    pub async fn create_lead(&self, draft: LeadDraft) -> Result<Lead> {
        draft.validate()?;

        self.execute(move |conn| {
            let partner_id: Option<String> = conn
                .query_row(
                    "SELECT partner_id FROM packages WHERE id = ?1",
                    params![draft.package_id],
                    |row| row.get(0),
                )
                .optional()?;
            let partner_id = partner_id
                .ok_or_else(|| Error::not_found("package", draft.package_id.clone()))?;

            let position: i64 = conn.query_row(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM leads",
                [],
                |row| row.get(0),
            )?;

            let lead = Lead {
                id: Uuid::new_v4().to_string(),
                package_id: draft.package_id,
                partner_id,
                customer_name: draft.customer_name,
                customer_email: draft.customer_email,
                customer_phone: draft.customer_phone,
                travelers: draft.travelers,
                travel_date: draft.travel_date,
                special_requirements: draft.special_requirements,
                status: LeadStatus::New,
                commission_received: false,
                created_at: Utc::now(),
            };

            conn.execute(
                "INSERT INTO leads (id, package_id, partner_id, customer_name, customer_email, \
                 customer_phone, travelers, travel_date, special_requirements, status, \
                 commission_received, position, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    lead.id,
                    lead.package_id,
                    lead.partner_id,
                    lead.customer_name,
                    lead.customer_email,
                    lead.customer_phone,
                    lead.travelers,
                    lead.travel_date.format("%Y-%m-%d").to_string(),
                    lead.special_requirements,
                    lead.status.as_str(),
                    lead.commission_received,
                    position,
                    lead.created_at.to_rfc3339(),
                ],
            )?;

            Ok(lead)
        })
        .await
    }

    pub async fn get_lead(&self, lead_id: &str) -> Result<Lead> {
        let lead_id = lead_id.to_string();
        self.execute(move |conn| load_lead(conn, &lead_id)).await
    }

    /// All leads, most recent first; optionally scoped to a single partner
    /// (the partner dashboard's visibility boundary).
    pub async fn list_leads(&self, partner_id: Option<&str>) -> Result<Vec<Lead>> {
        let partner_id = partner_id.map(str::to_string);
        self.execute(move |conn| {
            let mut leads = Vec::new();

            match partner_id {
                Some(partner) => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LEAD_COLUMNS} FROM leads
                         WHERE partner_id = ?1
                         ORDER BY position DESC"
                    ))?;
                    let mut rows = stmt.query(params![partner])?;
                    while let Some(row) = rows.next()? {
                        leads.push(row_to_lead(row)?);
                    }
                }
                None => {
                    let mut stmt = conn.prepare(&format!(
                        "SELECT {LEAD_COLUMNS} FROM leads ORDER BY position DESC"
                    ))?;
                    let mut rows = stmt.query([])?;
                    while let Some(row) = rows.next()? {
                        leads.push(row_to_lead(row)?);
                    }
                }
            }

            Ok(leads)
        })
        .await
    }

    /// Replace a lead's status, leaving every other field untouched.
    ///
    /// Moving away from Converted does not clear a previously recorded
    /// commission; that retained-state policy is deliberate. With `strict`
    /// set, transitions that regress the lifecycle or leave a semi-terminal
    /// status are rejected; `reopen_lead` is the escape hatch.
    pub async fn update_lead_status(
        &self,
        lead_id: &str,
        new_status: LeadStatus,
        strict: bool,
    ) -> Result<Lead> {
        let lead_id = lead_id.to_string();
        self.execute(move |conn| {
            let mut lead = load_lead(conn, &lead_id)?;

            if strict && lead.status != new_status {
                if lead.status.is_semi_terminal() {
                    return Err(Error::InvalidState(format!(
                        "lead is {}; reopen it before changing status",
                        lead.status.as_str()
                    )));
                }
                if new_status.rank() < lead.status.rank() {
                    return Err(Error::InvalidState(format!(
                        "cannot move lead from {} back to {}",
                        lead.status.as_str(),
                        new_status.as_str()
                    )));
                }
            }

            conn.execute(
                "UPDATE leads SET status = ?1 WHERE id = ?2",
                params![new_status.as_str(), lead_id],
            )?;

            lead.status = new_status;
            Ok(lead)
        })
        .await
    }

    /// Move a semi-terminal lead (Converted or Not Interested) back to
    /// Contacted. This is the only sanctioned way out of those statuses when
    /// strict transitions are enabled.
    pub async fn reopen_lead(&self, lead_id: &str) -> Result<Lead> {
        let lead_id = lead_id.to_string();
        self.execute(move |conn| {
            let mut lead = load_lead(conn, &lead_id)?;

            if !lead.status.is_semi_terminal() {
                return Err(Error::InvalidState(format!(
                    "lead is {}; only Converted or Not Interested leads can be reopened",
                    lead.status.as_str()
                )));
            }

            conn.execute(
                "UPDATE leads SET status = ?1 WHERE id = ?2",
                params![LeadStatus::Contacted.as_str(), lead_id],
            )?;

            lead.status = LeadStatus::Contacted;
            Ok(lead)
        })
        .await
    }

    /// Record that the partner paid commission for a converted lead.
    ///
    /// Rejected unless the lead is currently Converted; calling it again on
    /// an already-paid lead is a no-op.
    pub async fn mark_commission_received(&self, lead_id: &str) -> Result<Lead> {
        let lead_id = lead_id.to_string();
        self.execute(move |conn| {
            let mut lead = load_lead(conn, &lead_id)?;

            if lead.commission_received {
                return Ok(lead);
            }

            if lead.status != LeadStatus::Converted {
                return Err(Error::InvalidState(format!(
                    "commission can only be marked on a Converted lead (status is {})",
                    lead.status.as_str()
                )));
            }

            conn.execute(
                "UPDATE leads SET commission_received = 1 WHERE id = ?1",
                params![lead_id],
            )?;

            lead.commission_received = true;
            Ok(lead)
        })
        .await
    }
}
