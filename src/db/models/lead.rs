//! Lead-related data models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lifecycle status of a customer inquiry.
///
/// Serialized with the exact strings the partner-facing status control uses,
/// including the space in "Not Interested".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeadStatus {
    New,
    Contacted,
    #[serde(rename = "Not Interested")]
    NotInterested,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::NotInterested => "Not Interested",
            LeadStatus::Converted => "Converted",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "New" => Ok(LeadStatus::New),
            "Contacted" => Ok(LeadStatus::Contacted),
            "Not Interested" => Ok(LeadStatus::NotInterested),
            "Converted" => Ok(LeadStatus::Converted),
            other => Err(Error::validation(format!("unknown lead status '{other}'"))),
        }
    }

    /// Position in the lifecycle used by strict-transition checks.
    /// Not Interested and Converted share the final rank.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            LeadStatus::New => 0,
            LeadStatus::Contacted => 1,
            LeadStatus::NotInterested | LeadStatus::Converted => 2,
        }
    }

    /// Semi-terminal statuses can only be left via an explicit reopen.
    pub(crate) fn is_semi_terminal(&self) -> bool {
        matches!(self, LeadStatus::NotInterested | LeadStatus::Converted)
    }
}

/// A customer inquiry against a package, tracked through its status lifecycle.
///
/// `partner_id` is a snapshot of the owning package's partner taken at
/// creation time; it does not follow later package edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub package_id: String,
    pub partner_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub travelers: u32,
    pub travel_date: NaiveDate,
    pub special_requirements: Option<String>,
    pub status: LeadStatus,
    pub commission_received: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for the public inquiry form.
///
/// The repository derives the partner assignment from the package, generates
/// the id, and forces status/commission/created_at; callers supply only what
/// the customer typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub package_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub travelers: u32,
    pub travel_date: NaiveDate,
    pub special_requirements: Option<String>,
}

impl LeadDraft {
    pub fn validate(&self) -> Result<()> {
        if self.package_id.trim().is_empty() {
            return Err(Error::validation("packageId is required"));
        }
        if self.customer_name.trim().is_empty() {
            return Err(Error::validation("customerName is required"));
        }
        if self.customer_email.trim().is_empty() {
            return Err(Error::validation("customerEmail is required"));
        }
        if self.customer_phone.trim().is_empty() {
            return Err(Error::validation("customerPhone is required"));
        }
        if self.travelers < 1 {
            return Err(Error::validation("travelers must be at least 1"));
        }
        Ok(())
    }
}
