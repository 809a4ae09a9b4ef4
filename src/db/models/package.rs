//! Package data models.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A tour package owned by a partner.
///
/// Inclusions and exclusions keep their listing order; the storage layer
/// holds them as JSON text columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    pub region: String,
    pub price_from: f64,
    pub duration_days: u32,
    pub itinerary: String,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub partner_id: String,
}

/// Input data for creating a package; the repository generates the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDraft {
    pub title: String,
    pub region: String,
    pub price_from: f64,
    pub duration_days: u32,
    pub itinerary: String,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub partner_id: String,
}

pub(crate) fn validate_fields(
    title: &str,
    region: &str,
    price_from: f64,
    duration_days: u32,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("title is required"));
    }
    if region.trim().is_empty() {
        return Err(Error::validation("region is required"));
    }
    if price_from <= 0.0 {
        return Err(Error::validation("priceFrom must be positive"));
    }
    if duration_days < 1 {
        return Err(Error::validation("durationDays must be at least 1"));
    }
    Ok(())
}

impl PackageDraft {
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.region, self.price_from, self.duration_days)
    }
}

impl Package {
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.title, &self.region, self.price_from, self.duration_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PackageDraft {
        PackageDraft {
            title: "Majestic Manali Escape".into(),
            region: "Himachal".into(),
            price_from: 299.0,
            duration_days: 5,
            itinerary: "Day 1: Arrival in Manali.".into(),
            inclusions: vec!["Accommodation".into()],
            exclusions: vec!["Flights".into()],
            partner_id: "p1".into(),
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut d = draft();
        d.price_from = 0.0;
        assert!(matches!(d.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut d = draft();
        d.duration_days = 0;
        assert!(matches!(d.validate(), Err(Error::Validation(_))));
    }
}
