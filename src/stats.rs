//! Dashboard statistics derived from the lead collection.
//!
//! A pure read-side projection: nothing is cached, every read recomputes
//! from the current leads.

use serde::{Deserialize, Serialize};

use crate::db::models::{Lead, LeadStatus};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    /// Leads still sitting in New.
    pub pending_count: usize,
    /// Converted-lead count times the flat per-conversion commission.
    pub estimated_revenue: i64,
    /// Converted / total; 0.0 for an empty collection.
    pub conversion_rate: f64,
}

pub fn compute_stats(leads: &[Lead], commission_per_conversion: i64) -> DashboardStats {
    let pending_count = leads
        .iter()
        .filter(|l| l.status == LeadStatus::New)
        .count();
    let converted = leads
        .iter()
        .filter(|l| l.status == LeadStatus::Converted)
        .count();

    let conversion_rate = if leads.is_empty() {
        0.0
    } else {
        converted as f64 / leads.len() as f64
    };

    DashboardStats {
        total_leads: leads.len(),
        pending_count,
        estimated_revenue: converted as i64 * commission_per_conversion,
        conversion_rate,
    }
}
