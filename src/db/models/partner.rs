//! Partner data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An external tour operator who owns packages and receives leads generated
/// against them. The email doubles as the login identifier and is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}
