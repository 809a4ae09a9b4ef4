mod actor;
mod db;
mod error;
mod leads;
mod settings;
mod stats;

pub use actor::Actor;
pub use db::{
    seed::install_seed_data, Database, Lead, LeadDraft, LeadStatus, Package, PackageDraft,
    Partner,
};
pub use error::{Error, Result};
pub use leads::LeadService;
pub use settings::{LeadPolicy, SettingsStore};
pub use stats::{compute_stats, DashboardStats};
