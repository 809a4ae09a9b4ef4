use std::{path::PathBuf, sync::Arc};

use log::info;

use wanderlust_leads::{install_seed_data, Actor, Database, LeadService, SettingsStore};

/// Demo shell: open (or create) the local store, install the demo fixtures,
/// and print the admin dashboard numbers.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let data_dir = std::env::var("WANDERLUST_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./data"));

    let database = Database::new(data_dir.join("wanderlust.sqlite3"))?;
    if install_seed_data(&database).await? {
        info!("Fresh store; demo fixtures installed");
    }

    let settings = Arc::new(SettingsStore::new(data_dir.join("settings.json"))?);
    let service = LeadService::new(database, settings);

    let stats = service.dashboard_stats(&Actor::Admin).await?;
    info!(
        "Leads: {} total, {} pending, estimated revenue {} ({:.0}% conversion)",
        stats.total_leads,
        stats.pending_count,
        stats.estimated_revenue,
        stats.conversion_rate * 100.0
    );

    Ok(())
}
