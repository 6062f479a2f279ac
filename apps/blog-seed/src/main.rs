//! # Blog Seeder
//!
//! Loads authors and posts into the configured store through the validating
//! services and reports every record that was refused.

mod config;
mod seed;
mod store;
mod telemetry;

use config::SeedConfig;
use seed::SeedFile;
use store::Store;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = SeedConfig::from_env();

    let seed = match &config.seed_file {
        Some(path) => {
            tracing::info!("Reading seed file {}", path.display());
            SeedFile::read(path)?
        }
        None => {
            tracing::info!("SEED_FILE not set. Using bundled sample data.");
            SeedFile::sample()?
        }
    };

    let store = Store::connect(config.database.as_ref()).await;
    tracing::info!(backend = store.backend, "Store ready");

    let report = seed::apply(&store, seed).await;

    tracing::info!(
        authors = report.authors_created,
        posts = report.posts_created,
        rejected = report.rejected.len(),
        "Seeding finished"
    );

    for rejection in &report.rejected {
        tracing::error!(
            entity = rejection.entity,
            index = rejection.index,
            error = %rejection.error,
            "Record rejected"
        );
    }

    if !report.rejected.is_empty() {
        anyhow::bail!("{} record(s) rejected", report.rejected.len());
    }

    Ok(())
}
