//! Seeder configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use blog_infra::DatabaseConfig;

/// Seeder configuration.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// `None` runs against the in-memory store.
    pub database: Option<DatabaseConfig>,
    /// JSON seed file; the bundled sample data when unset.
    pub seed_file: Option<PathBuf>,
}

impl SeedConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            seed_file: env::var("SEED_FILE")
                .ok()
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}
