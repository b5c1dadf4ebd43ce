//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server only needs the
//! storage section of the config to prepare the filesystem.

use configs::StorageConfig;

/// Ensure the data directory exists (seeding an empty collection when
/// configured) and warn when the public directory is missing.
pub async fn ensure_env(cfg: &StorageConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.public_dir, &cfg.data_file, cfg.seed_if_missing).await
}
