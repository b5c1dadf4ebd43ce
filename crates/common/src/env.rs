//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected paths exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data file's directory exists and warn when the public
/// assets directory is missing. When `seed_if_missing` is set and the
/// data file does not exist yet, it is created as an empty JSON array.
pub async fn ensure_env(
    public_dir: &Path,
    data_file: &Path,
    seed_if_missing: bool,
) -> anyhow::Result<()> {
    if tokio::fs::metadata(public_dir).await.is_err() {
        warn!(
            public_dir = %public_dir.display(),
            "public assets directory not found; static assets may 404"
        );
    }
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if seed_if_missing && tokio::fs::metadata(data_file).await.is_err() {
        tokio::fs::write(data_file, b"[]")
            .await
            .map_err(|e| anyhow::anyhow!("cannot seed {}: {e}", data_file.display()))?;
        info!(data_file = %data_file.display(), "seeded empty product collection");
    }
    Ok(())
}
