//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Ensure the data directory exists; warn when the static web directory is missing.
pub async fn ensure_env(web_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(web_dir).await.is_err() {
        warn!(%web_dir, "web assets directory not found; static assets may 404");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
