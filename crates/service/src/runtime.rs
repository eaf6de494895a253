//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Ensure the data directory exists; warn when the web directory is missing.
pub async fn ensure_env(web_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(web_dir, data_dir).await
}
