//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected files and directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data directory holding `store_path` exists; warn when the store
/// file itself is missing, since records are seeded out of band.
pub async fn ensure_env(store_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(store_path).await.is_err() {
        warn!(store = %store_path.display(), "records store not found; list and patch will fail until it is seeded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_parent_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("price_desk_env_{}", uuid::Uuid::new_v4()));
        let store = dir.join("nested").join("records.json");
        ensure_env(&store).await?;
        assert!(tokio::fs::metadata(dir.join("nested")).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn ensure_env_accepts_bare_file_name() -> anyhow::Result<()> {
        ensure_env(Path::new("records-that-do-not-exist.json")).await?;
        Ok(())
    }
}
