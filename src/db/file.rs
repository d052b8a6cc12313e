use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{db::SnapshotStore, error::AppResult, models::Catalog};

/// Catalog snapshot stored as a pretty-printed JSON array on disk
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> AppResult<Option<Catalog>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let catalog: Catalog = serde_json::from_str(&json)?;
        Ok(Some(catalog))
    }

    async fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let json = serde_json::to_string_pretty(catalog)?;

        // Rename over the target so a crash never leaves a half-written snapshot
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::info!(
            path = %self.path.display(),
            items = catalog.len(),
            "Saved catalog snapshot"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
