use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::domain::BuildingRecord,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    async fn load_all(&self) -> AppResult<Vec<BuildingRecord>>;
    /// Replaces the whole dataset. Rejects duplicate identifiers.
    async fn save_all(&self, buildings: &[BuildingRecord]) -> AppResult<()>;
}

/// Fails with `AlreadyExists` naming the first identifier that appears twice.
pub fn ensure_unique_ids(buildings: &[BuildingRecord]) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(buildings.len());
    for building in buildings {
        if !seen.insert(building.id.as_str()) {
            return Err(AppError::AlreadyExists(format!(
                "Building with id '{}' appears more than once",
                building.id
            )));
        }
    }
    Ok(())
}

/// The dataset as a single pretty-printed JSON array on disk.
pub struct JsonFileBuildingRepository {
    path: PathBuf,
}

impl JsonFileBuildingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dataset".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }

    async fn write_temp(temp_path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl BuildingRepository for JsonFileBuildingRepository {
    async fn load_all(&self) -> AppResult<Vec<BuildingRecord>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let buildings: Vec<BuildingRecord> = serde_json::from_str(&raw).map_err(|e| {
            AppError::SerializationError(format!(
                "{} is not a list of building records: {}",
                self.path.display(),
                e
            ))
        })?;

        log::debug!("Loaded {} buildings from {}", buildings.len(), self.path.display());
        Ok(buildings)
    }

    async fn save_all(&self, buildings: &[BuildingRecord]) -> AppResult<()> {
        ensure_unique_ids(buildings)?;

        let contents = serde_json::to_string_pretty(buildings)?;
        let temp_path = self.temp_path();

        if let Err(e) = Self::write_temp(&temp_path, contents.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(AppError::IoError(format!(
                "Failed to write {}: {}",
                temp_path.display(),
                e
            )));
        }

        // Rename is atomic on the same filesystem; the old file stays intact until it succeeds.
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(AppError::IoError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        log::info!("Saved {} buildings to {}", buildings.len(), self.path.display());
        Ok(())
    }
}
