use std::path::Path;

use crate::{
    errors::{AppError, AppResult},
    models::domain::WorklistEntry,
};

/// Reads the generation worklist: a JSON array of `{ "name", "style" }` objects.
pub async fn load_worklist(path: &Path) -> AppResult<Vec<WorklistEntry>> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::ConfigError(format!("Failed to read worklist {}: {}", path.display(), e))
    })?;

    let entries: Vec<WorklistEntry> = serde_json::from_str(&raw).map_err(|e| {
        AppError::ConfigError(format!("Invalid worklist {}: {}", path.display(), e))
    })?;

    if let Some(blank) = entries.iter().find(|e| e.name.trim().is_empty()) {
        return Err(AppError::ConfigError(format!(
            "Worklist {} has an entry without a name (style '{}')",
            path.display(),
            blank.style
        )));
    }

    Ok(entries)
}
