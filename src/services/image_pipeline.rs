use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{BuildingRecord, DownloadReport},
    services::{media_service::MediaSearch, rate_limiter::RateLimiter},
};

/// Fetches one representative photo per building into `output_dir/{id}.jpg`.
pub struct ImagePipeline {
    media: Arc<dyn MediaSearch>,
    limiter: Arc<dyn RateLimiter>,
    output_dir: PathBuf,
}

impl ImagePipeline {
    pub fn new(
        media: Arc<dyn MediaSearch>,
        limiter: Arc<dyn RateLimiter>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            media,
            limiter,
            output_dir: output_dir.into(),
        }
    }

    pub async fn run(&self, buildings: &[BuildingRecord]) -> AppResult<DownloadReport> {
        tokio::fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let total = buildings.len();
        println!("Found {} buildings to download", total);
        println!("Output directory: {}\n", self.output_dir.display());

        let mut report = DownloadReport::new(total);

        for (index, building) in buildings.iter().enumerate() {
            let position = index + 1;
            println!("[{}/{}] {}", position, total, building.name);

            let destination = self.output_dir.join(building.image_file_name());
            if tokio::fs::try_exists(&destination).await.unwrap_or(false) {
                println!("  ✓ Already exists, skipping");
                report.record_skip();
                continue;
            }

            let image_url = match self.locate_image(building).await {
                Ok(url) => url,
                Err(err) => {
                    println!("  ❌ {}", err);
                    log::warn!("Image lookup failed for {}: {}", building.name, err);
                    report.record_failure(&building.name, err.to_string());
                    // Pause even after the last record; the lookup calls still hit the API.
                    self.limiter.wait().await;
                    continue;
                }
            };

            println!("  📥 Downloading...");
            match self.media.download(&image_url, &destination).await {
                Ok(bytes) => {
                    log::debug!("Wrote {} bytes to {}", bytes, destination.display());
                    println!("  ✓ Saved to {}", building.image_file_name());
                    report.record_success();
                }
                Err(err) => {
                    println!("  ❌ Download failed: {}", err);
                    log::warn!("Download failed for {} from {}: {}", building.name, image_url, err);
                    report.record_failure(&building.name, err.to_string());
                }
            }

            if position < total {
                self.limiter.wait().await;
            }
        }

        report.finish();
        print_summary(&report);
        Ok(report)
    }

    /// Search by display name, then resolve the best match to a download URL.
    async fn locate_image(&self, building: &BuildingRecord) -> AppResult<String> {
        let title = self
            .media
            .search_file(&building.name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No results found for: {}", building.name))
            })?;

        log::debug!("Best match for {}: {}", building.name, title);

        self.media
            .resolve_image_url(&title)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No image URL found for: {}", building.name)))
    }
}

fn print_summary(report: &DownloadReport) {
    let rule = "=".repeat(50);
    println!("\n{}", rule);
    println!("Download complete!");
    println!("Successful: {}/{}", report.successful, report.total);
    println!("Failed: {}/{}", report.failed, report.total);
    println!("{}", rule);
}
