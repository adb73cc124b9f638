use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::{BuildingRepository, JsonFileBuildingRepository},
    services::{
        content_pipeline::ContentPipeline,
        image_pipeline::ImagePipeline,
        media_service::WikimediaClient,
        model_service::AnthropicClient,
        rate_limiter::{FixedIntervalLimiter, RateLimiter},
    },
};

/// Wires configuration into the concrete clients both tools share.
#[derive(Clone)]
pub struct AppState {
    pub building_repository: Arc<dyn BuildingRepository>,
    pub limiter: Arc<dyn RateLimiter>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let building_repository = Arc::new(JsonFileBuildingRepository::new(&config.dataset_path));
        let limiter = Arc::new(FixedIntervalLimiter::new(config.pacing_interval()));

        Self {
            building_repository,
            limiter,
            config: Arc::new(config),
        }
    }

    pub fn image_pipeline(&self) -> AppResult<ImagePipeline> {
        let media = Arc::new(WikimediaClient::new(&self.config)?);
        Ok(ImagePipeline::new(
            media,
            self.limiter.clone(),
            &self.config.image_output_dir,
        ))
    }

    /// Fails with `MissingCredential` before any client is built when no API key is configured.
    pub fn content_pipeline(&self) -> AppResult<ContentPipeline> {
        let api_key = self.config.require_api_key()?;
        let generator = Arc::new(AnthropicClient::new(api_key, &self.config)?);

        Ok(ContentPipeline::new(
            generator,
            self.building_repository.clone(),
            self.limiter.clone(),
        )
        .with_target_count(self.config.target_building_count))
    }
}
