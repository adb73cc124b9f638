use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_GENERATION_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_GENERATION_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MEDIA_API_URL: &str = "https://commons.wikimedia.org/w/api.php";
pub const DEFAULT_MEDIA_CLIENT_ID: &str = "GracitectureApp/1.0";
pub const DEFAULT_MEDIA_CONTACT: &str = "contact@example.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub image_output_dir: PathBuf,
    pub worklist_path: PathBuf,
    pub api_key: Option<SecretString>,
    pub generation_api_url: String,
    pub generation_model: String,
    pub generation_max_tokens: u32,
    pub media_api_url: String,
    pub media_client_id: String,
    pub media_contact: String,
    pub thumbnail_width: u32,
    pub pacing_interval_secs: u64,
    pub target_building_count: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            dataset_path: env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/buildings.json")),
            image_output_dir: env::var("IMAGE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("public/images")),
            worklist_path: env::var("WORKLIST_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/worklist.json")),
            api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            generation_api_url: env::var("GENERATION_API_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_API_URL.to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string()),
            generation_max_tokens: env::var("GENERATION_MAX_TOKENS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(1000),
            media_api_url: env::var("MEDIA_API_URL")
                .unwrap_or_else(|_| DEFAULT_MEDIA_API_URL.to_string()),
            media_client_id: env::var("MEDIA_CLIENT_ID")
                .unwrap_or_else(|_| DEFAULT_MEDIA_CLIENT_ID.to_string()),
            media_contact: env::var("MEDIA_CONTACT")
                .unwrap_or_else(|_| DEFAULT_MEDIA_CONTACT.to_string()),
            thumbnail_width: env::var("THUMBNAIL_WIDTH")
                .ok()
                .and_then(|w| w.parse().ok())
                .unwrap_or(2000),
            pacing_interval_secs: env::var("PACING_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
            target_building_count: env::var("TARGET_BUILDING_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(75),
        }
    }

    /// The generation API key, or `MissingCredential` when it was not set.
    pub fn require_api_key(&self) -> AppResult<SecretString> {
        self.api_key.clone().ok_or_else(|| {
            AppError::MissingCredential(
                "ANTHROPIC_API_KEY not found in environment".to_string(),
            )
        })
    }

    /// `User-Agent` sent to the media API, shaped `{client_id} ({contact})`.
    pub fn media_user_agent(&self) -> String {
        format!("{} ({})", self.media_client_id.trim(), self.media_contact.trim())
    }

    pub fn pacing_interval(&self) -> Duration {
        Duration::from_secs(self.pacing_interval_secs)
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            dataset_path: PathBuf::from("data/buildings.json"),
            image_output_dir: PathBuf::from("public/images"),
            worklist_path: PathBuf::from("data/worklist.json"),
            api_key: None,
            generation_api_url: DEFAULT_GENERATION_API_URL.to_string(),
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            generation_max_tokens: 1000,
            media_api_url: DEFAULT_MEDIA_API_URL.to_string(),
            media_client_id: DEFAULT_MEDIA_CLIENT_ID.to_string(),
            media_contact: DEFAULT_MEDIA_CONTACT.to_string(),
            thumbnail_width: 2000,
            pacing_interval_secs: 2,
            target_building_count: 75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.generation_model.is_empty());
        assert!(!config.media_api_url.is_empty());
        assert!(config.generation_max_tokens > 0);
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = Config::test_config();
        let err = config.require_api_key().unwrap_err();
        assert!(matches!(err, AppError::MissingCredential(_)));
    }

    #[test]
    fn test_require_api_key_present() {
        let mut config = Config::test_config();
        config.api_key = Some(SecretString::from("sk-test".to_string()));
        let key = config.require_api_key().expect("key should be present");
        assert_eq!(key.expose_secret(), "sk-test");
    }

    #[test]
    fn test_media_user_agent_carries_contact() {
        let config = Config::test_config();
        assert_eq!(
            config.media_user_agent(),
            "GracitectureApp/1.0 (contact@example.com)"
        );
    }

    #[test]
    fn test_media_user_agent_balances_custom_client_id() {
        let mut config = Config::test_config();
        config.media_client_id = "MyApp/1.0".to_string();
        config.media_contact = "c@x".to_string();
        assert_eq!(config.media_user_agent(), "MyApp/1.0 (c@x)");
    }

    #[test]
    fn test_pacing_interval_default() {
        assert_eq!(Config::test_config().pacing_interval(), Duration::from_secs(2));
    }
}
