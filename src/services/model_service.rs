use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::dto::generation_dto::{MessagesRequest, MessagesResponse},
};

const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Single-turn text generation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

pub struct AnthropicClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: SecretString, config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.generation_api_url.clone(),
            api_key,
            model: config.generation_model.clone(),
            max_tokens: config.generation_max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = MessagesRequest::single_prompt(&self.model, self.max_tokens, prompt);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::error!("Generation API returned {}: {}", status, body);
            return Err(AppError::Transport(format!(
                "Generation API returned {}",
                status
            )));
        }

        let reply: MessagesResponse = response.json().await.map_err(|e| {
            AppError::MalformedResponse(format!("Unexpected generation API reply: {}", e))
        })?;

        if reply.stop_reason.as_deref() == Some("max_tokens") {
            log::warn!(
                "Generation hit the {} token limit; reply is probably truncated",
                self.max_tokens
            );
        }

        reply
            .first_text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| AppError::MalformedResponse("Reply contained no text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{serve_responses, CannedResponse};

    fn client_for(base_url: &str) -> AnthropicClient {
        let mut config = Config::test_config();
        config.generation_api_url = format!("{}/v1/messages", base_url);
        config.generation_model = "claude-test".to_string();
        config.generation_max_tokens = 321;
        AnthropicClient::new(SecretString::from("sk-test-key".to_string()), &config)
            .expect("client should build")
    }

    #[tokio::test]
    async fn generate_posts_single_user_prompt_with_credentials() {
        let server = serve_responses(vec![CannedResponse::json(
            200,
            r#"{"content":[{"type":"text","text":"  {\"id\":\"x\"}  "}],"stop_reason":"end_turn"}"#,
        )])
        .await;

        let reply = client_for(&server.base_url)
            .generate("Describe the Pantheon")
            .await
            .expect("generate should succeed");
        assert_eq!(reply, "{\"id\":\"x\"}");

        let requests = server.finish().await;
        let request = &requests[0];
        let lowered = request.to_lowercase();
        assert!(lowered.starts_with("post /v1/messages"));
        assert!(lowered.contains("x-api-key: sk-test-key"));
        assert!(lowered.contains("anthropic-version: 2023-06-01"));

        let body_start = request.find("\r\n\r\n").expect("has body") + 4;
        let body: serde_json::Value =
            serde_json::from_str(&request[body_start..]).expect("body is json");
        assert_eq!(body["model"], "claude-test");
        assert_eq!(body["max_tokens"], 321);
        assert_eq!(body["messages"].as_array().map(|m| m.len()), Some(1));
        assert_eq!(body["messages"][0]["content"], "Describe the Pantheon");
    }

    #[tokio::test]
    async fn rejected_request_is_transport_failure() {
        let server = serve_responses(vec![CannedResponse::json(
            401,
            r#"{"type":"error","error":{"type":"authentication_error"}}"#,
        )])
        .await;

        let result = client_for(&server.base_url).generate("prompt").await;
        assert!(matches!(result, Err(AppError::Transport(_))));
        server.finish().await;
    }

    #[tokio::test]
    async fn reply_without_text_is_malformed() {
        let server = serve_responses(vec![CannedResponse::json(200, r#"{"content":[]}"#)]).await;

        let result = client_for(&server.base_url).generate("prompt").await;
        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
        server.finish().await;
    }

    #[test]
    fn model_is_taken_from_config() {
        let client = client_for("http://127.0.0.1:9");
        assert_eq!(client.model(), "claude-test");
    }
}
