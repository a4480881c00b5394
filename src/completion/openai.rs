use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{CompletionClient, CompletionError, CompletionRequest};
use crate::config::CompletionConfig;

/// Request body of the legacy `/completions` endpoint.
#[derive(Debug, Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<CompletionsChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionsChoice {
    #[serde(default)]
    text: String,
}

/// Client for any OpenAI-compatible text-completion API.
pub struct OpenAiCompletionClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn new(config: &CompletionConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build completion http client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: format!("{}/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    #[instrument(skip_all)]
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = CompletionsBody {
            model: &self.model,
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: request.samples,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "completion request failed");
                CompletionError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "completion API error");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionsResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or(CompletionError::EmptyResponse)?;
        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}
