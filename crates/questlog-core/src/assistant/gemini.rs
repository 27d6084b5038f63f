//! GeminiClient: `generateContent` over HTTP.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{resolve_api_key, GenerationRequest, TextGenerator};
use crate::error::AssistantError;
use crate::storage::AssistantConfig;

/// Client for the Gemini text-generation API.
pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssistantError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from configuration, resolving the API key.
    ///
    /// # Errors
    /// `Disabled` when the assistant is turned off, `MissingApiKey` when no
    /// key can be found.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        if !config.enabled {
            return Err(AssistantError::Disabled);
        }
        let api_key = resolve_api_key(&config.api_key_env)?;
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn body(request: &GenerationRequest) -> serde_json::Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });
        if request.json {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }
        body
    }

    async fn send(&self, request: &GenerationRequest) -> Result<String, AssistantError> {
        debug!(model = %self.model, json = request.json, "sending generateContent");
        let resp = self
            .http_client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistantError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| AssistantError::Malformed(e.to_string()))?;
        extract_text(parsed)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl std::future::Future<Output = Result<String, AssistantError>> + Send {
        self.send(request)
    }
}

fn extract_text(resp: GenerateContentResponse) -> Result<String, AssistantError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(AssistantError::EmptyResponse)
    } else {
        Ok(text)
    }
}
