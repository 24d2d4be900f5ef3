use crate::completion::{CompletionModel, GenerationConfig, GenerationError, FALLBACK_ANSWER};
use crate::providers::{model_resource, GEMINI_API_BASE};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini `generateContent` backed implementation of [`CompletionModel`].
pub struct GeminiCompletionModel {
    api_key: String,
    api_base: String,
    client: reqwest::Client,
    model: String,
}

impl GeminiCompletionModel {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, model)
    }

    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: GEMINI_API_BASE.to_string(),
            client,
            model: model_resource(&model.into()),
        }
    }

    /// Point the model at a different API root, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.api_base, self.model)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
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

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
    total_token_count: Option<u64>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

#[async_trait]
impl CompletionModel for GeminiCompletionModel {
    #[instrument(skip(self, prompt, config), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, GenerationError> {
        let request_body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": config.temperature,
                "topK": config.top_k,
                "topP": config.top_p,
                "maxOutputTokens": config.max_output_tokens,
            }
        });
        debug!(request_body = ?request_body, "Sending request to Gemini");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Request failed");
                GenerationError::RequestError(e.to_string())
            })?;

        let status = response.status();
        debug!(%status, "Received API response");

        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            error!(%status, error = %error_msg, "API returned error response");
            return Err(GenerationError::ProviderError(status.as_u16(), error_msg));
        }

        let response: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response JSON");
            GenerationError::ParseError(e.to_string())
        })?;

        if let Some(usage) = &response.usage_metadata {
            info!(
                prompt_tokens = usage.prompt_token_count,
                completion_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Token usage recorded"
            );
        }

        Ok(response.first_text().unwrap_or_else(|| {
            warn!("Gemini returned no usable candidate");
            FALLBACK_ANSWER.to_string()
        }))
    }
}
