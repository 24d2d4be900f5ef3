use crate::embeddings::{model::EmbeddingModel, EmbedderError, EmbeddingVector};
use crate::providers::{model_resource, GEMINI_API_BASE};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, instrument};

pub const DEFAULT_MODEL: &str = "models/embedding-001";

/// Gemini `batchEmbedContents` backed implementation of [`EmbeddingModel`].
///
/// Each call sends exactly one text. Should the provider answer with more
/// than one embedding, the first one wins.
pub struct GeminiEmbeddingModel {
    api_key: String,
    api_base: String,
    model: String,
    client: Client,
}

impl GeminiEmbeddingModel {
    #[must_use]
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key, model)
    }

    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: GEMINI_API_BASE.to_string(),
            model: model_resource(&model.into()),
            client,
        }
    }

    /// Point the model at a different API root, e.g. a proxy or a mock server.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!("{}/{}:batchEmbedContents", self.api_base, self.model)
    }
}

#[derive(Deserialize)]
struct GeminiEmbeddingResponse {
    #[serde(default)]
    embeddings: Vec<GeminiEmbeddingValues>,
}

#[derive(Deserialize)]
struct GeminiEmbeddingValues {
    #[serde(default)]
    values: Vec<f32>,
}

#[async_trait]
impl EmbeddingModel for GeminiEmbeddingModel {
    #[instrument(skip(self, data), fields(model = %self.model, chars = data.len()))]
    async fn embed(&self, data: &str) -> Result<EmbeddingVector, EmbedderError> {
        let request_body = json!({
            "requests": [{
                "model": self.model,
                "content": {
                    "role": "user",
                    "parts": [{ "text": data }]
                }
            }]
        });
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Embedding request failed");
                EmbedderError::RequestError(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let response = response
                .json::<GeminiEmbeddingResponse>()
                .await
                .map_err(|e| EmbedderError::ParseError(e.to_string()))?;

            debug!(
                embeddings = response.embeddings.len(),
                dimension = response.embeddings.first().map(|e| e.values.len()),
                "Received embedding response"
            );

            response
                .embeddings
                .into_iter()
                .next()
                .map(|e| e.values)
                .filter(|values| !values.is_empty())
                .ok_or(EmbedderError::EmptyEmbedding)
        } else {
            let error_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(%status, error = %error_message, "Embedding provider returned an error");

            Err(EmbedderError::ProviderError(status.as_u16(), error_message))
        }
    }
}
