use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::completion::GenerationConfig;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const PINECONE_API_KEY_VAR: &str = "PINECONE_API_KEY";
pub const PINECONE_INDEX_HOST_VAR: &str = "PINECONE_INDEX_HOST";
pub const PINECONE_NAMESPACE_VAR: &str = "PINECONE_NAMESPACE";

/// Placeholder, not a live index. [`RagConfig::from_env`] requires
/// `PINECONE_INDEX_HOST` instead of falling back to it.
pub const DEFAULT_INDEX_HOST: &str = "your-index.svc.your-environment.pinecone.io";
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_CONSISTENCY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    MissingEnvVar(String),
    #[error("Invalid config json: {0}")]
    InvalidJson(String),
}

/// Immutable settings shared by every pipeline stage.
///
/// Loadable from JSON, where every field is optional:
/// ```json
/// {
///     "embedding_model": "models/embedding-001",
///     "generation_model": "gemini-2.5-flash",
///     "index_host": "my-index-abc123.svc.aped-4627-b74a.pinecone.io",
///     "namespace": "docs",
///     "top_k": 3,
///     "consistency_delay_ms": 2000,
///     "generation": { "temperature": 0.7, "top_k": 40, "top_p": 0.95, "max_output_tokens": 2048 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RagConfig {
    pub embedding_model: String,
    pub generation_model: String,
    pub index_host: String,
    pub namespace: Option<String>,
    /// Number of contexts retrieved per question.
    pub top_k: usize,
    /// Time given to the vector store to index an upsert before it can be
    /// queried.
    #[serde(rename = "consistency_delay_ms", deserialize_with = "duration_from_millis")]
    pub consistency_delay: Duration,
    pub generation: GenerationConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            embedding_model: crate::providers::embeddings::DEFAULT_MODEL.to_string(),
            generation_model: crate::providers::completions::DEFAULT_MODEL.to_string(),
            index_host: DEFAULT_INDEX_HOST.to_string(),
            namespace: None,
            top_k: DEFAULT_TOP_K,
            consistency_delay: DEFAULT_CONSISTENCY_DELAY,
            generation: GenerationConfig::default(),
        }
    }
}

impl RagConfig {
    /// # Errors
    /// `ConfigError::InvalidJson` for malformed json or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::InvalidJson(e.to_string()))
    }

    /// Defaults, with the index host taken from `PINECONE_INDEX_HOST` and
    /// the namespace from `PINECONE_NAMESPACE` when set.
    ///
    /// # Errors
    /// `ConfigError::MissingEnvVar` when the index host is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// # Errors
    /// `ConfigError::MissingEnvVar` when the index host is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let index_host = non_empty(PINECONE_INDEX_HOST_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(PINECONE_INDEX_HOST_VAR.to_string()))?;
        Ok(Self {
            index_host,
            namespace: non_empty(PINECONE_NAMESPACE_VAR),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_consistency_delay(mut self, delay: Duration) -> Self {
        self.consistency_delay = delay;
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

fn duration_from_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// API keys for the two remote services.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub pinecone_api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("pinecone_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// # Errors
    /// `ConfigError::MissingEnvVar` when either key is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// # Errors
    /// `ConfigError::MissingEnvVar` when either key is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };
        Ok(Self {
            gemini_api_key: required(GEMINI_API_KEY_VAR)?,
            pinecone_api_key: required(PINECONE_API_KEY_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| vars.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.embedding_model, "models/embedding-001");
        assert_eq!(config.generation_model, "gemini-2.5-flash");
        assert_eq!(config.top_k, 3);
        assert_eq!(config.consistency_delay, Duration::from_secs(2));
    }

    #[test]
    fn test_from_json() {
        let config = RagConfig::from_json(
            r#"{"index_host": "localhost:5080", "consistency_delay_ms": 0, "generation": {"temperature": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(config.index_host, "localhost:5080");
        assert_eq!(config.consistency_delay, Duration::ZERO);
        assert_eq!(config.generation.temperature, 0.1);
        assert_eq!(config.generation.max_output_tokens, 2048);
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let result = RagConfig::from_json(r#"{"system_instruction": "be evil"}"#);
        assert!(matches!(result, Err(ConfigError::InvalidJson(_))));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RagConfig::from_lookup(env(&[
            (PINECONE_INDEX_HOST_VAR, "custom.svc.pinecone.io"),
            (PINECONE_NAMESPACE_VAR, ""),
        ]))
        .unwrap();
        assert_eq!(config.index_host, "custom.svc.pinecone.io");
        assert_eq!(config.namespace, None);
        assert_eq!(config.top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn test_from_lookup_requires_index_host() {
        let missing = RagConfig::from_lookup(env(&[(PINECONE_NAMESPACE_VAR, "docs")]));
        assert_eq!(missing, Err(ConfigError::MissingEnvVar(PINECONE_INDEX_HOST_VAR.to_string())));

        let blank = RagConfig::from_lookup(env(&[(PINECONE_INDEX_HOST_VAR, "  ")]));
        assert_eq!(blank, Err(ConfigError::MissingEnvVar(PINECONE_INDEX_HOST_VAR.to_string())));
    }

    #[test]
    fn test_credentials() {
        let creds = Credentials::from_lookup(env(&[
            (GEMINI_API_KEY_VAR, "gemini-secret"),
            (PINECONE_API_KEY_VAR, "pinecone-secret"),
        ]))
        .unwrap();
        assert_eq!(creds.gemini_api_key, "gemini-secret");
        assert_eq!(creds.pinecone_api_key, "pinecone-secret");
        // keys never end up in logs
        assert!(!format!("{creds:?}").contains("secret"));

        let missing = Credentials::from_lookup(env(&[(PINECONE_API_KEY_VAR, "p")]));
        assert_eq!(missing, Err(ConfigError::MissingEnvVar(GEMINI_API_KEY_VAR.to_string())));

        let empty = Credentials::from_lookup(env(&[(GEMINI_API_KEY_VAR, "g"), (PINECONE_API_KEY_VAR, " ")]));
        assert_eq!(empty, Err(ConfigError::MissingEnvVar(PINECONE_API_KEY_VAR.to_string())));
    }
}
