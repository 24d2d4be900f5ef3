use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use super::{Metadata, RetrievalMatch, VectorStore, VectorStoreError};
use crate::embeddings::EmbeddingVector;

const PINECONE_API_VERSION: &str = "2025-01";

/// Connection settings for a single Pinecone index.
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    /// Index host as shown in the Pinecone console. A missing scheme defaults
    /// to `https://`.
    pub host: String,
    pub namespace: Option<String>,
}

/// A [Pinecone](https://pinecone.io) index reached over its data-plane REST API.
#[derive(Debug)]
pub struct PineconeVectorStore {
    client: Client,
    api_key: String,
    namespace: Option<String>,
    base_url: Url,
}

impl PineconeVectorStore {
    /// # Errors
    /// `VectorStoreError::InvalidHost` when the host doesn't form a valid URL.
    pub fn new(config: PineconeConfig) -> Result<Self, VectorStoreError> {
        Self::with_client(Client::new(), config)
    }

    /// Same as [`PineconeVectorStore::new`] but reusing an existing HTTP client.
    ///
    /// # Errors
    /// `VectorStoreError::InvalidHost` when the host doesn't form a valid URL.
    pub fn with_client(client: Client, config: PineconeConfig) -> Result<Self, VectorStoreError> {
        let base_url = parse_host(&config.host)?;
        info!(host = %base_url, "Pinecone client started");
        Ok(Self {
            client,
            api_key: config.api_key,
            namespace: config.namespace.filter(|n| !n.is_empty()),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, VectorStoreError> {
        self.base_url
            .join(path)
            .map_err(|e| VectorStoreError::InvalidHost(e.to_string()))
    }

    async fn post<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(body)
            .send()
            .await
    }
}

fn parse_host(host: &str) -> Result<Url, VectorStoreError> {
    let host = host.trim().trim_end_matches('/');
    let with_scheme = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    };
    Url::parse(&format!("{with_scheme}/"))
        .map_err(|e| VectorStoreError::InvalidHost(format!("{host}: {e}")))
}

#[async_trait]
impl VectorStore for PineconeVectorStore {
    #[instrument(skip(self, vector, metadata), fields(dimension = vector.len()))]
    async fn upsert(
        &self,
        id: &str,
        vector: EmbeddingVector,
        metadata: Metadata,
    ) -> Result<(), VectorStoreError> {
        let url = self.endpoint("vectors/upsert")?;
        let request = UpsertRequest {
            vectors: vec![PineconeRecord {
                id,
                values: &vector,
                metadata: &metadata,
            }],
            namespace: self.namespace.as_deref(),
        };

        let response = self.post(url, &request).await.map_err(|e| {
            error!(error = ?e, "Upsert request failed");
            VectorStoreError::StoreWrite(e.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            let ack: UpsertResponse = response
                .json()
                .await
                .map_err(|e| VectorStoreError::StoreWrite(e.to_string()))?;
            debug!(upserted_count = ack.upserted_count, "Upsert acknowledged");
            Ok(())
        } else {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            error!(%status, error = %error_msg, "Pinecone rejected upsert");
            Err(VectorStoreError::StoreWrite(format!("HTTP {status}: {error_msg}")))
        }
    }

    #[instrument(skip(self, vector), fields(dimension = vector.len()))]
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievalMatch>, VectorStoreError> {
        let url = self.endpoint("query")?;
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata,
            include_values: false,
            namespace: self.namespace.as_deref(),
        };

        let response = self.post(url, &request).await.map_err(|e| {
            error!(error = ?e, "Query request failed");
            VectorStoreError::StoreQuery(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error (failed to read response body)".to_string());
            error!(%status, error = %error_msg, "Pinecone rejected query");
            return Err(VectorStoreError::StoreQuery(format!("HTTP {status}: {error_msg}")));
        }

        let res: QueryResponse = response
            .json()
            .await
            .map_err(|e| VectorStoreError::StoreQuery(e.to_string()))?;
        debug!(matches = res.matches.len(), "Query answered");
        Ok(res.matches.into_iter().map(Into::into).collect())
    }
}

// Pinecone API data structures
#[derive(Debug, Serialize)]
struct PineconeRecord<'a> {
    id: &'a str,
    values: &'a [f32],
    metadata: &'a Metadata,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<PineconeRecord<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<Metadata>,
}

impl From<PineconeMatch> for RetrievalMatch {
    fn from(m: PineconeMatch) -> Self {
        Self {
            id: m.id,
            score: m.score,
            metadata: m.metadata,
        }
    }
}
