//! OpenAI-compatible embeddings client
//!
//! Talks to any endpoint implementing the OpenAI `/embeddings` API shape,
//! including local providers such as Ollama.

use crate::config::EmbeddingConfig;
use crate::embedding::{Embedding, EmbeddingProvider};
use crate::error::{RagstoreError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingEntry>,
}

#[derive(Deserialize)]
struct EmbeddingEntry {
    embedding: Vec<f32>,
}

/// HTTP embeddings client for OpenAI-compatible endpoints
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    dimensions: Option<usize>,
}

impl OpenAiEmbedder {
    /// Build a new embeddings client from configuration
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        if config.model.trim().is_empty() {
            return Err(RagstoreError::Config(
                "embedding model name must not be empty".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Local providers accept requests without a key
        if !config.api_key.trim().is_empty() {
            let auth = format!("Bearer {}", config.api_key.trim());
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth)
                    .map_err(|e| RagstoreError::Config(format!("Invalid API key: {}", e)))?,
            );
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()?;

        let endpoint = format!("{}/embeddings", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }
}

impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: [text],
            dimensions: self.dimensions,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RagstoreError::Embedding(format!(
                "Provider returned {}: {}",
                status, body
            )));
        }

        let mut parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| RagstoreError::Embedding(format!("Malformed response: {}", e)))?;

        if parsed.data.len() != 1 {
            return Err(RagstoreError::Embedding(format!(
                "Provider returned {} embeddings for 1 input",
                parsed.data.len()
            )));
        }

        let embedding = parsed.data.remove(0).embedding;
        if embedding.is_empty() {
            return Err(RagstoreError::Embedding(
                "Provider returned an empty embedding vector".to_string(),
            ));
        }

        Ok(embedding)
    }
}
