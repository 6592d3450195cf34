//! Lightweight Gemini service for text embeddings.
//!
//! This module implements a thin client for the Gemini REST API:
//! - `POST {endpoint}/v1beta/models/{model}:embedContent` — embedding retrieval
//! - `GET  {endpoint}/v1beta/models/{model}`              — model availability probe
//!
//! It uses the universal configuration [`EmbedModelConfig`] and authenticates
//! with the `x-goog-api-key` header on every request.
//!
//! # Examples
//!
//! ```no_run
//! use ai_embed_service::EmbedModelConfig;
//! use ai_embed_service::services::gemini_service::GeminiService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = EmbedModelConfig {
//!     model: "text-embedding-004".into(),
//!     endpoint: "https://generativelanguage.googleapis.com".into(),
//!     api_key: Some("AIza...".into()),
//!     task_type: "RETRIEVAL_DOCUMENT".into(),
//!     timeout_secs: Some(30),
//! };
//!
//! let svc = GeminiService::new(cfg)?;
//! let vec = svc.embed("Ferris is a friendly crab.").await?;
//! println!("Embedding dimension = {}", vec.len());
//! # Ok(()) }
//! ```

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::embed_model_config::EmbedModelConfig;
use crate::error_handler::{
    ConfigError, EmbedServiceError, Result, make_snippet, validate_http_endpoint,
};

/// Thin client for the Gemini embeddings API.
///
/// Initialized with a full [`EmbedModelConfig`]. Reuses one HTTP client with
/// a configurable timeout and the API key installed as a default header.
/// Provides two calls:
/// - [`GeminiService::embed`]        — single embedding retrieval
/// - [`GeminiService::check_model`]  — model availability probe
pub struct GeminiService {
    client: reqwest::Client,
    cfg: EmbedModelConfig,
    /// Qualified model path (`models/<id>`), required by URLs and request bodies.
    model_path: String,
    url_embed: String,
    url_model: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is absent or empty
    /// - [`ConfigError::EmptyModel`] if `cfg.model` is empty
    /// - [`ConfigError::InvalidFormat`] if `cfg.endpoint` is not http(s)
    /// - [`EmbedServiceError::Transport`] if the HTTP client cannot be built
    pub fn new(cfg: EmbedModelConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let endpoint = cfg.endpoint.trim();
        validate_http_endpoint("GEMINI_API_URL", endpoint)?;

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            header::HeaderValue::from_str(api_key).map_err(|e| {
                EmbedServiceError::Decode(format!("invalid API key header: {e}"))
            })?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let model_path = format!("models/{}", cfg.model.trim());
        let url_embed = format!("{}/v1beta/{}:embedContent", base, model_path);
        let url_model = format!("{}/v1beta/{}", base, model_path);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "GeminiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            model_path,
            url_embed,
            url_model,
        })
    }

    /// Retrieves one embedding vector via `:embedContent`.
    ///
    /// Exactly one remote call per invocation; no internal retry. The vector
    /// dimensionality and precision are whatever the model returns.
    ///
    /// # Errors
    /// - [`EmbedServiceError::HttpStatus`] for non-2xx responses
    /// - [`EmbedServiceError::Transport`] for client errors
    /// - [`EmbedServiceError::Decode`] if the response cannot be parsed
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let task_type = Some(self.cfg.task_type.as_str()).filter(|t| !t.is_empty());
        let body = EmbedContentRequest {
            model: &self.model_path,
            content: ContentPayload {
                parts: vec![ContentPart { text }],
            },
            task_type,
        };

        debug!(chars = text.chars().count(), "POST {}", self.url_embed);
        let start = Instant::now();
        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "embedContent returned non-success status");
            return Err(EmbedServiceError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: EmbedContentResponse = resp.json().await.map_err(|e| {
            EmbedServiceError::Decode(format!(
                "serde error: {e}; expected `{{ embedding: {{ values: number[] }} }}`"
            ))
        })?;

        debug!(
            dims = out.embedding.values.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "embedding received"
        );
        Ok(out.embedding.values)
    }

    /// Probes model availability via `GET /v1beta/models/{model}`.
    ///
    /// Best-effort preflight: callers typically log a warning on failure and
    /// continue. Returns the model's display name when the probe succeeds.
    ///
    /// # Errors
    /// - [`EmbedServiceError::HttpStatus`] for non-2xx responses
    /// - [`EmbedServiceError::Transport`] for client errors
    /// - [`EmbedServiceError::Decode`] if the response cannot be parsed
    pub async fn check_model(&self) -> Result<String> {
        debug!("GET {}", self.url_model);
        let start = Instant::now();
        let resp = self.client.get(&self.url_model).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_model.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(%status, %url, %snippet, "model probe returned non-success status");
            return Err(EmbedServiceError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ModelInfo = resp
            .json()
            .await
            .map_err(|e| EmbedServiceError::Decode(format!("serde error: {e}")))?;

        let name = out.display_name.unwrap_or(out.name);
        debug!(
            model = %name,
            latency_ms = start.elapsed().as_millis() as u64,
            "model probe completed"
        );
        Ok(name)
    }

    /// Bare model id from the underlying config.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }
}

/* ==========================
HTTP payloads
========================== */

/// Request body for `:embedContent`.
#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: ContentPayload<'a>,
    #[serde(rename = "taskType", skip_serializing_if = "Option::is_none")]
    task_type: Option<&'a str>,
}

/// Content wrapper: Gemini expects the text inside `parts`.
#[derive(Debug, Serialize)]
struct ContentPayload<'a> {
    parts: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentPart<'a> {
    text: &'a str,
}

/// Response body for `:embedContent`.
///
/// Minimal shape: the vector is in `embedding.values`.
#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

/// Response body for the model probe.
#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EmbedModelConfig {
        EmbedModelConfig {
            model: "text-embedding-004".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: Some("test-key".into()),
            task_type: "RETRIEVAL_DOCUMENT".into(),
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn new_accepts_valid_config() {
        let svc = GeminiService::new(cfg()).expect("service should build");
        assert_eq!(svc.model(), "text-embedding-004");
        assert_eq!(
            svc.url_embed,
            "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004:embedContent"
        );
        assert_eq!(
            svc.url_model,
            "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004"
        );
    }

    #[test]
    fn new_rejects_missing_api_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(GeminiService::new(c).is_err());

        let mut c = cfg();
        c.api_key = Some("   ".into());
        assert!(GeminiService::new(c).is_err());
    }

    #[test]
    fn new_rejects_bad_endpoint() {
        let mut c = cfg();
        c.endpoint = "generativelanguage.googleapis.com".into();
        assert!(GeminiService::new(c).is_err());
    }

    #[test]
    fn new_rejects_empty_model() {
        let mut c = cfg();
        c.model = "  ".into();
        assert!(GeminiService::new(c).is_err());
    }

    #[test]
    fn request_serializes_camel_case_task_type() {
        let body = EmbedContentRequest {
            model: "models/text-embedding-004",
            content: ContentPayload {
                parts: vec![ContentPart { text: "hello" }],
            },
            task_type: Some("RETRIEVAL_DOCUMENT"),
        };
        let json = serde_json::to_string(&body).expect("serializes");
        assert!(json.contains("\"taskType\":\"RETRIEVAL_DOCUMENT\""));
        assert!(json.contains("\"parts\":[{\"text\":\"hello\"}]"));

        let body = EmbedContentRequest {
            model: "models/text-embedding-004",
            content: ContentPayload {
                parts: vec![ContentPart { text: "hello" }],
            },
            task_type: None,
        };
        let json = serde_json::to_string(&body).expect("serializes");
        assert!(!json.contains("taskType"));
    }
}
