//! Gemini embeddings service.
//!
//! A thin, typed client for the Gemini `embedContent` REST API:
//! - env-driven configuration ([`config_gemini_embedding`])
//! - one reusable HTTP client with timeout and auth headers ([`GeminiService`])
//! - unified error handling ([`EmbedServiceError`])
//! - a best-effort model availability probe ([`GeminiService::check_model`])
//! - tracing subscriber setup for binaries ([`telemetry`])

pub mod config;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::default_config::config_gemini_embedding;
pub use config::embed_model_config::EmbedModelConfig;
pub use error_handler::{ConfigError, EmbedServiceError};
pub use services::gemini_service::GeminiService;
