//! Default embedding config loaded strictly from environment variables.
//!
//! This module provides the convenience constructor for [`EmbedModelConfig`].
//! Currently only **Gemini** is supported; future providers can be added here
//! under the same pattern.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY`         = API key (mandatory)
//! - `GEMINI_API_URL`         = API base URL (optional, defaults to the public endpoint)
//! - `EMBEDDING_MODEL`        = model id (optional, default `text-embedding-004`;
//!   a `models/` prefix is accepted and stripped)
//! - `EMBEDDING_TASK_TYPE`    = usage-type tag (optional, default `RETRIEVAL_DOCUMENT`)
//! - `EMBEDDING_TIMEOUT_SECS` = request timeout in seconds (optional, default 30)

use crate::{
    config::embed_model_config::EmbedModelConfig,
    error_handler::{EmbedServiceError, env_opt_u64, env_or, must_env},
};

/// Public Gemini API base URL used when `GEMINI_API_URL` is unset.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default embedding model id.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Default usage-type tag for document-side embeddings.
pub const DEFAULT_TASK_TYPE: &str = "RETRIEVAL_DOCUMENT";

/// Strips an optional `models/` prefix so the config always carries the bare id.
///
/// The REST paths and request body need the qualified form; the service adds
/// the prefix back in exactly one place.
fn normalize_model(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("models/")
        .unwrap_or(trimmed)
        .to_string()
}

/// Constructs the config for the **Gemini embedding** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_API_URL`, `EMBEDDING_MODEL`, `EMBEDDING_TASK_TYPE`,
///   `EMBEDDING_TIMEOUT_SECS` (optional)
///
/// # Defaults
/// - `endpoint = `[`DEFAULT_GEMINI_ENDPOINT`]
/// - `model = `[`DEFAULT_EMBEDDING_MODEL`]
/// - `task_type = `[`DEFAULT_TASK_TYPE`]
/// - `timeout_secs = Some(30)`
///
/// # Errors
/// Returns a config error when `GEMINI_API_KEY` is missing/empty or
/// `EMBEDDING_TIMEOUT_SECS` is set but not a valid `u64`.
pub fn config_gemini_embedding() -> Result<EmbedModelConfig, EmbedServiceError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let endpoint = env_or("GEMINI_API_URL", DEFAULT_GEMINI_ENDPOINT);
    let model = normalize_model(&env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL));
    let task_type = env_or("EMBEDDING_TASK_TYPE", DEFAULT_TASK_TYPE);
    let timeout_secs = env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.or(Some(30));

    Ok(EmbedModelConfig {
        model,
        endpoint,
        api_key: Some(api_key),
        task_type,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_models_prefix() {
        assert_eq!(normalize_model("text-embedding-004"), "text-embedding-004");
        assert_eq!(
            normalize_model("models/text-embedding-004"),
            "text-embedding-004"
        );
        assert_eq!(normalize_model("  models/x  "), "x");
    }
}
