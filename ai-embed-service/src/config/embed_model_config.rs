/// Configuration for an embedding model invocation.
///
/// This struct contains everything [`GeminiService`] needs to talk to the
/// remote API. It is built explicitly (usually via
/// [`config_gemini_embedding`]) and passed to the service constructor, so
/// there is no hidden global state and tests can construct it directly.
///
/// # Fields
///
/// - `model`: The bare model identifier (e.g., `"text-embedding-004"`),
///   without the `models/` prefix.
/// - `endpoint`: The API base URL (e.g., `https://generativelanguage.googleapis.com`).
/// - `api_key`: API key sent with every request.
/// - `task_type`: Usage-type tag attached to embedding requests
///   (e.g., `"RETRIEVAL_DOCUMENT"`); empty disables the tag.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// [`GeminiService`]: crate::services::gemini_service::GeminiService
/// [`config_gemini_embedding`]: crate::config::default_config::config_gemini_embedding
#[derive(Debug, Clone)]
pub struct EmbedModelConfig {
    /// Model identifier string (e.g., `"text-embedding-004"`).
    pub model: String,

    /// API base URL (scheme + host, no trailing path).
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Usage-type tag for embedding requests (empty = omit).
    pub task_type: String,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
