//! Embedding seam: provider trait, the length-capping client, and the Gemini
//! adapter.
//!
//! Async is required because real providers perform HTTP requests.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use tracing::debug;

use ai_embed_service::GeminiService;

use crate::errors::PipelineError;

/// Provider interface for embedding generation.
///
/// Implement this trait to plug in another backend (or a test fake).
pub trait EmbeddingsProvider: Send + Sync {
    /// Async embedding function. One remote call per invocation.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PipelineError>> + Send + 'a>>;
}

/// Wraps a provider and enforces the request length cap.
///
/// If the text exceeds `max_chars`, the prefix of exactly `max_chars`
/// characters is sent instead — silently and deterministically. No retry, no
/// validation of the returned vector.
pub struct EmbedClient<'a> {
    provider: &'a dyn EmbeddingsProvider,
    max_chars: usize,
}

impl<'a> EmbedClient<'a> {
    pub fn new(provider: &'a dyn EmbeddingsProvider, max_chars: usize) -> Self {
        Self { provider, max_chars }
    }

    /// Requests one embedding for the (possibly truncated) text.
    ///
    /// # Errors
    /// Whatever the provider returns; callers decide whether that aborts
    /// anything (the pipeline runner treats it as a per-record skip).
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, PipelineError> {
        let bounded = truncate_chars(text, self.max_chars);
        if bounded.len() < text.len() {
            debug!(
                max_chars = self.max_chars,
                original_chars = text.chars().count(),
                "truncated text before embedding request"
            );
        }
        self.provider.embed(bounded).await
    }
}

/// Longest prefix of `text` holding at most `max_chars` characters.
///
/// Counts characters, not bytes, so the cut never lands inside a UTF-8
/// sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Gemini-backed provider (async).
#[derive(Clone)]
pub struct GeminiEmbedder {
    svc: Arc<GeminiService>,
}

impl GeminiEmbedder {
    /// Construct a new embedder over a shared service handle.
    pub fn new(svc: Arc<GeminiService>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for GeminiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PipelineError>> + Send + 'a>> {
        Box::pin(async move {
            self.svc
                .embed(text)
                .await
                .map_err(|e| PipelineError::Embedding(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct CapturingProvider {
        seen: Mutex<Vec<String>>,
    }

    impl CapturingProvider {
        fn new() -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl EmbeddingsProvider for CapturingProvider {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PipelineError>> + Send + 'a>> {
            Box::pin(async move {
                self.seen.lock().unwrap().push(text.to_string());
                Ok(vec![0.5, 0.5])
            })
        }
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multibyte: each 'é' is 2 bytes but 1 char.
        assert_eq!(truncate_chars("ééééé", 3), "ééé");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn client_sends_exactly_the_prefix() {
        let provider = CapturingProvider::new();
        let client = EmbedClient::new(&provider, 8);

        let long = "abcdefghijklmnop";
        let vector = client.embed(long).await.expect("fake never fails");
        assert_eq!(vector.len(), 2);

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["abcdefgh"]);
    }

    #[tokio::test]
    async fn short_text_passes_through_untouched() {
        let provider = CapturingProvider::new();
        let client = EmbedClient::new(&provider, 100);

        client.embed("short").await.expect("fake never fails");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["short"]);
    }
}
