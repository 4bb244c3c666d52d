pub mod gateway;
pub mod gemini;

use gemini::GeminiClient;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Network Error: {0}")]
    Network(String),
    #[error("API Error: {0}")]
    Api(String),
    #[error("Rate Limited")]
    RateLimited,
}

/// One prior turn, already relabeled for the wire ("user" / "model").
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: Option<String>,
    pub history: Vec<Turn>,
    pub message: String,
}

/// A text-generation backend. `Ok(None)` means the service answered but
/// produced no usable text, which callers handle separately from a failure.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerateRequest) -> Result<Option<String>, GenerateError>;
}

/// Builds the configured backend, if any. A blank API key means no backend
/// and every analyst operation answers with its offline string.
pub struct GeneratorFactory;

impl GeneratorFactory {
    pub fn create_default(config: &AppConfig) -> Option<Arc<dyn TextGenerator>> {
        let key = config.gemini.api_key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Arc::new(GeminiClient::new(
            key.to_string(),
            config.gemini.api_base.clone(),
        )))
    }
}
