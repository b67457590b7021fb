use async_trait::async_trait;

use crate::error::GenerationError;

/// Produces free text from a prompt, e.g. a language model.
#[async_trait]
pub trait TextProducer: Send + Sync {
    async fn produce(&self, prompt: &str) -> Result<String, GenerationError>;
}
