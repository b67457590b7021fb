//! # Text Prefill
//!
//! Asks a [`TextProducer`] for tag content and turns the answer into a text
//! intent. Generation failures become a message for the user, never an error.

use tagforge_common::error::GenerationError;
use tagforge_common::generation::TextProducer;
use tagforge_common::tag::intent::TargetIntent;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefill {
    /// Blank prompt; nothing was asked.
    Skipped,
    Ready(TargetIntent),
    Unavailable { message: String },
}

pub async fn prefill(producer: &dyn TextProducer, prompt: &str) -> Prefill {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Prefill::Skipped;
    }

    match producer.produce(prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            debug!("generated {} characters", text.chars().count());
            Prefill::Ready(TargetIntent::text(text))
        }
        Ok(_) => unavailable(GenerationError::EmptyResponse),
        Err(err) => unavailable(err),
    }
}

fn unavailable(err: GenerationError) -> Prefill {
    debug!("text generation unavailable: {err}");
    let message = match err {
        GenerationError::MissingApiKey => {
            "Text generation is disabled (missing API key). Enter the text manually.".to_string()
        }
        GenerationError::EmptyResponse => {
            "Could not generate content. Try rephrasing the prompt.".to_string()
        }
        other => format!("Error generating content: {other}"),
    };
    Prefill::Unavailable { message }
}
