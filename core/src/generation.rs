//! # Text Generation Adapters
//!
//! Implementations of [`tagforge_common::generation::TextProducer`].

mod gemini;

pub use gemini::{GeminiConfig, GeminiProducer};

/// Instruction given to the model for every prompt.
pub const TAG_CONTENT_INSTRUCTION: &str = "\
You write content for NFC tags.
Users describe what they want on a tag. Produce short, clever or functional content such as:
1. Plain text messages (jokes, wifi passwords, clues).
2. URLs (useful tools, playful links).
3. JSON data (business cards).

Return ONLY the raw content to write to the tag.
If the user asks for a JSON business card, return valid JSON.
Keep it concise.";
