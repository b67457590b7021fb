use std::path::PathBuf;
use std::time::Duration;

/// User memory of an NTAG213, the most common sticker tag.
pub const DEFAULT_CAPACITY: usize = 144;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct Config {
    /// Tag image standing in for the radio.
    ///
    /// `None` means the device has no tag hardware at all.
    pub tag: Option<PathBuf>,
    /// Largest NDEF message, in bytes, the tag accepts.
    pub capacity: usize,
    /// How often the reader checks whether a tag is in the field.
    pub poll_interval: Duration,
    /// Whether the platform considers this a secure context.
    pub secure_context: bool,
    pub quiet: u8,
    /// Key for the text generation service. Read from `GEMINI_API_KEY`, then `API_KEY`.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: None,
            capacity: DEFAULT_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            secure_context: true,
            quiet: 0,
            api_key: None,
        }
    }
}

impl Config {
    pub fn api_key_from_env() -> Option<String> {
        ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}
