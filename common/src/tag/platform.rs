//! # Social Platforms
//!
//! Identifiers accepted by the social-profile intent. Anything not in the
//! known list is carried as [`Platform::Other`] and composed without a deep link.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    Twitter,
    LinkedIn,
    YouTube,
    TikTok,
    GitHub,
    Bluesky,
    /// A platform without a registry entry, e.g. a self-hosted instance.
    Other(String),
}

impl Platform {
    pub fn known() -> [Platform; 7] {
        [
            Platform::Instagram,
            Platform::Twitter,
            Platform::LinkedIn,
            Platform::YouTube,
            Platform::TikTok,
            Platform::GitHub,
            Platform::Bluesky,
        ]
    }

    pub fn id(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::LinkedIn => "linkedin",
            Platform::YouTube => "youtube",
            Platform::TikTok => "tiktok",
            Platform::GitHub => "github",
            Platform::Bluesky => "bluesky",
            Platform::Other(id) => id,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    /// Parses a platform id, case-insensitively.
    ///
    /// `x` is accepted as an alias for twitter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        if id.is_empty() {
            return Err("platform id cannot be empty".to_string());
        }

        let known = Platform::known().into_iter().find(|p| p.id() == id);
        Ok(match (known, id.as_str()) {
            (Some(platform), _) => platform,
            (None, "x") => Platform::Twitter,
            (None, _) => Platform::Other(id),
        })
    }
}
