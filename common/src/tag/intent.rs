use crate::tag::platform::Platform;

/// What the user wants to put on a tag.
///
/// One variant per authoring mode, so a URL can never be read out of a text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetIntent {
    Text {
        content: String,
    },
    Url {
        raw: String,
    },
    SocialProfile {
        platform: Platform,
        handle: String,
        prefer_deep_link: bool,
    },
}

impl TargetIntent {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn url(raw: impl Into<String>) -> Self {
        Self::Url { raw: raw.into() }
    }

    pub fn social(platform: Platform, handle: impl Into<String>, prefer_deep_link: bool) -> Self {
        Self::SocialProfile {
            platform,
            handle: handle.into(),
            prefer_deep_link,
        }
    }
}
