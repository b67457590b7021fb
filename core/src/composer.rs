//! # Payload Composer
//!
//! Pure transformation from a [`TargetIntent`] to the single record written to a tag.
//!
//! Deep links are written as ordinary URL records; opening the native app is
//! left to the scheme dispatch of whichever phone reads the tag.

use tagforge_common::error::ComposeError;
use tagforge_common::tag::intent::TargetIntent;
use tagforge_common::tag::platform::Platform;
use tagforge_common::tag::record::OutboundRecord;

use crate::registry;

const DEFAULT_SCHEME: &str = "https://";

pub fn compose(intent: &TargetIntent) -> Result<OutboundRecord, ComposeError> {
    match intent {
        TargetIntent::Text { content } => compose_text(content),
        TargetIntent::Url { raw } => compose_url(raw),
        TargetIntent::SocialProfile {
            platform,
            handle,
            prefer_deep_link,
        } => compose_social(platform, handle, *prefer_deep_link),
    }
}

/// Text is written verbatim; only the blank check looks at the trimmed value.
fn compose_text(content: &str) -> Result<OutboundRecord, ComposeError> {
    if content.trim().is_empty() {
        return Err(ComposeError::EmptyContent);
    }
    Ok(OutboundRecord::text(content))
}

fn compose_url(raw: &str) -> Result<OutboundRecord, ComposeError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(ComposeError::EmptyContent);
    }

    if has_http_scheme(url) {
        Ok(OutboundRecord::url(url))
    } else {
        Ok(OutboundRecord::url(format!("{DEFAULT_SCHEME}{url}")))
    }
}

fn compose_social(
    platform: &Platform,
    handle: &str,
    prefer_deep_link: bool,
) -> Result<OutboundRecord, ComposeError> {
    let handle = normalize_handle(handle);
    if handle.is_empty() {
        return Err(ComposeError::EmptyHandle);
    }

    let Some(entry) = registry::lookup(platform) else {
        let host = platform.id().trim_end_matches('/');
        return Ok(OutboundRecord::url(format!("{DEFAULT_SCHEME}{host}/{handle}")));
    };

    let link = match entry.native_scheme {
        Some(scheme) if prefer_deep_link => format!("{scheme}{handle}"),
        _ => format!("{}{handle}", entry.web_prefix),
    };
    Ok(OutboundRecord::url(link))
}

/// Literal prefix check, case-insensitive on the scheme.
fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Strips surrounding whitespace and a single leading `@`.
fn normalize_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix('@').unwrap_or(handle).trim()
}
