//! # Platform Scheme Registry
//!
//! Web link prefix and optional native deep-link prefix per social platform.
//!
//! Several native schemes are undocumented or depend on the installed app
//! version. They are listed anyway: the registry reports what is mapped, not
//! what will open.

use tagforge_common::tag::platform::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformEntry {
    pub web_prefix: &'static str,
    pub native_scheme: Option<&'static str>,
}

const REGISTRY: [(&str, PlatformEntry); 7] = [
    (
        "instagram",
        PlatformEntry {
            web_prefix: "https://instagram.com/",
            native_scheme: Some("instagram://user?username="),
        },
    ),
    (
        "twitter",
        PlatformEntry {
            web_prefix: "https://twitter.com/",
            native_scheme: Some("twitter://user?screen_name="),
        },
    ),
    (
        "linkedin",
        PlatformEntry {
            web_prefix: "https://linkedin.com/in/",
            native_scheme: Some("linkedin://profile/"),
        },
    ),
    (
        "youtube",
        PlatformEntry {
            web_prefix: "https://youtube.com/@",
            native_scheme: Some("vnd.youtube://user/"),
        },
    ),
    (
        "tiktok",
        PlatformEntry {
            web_prefix: "https://tiktok.com/@",
            native_scheme: Some("snssdk1233://user/profile/"),
        },
    ),
    (
        "github",
        PlatformEntry {
            web_prefix: "https://github.com/",
            native_scheme: Some("github://profile/"),
        },
    ),
    (
        "bluesky",
        PlatformEntry {
            web_prefix: "https://bsky.app/profile/",
            native_scheme: None,
        },
    ),
];

/// Returns the entry for `platform`, or `None` for platforms without one.
pub fn lookup(platform: &Platform) -> Option<PlatformEntry> {
    REGISTRY
        .iter()
        .find(|(id, _)| *id == platform.id())
        .map(|(_, entry)| *entry)
}

/// All registered platforms, in declaration order.
pub fn entries() -> impl Iterator<Item = (Platform, PlatformEntry)> {
    Platform::known()
        .into_iter()
        .filter_map(|platform| lookup(&platform).map(|entry| (platform, entry)))
}
