//! Allow-list of source sites the broker is asked about.

use url::Url;

/// Known source domains. A host matches a domain exactly or as a dotted
/// subdomain of it.
pub const SUPPORTED_DOMAINS: &[&str] = &[
    "bilibili.com",
    "bsky.app",
    "dailymotion.com",
    "facebook.com",
    "instagram.com",
    "loom.com",
    "ok.ru",
    "pinterest.com",
    "newgrounds.com",
    "reddit.com",
    "rutube.ru",
    "snapchat.com",
    "soundcloud.com",
    "streamable.com",
    "tiktok.com",
    "tumblr.com",
    "twitch.tv",
    "twitter.com",
    "x.com",
    "vimeo.com",
    "vk.com",
    "xiaohongshu.com",
];

/// Whether `url` points at an allow-listed site. Unparseable input and
/// URLs without a host are simply not supported.
#[must_use]
pub fn is_supported_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    SUPPORTED_DOMAINS
        .iter()
        .any(|domain| host_matches(&host, domain))
}

/// `host == domain` or `host` ends with `"." + domain`, ignoring ASCII case.
#[must_use]
pub fn host_matches(host: &str, domain: &str) -> bool {
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    host.len() > domain.len()
        && host
            .get(host.len() - domain.len() - 1..)
            .and_then(|tail| tail.strip_prefix('.'))
            .is_some_and(|tail| tail.eq_ignore_ascii_case(domain))
}
