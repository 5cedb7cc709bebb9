use {tracing::trace, zincsaver_cobalt::SourceUrl};

/// Pull every absolute URL out of free-form message text, in order.
///
/// Tokens are whitespace separated; anything that does not parse as an
/// absolute URL is ordinary chat text and is dropped. Fragments are removed
/// and duplicates are kept.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<SourceUrl> {
    text.split_whitespace()
        .filter_map(|token| {
            let url = SourceUrl::parse(token);
            trace!(token, parsed = url.is_some(), "message token");
            url
        })
        .collect()
}
