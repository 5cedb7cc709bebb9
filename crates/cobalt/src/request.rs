use {serde::Serialize, url::Url};

/// An absolute URL taken from a chat message, with any `#fragment` removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Parse an absolute URL and drop its fragment. Returns `None` for
    /// anything that is not an absolute URL.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut url = Url::parse(input).ok()?;
        url.set_fragment(None);
        Some(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl std::fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for SourceUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// What the broker should extract from the link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadMode {
    /// Video with audio, or whatever the post contains.
    #[default]
    Auto,
    /// Audio track only.
    Audio,
    /// Video without audio.
    Mute,
}

/// One resolve request for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: SourceUrl,
    pub download_mode: DownloadMode,
}

impl DownloadRequest {
    #[must_use]
    pub fn new(url: SourceUrl) -> Self {
        Self {
            url,
            download_mode: DownloadMode::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: DownloadMode) -> Self {
        self.download_mode = mode;
        self
    }

    pub(crate) fn body(&self) -> RequestBody<'_> {
        RequestBody {
            url: self.url.as_str(),
            audio_format: "mp3",
            download_mode: self.download_mode,
            filename_style: "nerdy",
        }
    }
}

/// JSON body of `POST /` on the broker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestBody<'a> {
    url: &'a str,
    audio_format: &'static str,
    download_mode: DownloadMode,
    filename_style: &'static str,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn strips_fragment() {
        let url = SourceUrl::parse("https://x.com/user/status/1?s=20#reply").unwrap();
        assert_eq!(url.as_str(), "https://x.com/user/status/1?s=20");
        assert_eq!(url.host(), Some("x.com"));
    }

    #[test]
    fn rejects_relative_and_plain_words() {
        assert!(SourceUrl::parse("hello").is_none());
        assert!(SourceUrl::parse("/relative/path").is_none());
        assert!(SourceUrl::parse("http://").is_none());
    }

    #[test]
    fn body_matches_broker_contract() {
        let request = DownloadRequest::new(SourceUrl::parse("https://vimeo.com/1").unwrap());
        let body = serde_json::to_value(request.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://vimeo.com/1",
                "audioFormat": "mp3",
                "downloadMode": "auto",
                "filenameStyle": "nerdy",
            })
        );
    }

    #[test]
    fn download_mode_serializes_lowercase() {
        let request = DownloadRequest::new(SourceUrl::parse("https://vimeo.com/1").unwrap())
            .with_mode(DownloadMode::Audio);
        let body = serde_json::to_value(request.body()).unwrap();
        assert_eq!(body["downloadMode"], "audio");
    }
}
