use std::path::Path;

/// How a resolved file is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
    Photo,
    /// Sent on its own as soon as it is seen, never batched.
    Animation,
    Unsupported,
}

impl MediaKind {
    /// Classify a bare file extension (no leading dot), ignoring case.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "opus" | "mp3" | "ogg" => Self::Audio,
            "mp4" | "webm" => Self::Video,
            "png" | "jpg" | "jpeg" | "webp" => Self::Photo,
            "gif" => Self::Animation,
            _ => Self::Unsupported,
        }
    }

    /// Classify by the extension of `filename`.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map_or(Self::Unsupported, Self::from_extension)
    }

    /// Classify a picker entry by its broker-declared type.
    #[must_use]
    pub fn from_picker_type(kind: &str) -> Self {
        match kind {
            "photo" => Self::Photo,
            "video" => Self::Video,
            "gif" => Self::Animation,
            _ => Self::Unsupported,
        }
    }

    /// Whether items of this kind go into a media group.
    #[must_use]
    pub fn is_batchable(self) -> bool {
        matches!(self, Self::Audio | Self::Video | Self::Photo)
    }

    /// Notice sent in place of an item the surface refused as too large.
    #[must_use]
    pub fn too_large_notice(self, url: &str) -> String {
        let label = match self {
            Self::Photo => "Photo",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Animation | Self::Unsupported => "File",
        };
        format!("{label} too large: {url}")
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Photo => "photo",
            Self::Animation => "animation",
            Self::Unsupported => "unsupported",
        })
    }
}
