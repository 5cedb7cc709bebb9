use async_trait::async_trait;

use crate::{error::Result, item::MediaItem};

/// Where resolved media ends up (a chat, in practice).
///
/// Implementations report rejected sends as [`crate::Error::Delivery`]
/// carrying the surface's own error text, so the dispatcher can recognise
/// "too large" rejections.
#[async_trait]
pub trait MediaSink: Send + Sync {
    /// Send up to [`crate::MAX_BATCH_SIZE`] items as one grouped message.
    async fn send_media_group(&self, items: &[MediaItem]) -> Result<()>;

    /// Send a single animation on its own.
    async fn send_animation(&self, item: &MediaItem) -> Result<()>;

    /// Send a plain text notice.
    async fn send_notice(&self, text: &str) -> Result<()>;

    /// Show an "uploading" indicator. Best effort, no-op by default.
    async fn signal_uploading(&self) {}
}
