use std::sync::Arc;

use {tokio_util::sync::CancellationToken, zincsaver_config::TelegramConfig, zincsaver_media::Fetcher};

/// Runtime state shared by every update handler.
pub struct BotState {
    pub bot: teloxide::Bot,
    pub bot_username: Option<String>,
    pub config: TelegramConfig,
    pub fetcher: Arc<Fetcher>,
    /// Cancelled on shutdown; in-flight message handling stops at its next
    /// broker call or batch.
    pub cancel: CancellationToken,
}
