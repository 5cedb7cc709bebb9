use {
    async_trait::async_trait,
    teloxide::{
        RequestError,
        payloads::{
            SendAnimationSetters, SendChatActionSetters, SendMediaGroupSetters, SendMessageSetters,
        },
        prelude::*,
        types::{
            ChatAction, ChatId, InputFile, InputMedia, InputMediaAudio, InputMediaDocument,
            InputMediaPhoto, InputMediaVideo, ParseMode, ThreadId,
        },
    },
    tracing::{debug, info},
};

use zincsaver_media::{Error as MediaError, MediaItem, MediaKind, MediaSink, Result as MediaResult};

/// Delivers media into one chat (and forum topic, if any).
#[derive(Clone)]
pub struct TelegramDelivery {
    bot: Bot,
    chat_id: ChatId,
    thread_id: Option<ThreadId>,
}

impl TelegramDelivery {
    #[must_use]
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            thread_id: None,
        }
    }

    /// Reply where `msg` was posted, including its forum topic.
    #[must_use]
    pub fn for_message(bot: &Bot, msg: &Message) -> Self {
        Self {
            bot: bot.clone(),
            chat_id: msg.chat.id,
            thread_id: msg.thread_id,
        }
    }

    #[must_use]
    pub fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// Send a plain text reply.
    pub async fn send_text(&self, text: &str) -> crate::Result<()> {
        self.send_message(text, None).await?;
        Ok(())
    }

    /// Send a text message formatted as HTML.
    pub async fn send_html(&self, html: &str) -> crate::Result<()> {
        self.send_message(html, Some(ParseMode::Html)).await?;
        Ok(())
    }

    async fn send_message(
        &self,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<(), RequestError> {
        let mut req = self.bot.send_message(self.chat_id, text);
        if let Some(mode) = parse_mode {
            req = req.parse_mode(mode);
        }
        if let Some(thread_id) = self.thread_id {
            req = req.message_thread_id(thread_id);
        }
        req.await?;
        Ok(())
    }
}

fn input_file(url: &str) -> MediaResult<InputFile> {
    let parsed = url
        .parse::<reqwest::Url>()
        .map_err(|e| MediaError::delivery(format!("invalid media url {url}: {e}")))?;
    Ok(InputFile::url(parsed))
}

fn input_media(item: &MediaItem) -> MediaResult<InputMedia> {
    let file = input_file(&item.url)?;
    Ok(match item.kind {
        MediaKind::Photo => InputMedia::Photo(InputMediaPhoto::new(file)),
        MediaKind::Video => InputMedia::Video(InputMediaVideo::new(file)),
        MediaKind::Audio => InputMedia::Audio(InputMediaAudio::new(file)),
        MediaKind::Animation | MediaKind::Unsupported => {
            InputMedia::Document(InputMediaDocument::new(file))
        },
    })
}

#[async_trait]
impl MediaSink for TelegramDelivery {
    async fn send_media_group(&self, items: &[MediaItem]) -> MediaResult<()> {
        let media = items.iter().map(input_media).collect::<MediaResult<Vec<_>>>()?;
        let mut req = self.bot.send_media_group(self.chat_id, media);
        if let Some(thread_id) = self.thread_id {
            req = req.message_thread_id(thread_id);
        }
        req.await.map_err(MediaError::delivery)?;
        info!(
            chat_id = self.chat_id.0,
            items = items.len(),
            "telegram media group sent"
        );
        Ok(())
    }

    async fn send_animation(&self, item: &MediaItem) -> MediaResult<()> {
        let mut req = self.bot.send_animation(self.chat_id, input_file(&item.url)?);
        if let Some(thread_id) = self.thread_id {
            req = req.message_thread_id(thread_id);
        }
        req.await.map_err(MediaError::delivery)?;
        info!(chat_id = self.chat_id.0, "telegram animation sent");
        Ok(())
    }

    async fn send_notice(&self, text: &str) -> MediaResult<()> {
        self.send_message(text, None)
            .await
            .map_err(MediaError::delivery)
    }

    async fn signal_uploading(&self) {
        let mut req = self
            .bot
            .send_chat_action(self.chat_id, ChatAction::UploadDocument);
        if let Some(thread_id) = self.thread_id {
            req = req.message_thread_id(thread_id);
        }
        if let Err(e) = req.await {
            debug!(chat_id = self.chat_id.0, error = %e, "failed to send upload action");
        }
    }
}
