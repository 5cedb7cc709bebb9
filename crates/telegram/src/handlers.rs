use {
    teloxide::{types::Message, utils::html},
    tracing::{debug, error, info},
};

use {zincsaver_cobalt::Error as CobaltError, zincsaver_media::Error as MediaError};

use crate::{Result, commands, delivery::TelegramDelivery, state::BotState};

/// Route one inbound message: commands, refused hosts, or the fetch pipeline.
///
/// Pipeline failures are reported to the chat and logged here; the returned
/// error only covers replies that could not be sent.
pub async fn handle_message(msg: &Message, state: &BotState) -> Result<()> {
    let Some(text) = msg.text() else {
        debug!(chat_id = msg.chat.id.0, "ignoring message without text");
        return Ok(());
    };
    let delivery = TelegramDelivery::for_message(&state.bot, msg);

    if text.starts_with('/') {
        return handle_command(text, state, &delivery).await;
    }
    if !text.starts_with("https://") {
        return Ok(());
    }
    if is_refused(text, &state.config.refused_hosts) {
        info!(chat_id = msg.chat.id.0, "refusing link to blocked host");
        return delivery.send_text(&state.config.refusal_reply).await;
    }

    let cancel = state.cancel.child_token();
    match state.fetcher.process(text, &delivery, &cancel).await {
        Ok(summary) => {
            debug!(chat_id = msg.chat.id.0, ?summary, "message handled");
            Ok(())
        },
        Err(MediaError::Cancelled) => {
            info!(chat_id = msg.chat.id.0, "message handling cancelled");
            Ok(())
        },
        Err(MediaError::Cobalt(CobaltError::UnsupportedUrl { url })) => {
            debug!(chat_id = msg.chat.id.0, %url, "unsupported url");
            Ok(())
        },
        Err(e) => {
            error!(chat_id = msg.chat.id.0, error = %e, "failed to fetch media");
            delivery.send_html(&failure_html(&e.to_string())).await
        },
    }
}

async fn handle_command(text: &str, state: &BotState, delivery: &TelegramDelivery) -> Result<()> {
    match commands::parse(text, state.bot_username.as_deref()) {
        Some(command) => {
            debug!(chat_id = delivery.chat_id().0, ?command, "command");
            delivery.send_text(&command.reply()).await
        },
        None => Ok(()),
    }
}

/// Whether `text` mentions any refused host (case-insensitive).
fn is_refused(text: &str, refused_hosts: &[String]) -> bool {
    let text = text.to_ascii_lowercase();
    refused_hosts
        .iter()
        .filter(|h| !h.is_empty())
        .any(|h| text.contains(&h.to_ascii_lowercase()))
}

fn failure_html(error: &str) -> String {
    format!(
        "<b>Ah!</b> <i>Something happened...</i> \n<blockquote>{}</blockquote>",
        html::escape(error)
    )
}
