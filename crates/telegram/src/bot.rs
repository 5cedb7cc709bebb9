use std::{sync::Arc, time::Duration};

use {
    secrecy::ExposeSecret,
    teloxide::{
        ApiError, RequestError,
        prelude::*,
        types::{AllowedUpdate, UpdateKind},
    },
    tokio::task::JoinHandle,
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
    zincsaver_config::TelegramConfig,
    zincsaver_media::Fetcher,
};

use crate::{Error, Result, commands, handlers, state::BotState};

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Connect the bot and spawn the long-polling loop.
///
/// The loop runs until `cancel` fires or another instance takes over the
/// token. Each message is handled on its own task.
pub async fn start_polling(
    config: TelegramConfig,
    fetcher: Arc<Fetcher>,
    cancel: CancellationToken,
) -> Result<JoinHandle<()>> {
    if !config.has_token() {
        return Err(Error::message("telegram token is not configured"));
    }

    // The client timeout must outlast the long-poll timeout.
    let poll_timeout = config.poll_timeout_secs;
    let client = teloxide::net::default_reqwest_settings()
        .timeout(Duration::from_secs(u64::from(poll_timeout) + 15))
        .build()?;
    let bot = Bot::with_client(config.token.expose_secret(), client);

    let me = bot.get_me().await?;
    let bot_username = me.username.clone();

    bot.delete_webhook().send().await?;

    if let Err(e) = bot.set_my_commands(commands::bot_commands()).await {
        warn!("failed to register bot commands: {e}");
    }

    info!(username = ?bot_username, "telegram bot connected (webhook cleared)");

    let state = Arc::new(BotState {
        bot: bot.clone(),
        bot_username,
        config,
        fetcher,
        cancel: cancel.clone(),
    });

    Ok(tokio::spawn(async move {
        info!("starting telegram polling loop");
        let mut offset: i32 = 0;

        loop {
            let request = bot
                .get_updates()
                .offset(offset)
                .timeout(poll_timeout)
                .allowed_updates(vec![AllowedUpdate::Message]);

            let result = tokio::select! {
                () = cancel.cancelled() => {
                    info!("telegram polling stopped");
                    break;
                },
                result = request.send() => result,
            };

            match result {
                Ok(updates) => {
                    debug!(count = updates.len(), "got telegram updates");
                    for update in updates {
                        offset = update.id.as_offset();
                        match update.kind {
                            UpdateKind::Message(msg) => {
                                debug!(chat_id = msg.chat.id.0, "received telegram message");
                                let state = Arc::clone(&state);
                                tokio::spawn(async move {
                                    if let Err(e) = handlers::handle_message(&msg, &state).await
                                    {
                                        error!(
                                            chat_id = msg.chat.id.0,
                                            error = %e,
                                            "error handling telegram message"
                                        );
                                    }
                                });
                            },
                            other => {
                                debug!("ignoring non-message update: {other:?}");
                            },
                        }
                    }
                },
                Err(RequestError::Api(ApiError::TerminatedByOtherGetUpdates)) => {
                    warn!("telegram polling disabled: another instance is running with this token");
                    cancel.cancel();
                    break;
                },
                Err(e) => {
                    warn!(error = %e, "telegram getUpdates failed");
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(RETRY_DELAY) => {},
                    }
                },
            }
        }
    }))
}
