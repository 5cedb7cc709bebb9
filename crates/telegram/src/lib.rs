//! Telegram front end for zincsaver.
//!
//! Polls the Bot API with teloxide, routes commands and links, and delivers
//! resolved media back to the originating chat.

pub mod bot;
pub mod commands;
pub mod delivery;
pub mod error;
pub mod handlers;
pub mod state;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_support;

pub use {
    bot::start_polling,
    delivery::TelegramDelivery,
    error::{Error, Result},
    state::BotState,
};
