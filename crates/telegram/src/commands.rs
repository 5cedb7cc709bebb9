//! Slash commands the bot understands.

use {teloxide::types::BotCommand, zincsaver_cobalt::SUPPORTED_DOMAINS};

pub const START_GREETING: &str =
    "Hi! \nSend a link to a TikTok video or X (formerly known as Twitter) to download media!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    /// Reply text for this command.
    #[must_use]
    pub fn reply(self) -> String {
        match self {
            Self::Start => START_GREETING.to_string(),
            Self::Help => help_text(),
        }
    }
}

/// Parse `/name` or `/name@bot` from the first word of `text`.
///
/// A command addressed to another bot is not ours and yields `None`.
#[must_use]
pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Command> {
    let word = text.split_whitespace().next()?.strip_prefix('/')?;
    let (name, target) = match word.split_once('@') {
        Some((name, target)) => (name, Some(target)),
        None => (word, None),
    };
    if let Some(target) = target {
        let ours = bot_username.is_some_and(|u| u.eq_ignore_ascii_case(target));
        if !ours {
            return None;
        }
    }
    Command::from_name(&name.to_ascii_lowercase())
}

/// Commands registered with `setMyCommands`.
#[must_use]
pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Say hello"),
        BotCommand::new("help", "List supported sites"),
    ]
}

#[must_use]
pub fn help_text() -> String {
    let mut text = String::from("Send me a link from one of these sites:\n");
    for domain in SUPPORTED_DOMAINS {
        text.push_str("• ");
        text.push_str(domain);
        text.push('\n');
    }
    text
}
