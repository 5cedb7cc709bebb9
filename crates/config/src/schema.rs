/// Config schema types (telegram bot, cobalt broker).
use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
};

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ZincConfig {
    pub telegram: TelegramConfig,
    pub cobalt: CobaltConfig,
}

/// Telegram bot settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token from @BotFather.
    pub token: Secret<String>,

    /// Hosts the bot refuses to fetch, answered with `refusal_reply`.
    pub refused_hosts: Vec<String>,

    /// Reply sent when a link points at a refused host.
    pub refusal_reply: String,

    /// Long-polling timeout passed to `getUpdates` (seconds).
    pub poll_timeout_secs: u32,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &"[REDACTED]")
            .field("refused_hosts", &self.refused_hosts)
            .field("refusal_reply", &self.refusal_reply)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            refused_hosts: vec!["youtube.com".into(), "youtu.be".into()],
            refusal_reply: "no.".into(),
            poll_timeout_secs: 30,
        }
    }
}

impl TelegramConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

/// Cobalt download broker settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CobaltConfig {
    /// Broker endpoint the download request is POSTed to.
    pub url: String,

    /// Optional key sent as `Authorization: Api-Key <key>`.
    pub api_key: Option<Secret<String>>,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// HTTP client timeout for a single broker call (seconds).
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CobaltConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CobaltConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for CobaltConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9000/".into(),
            api_key: None,
            user_agent: concat!("zincsaver/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: 60,
        }
    }
}

impl CobaltConfig {
    /// The API key, if one is configured and not blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().trim())
            .filter(|k| !k.is_empty())
    }
}
