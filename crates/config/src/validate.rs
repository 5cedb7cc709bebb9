//! Semantic validation of a loaded configuration.

use crate::schema::ZincConfig;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted path, e.g. "cobalt.url"
    pub path: &'static str,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.path, self.message)
    }
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(&mut self, severity: Severity, path: &'static str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            path,
            message: message.into(),
        });
    }
}

/// Check a configuration for values the bot cannot run with.
#[must_use]
pub fn validate(config: &ZincConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !config.telegram.has_token() {
        result.push(
            Severity::Error,
            "telegram.token",
            "bot token is empty (set it in the config or ZINCSAVER_TELEGRAM_TOKEN)",
        );
    }

    match url::Url::parse(&config.cobalt.url) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {},
        Ok(u) => result.push(
            Severity::Error,
            "cobalt.url",
            format!("unsupported scheme `{}`, expected http or https", u.scheme()),
        ),
        Err(e) => result.push(
            Severity::Error,
            "cobalt.url",
            format!("invalid broker url `{}`: {e}", config.cobalt.url),
        ),
    }

    if config.cobalt.api_key().is_none() {
        result.push(
            Severity::Warning,
            "cobalt.api_key",
            "no API key configured, requests are sent unauthenticated",
        );
    }

    if config.cobalt.timeout_secs == 0 {
        result.push(
            Severity::Warning,
            "cobalt.timeout_secs",
            "a zero timeout disables the broker request timeout",
        );
    }

    result
}
