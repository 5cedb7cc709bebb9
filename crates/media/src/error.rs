#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The broker answered with an error code (its own, or one produced
    /// while decoding a malformed response).
    #[error("{code}")]
    Broker { code: String },

    #[error(transparent)]
    Cobalt(#[from] zincsaver_cobalt::Error),

    /// The delivery surface rejected a send. `message` is the surface's own
    /// error text and is matched against known failure signatures.
    #[error("{message}")]
    Delivery { message: String },

    #[error("processing cancelled")]
    Cancelled,
}

impl Error {
    #[must_use]
    pub fn broker(code: impl Into<String>) -> Self {
        Self::Broker { code: code.into() }
    }

    #[must_use]
    pub fn delivery(message: impl std::fmt::Display) -> Self {
        Self::Delivery {
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
