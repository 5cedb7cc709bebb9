use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The broker answered with a non-success HTTP status.
    #[error("cobalt returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried a `status` this client does not know how to read.
    #[error("unknown cobalt response status: {status}")]
    UnknownStatus { status: String },

    #[error("url is not supported: {url}")]
    UnsupportedUrl { url: String },

    #[error("invalid cobalt endpoint `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl Error {
    #[must_use]
    pub fn unknown_status(status: impl Into<String>) -> Self {
        Self::UnknownStatus {
            status: status.into(),
        }
    }

    #[must_use]
    pub fn unsupported_url(url: impl Into<String>) -> Self {
        Self::UnsupportedUrl { url: url.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
