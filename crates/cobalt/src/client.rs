use std::time::Duration;

use {
    async_trait::async_trait,
    reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT},
    serde_json::Value,
    tracing::{debug, warn},
    url::Url,
};

use zincsaver_config::CobaltConfig;

use crate::{
    domains::is_supported_url,
    error::{Error, Result},
    request::DownloadRequest,
    response::CobaltResponse,
};

/// Something that can resolve a link into a broker response.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Issue one request and return the raw JSON body.
    async fn fetch(&self, request: &DownloadRequest) -> Result<Value>;

    /// Issue one request and decode the answer.
    async fn resolve(&self, request: &DownloadRequest) -> Result<CobaltResponse> {
        let raw = self.fetch(request).await?;
        CobaltResponse::decode(&raw)
    }
}

/// HTTP client for a cobalt instance.
pub struct CobaltClient {
    http: reqwest::Client,
    endpoint: Url,
    config: CobaltConfig,
}

impl CobaltClient {
    pub fn new(config: &CobaltConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.url).map_err(|source| Error::InvalidEndpoint {
            url: config.url.clone(),
            source,
        })?;
        let mut builder = reqwest::Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        Ok(Self {
            http: builder.build()?,
            endpoint,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Broker for CobaltClient {
    async fn fetch(&self, request: &DownloadRequest) -> Result<Value> {
        if !is_supported_url(request.url.as_str()) {
            return Err(Error::unsupported_url(request.url.as_str()));
        }

        let mut req = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.config.user_agent)
            .json(&request.body());
        if let Some(key) = self.config.api_key() {
            req = req.header(AUTHORIZATION, format!("Api-Key {key}"));
        }

        debug!(url = %request.url, mode = ?request.download_mode, "cobalt request");
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %request.url, status = status.as_u16(), "cobalt request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
