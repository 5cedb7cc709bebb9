use std::sync::Arc;

use {
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
    zincsaver_cobalt::{Broker, DownloadRequest, SourceUrl, is_supported_url},
};

use crate::{
    dispatch::dispatch,
    error::{Error, Result},
    extract::extract_urls,
    item::{MediaItem, items_from_response},
    kind::MediaKind,
    sink::MediaSink,
};

/// What happened while handling one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Absolute URLs found in the text.
    pub urls: usize,
    /// URLs skipped because their site is not allow-listed.
    pub skipped: usize,
    pub animations_sent: usize,
    pub items_batched: usize,
    pub batches: usize,
    pub degraded_batches: usize,
    pub notices_sent: usize,
}

/// Resolves the links in a message and delivers what they point at.
pub struct Fetcher {
    broker: Arc<dyn Broker>,
}

impl Fetcher {
    pub fn new(broker: Arc<dyn Broker>) -> Self {
        Self { broker }
    }

    /// Ask the broker about one link and classify the answer.
    pub async fn resolve_items(&self, url: &SourceUrl) -> Result<Vec<MediaItem>> {
        let response = self.broker.resolve(&DownloadRequest::new(url.clone())).await?;
        items_from_response(response, url)
    }

    /// Handle one message: extract links, resolve each allow-listed link in
    /// order, send animations as they appear, then deliver everything else
    /// in batches.
    ///
    /// A broker error for any link aborts the message; items resolved so
    /// far are not delivered.
    pub async fn process(
        &self,
        text: &str,
        sink: &dyn MediaSink,
        cancel: &CancellationToken,
    ) -> Result<FetchSummary> {
        let urls = extract_urls(text);
        let mut summary = FetchSummary {
            urls: urls.len(),
            ..Default::default()
        };
        let mut batched: Vec<MediaItem> = Vec::new();

        for url in &urls {
            if !is_supported_url(url.as_str()) {
                debug!(%url, "skipping unsupported url");
                summary.skipped += 1;
                continue;
            }

            let items = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                items = self.resolve_items(url) => items,
            };
            let items = items.inspect_err(|e| warn!(%url, error = %e, "could not resolve url"))?;

            for item in items {
                if item.kind == MediaKind::Animation {
                    sink.send_animation(&item).await?;
                    summary.animations_sent += 1;
                } else {
                    batched.push(item);
                }
            }
        }

        summary.items_batched = batched.len();
        let report = dispatch(sink, &batched, cancel).await?;
        summary.batches = report.outcomes.len();
        summary.degraded_batches = report.degraded();
        summary.notices_sent = report.notices_sent;

        info!(
            urls = summary.urls,
            skipped = summary.skipped,
            animations = summary.animations_sent,
            batched = summary.items_batched,
            "message processed"
        );
        Ok(summary)
    }
}
