//! Batched delivery of resolved media.

use {
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use crate::{
    error::{Error, Result},
    item::MediaItem,
    sink::MediaSink,
};

/// Largest media group the delivery surface accepts.
pub const MAX_BATCH_SIZE: usize = 10;

/// Error text the delivery surface uses when it could not fetch a file or the
/// file exceeded its size limit.
const OVERSIZE_SIGNATURES: &[&str] = &["WEBPAGE_CURL_FAILED", "file is too big"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The whole batch went out as one group.
    Delivered,
    /// The group was refused as too large; every item got a notice instead.
    Degraded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// One entry per batch, in delivery order.
    pub outcomes: Vec<BatchOutcome>,
    pub notices_sent: usize,
}

impl DispatchReport {
    #[must_use]
    pub fn degraded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == BatchOutcome::Degraded)
            .count()
    }
}

fn is_oversize_failure(message: &str) -> bool {
    OVERSIZE_SIGNATURES.iter().any(|sig| message.contains(sig))
}

/// Deliver `items` in consecutive batches of at most [`MAX_BATCH_SIZE`].
///
/// Batches go out one after another. A batch refused with a known
/// "too large" error is replaced by one notice per item; any other failure
/// is returned and the remaining batches are not sent.
pub async fn dispatch(
    sink: &dyn MediaSink,
    items: &[MediaItem],
    cancel: &CancellationToken,
) -> Result<DispatchReport> {
    let mut report = DispatchReport::default();

    for (index, batch) in items.chunks(MAX_BATCH_SIZE).enumerate() {
        if cancel.is_cancelled() {
            debug!(batch = index, "dispatch cancelled");
            return Err(Error::Cancelled);
        }

        sink.signal_uploading().await;

        match sink.send_media_group(batch).await {
            Ok(()) => {
                debug!(batch = index, items = batch.len(), "media group delivered");
                report.outcomes.push(BatchOutcome::Delivered);
            },
            Err(Error::Delivery { message }) if is_oversize_failure(&message) => {
                for item in batch {
                    sink.send_notice(&item.kind.too_large_notice(&item.url))
                        .await?;
                    report.notices_sent += 1;
                }
                warn!(batch = index, error = %message, "media group rejected, sent notices instead");
                report.outcomes.push(BatchOutcome::Degraded);
            },
            Err(e) => return Err(e),
        }
    }

    if !report.outcomes.is_empty() {
        info!(
            batches = report.outcomes.len(),
            degraded = report.degraded(),
            items = items.len(),
            "media dispatch finished"
        );
    }
    Ok(report)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod tests {
    use {
        super::*,
        crate::kind::MediaKind,
        async_trait::async_trait,
        std::sync::Mutex,
        zincsaver_cobalt::SourceUrl,
    };

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum SinkCall {
        Group(Vec<String>),
        Animation(String),
        Notice(String),
        Uploading,
    }

    /// Records every call; group sends fail with `group_error` when set.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) calls: Mutex<Vec<SinkCall>>,
        pub(crate) group_error: Option<String>,
    }

    impl RecordingSink {
        pub(crate) fn failing_groups(message: &str) -> Self {
            Self {
                group_error: Some(message.to_string()),
                ..Default::default()
            }
        }

        pub(crate) fn calls(&self) -> Vec<SinkCall> {
            self.calls.lock().unwrap().clone()
        }

        pub(crate) fn groups(&self) -> Vec<Vec<String>> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    SinkCall::Group(urls) => Some(urls),
                    _ => None,
                })
                .collect()
        }
    }

    #[async_trait]
    impl MediaSink for RecordingSink {
        async fn send_media_group(&self, items: &[MediaItem]) -> Result<()> {
            let urls = items.iter().map(|i| i.url.clone()).collect();
            self.calls.lock().unwrap().push(SinkCall::Group(urls));
            match &self.group_error {
                Some(message) => Err(Error::delivery(message)),
                None => Ok(()),
            }
        }

        async fn send_animation(&self, item: &MediaItem) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(SinkCall::Animation(item.url.clone()));
            Ok(())
        }

        async fn send_notice(&self, text: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(SinkCall::Notice(text.to_string()));
            Ok(())
        }

        async fn signal_uploading(&self) {
            self.calls.lock().unwrap().push(SinkCall::Uploading);
        }
    }

    fn items(n: usize) -> Vec<MediaItem> {
        let source = SourceUrl::parse("https://x.com/u/status/1").unwrap();
        (0..n)
            .map(|i| {
                let kind = match i % 3 {
                    0 => MediaKind::Photo,
                    1 => MediaKind::Video,
                    _ => MediaKind::Audio,
                };
                MediaItem::new(kind, format!("https://cdn/{i}"), source.clone())
            })
            .collect()
    }

    #[tokio::test]
    async fn splits_into_batches_of_ten() {
        let sink = RecordingSink::default();
        let report = dispatch(&sink, &items(23), &CancellationToken::new())
            .await
            .unwrap();

        let sizes: Vec<usize> = sink.groups().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![10, 10, 3]);
        assert_eq!(report.outcomes, vec![BatchOutcome::Delivered; 3]);
        // order preserved across batches
        let flat: Vec<String> = sink.groups().concat();
        let expected: Vec<String> = (0..23).map(|i| format!("https://cdn/{i}")).collect();
        assert_eq!(flat, expected);
    }

    #[tokio::test]
    async fn signals_upload_before_each_batch() {
        let sink = RecordingSink::default();
        dispatch(&sink, &items(11), &CancellationToken::new())
            .await
            .unwrap();
        let calls = sink.calls();
        assert_eq!(calls[0], SinkCall::Uploading);
        assert!(matches!(calls[1], SinkCall::Group(_)));
        assert_eq!(calls[2], SinkCall::Uploading);
        assert!(matches!(calls[3], SinkCall::Group(_)));
    }

    #[tokio::test]
    async fn nothing_to_send() {
        let sink = RecordingSink::default();
        let report = dispatch(&sink, &[], &CancellationToken::new())
            .await
            .unwrap();
        assert!(report.outcomes.is_empty());
        assert!(sink.calls().is_empty());
    }

    #[tokio::test]
    async fn too_big_falls_back_to_notices() {
        let sink = RecordingSink::failing_groups("Bad Request: file is too big");
        let report = dispatch(&sink, &items(3), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.outcomes, vec![BatchOutcome::Degraded]);
        assert_eq!(report.notices_sent, 3);
        let notices: Vec<SinkCall> = sink
            .calls()
            .into_iter()
            .filter(|c| matches!(c, SinkCall::Notice(_)))
            .collect();
        assert_eq!(notices, vec![
            SinkCall::Notice("Photo too large: https://cdn/0".into()),
            SinkCall::Notice("Video too large: https://cdn/1".into()),
            SinkCall::Notice("Audio too large: https://cdn/2".into()),
        ]);
    }

    #[tokio::test]
    async fn curl_failure_falls_back_to_notices() {
        let sink = RecordingSink::failing_groups("Bad Request: WEBPAGE_CURL_FAILED");
        let report = dispatch(&sink, &items(12), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.outcomes, vec![BatchOutcome::Degraded; 2]);
        assert_eq!(report.notices_sent, 12);
        assert_eq!(report.degraded(), 2);
    }

    #[tokio::test]
    async fn other_failures_propagate() {
        let sink = RecordingSink::failing_groups("Forbidden: bot was blocked by the user");
        let err = dispatch(&sink, &items(15), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Delivery { ref message } if message.contains("blocked")));
        // the second batch is never attempted
        assert_eq!(sink.groups().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_before_first_batch() {
        let sink = RecordingSink::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = dispatch(&sink, &items(5), &cancel).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
        assert!(sink.calls().is_empty());
    }
}
