use {
    tracing::debug,
    zincsaver_cobalt::{CobaltResponse, SourceUrl},
};

use crate::{
    error::{Error, Result},
    kind::MediaKind,
};

/// One deliverable file resolved from a chat link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Where the delivery surface fetches the file from.
    pub url: String,
    /// The chat link this item was resolved from.
    pub source: SourceUrl,
}

impl MediaItem {
    #[must_use]
    pub fn new(kind: MediaKind, url: impl Into<String>, source: SourceUrl) -> Self {
        Self {
            kind,
            url: url.into(),
            source,
        }
    }
}

/// Turn a decoded broker response into deliverable items, in response order.
///
/// Unsupported files are dropped here. Animations are kept so the caller can
/// send them immediately. An `Error` response becomes [`Error::Broker`].
pub fn items_from_response(response: CobaltResponse, source: &SourceUrl) -> Result<Vec<MediaItem>> {
    let candidates: Vec<(MediaKind, String)> = match response {
        CobaltResponse::Error { code } => return Err(Error::broker(code)),
        CobaltResponse::TunnelRedirect(t) => {
            vec![(MediaKind::from_filename(&t.filename), t.url)]
        },
        CobaltResponse::LocalProcessing(lp) => {
            let kind = MediaKind::from_filename(&lp.output.filename);
            let url = lp.tunnel.into_iter().next().unwrap_or(lp.output.filename);
            vec![(kind, url)]
        },
        CobaltResponse::Picker(p) => p
            .items
            .into_iter()
            .map(|item| (MediaKind::from_picker_type(&item.kind), item.url))
            .collect(),
    };

    Ok(candidates
        .into_iter()
        .filter_map(|(kind, url)| {
            if kind == MediaKind::Unsupported {
                debug!(%source, url = %url, "dropping unsupported media");
                return None;
            }
            Some(MediaItem::new(kind, url, source.clone()))
        })
        .collect())
}
