//! Media pipeline: extract links, resolve them through the broker, classify
//! the results, and hand them to a delivery surface in batches.

pub mod dispatch;
pub mod error;
pub mod extract;
pub mod item;
pub mod kind;
pub mod pipeline;
pub mod sink;

pub use {
    dispatch::{BatchOutcome, DispatchReport, MAX_BATCH_SIZE, dispatch},
    error::{Error, Result},
    extract::extract_urls,
    item::{MediaItem, items_from_response},
    kind::MediaKind,
    pipeline::{FetchSummary, Fetcher},
    sink::MediaSink,
};
