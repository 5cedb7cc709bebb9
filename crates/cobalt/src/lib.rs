//! Client for the cobalt download broker.
//!
//! Resolves a link from a supported site into a broker response
//! ([`CobaltResponse`]) describing where the playable media can be fetched.

pub mod client;
pub mod domains;
pub mod error;
pub mod request;
pub mod response;

pub use {
    client::{Broker, CobaltClient},
    domains::{SUPPORTED_DOMAINS, is_supported_url},
    error::{Error, Result},
    request::{DownloadMode, DownloadRequest, SourceUrl},
    response::{CobaltResponse, LocalProcessing, OutputFile, Picker, PickerItem, TunnelRedirect},
};
