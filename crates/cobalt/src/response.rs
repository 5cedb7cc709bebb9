//! Decoding of broker responses.
//!
//! The broker answers with a JSON object tagged by `status`. Malformed
//! payloads for a known status decode to [`CobaltResponse::Error`] with a
//! code naming the expectation that failed, so the caller can report it and
//! move on. A status this client has never heard of is a hard
//! [`Error::UnknownStatus`].

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Error codes produced locally when a response does not have the expected
/// shape.
pub mod codes {
    pub const INVALID_RESPONSE: &str = "invalid_response";
    pub const MISSING_STATUS: &str = "missing_status";
    pub const INVALID_ERROR_FORMAT: &str = "invalid_error_format";
    pub const INVALID_TUNNEL_REDIRECT_FORMAT: &str = "invalid_tunnel_redirect_format";
    pub const MISSING_OUTPUT: &str = "missing_output";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CobaltResponse {
    /// The broker (or the decoder) refused the request.
    Error { code: String },
    /// `tunnel` or `redirect`: a single file reachable at `url`.
    TunnelRedirect(TunnelRedirect),
    /// The broker wants the client to assemble the output from tunnels.
    LocalProcessing(LocalProcessing),
    /// Several items to choose from (e.g. a photo carousel).
    Picker(Picker),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TunnelRedirect {
    pub status: String,
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProcessing {
    pub status: String,
    pub kind: String,
    pub tunnel: Vec<String>,
    pub output: OutputFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub kind: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub status: String,
    pub audio: String,
    pub audio_filename: String,
    pub items: Vec<PickerItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerItem {
    pub kind: String,
    pub url: String,
    pub thumb: String,
}

impl CobaltResponse {
    fn error(code: impl Into<String>) -> Self {
        Self::Error { code: code.into() }
    }

    /// Decode a raw broker response.
    pub fn decode(value: &Value) -> Result<Self> {
        let Some(obj) = value.as_object() else {
            return Ok(Self::error(codes::INVALID_RESPONSE));
        };
        let Some(status) = str_field(obj, "status") else {
            return Ok(Self::error(codes::MISSING_STATUS));
        };

        let response = match status {
            "error" => {
                let code = obj
                    .get("error")
                    .and_then(Value::as_object)
                    .and_then(|e| str_field(e, "code"));
                match code {
                    Some(code) => Self::error(code),
                    None => Self::error(codes::INVALID_ERROR_FORMAT),
                }
            },
            "tunnel" | "redirect" => {
                match (str_field(obj, "url"), str_field(obj, "filename")) {
                    (Some(url), Some(filename)) => Self::TunnelRedirect(TunnelRedirect {
                        status: status.to_string(),
                        url: url.to_string(),
                        filename: filename.to_string(),
                    }),
                    _ => Self::error(codes::INVALID_TUNNEL_REDIRECT_FORMAT),
                }
            },
            "local-processing" => {
                let Some(output) = obj.get("output").and_then(Value::as_object) else {
                    return Ok(Self::error(codes::MISSING_OUTPUT));
                };
                let tunnel = obj
                    .get("tunnel")
                    .and_then(Value::as_array)
                    .map(|entries| {
                        entries
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Self::LocalProcessing(LocalProcessing {
                    status: status.to_string(),
                    kind: str_or_empty(obj, "type"),
                    tunnel,
                    output: OutputFile {
                        kind: str_or_empty(output, "type"),
                        filename: str_or_empty(output, "filename"),
                    },
                })
            },
            "picker" => {
                let items = obj
                    .get("picker")
                    .and_then(Value::as_array)
                    .map(|entries| entries.iter().filter_map(picker_item).collect())
                    .unwrap_or_default();
                Self::Picker(Picker {
                    status: status.to_string(),
                    audio: str_or_empty(obj, "audio"),
                    audio_filename: str_or_empty(obj, "audioFilename"),
                    items,
                })
            },
            other => return Err(Error::unknown_status(other)),
        };

        Ok(response)
    }
}

/// A picker entry counts only if it is an object with string `type` and `url`.
fn picker_item(entry: &Value) -> Option<PickerItem> {
    let obj = entry.as_object()?;
    Some(PickerItem {
        kind: str_field(obj, "type")?.to_string(),
        url: str_field(obj, "url")?.to_string(),
        thumb: str_or_empty(obj, "thumb"),
    })
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

fn str_or_empty(obj: &Map<String, Value>, key: &str) -> String {
    str_field(obj, key).unwrap_or_default().to_string()
}
