//! NOWO API protocol domain modules.
//!
//! This namespace groups wire-compatible JSON structures by domain:
//! - [`constants`]: endpoint paths, payload literals, and timestamp formats.
//! - [`session`]: session creation request/response and device descriptors.
//! - [`channels`]: channel list and favorites payloads.
//! - [`playback`]: the `play` command payload.
//! - [`schedule`]: program guide (schedule/program/season) payloads.

pub mod channels;
pub mod constants;
pub mod playback;
pub mod schedule;
pub mod session;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Lenient deserializer for identifiers that the API sends either as
/// strings or as numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::custom(format!(
            "identifier must be a string or number, got {other}"
        ))),
    }
}

/// Like [`deserialize_id`], for optional fields (`null` maps to `None`).
pub(crate) fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(Error::custom(format!(
            "value must be a string or number, got {other}"
        ))),
    }
}
