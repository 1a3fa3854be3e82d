//! Channel list and favorites protocol types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::protocol::constants::IMAGE_FORM_SUFFIX;
use crate::protocol::deserialize_id;

/// A channel from `GET /api/epg/v2/channel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    /// Channel id, used for play commands and schedule lookups.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Channel display name. This is what the source list exposes.
    pub name: String,

    /// Whether the channel is part of the user's subscription.
    #[serde(default)]
    pub enabled: bool,

    /// Square logo URL (without rendition query).
    #[serde(rename = "squareLogo", default)]
    pub square_logo: Option<String>,

    /// Forward-compatible storage for fields this crate does not model.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ChannelInfo {
    /// Logo URL with the square rendition suffix, if the channel has a logo.
    #[must_use]
    pub fn logo_url(&self) -> Option<String> {
        self.square_logo
            .as_deref()
            .map(|logo| format!("{logo}{IMAGE_FORM_SUFFIX}"))
    }
}

/// An entry from `GET /api/history/v1/favorite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteChannel {
    /// Id of the favorite channel.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_channel_list() {
        let json = r#"[
            {"id": "rtp1", "name": "RTP1", "enabled": true, "squareLogo": "https://img/rtp1.png", "number": 1},
            {"id": 5, "name": "SIC", "enabled": false}
        ]"#;

        let channels: Vec<ChannelInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0].id, "rtp1");
        assert!(channels[0].enabled);
        assert_eq!(channels[0].extra["number"], 1);
        assert_eq!(channels[1].id, "5");
        assert!(!channels[1].enabled);
        assert!(channels[1].square_logo.is_none());
    }

    #[test]
    fn test_logo_url_appends_rendition() {
        let channel: ChannelInfo = serde_json::from_str(
            r#"{"id": "rtp1", "name": "RTP1", "enabled": true, "squareLogo": "https://img/rtp1.png"}"#,
        )
        .unwrap();
        assert_eq!(
            channel.logo_url().as_deref(),
            Some("https://img/rtp1.png?form=channel-square-1")
        );
    }

    #[test]
    fn test_missing_enabled_defaults_to_false() {
        let channel: ChannelInfo = serde_json::from_str(r#"{"id": "x", "name": "X"}"#).unwrap();
        assert!(!channel.enabled);
    }

    #[test]
    fn test_deserialize_favorites() {
        let favorites: Vec<FavoriteChannel> =
            serde_json::from_str(r#"[{"id": "rtp1"}, {"id": 3, "position": 2}]"#).unwrap();
        assert_eq!(favorites[0].id, "rtp1");
        assert_eq!(favorites[1].id, "3");
    }
}
