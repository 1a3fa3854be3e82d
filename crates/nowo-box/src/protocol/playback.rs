//! Playback command protocol types.

use serde::Serialize;

use crate::protocol::constants::PlayCommands;

/// Body of `POST /api/v1/swipe/action/{deviceId}`.
#[derive(Debug, Clone, Serialize)]
pub struct PlayCommand<'a> {
    pub play: PlayTarget<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayTarget<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'a str,
    pub bookmark: &'static str,
}

impl<'a> PlayCommand<'a> {
    /// Tune to a live channel.
    pub fn channel(channel_id: &'a str) -> Self {
        Self {
            play: PlayTarget {
                kind: PlayCommands::CHANNEL,
                id: channel_id,
                bookmark: PlayCommands::BOOKMARK_LIVE,
            },
        }
    }
}
