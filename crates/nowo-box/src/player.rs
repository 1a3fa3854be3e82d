//! # Set-Top-Box Player
//!
//! [`BoxPlayer`] is the per-device controller: it owns the device's channel
//! catalog, tracks the current channel and program guide, and sends play
//! commands.
//!
//! ## State machine
//!
//! ```text
//!            turn_on()              select_source(name)
//!   ┌─────┐ ─────────► ┌────┐ ───────────────────────────► ┌─────────┐
//!   │ Off │            │ On │     (Selecting, transient)   │ Playing │
//!   └─────┘ ─────────────────────────────────────────────► └─────────┘
//!                      select_source / next / previous          │ ▲
//!                                                               └─┘
//! ```
//!
//! ## Navigation
//!
//! | Current index | `next()`                 | `previous()`            |
//! |---------------|--------------------------|-------------------------|
//! | none          | selects the first source | no-op                   |
//! | `i`           | selects `min(i+1, len-1)`| selects `max(i-1, 0)`   |
//!
//! At either end the boundary channel is selected again, which re-sends the
//! play command. With an empty source list both are no-ops.
//!
//! ## Usage
//!
//! ```no_run
//! use nowo_box::{BoxPlayer, NowoClient, NowoConfig, device::stb_devices};
//!
//! # async fn run() -> nowo_box::NowoResult<()> {
//! let config = NowoConfig::from_env()?;
//! let client = NowoClient::new(&config)?;
//! let session = client.authenticate(&config.username, &config.password).await?;
//!
//! for device in stb_devices(&session) {
//!     let mut player =
//!         BoxPlayer::setup(client.clone(), &session, device, &config.source_filter()).await?;
//!     player.next().await?;
//!     player.update().await?;
//!     println!("{:?} on {:?}", player.media_series_title(), player.source());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{ChannelCatalog, SourceFilter};
use crate::client::NowoClient;
use crate::error::{NowoError, NowoResult};
use crate::guide::EpgSnapshot;
use crate::protocol::channels::ChannelInfo;
use crate::protocol::session::{Session, StbInfo};

/// Prefix of every player's unique id.
const UNIQUE_ID_PREFIX: &str = "nowo.box";

/// Device class reported for every player.
pub const DEVICE_CLASS_TV: &str = "tv";

/// Media content type reported for every player.
pub const MEDIA_TYPE_TVSHOW: &str = "tvshow";

/// Playback state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Initial state; nothing is known about the box.
    Off,
    /// Turned on locally, no channel selected yet.
    On,
    /// A channel change is in progress.
    Selecting,
    /// A channel was selected.
    Playing,
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Off => write!(f, "off"),
            PlayerState::On => write!(f, "on"),
            PlayerState::Selecting => write!(f, "selecting"),
            PlayerState::Playing => write!(f, "playing"),
        }
    }
}

/// Operations a player supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    PreviousTrack,
    NextTrack,
    TurnOn,
    SelectSource,
}

impl Feature {
    /// Bit of this feature in a media-player feature mask.
    #[must_use]
    pub const fn bit(self) -> u32 {
        match self {
            Feature::PreviousTrack => 16,
            Feature::NextTrack => 32,
            Feature::TurnOn => 128,
            Feature::SelectSource => 2048,
        }
    }
}

/// Features of every [`BoxPlayer`].
pub const SUPPORTED_FEATURES: &[Feature] = &[
    Feature::NextTrack,
    Feature::PreviousTrack,
    Feature::TurnOn,
    Feature::SelectSource,
];

/// Serializable view of everything a player currently exposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub name: String,
    pub unique_id: String,
    pub state: PlayerState,
    pub source: Option<String>,
    pub media_title: Option<String>,
    pub media_series_title: Option<String>,
    pub media_season: Option<String>,
    pub media_episode: Option<String>,
    pub media_duration: Option<i64>,
    pub media_position: Option<i64>,
    pub media_position_updated_at: Option<DateTime<Utc>>,
    pub media_image_url: Option<String>,
    pub entity_picture: Option<String>,
}

/// Controller for one set-top-box.
#[derive(Debug)]
pub struct BoxPlayer {
    client: NowoClient,
    token: String,
    device: StbInfo,
    catalog: ChannelCatalog,
    state: PlayerState,
    current_channel: Option<ChannelInfo>,
    current_index: Option<usize>,
    epg: Option<EpgSnapshot>,
}

impl BoxPlayer {
    /// Fetch the device's catalog and build its player.
    ///
    /// Fails with [`NowoError::CatalogFetch`] when either the channel list
    /// or the favorites list cannot be fetched.
    pub async fn setup(
        client: NowoClient,
        session: &Session,
        device: StbInfo,
        filter: &SourceFilter,
    ) -> NowoResult<Self> {
        let catalog = ChannelCatalog::fetch(&client, session.token(), &device.name, filter).await?;
        Ok(Self::with_catalog(client, session.token(), device, catalog))
    }

    /// Build a player around an already fetched catalog.
    pub fn with_catalog(
        client: NowoClient,
        token: impl Into<String>,
        device: StbInfo,
        catalog: ChannelCatalog,
    ) -> Self {
        Self {
            client,
            token: token.into(),
            device,
            catalog,
            state: PlayerState::Off,
            current_channel: None,
            current_index: None,
            epg: None,
        }
    }

    // ─── Commands ───────────────────────────────────────────────────────

    /// Mark the player as on. Local only; nothing is sent to the box.
    pub fn turn_on(&mut self) {
        self.state = PlayerState::On;
    }

    /// Tune the box to the source named `name`.
    ///
    /// An unknown name fails with [`NowoError::UnknownSource`] and changes
    /// nothing. Otherwise the local state is updated first, then the play
    /// command is sent; if sending fails the error is returned as
    /// [`NowoError::Command`] and the local state keeps the new channel.
    pub async fn select_source(&mut self, name: &str) -> NowoResult<()> {
        let unknown = || NowoError::UnknownSource {
            name: name.to_string(),
        };
        let index = self.catalog.position(name).ok_or_else(unknown)?;
        let channel = self.catalog.channel_by_name(name).cloned().ok_or_else(unknown)?;

        self.current_index = Some(index);
        self.state = PlayerState::Selecting;
        tracing::debug!(device = %self.device.name, source = name, "Selecting source");

        let channel_id = channel.id.clone();
        self.current_channel = Some(channel);
        self.state = PlayerState::Playing;

        let ack = self
            .client
            .play_channel(&self.token, &self.device.id, &channel_id)
            .await
            .map_err(|e| NowoError::Command {
                device: self.device.name.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(device = %self.device.name, ack = %ack, "Play command acknowledged");
        Ok(())
    }

    /// Select the next source, staying on the last one at the end.
    pub async fn next(&mut self) -> NowoResult<()> {
        let len = self.catalog.len();
        if len == 0 {
            return Ok(());
        }

        let target = match self.current_index {
            None => 0,
            Some(index) => (index + 1).min(len - 1),
        };
        self.select_index(target).await
    }

    /// Select the previous source, staying on the first one at the start.
    pub async fn previous(&mut self) -> NowoResult<()> {
        if self.catalog.is_empty() {
            return Ok(());
        }

        match self.current_index {
            None => Ok(()),
            Some(index) => self.select_index(index.saturating_sub(1)).await,
        }
    }

    async fn select_index(&mut self, index: usize) -> NowoResult<()> {
        let name = self
            .catalog
            .source_at(index)
            .map(str::to_string)
            .ok_or_else(|| NowoError::UnknownSource {
                name: format!("#{index}"),
            })?;
        self.select_source(&name).await
    }

    // ─── Polling ────────────────────────────────────────────────────────

    /// Refresh the program guide for the current channel.
    pub async fn update(&mut self) -> NowoResult<()> {
        self.update_at(Utc::now()).await
    }

    /// Refresh the program guide as if polled at `now`.
    ///
    /// Without a current channel this does nothing. On failure the previous
    /// snapshot and its timestamp are kept.
    pub async fn update_at(&mut self, now: DateTime<Utc>) -> NowoResult<()> {
        let Some(channel) = &self.current_channel else {
            return Ok(());
        };

        let response = self
            .client
            .schedule(&self.token, &channel.id, now)
            .await
            .map_err(|e| NowoError::GuideFetch {
                channel: channel.name.clone(),
                reason: e.to_string(),
            })?;

        let snapshot = EpgSnapshot::from_response(response, now, &channel.name)?;
        tracing::debug!(
            channel = %channel.name,
            duration = snapshot.airing.duration,
            position = snapshot.airing.current,
            "Program guide refreshed"
        );
        self.epg = Some(snapshot);
        Ok(())
    }

    // ─── Identity ───────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.device.name
    }

    /// `"nowo.box"` followed by the lowercased device name.
    pub fn unique_id(&self) -> String {
        format!("{UNIQUE_ID_PREFIX}{}", self.device.name.to_lowercase())
    }

    pub fn device(&self) -> &StbInfo {
        &self.device
    }

    pub fn device_class(&self) -> &'static str {
        DEVICE_CLASS_TV
    }

    pub fn media_content_type(&self) -> &'static str {
        MEDIA_TYPE_TVSHOW
    }

    pub fn supported_features(&self) -> &'static [Feature] {
        SUPPORTED_FEATURES
    }

    /// Bitmask of [`supported_features`](Self::supported_features).
    pub fn supported_feature_bits(&self) -> u32 {
        SUPPORTED_FEATURES.iter().fold(0, |bits, f| bits | f.bit())
    }

    // ─── State ──────────────────────────────────────────────────────────

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn source_list(&self) -> &[String] {
        self.catalog.sources()
    }

    pub fn catalog(&self) -> &ChannelCatalog {
        &self.catalog
    }

    /// Index of the current source in [`source_list`](Self::source_list).
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_channel(&self) -> Option<&ChannelInfo> {
        self.current_channel.as_ref()
    }

    /// Last successfully fetched program guide.
    pub fn epg(&self) -> Option<&EpgSnapshot> {
        self.epg.as_ref()
    }

    // ─── Media projections ──────────────────────────────────────────────

    /// Length of the airing program, in seconds.
    pub fn media_duration(&self) -> Option<i64> {
        self.epg.as_ref().map(|epg| epg.airing.duration)
    }

    /// Elapsed time of the airing program at the last refresh, in seconds.
    pub fn media_position(&self) -> Option<i64> {
        self.epg.as_ref().map(|epg| epg.airing.current)
    }

    pub fn media_position_updated_at(&self) -> Option<DateTime<Utc>> {
        self.epg.as_ref().map(|epg| epg.observed_at)
    }

    pub fn media_channel(&self) -> Option<&str> {
        self.current_channel.as_ref().map(|c| c.name.as_str())
    }

    pub fn media_title(&self) -> Option<&str> {
        self.media_channel()
    }

    /// Name of the current source.
    pub fn source(&self) -> Option<&str> {
        self.media_channel()
    }

    /// Title of the airing program.
    pub fn media_series_title(&self) -> Option<&str> {
        self.epg
            .as_ref()
            .and_then(EpgSnapshot::program)
            .and_then(|program| program.title.as_deref())
    }

    pub fn media_season(&self) -> Option<&str> {
        self.epg.as_ref().and_then(EpgSnapshot::season)
    }

    /// `"{episode} {episodeTitle}"` for numbered episodes.
    pub fn media_episode(&self) -> Option<String> {
        self.epg
            .as_ref()
            .and_then(EpgSnapshot::program)
            .and_then(|program| program.episode_label())
    }

    /// Square logo of the current channel.
    pub fn media_image_url(&self) -> Option<String> {
        self.current_channel.as_ref().and_then(ChannelInfo::logo_url)
    }

    /// Poster of the airing program, falling back to the channel logo.
    pub fn entity_picture(&self) -> Option<String> {
        self.epg
            .as_ref()
            .and_then(EpgSnapshot::program)
            .and_then(|program| program.poster_url())
            .or_else(|| self.media_image_url())
    }

    /// Snapshot of every projection.
    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying {
            name: self.name().to_string(),
            unique_id: self.unique_id(),
            state: self.state,
            source: self.source().map(str::to_string),
            media_title: self.media_title().map(str::to_string),
            media_series_title: self.media_series_title().map(str::to_string),
            media_season: self.media_season().map(str::to_string),
            media_episode: self.media_episode(),
            media_duration: self.media_duration(),
            media_position: self.media_position(),
            media_position_updated_at: self.media_position_updated_at(),
            media_image_url: self.media_image_url(),
            entity_picture: self.entity_picture(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::channels::FavoriteChannel;
    use crate::protocol::session::DeviceType;
    use std::collections::HashMap;

    fn channel(id: &str, name: &str) -> ChannelInfo {
        ChannelInfo {
            id: id.into(),
            name: name.into(),
            enabled: true,
            square_logo: Some(format!("https://img/{id}.png")),
            extra: HashMap::new(),
        }
    }

    // Commands in these tests never reach the network: an unroutable base
    // URL is enough for the purely local paths.
    fn player(names: &[&str]) -> BoxPlayer {
        let channels = names
            .iter()
            .enumerate()
            .map(|(i, name)| channel(&format!("c{i}"), name))
            .collect();
        let favorites: Vec<FavoriteChannel> = Vec::new();
        let catalog = ChannelCatalog::new(channels, &favorites, &SourceFilter::default());
        BoxPlayer::with_catalog(
            NowoClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9"),
            "tok",
            StbInfo {
                id: "stb-1".into(),
                name: "Sala Grande".into(),
                kind: DeviceType::Stb,
            },
            catalog,
        )
    }

    #[test]
    fn test_initial_state() {
        let player = player(&["A", "B"]);
        assert_eq!(player.state(), PlayerState::Off);
        assert_eq!(player.current_index(), None);
        assert!(player.source().is_none());
        assert!(player.media_duration().is_none());
        assert!(player.entity_picture().is_none());
        assert_eq!(player.source_list(), ["A", "B"]);
    }

    #[test]
    fn test_identity_projections() {
        let player = player(&[]);
        assert_eq!(player.name(), "Sala Grande");
        assert_eq!(player.unique_id(), "nowo.boxsala grande");
        assert_eq!(player.device_class(), "tv");
        assert_eq!(player.media_content_type(), "tvshow");
        assert_eq!(player.supported_features().len(), 4);
        assert_eq!(player.supported_feature_bits(), 16 | 32 | 128 | 2048);
    }

    #[test]
    fn test_turn_on_is_local() {
        let mut player = player(&["A"]);
        player.turn_on();
        assert_eq!(player.state(), PlayerState::On);
    }

    #[tokio::test]
    async fn test_unknown_source_changes_nothing() {
        let mut player = player(&["A", "B"]);
        let err = player.select_source("Z").await.unwrap_err();
        assert!(matches!(err, NowoError::UnknownSource { ref name } if name == "Z"));
        assert_eq!(player.state(), PlayerState::Off);
        assert_eq!(player.current_index(), None);
        assert!(player.current_channel().is_none());
    }

    #[tokio::test]
    async fn test_navigation_on_empty_list_is_noop() {
        let mut player = player(&[]);
        player.next().await.unwrap();
        player.previous().await.unwrap();
        assert_eq!(player.state(), PlayerState::Off);
        assert_eq!(player.current_index(), None);
    }

    #[tokio::test]
    async fn test_previous_without_index_is_noop() {
        let mut player = player(&["A", "B"]);
        player.previous().await.unwrap();
        assert_eq!(player.current_index(), None);
        assert_eq!(player.state(), PlayerState::Off);
    }

    #[tokio::test]
    async fn test_update_without_channel_is_noop() {
        let mut player = player(&["A"]);
        player.update().await.unwrap();
        assert!(player.epg().is_none());
        assert!(player.media_position_updated_at().is_none());
    }

    #[test]
    fn test_state_display_and_serialize() {
        assert_eq!(PlayerState::Playing.to_string(), "playing");
        assert_eq!(
            serde_json::to_value(PlayerState::Selecting).unwrap(),
            serde_json::json!("selecting")
        );
        assert_eq!(
            serde_json::to_value(Feature::SelectSource).unwrap(),
            serde_json::json!("select_source")
        );
    }
}
