//! Protocol constants for endpoint paths, payload literals, and formats.

/// Default NOWO API base URL.
pub const DEFAULT_API_URL: &str = "https://api-nowotv.nowo.pt";

/// Known NOWO API endpoint paths, relative to the base URL.
pub struct Endpoints;

impl Endpoints {
    // ─── Session ────────────────────────────────────────────────────

    /// Create a session (exchanges credentials for a bearer token).
    pub const SESSION: &'static str = "/api/v1/session";

    // ─── Catalog ────────────────────────────────────────────────────

    /// Full channel list.
    pub const CHANNELS: &'static str = "/api/epg/v2/channel";

    /// The user's favorite channels.
    pub const FAVORITES: &'static str = "/api/history/v1/favorite";

    // ─── Playback ───────────────────────────────────────────────────

    /// Prefix of the per-device command endpoint.
    pub const SWIPE_ACTION: &'static str = "/api/v1/swipe/action/";

    // ─── Program guide ──────────────────────────────────────────────

    /// Prefix of the per-channel schedule endpoint.
    pub const SCHEDULE_CHANNEL: &'static str = "/api/epg/v1/schedule/channel/";

    /// Command endpoint for a specific set-top-box.
    #[must_use]
    pub fn swipe_action(device_id: &str) -> String {
        format!("{}{}", Self::SWIPE_ACTION, device_id)
    }

    /// Schedule endpoint for a channel over the window `[from, until]`.
    ///
    /// The player always passes the same instant for both ends, which asks
    /// the API for whatever is airing at that minute.
    #[must_use]
    pub fn schedule(channel_id: &str, from: &str, until: &str) -> String {
        format!(
            "{}{}/from/{}/until/{}",
            Self::SCHEDULE_CHANNEL,
            channel_id,
            from,
            until
        )
    }
}

/// Literals of the session creation payload.
///
/// The API only hands out tokens to known client kinds, so the session
/// request identifies itself as the web client.
pub struct SessionDevice;

impl SessionDevice {
    /// Session type for over-the-top clients.
    pub const SESSION_TYPE: &'static str = "OTT";

    /// Device alias reported to the API.
    pub const ALIAS: &'static str = "web";

    /// Operating system reported to the API.
    pub const DEVICE_OS: &'static str = "Mac OS X";

    /// Operating system version reported to the API.
    pub const DEVICE_OS_VERSION: &'static str = "-";

    /// Client software version reported to the API.
    pub const SOFTWARE_VERSION: &'static str = "2.0.1";
}

/// Device type strings found in the session's device list.
pub struct DeviceTypes;

impl DeviceTypes {
    /// A physical set-top-box.
    pub const STB: &'static str = "STB";
}

/// Literals of the `play` command payload.
pub struct PlayCommands;

impl PlayCommands {
    /// Play target type for live channels.
    pub const CHANNEL: &'static str = "CHANNEL";

    /// Resume offset. Live playback always starts at the live edge.
    pub const BOOKMARK_LIVE: &'static str = "0";
}

/// Query suffix that asks the image service for the square channel rendition.
pub const IMAGE_FORM_SUFFIX: &str = "?form=channel-square-1";

/// `chrono` format of the instant embedded in schedule URLs (minute precision).
pub const SCHEDULE_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// `chrono` format of `published.start` / `published.end` in schedule payloads.
pub const SCHEDULE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
