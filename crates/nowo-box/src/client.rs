//! # NOWO HTTP Client
//!
//! Low-level transport for the NOWO TV cloud API. Every call is a single
//! HTTP request with a JSON body; there is no retry and no token renewal.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   NowoClient                     │
//! │                                                  │
//! │  authenticate() ─► POST /api/v1/session          │
//! │  channels()     ─► GET  /api/epg/v2/channel      │
//! │  favorites()    ─► GET  /api/history/v1/favorite │
//! │  play_channel() ─► POST /api/v1/swipe/action/{d} │
//! │  schedule()     ─► GET  /api/epg/v1/schedule/... │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! The client wraps one [`reqwest::Client`], so cloning it is cheap and all
//! clones share the same connection pool. Players hold their own clone.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{DEFAULT_REQUEST_TIMEOUT_SECS, NowoConfig};
use crate::error::{NowoError, NowoResult};
use crate::guide::format_instant;
use crate::protocol::channels::{ChannelInfo, FavoriteChannel};
use crate::protocol::constants::Endpoints;
use crate::protocol::playback::PlayCommand;
use crate::protocol::schedule::ScheduleResponse;
use crate::protocol::session::{Session, SessionRequest, SessionResponse};

/// HTTP client for the NOWO TV API.
#[derive(Debug, Clone)]
pub struct NowoClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NowoClient {
    /// Build a client from configuration (base URL and request timeout).
    pub fn new(config: &NowoConfig) -> NowoResult<Self> {
        let timeout = Duration::from_secs(config.timeouts.request_timeout_secs);
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: normalize_base_url(&config.api_url),
            timeout,
        })
    }

    /// Build a client around an existing [`reqwest::Client`].
    ///
    /// Useful for sharing a connection pool or pointing at a mock server.
    pub fn with_client(http: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ─── Session ────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token and the account's devices.
    ///
    /// Any failure (transport, non-2xx, or a body without `id` or
    /// `properties.stbs`) is reported as [`NowoError::Authentication`].
    pub async fn authenticate(&self, username: &str, password: &str) -> NowoResult<Session> {
        let request = SessionRequest::new(username, password);
        let builder = self.request(Method::POST, Endpoints::SESSION).json(&request);

        let response: SessionResponse =
            self.send_json(builder).await.map_err(|e| NowoError::Authentication {
                reason: e.to_string(),
            })?;

        let session = Session::from(response);
        tracing::info!(devices = session.devices().len(), "NOWO session created");
        Ok(session)
    }

    // ─── Catalog ────────────────────────────────────────────────────────

    /// Fetch the full channel list.
    pub async fn channels(&self, token: &str) -> NowoResult<Vec<ChannelInfo>> {
        let channels: Vec<ChannelInfo> = self.get_json(token, Endpoints::CHANNELS).await?;
        tracing::debug!(count = channels.len(), "Fetched channel list");
        Ok(channels)
    }

    /// Fetch the user's favorite channels.
    pub async fn favorites(&self, token: &str) -> NowoResult<Vec<FavoriteChannel>> {
        let favorites: Vec<FavoriteChannel> = self.get_json(token, Endpoints::FAVORITES).await?;
        tracing::debug!(count = favorites.len(), "Fetched favorites");
        Ok(favorites)
    }

    // ─── Playback ───────────────────────────────────────────────────────

    /// Tell a set-top-box to tune to a live channel.
    ///
    /// Returns the acknowledgement body. The API does not document it, so
    /// an empty body maps to `null` and a non-JSON body to a JSON string.
    pub async fn play_channel(
        &self,
        token: &str,
        device_id: &str,
        channel_id: &str,
    ) -> NowoResult<serde_json::Value> {
        let path = Endpoints::swipe_action(device_id);
        let response = self
            .post(token, &path, &PlayCommand::channel(channel_id))
            .send()
            .await?;
        let text = Self::checked_text(response).await?;

        let ack = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };
        Ok(ack)
    }

    // ─── Program guide ──────────────────────────────────────────────────

    /// Fetch what airs on a channel at the given minute.
    pub async fn schedule(
        &self,
        token: &str,
        channel_id: &str,
        instant: DateTime<Utc>,
    ) -> NowoResult<ScheduleResponse> {
        let instant = format_instant(instant);
        let path = Endpoints::schedule(channel_id, &instant, &instant);
        self.get_json(token, &path).await
    }

    // ─── Core HTTP ──────────────────────────────────────────────────────

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every request is built here, so every request carries the timeout.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path)).timeout(self.timeout)
    }

    fn get(&self, token: &str, path: &str) -> RequestBuilder {
        self.request(Method::GET, path).bearer_auth(token)
    }

    fn post<B: Serialize + ?Sized>(&self, token: &str, path: &str, body: &B) -> RequestBuilder {
        self.request(Method::POST, path).bearer_auth(token).json(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, token: &str, path: &str) -> NowoResult<T> {
        tracing::debug!(path, "Sending NOWO request");
        self.send_json(self.get(token, path)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> NowoResult<T> {
        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    /// Check the status, then decode the body as `T`.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> NowoResult<T> {
        let text = Self::checked_text(response).await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Failed to parse NOWO response: {}", e);
            NowoError::Json(e)
        })
    }

    /// Read the body of a successful response, or map the status to an error.
    async fn checked_text(response: Response) -> NowoResult<String> {
        let status = response.status();
        tracing::debug!(status = %status, url = %response.url(), "NOWO response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "NOWO API error: {}", body);
            return Err(NowoError::from_status(status.as_u16(), body));
        }

        Ok(response.text().await?)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
