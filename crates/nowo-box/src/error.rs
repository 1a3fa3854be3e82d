//! # Error Types
//!
//! Semantic error types for the NOWO set-top-box API. Low-level transport
//! and decoding failures ([`NowoError::Http`], [`NowoError::Json`],
//! [`NowoError::Api`]) are produced by [`NowoClient`](crate::NowoClient);
//! the components above it wrap them into the variant that names the
//! operation that failed.
//!
//! ## Setup vs. cycle errors
//!
//! Errors raised while building a player ([`Authentication`](NowoError::Authentication),
//! [`CatalogFetch`](NowoError::CatalogFetch)) abort that player's creation.
//! Errors raised during a poll or command cycle ([`UnknownSource`](NowoError::UnknownSource),
//! [`Command`](NowoError::Command), [`GuideFetch`](NowoError::GuideFetch))
//! leave the previously known state in place.

use thiserror::Error;

/// Convenient Result alias for NOWO operations.
pub type NowoResult<T> = std::result::Result<T, NowoError>;

/// All errors that can occur when talking to the NOWO API.
#[derive(Error, Debug)]
pub enum NowoError {
    // ─── Setup ──────────────────────────────────────────────────────
    /// Session creation failed (bad credentials, unreachable endpoint,
    /// or a session payload without a token or device list).
    #[error("Authentication failed: {reason}. Check your NOWO username and password.")]
    Authentication { reason: String },

    /// The channel list or the favorites list could not be fetched.
    #[error("Failed to fetch channel catalog for {device}: {reason}")]
    CatalogFetch { device: String, reason: String },

    // ─── Cycle ──────────────────────────────────────────────────────
    /// The requested source is not part of the player's source list.
    #[error("Unknown source: {name}")]
    UnknownSource { name: String },

    /// The play command could not be delivered to the set-top-box.
    #[error("Play command for {device} failed: {reason}")]
    Command { device: String, reason: String },

    /// The program guide for the current channel could not be refreshed.
    #[error("Program guide refresh for {channel} failed: {reason}")]
    GuideFetch { channel: String, reason: String },

    // ─── API ────────────────────────────────────────────────────────
    /// The API answered with a non-success HTTP status.
    #[error("NOWO API error (status {status}): {message}")]
    Api { status: u16, message: String },

    // ─── Config ─────────────────────────────────────────────────────
    /// Configuration file error (missing, malformed, or invalid values).
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// No config file was found and a credential variable is unset.
    #[error("{variable} environment variable not set")]
    MissingCredentials { variable: String },

    // ─── Transport ──────────────────────────────────────────────────
    /// Low-level HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─── I/O ────────────────────────────────────────────────────────
    /// Filesystem or I/O error (config file reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NowoError {
    /// Build an [`Api`](NowoError::Api) error from a status code and response body.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "empty response body".to_string()
        } else {
            message
        };
        NowoError::Api { status, message }
    }

    /// Returns `true` if this error aborts the setup of a player.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            NowoError::Authentication { .. }
                | NowoError::CatalogFetch { .. }
                | NowoError::ConfigError { .. }
                | NowoError::MissingCredentials { .. }
        )
    }

    /// Returns `true` if this error belongs to a single poll or command
    /// cycle and leaves the player usable.
    pub fn is_cycle_error(&self) -> bool {
        matches!(
            self,
            NowoError::UnknownSource { .. }
                | NowoError::Command { .. }
                | NowoError::GuideFetch { .. }
        )
    }

    /// Returns `true` if the API rejected the bearer token or credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NowoError::Api { status: 401 | 403, .. })
            || matches!(self, NowoError::Authentication { .. })
    }
}

// ─── From impls for external error types ────────────────────────────────

#[cfg(feature = "config-toml")]
impl From<toml::de::Error> for NowoError {
    fn from(err: toml::de::Error) -> Self {
        NowoError::ConfigError {
            reason: err.to_string(),
        }
    }
}
