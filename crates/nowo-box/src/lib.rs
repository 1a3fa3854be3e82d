//! # nowo-box
//!
//! A Rust client for the NOWO TV set-top-box cloud API.
//!
//! This crate authenticates against the NOWO API, discovers the account's
//! set-top-boxes and exposes each one as a [`BoxPlayer`]: a small state
//! machine that can change channels and poll the program guide.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nowo_box::{NowoConfig, discover_players};
//!
//! #[tokio::main]
//! async fn main() -> nowo_box::NowoResult<()> {
//!     // Load config from environment or nowo.toml
//!     let config = NowoConfig::discover(None)?;
//!
//!     // Authenticate and build one player per set-top-box
//!     let mut players = discover_players(&config).await?;
//!
//!     for player in &mut players {
//!         println!("{}: {} sources", player.name(), player.source_list().len());
//!         player.next().await?;
//!         player.update().await?;
//!         println!("Now playing: {:?}", player.media_series_title());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! | Layer | Type | Holds state | Best for |
//! |-------|------|-------------|----------|
//! | Low-level | [`NowoClient`] | No | Raw API calls, testing |
//! | High-level | [`BoxPlayer`] | Channel, index, guide | Driving a box |
//!
//! ## Configuration
//!
//! See [`NowoConfig`] for the full configuration reference.
//! The simplest setup uses environment variables:
//!
//! ```bash
//! export NOWO_USERNAME="me@example.com"
//! export NOWO_PASSWORD="hunter2"
//! ```
//!
//! Or a `nowo.toml` file:
//!
//! ```toml
//! username = "me@example.com"
//! password = "hunter2"
//! favorites = true
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod guide;
pub mod player;
pub mod protocol;
pub mod setup;

// ─── Public re-exports ──────────────────────────────────────────────────

pub use catalog::{ChannelCatalog, SourceFilter};
pub use client::NowoClient;
pub use config::NowoConfig;
pub use error::{NowoError, NowoResult};
pub use guide::EpgSnapshot;
pub use player::{BoxPlayer, NowPlaying, PlayerState};
pub use protocol::session::Session;
pub use setup::{discover_players, setup_players};
