//! # Setup
//!
//! One-shot startup: authenticate once, enumerate the account's
//! set-top-boxes and build one [`BoxPlayer`] per box.
//!
//! A device whose catalog cannot be fetched is skipped with a warning; the
//! remaining devices are still set up. Authentication failure is fatal.

use crate::catalog::SourceFilter;
use crate::client::NowoClient;
use crate::config::NowoConfig;
use crate::device::stb_devices;
use crate::error::NowoResult;
use crate::player::BoxPlayer;
use crate::protocol::session::Session;

/// Authenticate with `config` and build the players of every set-top-box.
pub async fn discover_players(config: &NowoConfig) -> NowoResult<Vec<BoxPlayer>> {
    config.validate()?;
    let client = NowoClient::new(config)?;
    let session = client
        .authenticate(&config.username, &config.password)
        .await?;
    Ok(setup_players(&client, &session, &config.source_filter()).await)
}

/// Build the players of every set-top-box of `session`, in session order.
///
/// Devices that fail setup are logged and left out.
pub async fn setup_players(
    client: &NowoClient,
    session: &Session,
    filter: &SourceFilter,
) -> Vec<BoxPlayer> {
    let mut players = Vec::new();

    for device in stb_devices(session) {
        let name = device.name.clone();
        match BoxPlayer::setup(client.clone(), session, device, filter).await {
            Ok(player) => {
                tracing::info!(
                    device = %name,
                    sources = player.source_list().len(),
                    "Set-top-box ready"
                );
                players.push(player);
            }
            Err(e) => {
                tracing::warn!(device = %name, "Skipping set-top-box: {}", e);
            }
        }
    }

    players
}
