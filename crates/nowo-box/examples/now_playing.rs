//! Tune the first set-top-box to a channel and print what is airing.
//!
//! ```bash
//! NOWO_USERNAME=xxx NOWO_PASSWORD=yyy cargo run --example now_playing -- "RTP1"
//! ```

use nowo_box::{NowoConfig, discover_players};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = NowoConfig::discover(None)?;
    let mut players = discover_players(&config).await?;
    let Some(player) = players.first_mut() else {
        println!("No set-top-boxes found on this account.");
        return Ok(());
    };

    match std::env::args().nth(1) {
        Some(source) => player.select_source(&source).await?,
        None => player.next().await?,
    }
    player.update().await?;

    println!("{}", serde_json::to_string_pretty(&player.now_playing())?);
    Ok(())
}
