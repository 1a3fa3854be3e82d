//! List the set-top-boxes of an account and their selectable channels.
//!
//! ```bash
//! NOWO_USERNAME=xxx NOWO_PASSWORD=yyy cargo run --example channels
//! ```

use nowo_box::{NowoConfig, discover_players};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = NowoConfig::discover(None)?;
    let players = discover_players(&config).await?;

    if players.is_empty() {
        println!("No set-top-boxes found on this account.");
        return Ok(());
    }

    for player in &players {
        println!("{} ({})", player.name(), player.unique_id());
        for (i, source) in player.source_list().iter().enumerate() {
            println!("  {:>3}. {}", i + 1, source);
        }
    }

    Ok(())
}
