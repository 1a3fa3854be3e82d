//! # nowo-box-cli
//!
//! Interactive terminal remote for NOWO set-top-boxes.
//! Authenticates once, builds one player per set-top-box, and then drives
//! channel changes and program guide refreshes from a menu.

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use dialoguer::{Input, Password, Select};

mod app;
mod commands;

use app::{SessionState, fallback_config, format_status};
use commands::{
    cmd_devices, cmd_next, cmd_now_playing, cmd_previous, cmd_refresh_guide, cmd_select_source,
    cmd_turn_on, cmd_watch,
};

use nowo_box::{NowoClient, NowoConfig, setup_players};

/// Interactive terminal remote for NOWO set-top-boxes.
#[derive(Parser)]
#[command(name = "nowo-box-cli", version, about)]
struct Cli {
    /// Path to nowo.toml config file
    #[arg(short, long)]
    config: Option<String>,

    /// NOWO API URL override
    #[arg(long)]
    url: Option<String>,

    /// Set-top-box to control first (by name)
    #[arg(short, long)]
    device: Option<String>,

    /// Enable verbose logging (set RUST_LOG for fine-grained control)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("nowo_box=debug,nowo_box_cli=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("nowo_box=warn")
            .init();
    }

    // Load config
    let discovered = NowoConfig::discover(cli.config.as_deref().map(Path::new));
    let mut config = match discovered.or_else(fallback_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {e}", "Invalid config:".red());
            return Err(e.into());
        }
    };

    if let Some(url) = &cli.url {
        config.api_url.clone_from(url);
    }

    if config.username.is_empty() {
        config.username = Input::new().with_prompt("Username").interact_text()?;
    }
    if config.password.is_empty() {
        config.password = Password::new().with_prompt("Password").interact()?;
    }

    println!(
        "{} NOWO Box Remote",
        "╔══════════════════════════════════╗\n║".bright_blue()
    );
    println!("{}", "╚══════════════════════════════════╝".bright_blue());
    println!("Signing in to {}...\n", config.api_url.cyan());

    let client = NowoClient::new(&config)?;
    let session = match client.authenticate(&config.username, &config.password).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "Sign-in failed:".red(), e);
            return Ok(());
        }
    };

    let players = setup_players(&client, &session, &config.source_filter()).await;
    if players.is_empty() {
        eprintln!("{}", "No set-top-box could be set up on this account.".yellow());
        return Ok(());
    }
    println!("{} {} set-top-box(es) ready.", "Signed in!".green(), players.len());

    let mut state = SessionState::new(players);
    if let Some(name) = &cli.device {
        if state.activate_by_name(name) {
            tracing::debug!(device = %name, "Controlling requested set-top-box");
        } else {
            eprintln!("{} no set-top-box named {}", "Warning:".yellow(), name.cyan());
        }
    }

    loop {
        println!();
        println!("{}", format_status(&state));

        let items = [
            "Devices",
            "Select Source",
            "Next Channel",
            "Previous Channel",
            "Turn On",
            "Refresh Guide",
            "Now Playing",
            "Watch",
            "Quit",
        ];

        let selection = Select::new()
            .with_prompt("Select an action")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(0) => cmd_devices(&mut state),
            Some(1) => cmd_select_source(&mut state).await,
            Some(2) => cmd_next(&mut state).await,
            Some(3) => cmd_previous(&mut state).await,
            Some(4) => cmd_turn_on(&mut state),
            Some(5) => cmd_refresh_guide(&mut state).await,
            Some(6) => cmd_now_playing(&state),
            Some(7) => cmd_watch(&mut state).await,
            _ => break,
        }
    }

    println!("{}", "Goodbye!".green());
    Ok(())
}
