use std::time::Duration;

use colored::Colorize;
use dialoguer::Input;

use nowo_box::BoxPlayer;

use crate::app::{SessionState, format_clock, print_pretty_json};

// ─── Program guide ──────────────────────────────────────────────────────

pub async fn cmd_refresh_guide(state: &mut SessionState) {
    let Some(player) = state.player_mut() else {
        return;
    };

    if player.source().is_none() {
        eprintln!("{}", "Select a channel first.".yellow());
        return;
    }

    match player.update().await {
        Ok(()) => print_airing(player),
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }
}

pub fn cmd_now_playing(state: &SessionState) {
    let Some(player) = state.player() else {
        return;
    };

    println!("\n{}", "Now Playing:".bright_blue());
    match serde_json::to_value(player.now_playing()) {
        Ok(value) => print_pretty_json(&value),
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }
}

// ─── Watch ──────────────────────────────────────────────────────────────

/// Poll the guide on a fixed interval until Ctrl-C.
pub async fn cmd_watch(state: &mut SessionState) {
    let Some(player) = state.player_mut() else {
        return;
    };

    if player.source().is_none() {
        eprintln!("{}", "Select a channel first.".yellow());
        return;
    }

    let secs: u64 = Input::new()
        .with_prompt("Refresh every (seconds)")
        .default(30)
        .interact_text()
        .unwrap_or(30)
        .max(1);

    println!("Watching {}. Press Ctrl-C to stop.", player.name().cyan());
    let mut interval = tokio::time::interval(Duration::from_secs(secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match player.update().await {
                    Ok(()) => print_airing(player),
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n{}", "Stopped watching.".dimmed());
                break;
            }
        }
    }
}

fn print_airing(player: &BoxPlayer) {
    let channel = player.source().unwrap_or_default();
    let title = player.media_series_title().unwrap_or("(no program info)");

    let mut line = format!("{} {}", channel.cyan(), title.bright_white());
    if let Some(episode) = player.media_episode() {
        line.push_str(&format!(" - {episode}"));
    }
    if let (Some(position), Some(duration)) = (player.media_position(), player.media_duration()) {
        line.push_str(&format!(
            " [{} / {}]",
            format_clock(position),
            format_clock(duration)
        ));
    }
    println!("{line}");
}
