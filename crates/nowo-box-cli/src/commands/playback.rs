use colored::Colorize;
use dialoguer::Select;

use nowo_box::{BoxPlayer, NowoResult};

use crate::app::SessionState;

// ─── Source selection ───────────────────────────────────────────────────

pub async fn cmd_select_source(state: &mut SessionState) {
    let Some(player) = state.player_mut() else {
        return;
    };

    if player.source_list().is_empty() {
        eprintln!("{}", "No sources available (check your filters).".yellow());
        return;
    }

    let sel = Select::new()
        .with_prompt("Channel")
        .items(player.source_list())
        .default(player.current_index().unwrap_or(0))
        .interact_opt()
        .unwrap_or(None);

    let Some(index) = sel else {
        return;
    };
    let name = player.source_list()[index].clone();
    let result = player.select_source(&name).await;
    report(player, result);
}

// ─── Navigation ─────────────────────────────────────────────────────────

pub async fn cmd_next(state: &mut SessionState) {
    if let Some(player) = state.player_mut() {
        let result = player.next().await;
        report(player, result);
    }
}

pub async fn cmd_previous(state: &mut SessionState) {
    if let Some(player) = state.player_mut() {
        let result = player.previous().await;
        report(player, result);
    }
}

// ─── Power ──────────────────────────────────────────────────────────────

pub fn cmd_turn_on(state: &mut SessionState) {
    if let Some(player) = state.player_mut() {
        player.turn_on();
        println!("{} is {}.", player.name().cyan(), player.state().to_string().green());
    }
}

fn report(player: &BoxPlayer, result: NowoResult<()>) {
    match result {
        Ok(()) => match player.source() {
            Some(source) => println!("{} {}", "Tuned to".green(), source.cyan()),
            None => println!("{}", "Nothing to select.".dimmed()),
        },
        // The box may not have switched, but local state follows the request.
        Err(e) => eprintln!("{} {}", "Error:".red(), e),
    }
}
