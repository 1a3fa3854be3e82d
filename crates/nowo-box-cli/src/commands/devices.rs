use colored::Colorize;
use dialoguer::Select;

use crate::app::SessionState;

// ─── Devices ────────────────────────────────────────────────────────────

pub fn cmd_devices(state: &mut SessionState) {
    println!("\n{}", "Set-top-boxes:".bright_blue());
    for (i, player) in state.players.iter().enumerate() {
        let marker = if i == state.active { "▶" } else { " " };
        println!(
            "  {} {} ({}) {} sources, {}",
            marker.green(),
            player.name().cyan(),
            player.device().id.dimmed(),
            player.source_list().len(),
            player.state()
        );
    }

    if state.players.len() < 2 {
        return;
    }

    let names: Vec<&str> = state.players.iter().map(|p| p.name()).collect();
    let sel = Select::new()
        .with_prompt("Control which set-top-box?")
        .items(&names)
        .default(state.active)
        .interact_opt()
        .unwrap_or(None);

    if let Some(index) = sel {
        state.active = index;
        println!("Now controlling {}.", names[index].cyan());
    }
}
