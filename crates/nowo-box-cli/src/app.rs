use colored::Colorize;

use nowo_box::{BoxPlayer, NowoConfig, NowoError, NowoResult};

/// Shared state passed between menu actions.
pub struct SessionState {
    pub players: Vec<BoxPlayer>,
    /// Index of the player menu actions apply to.
    pub active: usize,
}

impl SessionState {
    pub fn new(players: Vec<BoxPlayer>) -> Self {
        Self {
            players,
            active: 0,
        }
    }

    pub fn player(&self) -> Option<&BoxPlayer> {
        self.players.get(self.active)
    }

    pub fn player_mut(&mut self) -> Option<&mut BoxPlayer> {
        self.players.get_mut(self.active)
    }

    /// Make the player named `name` (case-insensitive) active.
    pub fn activate_by_name(&mut self, name: &str) -> bool {
        match self
            .players
            .iter()
            .position(|p| p.name().eq_ignore_ascii_case(name))
        {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }
}

/// Config to start from when discovery fails.
///
/// Missing credentials fall back to an empty config, filled in by prompts.
/// Any other failure, such as a malformed `nowo.toml`, is returned.
pub fn fallback_config(err: NowoError) -> NowoResult<NowoConfig> {
    match err {
        NowoError::MissingCredentials { .. } => {
            println!("{} No config file found ({err}).", "Note:".yellow());
            println!(
                "  Set {} and {} env vars, or create a nowo.toml file.\n",
                "NOWO_USERNAME".cyan(),
                "NOWO_PASSWORD".cyan()
            );
            Ok(NowoConfig::new("", ""))
        }
        other => Err(other),
    }
}

pub fn format_status(state: &SessionState) -> String {
    let Some(player) = state.player() else {
        return format!("Device: {}", "none".dimmed());
    };

    let source = player
        .source()
        .map_or_else(|| "none".dimmed().to_string(), |s| s.cyan().to_string());

    let mut status = format!(
        "Device: {} | State: {} | Source: {source}",
        player.name().cyan(),
        player.state().to_string().green()
    );

    if let Some(title) = player.media_series_title() {
        status.push_str(&format!(" | On air: {}", title.bright_white()));
    }

    status
}

pub fn print_pretty_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("{} {}", "Failed to format JSON output:".yellow(), err);
            println!("{value}");
        }
    }
}

/// `mm:ss` rendering of a signed number of seconds.
pub fn format_clock(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.unsigned_abs();
    format!("{sign}{:02}:{:02}", seconds / 60, seconds % 60)
}
