mod devices;
mod guide;
mod playback;

pub use devices::cmd_devices;
pub use guide::{cmd_now_playing, cmd_refresh_guide, cmd_watch};
pub use playback::{cmd_next, cmd_previous, cmd_select_source, cmd_turn_on};
