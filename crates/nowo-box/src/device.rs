//! Set-top-box discovery from an authenticated session.

use crate::protocol::session::{Session, StbInfo};

/// Devices of the session that are set-top-boxes, in session order.
///
/// Other device kinds (phones, web clients) cannot receive play commands
/// and are skipped. An account without any set-top-box yields an empty list.
pub fn stb_devices(session: &Session) -> Vec<StbInfo> {
    session
        .devices()
        .iter()
        .filter(|device| {
            let keep = device.kind.is_stb();
            if !keep {
                tracing::debug!(
                    device = %device.name,
                    kind = %device.kind,
                    "Skipping non set-top-box device"
                );
            }
            keep
        })
        .cloned()
        .collect()
}
