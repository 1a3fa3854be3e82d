//! Program guide protocol types.

use serde::{Deserialize, Serialize};

use crate::protocol::constants::IMAGE_FORM_SUFFIX;
use crate::protocol::deserialize_opt_id;

/// Response of `GET /api/epg/v1/schedule/channel/{id}/from/{t}/until/{t}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleResponse {
    /// Airings in the requested window, earliest first.
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,

    /// Programs referenced by the airings, in the same order.
    #[serde(default)]
    pub programs: Option<Vec<Program>>,

    /// Season metadata for series programs. Entries may be `null`.
    #[serde(default)]
    pub seasons: Option<Vec<Option<Season>>>,
}

/// One airing of a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub published: PublishedWindow,
}

/// Published start/end of an airing, as `YYYY-MM-DDTHH:MM:SSZ` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedWindow {
    pub start: String,
    pub end: String,
}

/// Program metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub title: Option<String>,

    /// Episode number, as sent (number or string); `0` or absent for
    /// non-series programs.
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub episode: Option<String>,

    #[serde(rename = "episodeTitle", default)]
    pub episode_title: Option<String>,

    #[serde(rename = "posterImage", default)]
    pub poster_image: Option<String>,
}

impl Program {
    /// `"{episode} {episodeTitle}"` when the program is a numbered episode.
    #[must_use]
    pub fn episode_label(&self) -> Option<String> {
        match self.episode.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() && number != "0" => Some(format!(
                "{} {}",
                number,
                self.episode_title.as_deref().unwrap_or_default()
            )),
            _ => None,
        }
    }

    /// Poster URL with the square rendition suffix.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_image
            .as_deref()
            .map(|poster| format!("{poster}{IMAGE_FORM_SUFFIX}"))
    }
}

/// Season metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Season {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub season: Option<String>,
}
