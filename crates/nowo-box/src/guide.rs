//! # Program Guide
//!
//! Turns a schedule response into an [`EpgSnapshot`]: the airing that
//! covers the polled minute, with its length and the elapsed time.
//!
//! Timing is plain signed arithmetic on UTC instants:
//!
//! ```text
//! duration = end - start
//! current  = now - start     (no clamping: negative before start,
//!                             larger than duration after the end)
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::error::{NowoError, NowoResult};
use crate::protocol::constants::{SCHEDULE_INSTANT_FORMAT, SCHEDULE_TIMESTAMP_FORMAT};
use crate::protocol::schedule::{Program, ScheduleResponse, Season};

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` schedule timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, SCHEDULE_TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
}

/// Format an instant the way schedule URLs expect it (`YYYY-MM-DDTHH:MMZ`).
pub fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format(SCHEDULE_INSTANT_FORMAT).to_string()
}

/// Start, end and derived timing of one airing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleTiming {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Length of the airing, in seconds.
    pub duration: i64,
    /// Seconds elapsed since the start at observation time.
    pub current: i64,
}

impl ScheduleTiming {
    pub fn compute(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration: (end - start).num_seconds(),
            current: (now - start).num_seconds(),
        }
    }
}

/// The last successfully fetched program guide of a channel.
#[derive(Debug, Clone, Serialize)]
pub struct EpgSnapshot {
    /// Timing of the first airing in the response.
    pub airing: ScheduleTiming,

    /// `None` when the response carried no `programs` key.
    pub programs: Option<Vec<Program>>,

    pub seasons: Option<Vec<Option<Season>>>,

    /// When the snapshot was taken.
    pub observed_at: DateTime<Utc>,
}

impl EpgSnapshot {
    /// Build a snapshot from a schedule response polled at `now`.
    ///
    /// Fails with [`NowoError::GuideFetch`] when the response has no airing
    /// or its timestamps cannot be parsed.
    pub fn from_response(
        response: ScheduleResponse,
        now: DateTime<Utc>,
        channel: &str,
    ) -> NowoResult<Self> {
        let guide_error = |reason: String| NowoError::GuideFetch {
            channel: channel.to_string(),
            reason,
        };

        let first = response
            .schedules
            .first()
            .ok_or_else(|| guide_error("schedule list is empty".into()))?;

        let start = parse_timestamp(&first.published.start).map_err(|e| {
            guide_error(format!("invalid start '{}': {}", first.published.start, e))
        })?;
        let end = parse_timestamp(&first.published.end)
            .map_err(|e| guide_error(format!("invalid end '{}': {}", first.published.end, e)))?;

        Ok(Self {
            airing: ScheduleTiming::compute(start, end, now),
            programs: response.programs,
            seasons: response.seasons,
            observed_at: now,
        })
    }

    /// First program of the snapshot, if any.
    pub fn program(&self) -> Option<&Program> {
        self.programs.as_ref().and_then(|programs| programs.first())
    }

    /// Season of the first program, if any.
    pub fn season(&self) -> Option<&str> {
        self.seasons
            .as_ref()
            .and_then(|seasons| seasons.first())
            .and_then(Option::as_ref)
            .and_then(|season| season.season.as_deref())
    }
}
