// Time-of-day utility functions
// Bookings live on a single day, so everything here works on NaiveTime and
// plain minute counts rather than full datetimes.

use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes elapsed since 00:00 for a wall-clock time.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Build a time from a minute count. Returns `None` at or past 24:00.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

/// Format a time as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Format a minute count as `HH:MM`. Values past midnight keep counting
/// (`24:30`) so an end time is never shown wrapped to the morning.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse an `HH:MM` (or `H:MM`) string.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime, String> {
    let trimmed = input.trim();
    let (hours, minutes) = trimmed
        .split_once(':')
        .ok_or_else(|| format!("Invalid time '{}': expected HH:MM", trimmed))?;

    let hours: u32 = hours
        .parse()
        .map_err(|_| format!("Invalid hour in '{}'", trimmed))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| format!("Invalid minute in '{}'", trimmed))?;

    NaiveTime::from_hms_opt(hours, minutes, 0)
        .ok_or_else(|| format!("Time '{}' is out of range", trimmed))
}

/// Serde adapter storing a `NaiveTime` as an `HH:MM` string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(serde::de::Error::custom)
    }
}
