//! Mapping between wall-clock time and the vertical day canvas.
//!
//! The canvas top edge is `start_hour:00` and every hour is
//! `pixels_per_hour` tall (120px by default, i.e. 2px per minute). Pointer
//! offsets snap to the nearest `snap_minutes` step before being turned back
//! into a time.

use chrono::NaiveTime;

use crate::models::booking::MIN_DURATION_MINUTES;
use crate::models::settings::AgendaSettings;
use crate::services::error::ConfigError;
use crate::utils::time::{minutes_since_midnight, time_from_minutes, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGeometry {
    start_hour: u32,
    end_hour: u32,
    pixels_per_hour: f32,
    snap_minutes: u32,
}

impl Default for TimeGeometry {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 20,
            pixels_per_hour: 120.0,
            snap_minutes: 15,
        }
    }
}

impl TimeGeometry {
    pub fn new(
        start_hour: u32,
        end_hour: u32,
        pixels_per_hour: f32,
        snap_minutes: u32,
    ) -> Result<Self, ConfigError> {
        if end_hour <= start_hour || end_hour > 24 {
            return Err(ConfigError::InvalidWindow {
                start_hour,
                end_hour,
            });
        }
        if pixels_per_hour.is_nan() || pixels_per_hour <= 0.0 {
            return Err(ConfigError::InvalidScale(pixels_per_hour));
        }
        if snap_minutes == 0 || snap_minutes > 60 {
            return Err(ConfigError::InvalidSnap(snap_minutes));
        }
        Ok(Self {
            start_hour,
            end_hour,
            pixels_per_hour,
            snap_minutes,
        })
    }

    pub fn from_settings(settings: &AgendaSettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.start_hour,
            settings.end_hour,
            settings.pixels_per_hour,
            settings.snap_minutes,
        )
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn snap_minutes(&self) -> u32 {
        self.snap_minutes
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.pixels_per_hour / 60.0
    }

    pub fn window_start_minutes(&self) -> u32 {
        self.start_hour * 60
    }

    pub fn window_end_minutes(&self) -> u32 {
        self.end_hour * 60
    }

    /// Total canvas height (1440px for 08:00–20:00 at 120px/hour).
    pub fn canvas_height(&self) -> f32 {
        (self.end_hour - self.start_hour) as f32 * self.pixels_per_hour
    }

    /// Vertical offset of a time. Times before the window give a negative
    /// offset rather than being clamped, so callers can cull them.
    pub fn time_to_offset(&self, time: NaiveTime) -> f32 {
        self.minutes_to_offset(minutes_since_midnight(time))
    }

    pub fn minutes_to_offset(&self, minutes: u32) -> f32 {
        (minutes as f32 - self.window_start_minutes() as f32) * self.pixels_per_minute()
    }

    pub fn duration_to_height(&self, minutes: u32) -> f32 {
        minutes as f32 * self.pixels_per_minute()
    }

    /// Unsnapped minutes since midnight under a canvas offset.
    pub fn offset_to_minutes(&self, offset: f32) -> f32 {
        self.window_start_minutes() as f32 + offset / self.pixels_per_minute()
    }

    /// Time under a canvas offset, snapped to the nearest grid step and
    /// clamped to the visible window.
    pub fn offset_to_time(&self, offset: f32) -> NaiveTime {
        let relative = offset / self.pixels_per_minute();
        let snap = self.snap_minutes as f32;
        let snapped = (relative / snap).round() * snap;

        let absolute = self.window_start_minutes() as f32 + snapped;
        let clamped = absolute.clamp(
            self.window_start_minutes() as f32,
            self.last_representable_minute() as f32,
        ) as u32;
        self.minutes_to_time(clamped)
    }

    /// Snap a raw duration to the grid (`round(raw / step) * step`) with the
    /// 15 minute floor applied afterwards.
    pub fn snap_duration(&self, raw_minutes: f32) -> u32 {
        let snap = self.snap_minutes as f32;
        let snapped = (raw_minutes / snap).round() * snap;
        snapped.max(MIN_DURATION_MINUTES as f32) as u32
    }

    /// Latest start time that keeps a booking of `duration_minutes` inside
    /// the window.
    pub fn latest_start(&self, duration_minutes: u32) -> NaiveTime {
        let latest = self
            .window_end_minutes()
            .saturating_sub(duration_minutes)
            .max(self.window_start_minutes())
            .min(self.last_representable_minute());
        self.minutes_to_time(latest)
    }

    /// Whether a time falls inside `[start_hour, end_hour)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        let minutes = minutes_since_midnight(time);
        minutes >= self.window_start_minutes() && minutes < self.window_end_minutes()
    }

    /// `(hour, offset)` for every hour line on the canvas, both edges included.
    pub fn hour_marks(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        (self.start_hour..=self.end_hour)
            .map(move |hour| (hour, (hour - self.start_hour) as f32 * self.pixels_per_hour))
    }

    fn last_representable_minute(&self) -> u32 {
        if self.window_end_minutes() >= MINUTES_PER_DAY {
            MINUTES_PER_DAY - self.snap_minutes
        } else {
            self.window_end_minutes()
        }
    }

    fn minutes_to_time(&self, minutes: u32) -> NaiveTime {
        time_from_minutes(minutes).unwrap_or(NaiveTime::MIN)
    }
}
