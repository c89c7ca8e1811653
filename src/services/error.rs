//! Domain error types for the agenda.
//!
//! File and settings I/O keeps using `anyhow` at the boundary; these enums
//! are the errors callers are expected to match on.

use chrono::NaiveTime;

use crate::models::booking::BookingId;
use crate::models::resource::ResourceId;
use crate::utils::time::{format_minutes, minutes_since_midnight};

/// A scheduling change that cannot be applied to the agenda.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error(
        "resource {resource} is already booked during {}",
        overlap_range(.start, .duration_minutes)
    )]
    Overlap {
        resource: ResourceId,
        start: NaiveTime,
        duration_minutes: u32,
        conflicting: Vec<BookingId>,
    },

    #[error("resource {resource} does not accept bookings")]
    NotBookable { resource: ResourceId },
}

fn overlap_range(start: &NaiveTime, duration_minutes: &u32) -> String {
    let start = minutes_since_midnight(*start);
    format!(
        "{}–{}",
        format_minutes(start),
        format_minutes(start + duration_minutes)
    )
}

/// Errors raised by booking store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgendaError {
    #[error("booking {0} not found")]
    NotFound(BookingId),

    #[error("booking {0} is canceled and cannot be rescheduled")]
    Canceled(BookingId),

    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),

    #[error("invalid booking: {0}")]
    Validation(String),

    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Invalid agenda settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("day window must end after it starts and by 24:00 (got {start_hour}:00-{end_hour}:00)")]
    InvalidWindow { start_hour: u32, end_hour: u32 },

    #[error("pixels per hour must be positive (got {0})")]
    InvalidScale(f32),

    #[error("snap step must be between 1 and 60 minutes (got {0})")]
    InvalidSnap(u32),

    #[error("default duration must be at least 15 minutes (got {0})")]
    InvalidDefaultDuration(u32),

    #[error("at least one resource column is required")]
    NoResources,

    #[error("{0}")]
    InvalidResource(String),

    #[error("duplicate resource id {0}")]
    DuplicateResource(ResourceId),
}
