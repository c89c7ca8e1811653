//! Overlap detection for bookings sharing a resource.
//!
//! Intervals are half-open `[start, start + duration)`, so a booking ending
//! at 09:30 and another starting at 09:30 do not conflict. Canceled bookings
//! free their slot and are never reported.

use chrono::NaiveTime;

use crate::models::booking::{Booking, BookingId};
use crate::models::resource::ResourceId;
use crate::services::error::ConflictError;
use crate::utils::time::minutes_since_midnight;

/// A proposed placement that has not been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub resource: ResourceId,
}

impl Candidate {
    pub fn new(start: NaiveTime, duration_minutes: u32, resource: ResourceId) -> Self {
        Self {
            start,
            duration_minutes,
            resource,
        }
    }

    pub fn from_booking(booking: &Booking) -> Self {
        Self::new(booking.start, booking.duration_minutes, booking.resource)
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.start)
    }

    pub fn end_minutes(&self) -> u32 {
        self.start_minutes().saturating_add(self.duration_minutes)
    }
}

/// Half-open interval intersection.
pub fn intervals_overlap(start_a: u32, end_a: u32, start_b: u32, end_b: u32) -> bool {
    start_a < end_b && end_a > start_b
}

/// Whether two bookings collide: same resource, neither canceled, and
/// intersecting intervals.
pub fn overlaps(a: &Booking, b: &Booking) -> bool {
    a.resource == b.resource
        && !a.is_canceled()
        && !b.is_canceled()
        && intervals_overlap(
            a.start_minutes(),
            a.end_minutes(),
            b.start_minutes(),
            b.end_minutes(),
        )
}

/// Bookings that would collide with `candidate`, skipping `exclude`.
pub fn conflicting_bookings<'a>(
    candidate: &'a Candidate,
    bookings: &'a [Booking],
    exclude: Option<BookingId>,
) -> impl Iterator<Item = &'a Booking> + 'a {
    bookings.iter().filter(move |booking| {
        Some(booking.id) != exclude
            && booking.resource == candidate.resource
            && !booking.is_canceled()
            && intervals_overlap(
                candidate.start_minutes(),
                candidate.end_minutes(),
                booking.start_minutes(),
                booking.end_minutes(),
            )
    })
}

pub fn has_conflict(
    candidate: &Candidate,
    bookings: &[Booking],
    exclude: Option<BookingId>,
) -> bool {
    conflicting_bookings(candidate, bookings, exclude)
        .next()
        .is_some()
}

pub fn find_conflicts<'a>(
    candidate: &'a Candidate,
    bookings: &'a [Booking],
    exclude: Option<BookingId>,
) -> Vec<&'a Booking> {
    conflicting_bookings(candidate, bookings, exclude).collect()
}

/// Commit-time check returning the conflicting ids in the error.
pub fn ensure_free(
    candidate: &Candidate,
    bookings: &[Booking],
    exclude: Option<BookingId>,
) -> Result<(), ConflictError> {
    let conflicting: Vec<BookingId> = conflicting_bookings(candidate, bookings, exclude)
        .map(|booking| booking.id)
        .collect();

    if conflicting.is_empty() {
        Ok(())
    } else {
        Err(ConflictError::Overlap {
            resource: candidate.resource,
            start: candidate.start,
            duration_minutes: candidate.duration_minutes,
            conflicting,
        })
    }
}

/// Every pair of colliding bookings, each pair reported once.
pub fn overlapping_pairs(bookings: &[Booking]) -> Vec<(BookingId, BookingId)> {
    let mut pairs = Vec::new();
    for (index, a) in bookings.iter().enumerate() {
        for b in &bookings[index + 1..] {
            if overlaps(a, b) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}
