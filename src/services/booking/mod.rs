//! In-memory booking store.
//!
//! The store is the single owner of the day's bookings. The day view only
//! emits [`BookingIntent`]s; the app applies them here, where conflicts are
//! checked again before anything changes.

use chrono::NaiveTime;
use std::collections::HashSet;

use crate::models::booking::{Booking, BookingId};
use crate::models::resource::{Resource, ResourceId};
use crate::services::conflict;

pub mod crud;
pub mod queries;
pub mod schedule;

pub use queries::DaySummary;

/// A committed gesture from the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingIntent {
    /// Drag and drop: new start time, possibly on another column
    Move {
        id: BookingId,
        start: NaiveTime,
        resource: ResourceId,
    },
    /// Bottom handle drag: new duration, start unchanged
    Resize { id: BookingId, duration_minutes: u32 },
}

impl BookingIntent {
    pub fn booking_id(&self) -> BookingId {
        match self {
            BookingIntent::Move { id, .. } | BookingIntent::Resize { id, .. } => *id,
        }
    }
}

pub struct BookingStore {
    pub(crate) bookings: Vec<Booking>,
    pub(crate) resources: Vec<Resource>,
    pub(crate) next_id: u64,
    pub(crate) default_duration: u32,
    pub(crate) resize_conflict_check: bool,
}

impl BookingStore {
    /// Create an empty store for the given resource columns.
    pub fn new(resources: Vec<Resource>) -> Self {
        Self {
            bookings: Vec::new(),
            resources,
            next_id: 1,
            default_duration: 30,
            resize_conflict_check: true,
        }
    }

    /// Create a store seeded with existing bookings. Ids are kept as given;
    /// new bookings continue after the highest one. Invalid bookings are
    /// dropped and repeated ids are renumbered, both with a warning.
    pub fn with_bookings(resources: Vec<Resource>, bookings: Vec<Booking>) -> Self {
        let mut seeded: Vec<Booking> = Vec::with_capacity(bookings.len());
        for booking in bookings {
            match booking.validate() {
                Ok(()) => seeded.push(booking),
                Err(err) => log::warn!("Dropping seeded booking {}: {}", booking.id, err),
            }
        }

        let mut next_id = seeded
            .iter()
            .map(|b| b.id.0)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let mut seen = HashSet::new();
        for booking in &mut seeded {
            if !seen.insert(booking.id) {
                let fresh = BookingId(next_id);
                next_id = next_id.saturating_add(1);
                log::warn!(
                    "Seeded booking id {} is repeated; {} becomes {}",
                    booking.id,
                    booking.subject,
                    fresh
                );
                booking.id = fresh;
                seen.insert(fresh);
            }
        }

        for (a, b) in conflict::overlapping_pairs(&seeded) {
            log::warn!("Seeded bookings {} and {} overlap on the same resource", a, b);
        }
        for booking in &seeded {
            if !resources.iter().any(|r| r.id == booking.resource) {
                log::warn!(
                    "Booking {} references unknown resource {}; it will not be shown",
                    booking.id,
                    booking.resource
                );
            }
        }

        Self {
            bookings: seeded,
            resources,
            next_id,
            default_duration: 30,
            resize_conflict_check: true,
        }
    }

    pub fn set_default_duration(&mut self, minutes: u32) {
        self.default_duration = minutes;
    }

    /// When disabled, resizes commit without an overlap check.
    pub fn set_resize_conflict_check(&mut self, enabled: bool) {
        self.resize_conflict_check = enabled;
    }

    pub fn resize_conflict_check(&self) -> bool {
        self.resize_conflict_check
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::booking::{BookingCategory, BookingStatus, PaymentStatus};
    use crate::models::resource::default_roster;

    pub const ANA: ResourceId = ResourceId(1);
    pub const CARLOS: ResourceId = ResourceId(2);
    pub const ROOM: ResourceId = ResourceId(3);

    pub fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    pub fn booking(id: u64, start: NaiveTime, duration: u32, resource: ResourceId) -> Booking {
        Booking {
            id: BookingId(id),
            subject: format!("Patient {}", id),
            procedure: "Consultation".to_string(),
            start,
            duration_minutes: duration,
            status: BookingStatus::Confirmed,
            payment: PaymentStatus::Pending,
            category: BookingCategory::Consultation,
            resource,
            notes: None,
        }
    }

    pub fn store_with(bookings: Vec<Booking>) -> BookingStore {
        BookingStore::with_bookings(default_roster(), bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_with_bookings_continues_ids() {
        let store =
            store_with(vec![booking(4, t(9, 0), 30, ANA), booking(9, t(10, 0), 30, ANA)]);
        assert_eq!(store.next_id, 10);
        assert_eq!(store.bookings().len(), 2);
    }

    #[test]
    fn test_with_bookings_renumbers_repeated_ids() {
        let store = store_with(vec![
            booking(1, t(9, 0), 30, ANA),
            booking(1, t(9, 0), 30, CARLOS),
            booking(2, t(11, 0), 30, ANA),
        ]);

        let ids: Vec<BookingId> = store.bookings().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BookingId(1), BookingId(3), BookingId(2)]);
        assert_eq!(store.get(BookingId(3)).map(|b| b.resource), Some(CARLOS));
        assert_eq!(store.next_id, 4);
    }

    #[test]
    fn test_with_bookings_drops_invalid_entries() {
        let store = store_with(vec![
            booking(1, t(9, 0), u32::MAX, ANA),
            booking(2, t(10, 0), 30, ANA),
        ]);
        assert_eq!(store.bookings().len(), 1);
        assert_eq!(store.bookings()[0].id, BookingId(2));
        assert_eq!(store.next_id, 3);
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let store = store_with(Vec::new());
        assert_eq!(store.next_id, 1);
    }

    #[test]
    fn test_resource_lookup() {
        let store = store_with(Vec::new());
        assert_eq!(store.resource(ROOM).map(|r| r.bookable), Some(false));
        assert!(store.resource(ResourceId(42)).is_none());
    }

    #[test]
    fn test_intent_booking_id() {
        let intent = BookingIntent::Resize {
            id: BookingId(3),
            duration_minutes: 45,
        };
        assert_eq!(intent.booking_id(), BookingId(3));
    }
}
