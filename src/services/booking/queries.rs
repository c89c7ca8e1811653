use chrono::NaiveTime;

use super::BookingStore;
use crate::models::booking::{Booking, BookingStatus, PaymentStatus};
use crate::models::resource::ResourceId;
use crate::services::conflict::{self, Candidate};
use crate::services::geometry::TimeGeometry;
use crate::utils::time::time_from_minutes;

/// Counters shown in the agenda header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub checked_in: usize,
    pub completed: usize,
    pub canceled: usize,
    pub paid: usize,
}

impl BookingStore {
    /// Bookings on one resource column, sorted by start time.
    pub fn for_resource(&self, resource: ResourceId) -> Vec<&Booking> {
        let mut bookings: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.resource == resource)
            .collect();
        bookings.sort_by_key(|b| (b.start, b.id));
        bookings
    }

    /// Earliest grid-aligned start inside the visible window where a booking
    /// of `duration_minutes` fits on `resource`.
    pub fn first_free_slot(
        &self,
        resource: ResourceId,
        duration_minutes: u32,
        geometry: &TimeGeometry,
    ) -> Option<NaiveTime> {
        let step = geometry.snap_minutes().max(1) as usize;
        let last = geometry
            .window_end_minutes()
            .checked_sub(duration_minutes)?;

        (geometry.window_start_minutes()..=last)
            .step_by(step)
            .filter_map(time_from_minutes)
            .find(|start| {
                let candidate = Candidate::new(*start, duration_minutes, resource);
                !conflict::has_conflict(&candidate, &self.bookings, None)
            })
    }

    pub fn summary(&self) -> DaySummary {
        self.bookings
            .iter()
            .fold(DaySummary::default(), |mut summary, booking| {
                summary.total += 1;
                match booking.status {
                    BookingStatus::Confirmed => summary.confirmed += 1,
                    BookingStatus::Pending => summary.pending += 1,
                    BookingStatus::CheckedIn => summary.checked_in += 1,
                    BookingStatus::Completed => summary.completed += 1,
                    BookingStatus::Canceled => summary.canceled += 1,
                }
                if booking.payment == PaymentStatus::Paid {
                    summary.paid += 1;
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::models::booking::BookingId;

    #[test]
    fn test_for_resource_sorted() {
        let store = store_with(vec![
            booking(1, t(11, 0), 30, ANA),
            booking(2, t(9, 0), 30, CARLOS),
            booking(3, t(9, 0), 30, ANA),
        ]);
        let ids: Vec<BookingId> = store.for_resource(ANA).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BookingId(3), BookingId(1)]);
        assert!(store.for_resource(ROOM).is_empty());
    }

    #[test]
    fn test_first_free_slot_skips_taken_time() {
        let geometry = TimeGeometry::default();
        let store = store_with(vec![
            booking(1, t(8, 0), 60, ANA),
            booking(2, t(9, 15), 30, ANA),
        ]);

        assert_eq!(store.first_free_slot(ANA, 15, &geometry), Some(t(9, 0)));
        assert_eq!(store.first_free_slot(ANA, 30, &geometry), Some(t(9, 45)));
        assert_eq!(store.first_free_slot(CARLOS, 30, &geometry), Some(t(8, 0)));
    }

    #[test]
    fn test_first_free_slot_full_day() {
        let geometry = TimeGeometry::default();
        let store = store_with(vec![booking(1, t(8, 0), 12 * 60, ANA)]);
        assert_eq!(store.first_free_slot(ANA, 15, &geometry), None);
        assert_eq!(store.first_free_slot(CARLOS, 13 * 60, &geometry), None);
    }

    #[test]
    fn test_summary_counts() {
        let mut store = store_with(vec![
            booking(1, t(9, 0), 30, ANA),
            booking(2, t(10, 0), 30, ANA),
            booking(3, t(11, 0), 30, CARLOS),
        ]);
        store.check_in(BookingId(1)).unwrap();
        store.mark_paid(BookingId(1)).unwrap();
        store.cancel(BookingId(3)).unwrap();

        let summary = store.summary();
        assert_eq!(
            summary,
            DaySummary {
                total: 3,
                confirmed: 1,
                pending: 0,
                checked_in: 1,
                completed: 0,
                canceled: 1,
                paid: 1,
            }
        );
    }
}
