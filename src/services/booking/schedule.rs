use chrono::NaiveTime;

use super::{BookingIntent, BookingStore};
use crate::models::booking::{Booking, BookingId, MIN_DURATION_MINUTES};
use crate::models::resource::ResourceId;
use crate::services::conflict::{self, Candidate};
use crate::services::error::{AgendaError, ConflictError};

impl BookingStore {
    /// Move a booking to a new start time and column. Rejected moves leave
    /// the store untouched.
    pub fn move_booking(
        &mut self,
        id: BookingId,
        start: NaiveTime,
        resource: ResourceId,
    ) -> Result<Booking, AgendaError> {
        let current = self.get(id).ok_or(AgendaError::NotFound(id))?;
        if current.is_canceled() {
            return Err(AgendaError::Canceled(id));
        }

        let target = self
            .resource(resource)
            .ok_or(AgendaError::UnknownResource(resource))?;
        if !target.bookable {
            return Err(ConflictError::NotBookable { resource }.into());
        }

        let mut moved = current.clone();
        moved.start = start;
        moved.resource = resource;
        moved.validate().map_err(AgendaError::Validation)?;

        let candidate = Candidate::from_booking(&moved);
        conflict::ensure_free(&candidate, &self.bookings, Some(id))?;

        let booking = self.get_mut(id)?;
        log::info!(
            "Moved booking {} from {} on {} to {} on {}",
            id,
            booking.time_range_label(),
            booking.resource,
            start.format("%H:%M"),
            resource
        );
        booking.start = start;
        booking.resource = resource;
        Ok(booking.clone())
    }

    /// Change a booking's duration. Durations under 15 minutes are raised to
    /// 15. The overlap check only runs when the store is configured for it.
    pub fn resize(
        &mut self,
        id: BookingId,
        duration_minutes: u32,
    ) -> Result<Booking, AgendaError> {
        let current = self.get(id).ok_or(AgendaError::NotFound(id))?;
        if current.is_canceled() {
            return Err(AgendaError::Canceled(id));
        }

        let duration_minutes = duration_minutes.max(MIN_DURATION_MINUTES);
        let mut resized = current.clone();
        resized.duration_minutes = duration_minutes;
        resized.validate().map_err(AgendaError::Validation)?;

        if self.resize_conflict_check {
            let candidate = Candidate::from_booking(&resized);
            conflict::ensure_free(&candidate, &self.bookings, Some(id))?;
        }

        let booking = self.get_mut(id)?;
        log::info!(
            "Resized booking {} from {} to {} min",
            id,
            booking.duration_minutes,
            duration_minutes
        );
        booking.duration_minutes = duration_minutes;
        Ok(booking.clone())
    }

    /// Apply an intent emitted by the day grid.
    pub fn apply(&mut self, intent: &BookingIntent) -> Result<Booking, AgendaError> {
        match *intent {
            BookingIntent::Move {
                id,
                start,
                resource,
            } => self.move_booking(id, start, resource),
            BookingIntent::Resize {
                id,
                duration_minutes,
            } => self.resize(id, duration_minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::BookingIntent;
    use crate::models::booking::BookingId;
    use crate::services::error::{AgendaError, ConflictError};

    #[test]
    fn test_move_within_column() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        let moved = store.move_booking(BookingId(1), t(9, 45), ANA).unwrap();
        assert_eq!(moved.start, t(9, 45));
        assert_eq!(store.get(BookingId(1)).unwrap().start, t(9, 45));
    }

    #[test]
    fn test_move_overlapping_itself_is_allowed() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        assert!(store.move_booking(BookingId(1), t(9, 15), ANA).is_ok());
    }

    #[test]
    fn test_move_rejected_on_conflict() {
        let mut store =
            store_with(vec![booking(1, t(9, 0), 60, ANA), booking(2, t(11, 0), 30, ANA)]);
        let result = store.move_booking(BookingId(2), t(9, 30), ANA);

        assert!(matches!(
            result,
            Err(AgendaError::Conflict(ConflictError::Overlap { .. }))
        ));
        assert_eq!(store.get(BookingId(1)).unwrap().start, t(9, 0));
        assert_eq!(store.get(BookingId(2)).unwrap().start, t(11, 0));
    }

    #[test]
    fn test_move_across_columns_reassigns_resource() {
        let mut store =
            store_with(vec![booking(1, t(9, 0), 60, ANA), booking(2, t(9, 0), 60, CARLOS)]);
        // Same time on Carlos is taken
        assert!(store.move_booking(BookingId(1), t(9, 0), CARLOS).is_err());

        let moved = store.move_booking(BookingId(1), t(10, 0), CARLOS).unwrap();
        assert_eq!(moved.resource, CARLOS);
    }

    #[test]
    fn test_move_to_inert_column_rejected() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        assert_eq!(
            store.move_booking(BookingId(1), t(9, 0), ROOM),
            Err(AgendaError::Conflict(ConflictError::NotBookable { resource: ROOM }))
        );
    }

    #[test]
    fn test_move_canceled_rejected() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        store.cancel(BookingId(1)).unwrap();
        assert_eq!(
            store.move_booking(BookingId(1), t(10, 0), ANA),
            Err(AgendaError::Canceled(BookingId(1)))
        );
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        let resized = store.resize(BookingId(1), 5).unwrap();
        assert_eq!(resized.duration_minutes, 15);
    }

    #[test]
    fn test_resize_conflict_checked_by_default() {
        let mut store =
            store_with(vec![booking(1, t(9, 0), 30, ANA), booking(2, t(9, 30), 30, ANA)]);
        assert!(store.resize(BookingId(1), 45).is_err());
        assert_eq!(store.get(BookingId(1)).unwrap().duration_minutes, 30);
    }

    #[test]
    fn test_resize_unchecked_when_disabled() {
        let mut store =
            store_with(vec![booking(1, t(9, 0), 30, ANA), booking(2, t(9, 30), 30, ANA)]);
        store.set_resize_conflict_check(false);
        assert_eq!(store.resize(BookingId(1), 45).unwrap().duration_minutes, 45);
    }

    #[test]
    fn test_changes_past_midnight_rejected() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        store.set_resize_conflict_check(false);

        assert!(matches!(
            store.resize(BookingId(1), u32::MAX),
            Err(AgendaError::Validation(_))
        ));
        assert!(matches!(
            store.move_booking(BookingId(1), t(23, 30), ANA),
            Err(AgendaError::Validation(_))
        ));
        let booking = store.get(BookingId(1)).unwrap();
        assert_eq!((booking.start, booking.duration_minutes), (t(9, 0), 60));
    }

    #[test]
    fn test_apply_dispatches_intents() {
        let mut store = store_with(vec![booking(1, t(9, 0), 60, ANA)]);
        store
            .apply(&BookingIntent::Move {
                id: BookingId(1),
                start: t(13, 0),
                resource: CARLOS,
            })
            .unwrap();
        store
            .apply(&BookingIntent::Resize {
                id: BookingId(1),
                duration_minutes: 90,
            })
            .unwrap();

        let booking = store.get(BookingId(1)).unwrap();
        assert_eq!(
            (booking.start, booking.resource, booking.duration_minutes),
            (t(13, 0), CARLOS, 90)
        );
    }

    #[test]
    fn test_apply_unknown_booking() {
        let mut store = store_with(Vec::new());
        let result = store.apply(&BookingIntent::Resize {
            id: BookingId(5),
            duration_minutes: 30,
        });
        assert_eq!(result, Err(AgendaError::NotFound(BookingId(5))));
    }
}
