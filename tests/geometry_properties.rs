// Property tests for the time grid and overlap rules

mod fixtures;

use fixtures::*;
use proptest::prelude::*;

use clinic_agenda::models::booking::BookingId;
use clinic_agenda::services::conflict::{self, intervals_overlap, Candidate};
use clinic_agenda::services::geometry::TimeGeometry;
use clinic_agenda::utils::time::{minutes_since_midnight, time_from_minutes};

proptest! {
    /// Every quarter hour of the window maps to an offset and back unchanged
    #[test]
    fn prop_quarter_hours_round_trip(slot in 0u32..48) {
        let geometry = TimeGeometry::default();
        let time = time_from_minutes(8 * 60 + slot * 15).unwrap();
        prop_assert_eq!(geometry.offset_to_time(geometry.time_to_offset(time)), time);
    }

    /// Any pointer offset snaps onto the grid and inside the window
    #[test]
    fn prop_offsets_snap_inside_window(offset in -600.0f32..2400.0) {
        let geometry = TimeGeometry::default();
        let minutes = minutes_since_midnight(geometry.offset_to_time(offset));
        prop_assert_eq!(minutes % 15, 0);
        prop_assert!(minutes >= geometry.window_start_minutes());
        prop_assert!(minutes <= geometry.window_end_minutes());
    }

    /// Snapped times are never more than half a step from the pointer
    #[test]
    fn prop_snap_error_bounded(offset in 0.0f32..1440.0) {
        let geometry = TimeGeometry::default();
        let exact = geometry.offset_to_minutes(offset);
        let snapped = minutes_since_midnight(geometry.offset_to_time(offset)) as f32;
        prop_assert!((snapped - exact).abs() <= 7.5 + 1e-3);
    }

    #[test]
    fn prop_durations_have_floor_and_step(raw in -200.0f32..900.0) {
        let duration = TimeGeometry::default().snap_duration(raw);
        prop_assert!(duration >= 15);
        prop_assert_eq!(duration % 15, 0);
    }

    #[test]
    fn prop_overlap_is_symmetric(
        a in 0u32..1440,
        la in 1u32..240,
        b in 0u32..1440,
        lb in 1u32..240,
    ) {
        prop_assert_eq!(
            intervals_overlap(a, a + la, b, b + lb),
            intervals_overlap(b, b + lb, a, a + la)
        );
    }

    /// Back-to-back appointments share an edge but never overlap
    #[test]
    fn prop_adjacent_never_overlap(a in 0u32..1200, la in 1u32..240, lb in 1u32..240) {
        prop_assert!(!intervals_overlap(a, a + la, a + la, a + la + lb));
    }

    /// A booking checked against the agenda it already sits in is only
    /// in its own way, so excluding itself clears it
    #[test]
    fn prop_booking_never_conflicts_with_itself(slot in 0u32..44, quarters in 1u32..4) {
        let start = time_from_minutes(8 * 60 + slot * 15).unwrap();
        let bookings = vec![booking(7, "Patient", start, quarters * 15, ANA)];
        let candidate = Candidate::from_booking(&bookings[0]);

        prop_assert!(conflict::has_conflict(&candidate, &bookings, None));
        prop_assert!(!conflict::has_conflict(&candidate, &bookings, Some(BookingId(7))));
    }
}
