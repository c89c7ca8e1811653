// Booking Resize
//
// Bookings are resized by dragging the grip on their bottom edge. The start
// time never changes; only the duration follows the pointer.

use chrono::NaiveTime;
use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::models::booking::{Booking, BookingId, MIN_DURATION_MINUTES};
use crate::models::resource::ResourceId;
use crate::services::booking::BookingIntent;
use crate::services::conflict::Candidate;
use crate::services::geometry::TimeGeometry;
use crate::utils::time::minutes_since_midnight;

/// Height of the grip hit area on large cards
pub const HANDLE_ZONE: f32 = 10.0;
/// Visual size of the grip
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

/// Exclusive hold on a booking's bottom edge for the length of one resize
/// gesture.
///
/// Not `Clone`. A resize ends either through [`ResizeGrip::close`] or by
/// dropping the grip on cancel.
#[derive(Debug, PartialEq)]
pub struct ResizeGrip {
    booking_id: BookingId,
    start: NaiveTime,
    resource: ResourceId,
    original_duration: u32,
    /// Pointer y (canvas offset) when the grip was taken
    anchor_y: f32,
    current_duration: u32,
    conflict: bool,
}

impl ResizeGrip {
    pub(crate) fn acquire(booking: &Booking, anchor_y: f32) -> Self {
        log::debug!("Resize grip acquired for booking {}", booking.id);
        Self {
            booking_id: booking.id,
            start: booking.start,
            resource: booking.resource,
            original_duration: booking.duration_minutes,
            anchor_y,
            current_duration: booking.duration_minutes,
            conflict: false,
        }
    }

    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    pub fn original_duration(&self) -> u32 {
        self.original_duration
    }

    pub fn current_duration(&self) -> u32 {
        self.current_duration
    }

    pub fn conflict(&self) -> bool {
        self.conflict
    }

    pub(crate) fn set_conflict(&mut self, conflict: bool) {
        self.conflict = conflict;
    }

    /// Follow the pointer. Returns the snapped preview duration, which never
    /// reaches past the end of the visible window unless the booking already
    /// did.
    pub fn track(&mut self, pointer_y: f32, geometry: &TimeGeometry) -> u32 {
        let delta_minutes = (pointer_y - self.anchor_y) / geometry.pixels_per_minute();
        let raw = self.original_duration as f32 + delta_minutes;
        self.current_duration = geometry.snap_duration(raw).min(self.longest(geometry));
        self.current_duration
    }

    fn longest(&self, geometry: &TimeGeometry) -> u32 {
        let room = geometry
            .window_end_minutes()
            .saturating_sub(minutes_since_midnight(self.start));
        room.max(self.original_duration).max(MIN_DURATION_MINUTES)
    }

    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.start, self.current_duration, self.resource)
    }

    /// Release the grip and turn it into the intent it stands for.
    pub fn close(self) -> BookingIntent {
        log::debug!(
            "Resize grip released for booking {} at {} min",
            self.booking_id,
            self.current_duration
        );
        BookingIntent::Resize {
            id: self.booking_id,
            duration_minutes: self.current_duration,
        }
    }
}

/// Hit area of the bottom grip of a booking card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleRects {
    pub bottom: Rect,
}

impl HandleRects {
    pub fn for_booking(card_rect: Rect) -> Self {
        // Small cards keep most of their body draggable
        let zone_height = (card_rect.height() / 3.0).min(HANDLE_ZONE);
        Self {
            bottom: Rect::from_min_size(
                Pos2::new(card_rect.left(), card_rect.bottom() - zone_height),
                Vec2::new(card_rect.width(), zone_height),
            ),
        }
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.bottom.contains(pos)
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        CursorIcon::ResizeVertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::NewBooking;

    fn sample(duration: u32) -> Booking {
        sample_at(9, 0, duration)
    }

    fn sample_at(hour: u32, minute: u32, duration: u32) -> Booking {
        let start = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        NewBooking::new("Mariana Costa", "Botox", start, ResourceId(1))
            .duration(duration)
            .into_booking(BookingId(7), 30)
            .unwrap()
    }

    #[test]
    fn test_track_snaps_to_quarter_hours() {
        let geometry = TimeGeometry::default();
        let mut grip = ResizeGrip::acquire(&sample(30), 100.0);

        // +7 minutes at 2px/min: 37 rounds to 30
        assert_eq!(grip.track(114.0, &geometry), 30);
        // +8 minutes: 38 rounds to 45
        assert_eq!(grip.track(116.0, &geometry), 45);
    }

    #[test]
    fn test_track_clamps_to_minimum() {
        let geometry = TimeGeometry::default();
        let mut grip = ResizeGrip::acquire(&sample(30), 100.0);
        assert_eq!(grip.track(-500.0, &geometry), 15);
    }

    #[test]
    fn test_track_stops_at_window_end() {
        let geometry = TimeGeometry::default();
        let mut grip = ResizeGrip::acquire(&sample_at(19, 30, 15), 100.0);

        assert_eq!(grip.track(130.0, &geometry), 30);
        assert_eq!(grip.track(100_000.0, &geometry), 30);
        assert_eq!(grip.candidate().end_minutes(), geometry.window_end_minutes());
    }

    #[test]
    fn test_track_keeps_length_already_past_window() {
        let geometry = TimeGeometry::default();
        let mut grip = ResizeGrip::acquire(&sample_at(19, 30, 60), 0.0);

        assert_eq!(grip.track(0.0, &geometry), 60);
        assert_eq!(grip.track(600.0, &geometry), 60);
        assert_eq!(grip.track(-60.0, &geometry), 30);
    }

    #[test]
    fn test_close_yields_resize_intent() {
        let geometry = TimeGeometry::default();
        let mut grip = ResizeGrip::acquire(&sample(60), 0.0);
        grip.track(60.0, &geometry);

        assert_eq!(
            grip.close(),
            BookingIntent::Resize {
                id: BookingId(7),
                duration_minutes: 90,
            }
        );
    }

    #[test]
    fn test_handle_hit_test() {
        let rect = Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(200.0, 120.0));
        let handles = HandleRects::for_booking(rect);

        assert!(handles.hit_test(Pos2::new(200.0, 215.0)));
        assert!(!handles.hit_test(Pos2::new(200.0, 150.0)));
        assert!(!handles.hit_test(Pos2::new(200.0, 100.0)));
    }

    #[test]
    fn test_handle_shrinks_on_small_cards() {
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 24.0));
        let handles = HandleRects::for_booking(rect);
        assert_eq!(handles.bottom.height(), 8.0);
        assert_eq!(handles.cursor_icon(), CursorIcon::ResizeVertical);
    }
}
