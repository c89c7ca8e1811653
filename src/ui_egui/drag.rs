use chrono::NaiveTime;

use crate::models::booking::{Booking, BookingId};
use crate::models::resource::ResourceId;
use crate::services::conflict::Candidate;

/// Live state of a booking being dragged across the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub booking_id: BookingId,
    pub original_start: NaiveTime,
    pub original_resource: ResourceId,
    pub duration_minutes: u32,
    /// Pointer distance below the card top when the drag started
    pub grab_offset: f32,
    pub hovered_start: NaiveTime,
    pub hovered_resource: ResourceId,
    /// False while the pointer is over a column that accepts no bookings
    pub droppable: bool,
    /// False while the pointer is outside the canvas; a drop there is abandoned
    pub over_grid: bool,
    pub conflict: bool,
}

impl DragContext {
    pub fn from_booking(booking: &Booking, grab_offset: f32) -> Self {
        Self {
            booking_id: booking.id,
            original_start: booking.start,
            original_resource: booking.resource,
            duration_minutes: booking.duration_minutes,
            grab_offset,
            hovered_start: booking.start,
            hovered_resource: booking.resource,
            droppable: true,
            over_grid: true,
            conflict: false,
        }
    }

    pub fn target(&self) -> (NaiveTime, ResourceId) {
        (self.hovered_start, self.hovered_resource)
    }

    pub fn has_moved(&self) -> bool {
        self.hovered_start != self.original_start || self.hovered_resource != self.original_resource
    }

    /// Placement the booking would take if dropped now.
    pub fn candidate(&self) -> Candidate {
        Candidate::new(self.hovered_start, self.duration_minutes, self.hovered_resource)
    }

    /// Whether the preview should be drawn as a valid landing spot.
    pub fn is_valid(&self) -> bool {
        self.over_grid && self.droppable && !self.conflict
    }
}
