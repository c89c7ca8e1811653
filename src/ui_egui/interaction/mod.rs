//! Gesture state for the day grid.
//!
//! The controller turns canvas-relative pointer positions (y offset from the
//! top of the canvas, column index) into previews and [`BookingIntent`]s.
//! It never mutates bookings itself; conflicts are checked here for the
//! preview and again on commit.

use chrono::NaiveTime;
use egui::Pos2;

use crate::models::booking::{Booking, BookingId};
use crate::models::resource::{Resource, ResourceId};
use crate::models::settings::AgendaSettings;
use crate::services::booking::BookingIntent;
use crate::services::conflict::{self, Candidate};
use crate::services::error::{ConfigError, ConflictError};
use crate::services::geometry::TimeGeometry;
use crate::ui_egui::drag::DragContext;
use crate::ui_egui::resize::ResizeGrip;

/// Ghost slot shown under the pointer on empty canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPreview {
    pub start: NaiveTime,
    pub resource: ResourceId,
    pub duration_minutes: u32,
}

#[derive(Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Hovering(SlotPreview),
    Dragging(DragContext),
    Resizing(ResizeGrip),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuState {
    pub booking_id: BookingId,
    /// Screen position of the right-click
    pub anchor: Pos2,
}

pub struct InteractionController {
    geometry: TimeGeometry,
    columns: Vec<Resource>,
    state: GestureState,
    context_menu: Option<ContextMenuState>,
    resize_conflict_check: bool,
    default_duration: u32,
}

impl InteractionController {
    pub fn new(geometry: TimeGeometry, columns: Vec<Resource>) -> Self {
        Self {
            geometry,
            columns,
            state: GestureState::Idle,
            context_menu: None,
            resize_conflict_check: true,
            default_duration: 30,
        }
    }

    pub fn from_settings(settings: &AgendaSettings) -> Result<Self, ConfigError> {
        let mut controller = Self::new(
            TimeGeometry::from_settings(settings)?,
            settings.resources.clone(),
        );
        controller.resize_conflict_check = settings.resize_conflict_check;
        controller.default_duration = settings.default_duration_minutes;
        Ok(controller)
    }

    pub fn set_resize_conflict_check(&mut self, enabled: bool) {
        self.resize_conflict_check = enabled;
    }

    pub fn set_default_duration(&mut self, minutes: u32) {
        self.default_duration = minutes;
    }

    pub fn geometry(&self) -> &TimeGeometry {
        &self.geometry
    }

    pub fn columns(&self) -> &[Resource] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Resource> {
        self.columns.get(index)
    }

    pub fn column_index(&self, resource: ResourceId) -> Option<usize> {
        self.columns.iter().position(|r| r.id == resource)
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn context_menu(&self) -> Option<&ContextMenuState> {
        self.context_menu.as_ref()
    }

    pub fn hover_preview(&self) -> Option<&SlotPreview> {
        match &self.state {
            GestureState::Hovering(preview) => Some(preview),
            _ => None,
        }
    }

    pub fn drag(&self) -> Option<&DragContext> {
        match &self.state {
            GestureState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn resize_grip(&self) -> Option<&ResizeGrip> {
        match &self.state {
            GestureState::Resizing(grip) => Some(grip),
            _ => None,
        }
    }

    /// True while a drag or resize owns the pointer.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            GestureState::Dragging(_) | GestureState::Resizing(_)
        )
    }

    /// Booking drawn under a canvas position, if any. Active bookings win
    /// over canceled ones sharing the same spot.
    pub fn booking_at<'a>(
        &self,
        offset_y: f32,
        column: usize,
        bookings: &'a [Booking],
    ) -> Option<&'a Booking> {
        let resource = self.column(column)?.id;
        let minutes = self.geometry.offset_to_minutes(offset_y);
        let mut hits = bookings.iter().filter(|b| {
            b.resource == resource
                && minutes >= b.start_minutes() as f32
                && minutes < b.end_minutes() as f32
        });
        let first = hits.next()?;
        if first.is_canceled() {
            Some(hits.find(|b| !b.is_canceled()).unwrap_or(first))
        } else {
            Some(first)
        }
    }

    /// Pointer moved over the canvas with no button held.
    pub fn hover(&mut self, offset_y: f32, column: usize, bookings: &[Booking]) {
        if self.is_busy() {
            return;
        }
        let preview = self.preview_at(offset_y, column, bookings);
        self.state = match preview {
            Some(preview) => GestureState::Hovering(preview),
            None => GestureState::Idle,
        };
    }

    fn preview_at(
        &self,
        offset_y: f32,
        column: usize,
        bookings: &[Booking],
    ) -> Option<SlotPreview> {
        if self.context_menu.is_some() {
            return None;
        }
        let resource = self.column(column).filter(|r| r.bookable)?;
        if self.booking_at(offset_y, column, bookings).is_some() {
            return None;
        }

        let start = self
            .geometry
            .offset_to_time(offset_y)
            .min(self.geometry.latest_start(self.default_duration));
        let preview = SlotPreview {
            start,
            resource: resource.id,
            duration_minutes: self.default_duration,
        };
        let candidate = Candidate::new(preview.start, preview.duration_minutes, preview.resource);
        if conflict::has_conflict(&candidate, bookings, None) {
            return None;
        }
        Some(preview)
    }

    /// Pointer left the canvas. Only the hover ghost is cleared; a drag or
    /// resize keeps tracking the global pointer.
    pub fn pointer_left_canvas(&mut self) {
        if matches!(self.state, GestureState::Hovering(_)) {
            self.state = GestureState::Idle;
        }
    }

    /// Primary click on empty canvas. Returns the slot to pre-fill the
    /// creation dialog with. A click while a context menu is open only
    /// closes the menu.
    pub fn click(&mut self) -> Option<SlotPreview> {
        if self.context_menu.take().is_some() {
            self.state = GestureState::Idle;
            return None;
        }
        match std::mem::take(&mut self.state) {
            GestureState::Hovering(preview) => {
                log::debug!(
                    "Create requested at {} on {}",
                    preview.start.format("%H:%M"),
                    preview.resource
                );
                Some(preview)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Start dragging a booking. `pointer_offset_y` is the canvas offset
    /// where the press happened. Returns false when the booking cannot be
    /// dragged.
    pub fn begin_drag(&mut self, booking: &Booking, pointer_offset_y: f32) -> bool {
        if !booking.is_interactive() || self.is_busy() {
            return false;
        }
        let grab_offset = pointer_offset_y - self.geometry.time_to_offset(booking.start);
        self.context_menu = None;
        self.state = GestureState::Dragging(DragContext::from_booking(booking, grab_offset));
        log::debug!("Drag started for booking {}", booking.id);
        true
    }

    /// Track the dragged booking. `inside` is false while the pointer is
    /// off the canvas; the preview then stops following and a release
    /// there abandons the drag.
    pub fn drag_to(&mut self, offset_y: f32, column: usize, inside: bool, bookings: &[Booking]) {
        let geometry = self.geometry;
        let target = self.columns.get(column).map(|r| (r.id, r.bookable));
        let GestureState::Dragging(drag) = &mut self.state else {
            return;
        };

        drag.over_grid = inside;
        if !inside {
            drag.conflict = false;
            return;
        }

        drag.hovered_start = geometry
            .offset_to_time(offset_y - drag.grab_offset)
            .min(geometry.latest_start(drag.duration_minutes));
        if let Some((resource, bookable)) = target {
            drag.hovered_resource = resource;
            drag.droppable = bookable;
        }
        drag.conflict = drag.droppable
            && conflict::has_conflict(&drag.candidate(), bookings, Some(drag.booking_id));
    }

    /// Drop the dragged booking. `Ok(None)` when nothing changed, when the
    /// pointer was off the grid, or when no drag was active.
    pub fn drop(&mut self, bookings: &[Booking]) -> Result<Option<BookingIntent>, ConflictError> {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging(drag) => Self::finish_drag(drag, bookings),
            other => {
                self.state = other;
                Ok(None)
            }
        }
    }

    fn finish_drag(
        drag: DragContext,
        bookings: &[Booking],
    ) -> Result<Option<BookingIntent>, ConflictError> {
        if !drag.over_grid {
            log::debug!(
                "Drop of booking {} outside the grid, returning it to {}",
                drag.booking_id,
                drag.original_start.format("%H:%M")
            );
            return Ok(None);
        }
        if !drag.droppable {
            log::warn!(
                "Rejected drop of booking {} on {}: column accepts no bookings",
                drag.booking_id,
                drag.hovered_resource
            );
            return Err(ConflictError::NotBookable {
                resource: drag.hovered_resource,
            });
        }
        if !drag.has_moved() {
            return Ok(None);
        }

        let candidate = drag.candidate();
        if let Err(err) = conflict::ensure_free(&candidate, bookings, Some(drag.booking_id)) {
            log::warn!("Rejected drop of booking {}: {}", drag.booking_id, err);
            return Err(err);
        }

        let (start, resource) = drag.target();
        Ok(Some(BookingIntent::Move {
            id: drag.booking_id,
            start,
            resource,
        }))
    }

    /// Press on a booking's bottom grip.
    pub fn begin_resize(&mut self, booking: &Booking, pointer_y: f32) -> bool {
        if !booking.is_interactive() || self.is_busy() {
            return false;
        }
        self.context_menu = None;
        self.state = GestureState::Resizing(ResizeGrip::acquire(booking, pointer_y));
        true
    }

    pub fn resize_to(&mut self, pointer_y: f32, bookings: &[Booking]) {
        let geometry = self.geometry;
        let check = self.resize_conflict_check;
        let GestureState::Resizing(grip) = &mut self.state else {
            return;
        };

        grip.track(pointer_y, &geometry);
        let conflict = check
            && conflict::has_conflict(&grip.candidate(), bookings, Some(grip.booking_id()));
        grip.set_conflict(conflict);
    }

    /// Primary button released anywhere, inside the canvas or not. Ends any
    /// active drag or resize and always leaves the controller idle.
    pub fn release_pointer(
        &mut self,
        bookings: &[Booking],
    ) -> Result<Option<BookingIntent>, ConflictError> {
        match std::mem::take(&mut self.state) {
            GestureState::Resizing(grip) => self.finish_resize(grip, bookings),
            GestureState::Dragging(drag) => Self::finish_drag(drag, bookings),
            GestureState::Hovering(preview) => {
                self.state = GestureState::Hovering(preview);
                Ok(None)
            }
            GestureState::Idle => Ok(None),
        }
    }

    fn finish_resize(
        &self,
        grip: ResizeGrip,
        bookings: &[Booking],
    ) -> Result<Option<BookingIntent>, ConflictError> {
        if self.resize_conflict_check {
            let candidate = grip.candidate();
            if let Err(err) = conflict::ensure_free(&candidate, bookings, Some(grip.booking_id())) {
                log::warn!("Rejected resize of booking {}: {}", grip.booking_id(), err);
                return Err(err);
            }
        }

        let unchanged = grip.current_duration() == grip.original_duration();
        let intent = grip.close();
        Ok(if unchanged { None } else { Some(intent) })
    }

    /// Escape: abandon whatever is in progress without an intent.
    pub fn cancel(&mut self) {
        match std::mem::take(&mut self.state) {
            GestureState::Dragging(drag) => {
                log::debug!("Drag of booking {} canceled", drag.booking_id);
            }
            GestureState::Resizing(grip) => {
                log::debug!("Resize of booking {} canceled", grip.booking_id());
            }
            GestureState::Idle | GestureState::Hovering(_) => {}
        }
        self.context_menu = None;
    }

    /// Right-click on a booking. Replaces any open menu and clears the
    /// hover ghost.
    pub fn open_context_menu(&mut self, booking_id: BookingId, anchor: Pos2) {
        if self.is_busy() {
            return;
        }
        self.state = GestureState::Idle;
        self.context_menu = Some(ContextMenuState { booking_id, anchor });
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }
}
