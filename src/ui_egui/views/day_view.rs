//! The agenda day grid: a time gutter plus one column per resource.
//!
//! The whole canvas is a single `click_and_drag` response. Cards are hit
//! tested manually so that drags and resizes keep following the global
//! pointer after it leaves the canvas.

use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use super::booking_card::{self, card_rect, format_booking_tooltip, CardState};
use super::context_menu::{render_booking_context_menu, ContextAction};
use super::palette::{with_alpha, AgendaPalette};
use crate::models::booking::{Booking, BookingId};
use crate::services::booking::BookingIntent;
use crate::services::error::ConflictError;
use crate::ui_egui::interaction::{GestureState, InteractionController, SlotPreview};
use crate::ui_egui::resize::HandleRects;
use crate::ui_egui::resize_drawing::draw_resize_preview;
use crate::utils::time::{format_hhmm, format_minutes};

const GUTTER_WIDTH: f32 = 56.0;
const HEADER_HEIGHT: f32 = 34.0;
const MIN_COLUMN_WIDTH: f32 = 170.0;

/// Everything the grid asks its owner to do after one frame.
#[derive(Debug, Default)]
pub struct DayInteractionResult {
    pub intents: Vec<BookingIntent>,
    pub rejections: Vec<ConflictError>,
    /// Click on the hover ghost
    pub create_request: Option<SlotPreview>,
    /// Double-click on a card or "View" in its menu
    pub view_request: Option<BookingId>,
    pub context_actions: Vec<(BookingId, ContextAction)>,
}

impl DayInteractionResult {
    fn record(&mut self, outcome: Result<Option<BookingIntent>, ConflictError>) {
        match outcome {
            Ok(Some(intent)) => self.intents.push(intent),
            Ok(None) => {}
            Err(err) => self.rejections.push(err),
        }
    }
}

struct PlacedCard<'a> {
    booking: &'a Booking,
    rect: Rect,
    handles: HandleRects,
}

/// Pointer position in canvas terms.
#[derive(Clone, Copy)]
struct CanvasPoint {
    offset_y: f32,
    column: usize,
    inside: bool,
}

struct CanvasLayout {
    canvas: Rect,
    column_width: f32,
    columns: usize,
}

impl CanvasLayout {
    fn column_rect(&self, index: usize) -> Rect {
        let left = self.canvas.left() + index as f32 * self.column_width;
        Rect::from_min_size(
            Pos2::new(left, self.canvas.top()),
            Vec2::new(self.column_width, self.canvas.height()),
        )
    }

    fn locate(&self, pos: Pos2) -> CanvasPoint {
        let raw_column = ((pos.x - self.canvas.left()) / self.column_width).floor();
        let column = raw_column.clamp(0.0, self.columns.saturating_sub(1) as f32) as usize;
        CanvasPoint {
            offset_y: pos.y - self.canvas.top(),
            column,
            inside: self.canvas.contains(pos),
        }
    }
}

pub struct AgendaDayView;

impl AgendaDayView {
    pub fn show(
        ui: &mut egui::Ui,
        controller: &mut InteractionController,
        bookings: &[Booking],
    ) -> DayInteractionResult {
        let mut result = DayInteractionResult::default();
        if controller.columns().is_empty() {
            ui.label("No resources configured.");
            return result;
        }

        let menu_before = controller.context_menu().copied();
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::render_canvas(ui, controller, bookings, &mut result);
            });

        let just_opened = controller.context_menu().copied() != menu_before;
        Self::render_context_menu(ui, controller, bookings, just_opened, &mut result);
        result
    }

    fn render_canvas(
        ui: &mut egui::Ui,
        controller: &mut InteractionController,
        bookings: &[Booking],
        result: &mut DayInteractionResult,
    ) {
        let palette = AgendaPalette::from_ui(ui);
        let geometry = *controller.geometry();
        let columns = controller.columns().len();

        let width = ui
            .available_width()
            .max(GUTTER_WIDTH + MIN_COLUMN_WIDTH * columns as f32);
        let height = HEADER_HEIGHT + geometry.canvas_height();
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, height), Sense::click_and_drag());

        let layout = CanvasLayout {
            canvas: Rect::from_min_max(
                Pos2::new(rect.left() + GUTTER_WIDTH, rect.top() + HEADER_HEIGHT),
                rect.max,
            ),
            column_width: (width - GUTTER_WIDTH) / columns as f32,
            columns,
        };

        Self::paint_grid(ui, controller, &layout, rect, &palette);

        let cards = Self::place_cards(controller, &layout, bookings);

        // Escape abandons any gesture
        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            controller.cancel();
        }

        let pointer = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.hover_pos()));
        let hovered_card = pointer
            .filter(|_| response.hovered())
            .and_then(|pos| cards.iter().rev().find(|card| card.rect.contains(pos)));

        // Start of a gesture: decide from where the button went down
        if response.drag_started_by(egui::PointerButton::Primary) {
            let origin = ui.input(|i| i.pointer.press_origin()).or(pointer);
            if let Some(origin) = origin {
                let point = layout.locate(origin);
                if let Some(card) = cards.iter().rev().find(|card| card.rect.contains(origin)) {
                    if card.handles.hit_test(origin) {
                        controller.begin_resize(card.booking, point.offset_y);
                    } else {
                        controller.begin_drag(card.booking, point.offset_y);
                    }
                }
            }
        }

        // Active gestures follow the global pointer, wherever it is
        if controller.is_busy() {
            if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
                let point = layout.locate(pos);
                if controller.drag().is_some() {
                    controller.drag_to(point.offset_y, point.column, point.inside, bookings);
                } else {
                    controller.resize_to(point.offset_y, bookings);
                }
            }
            if ui.input(|i| i.pointer.primary_released()) {
                result.record(controller.release_pointer(bookings));
            }
        } else if response.double_clicked() && hovered_card.is_some() {
            result.view_request = hovered_card.map(|card| card.booking.id);
        } else if response.clicked() {
            if controller.context_menu().is_some() {
                controller.click();
            } else if hovered_card.is_none() {
                result.create_request = controller.click();
            }
        } else if response.secondary_clicked() {
            match (hovered_card, pointer) {
                (Some(card), Some(pos)) => controller.open_context_menu(card.booking.id, pos),
                _ => controller.close_context_menu(),
            }
        } else {
            match pointer.filter(|_| response.hovered()).map(|pos| layout.locate(pos)) {
                Some(point) if point.inside => {
                    controller.hover(point.offset_y, point.column, bookings)
                }
                _ => controller.pointer_left_canvas(),
            }
        }

        // Cards, canceled ones underneath
        let drag_source = controller.drag().map(|d| d.booking_id);
        let resizing = controller.resize_grip().map(|g| g.booking_id());
        for card in &cards {
            let is_hovered = !controller.is_busy()
                && hovered_card.map(|h| h.booking.id) == Some(card.booking.id);
            let handle_hovered = is_hovered
                && card.booking.is_interactive()
                && pointer.map_or(false, |pos| card.handles.hit_test(pos));
            let state = CardState {
                hovered: is_hovered || resizing == Some(card.booking.id),
                handle_hovered,
                drag_source: drag_source == Some(card.booking.id),
            };
            booking_card::render_booking_card(ui, card.rect, card.booking, &palette, state);
        }

        Self::paint_previews(ui, controller, &layout, &palette);

        // Cursor feedback
        match controller.state() {
            GestureState::Dragging(_) => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing)
            }
            GestureState::Resizing(_) => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::ResizeVertical)
            }
            GestureState::Hovering(_) => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::PointingHand)
            }
            GestureState::Idle => {
                if let (Some(card), Some(pos)) = (hovered_card, pointer) {
                    if card.booking.is_interactive() {
                        let icon = if card.handles.hit_test(pos) {
                            card.handles.cursor_icon()
                        } else {
                            CursorIcon::Grab
                        };
                        ui.output_mut(|out| out.cursor_icon = icon);
                    }
                }
            }
        }

        // Tooltip for the hovered card, not while a gesture or menu is active
        if let Some(card) = hovered_card {
            if !controller.is_busy() && controller.context_menu().is_none() {
                let resource_name = controller
                    .columns()
                    .iter()
                    .find(|r| r.id == card.booking.resource)
                    .map(|r| r.name.as_str());
                let tooltip = format_booking_tooltip(card.booking, resource_name);
                response.clone().on_hover_ui_at_pointer(|ui| {
                    ui.label(tooltip);
                });
            }
        }
    }

    fn paint_grid(
        ui: &egui::Ui,
        controller: &InteractionController,
        layout: &CanvasLayout,
        full: Rect,
        palette: &AgendaPalette,
    ) {
        let painter = ui.painter();
        let geometry = controller.geometry();
        let canvas = layout.canvas;

        let gutter = Rect::from_min_max(
            Pos2::new(full.left(), canvas.top()),
            Pos2::new(canvas.left(), full.bottom()),
        );
        painter.rect_filled(gutter, 0.0, palette.gutter_bg);

        let header = Rect::from_min_max(full.min, Pos2::new(full.right(), canvas.top()));
        painter.rect_filled(header, 0.0, palette.header_bg);

        for (index, resource) in controller.columns().iter().enumerate() {
            let column = layout.column_rect(index);
            let fill = if resource.bookable {
                palette.canvas_bg
            } else {
                palette.inert_bg
            };
            painter.rect_filled(column, 0.0, fill);

            let title = if resource.bookable {
                resource.name.clone()
            } else {
                format!("{} (unavailable)", resource.name)
            };
            painter.text(
                Pos2::new(column.center().x, header.center().y),
                Align2::CENTER_CENTER,
                title,
                FontId::proportional(14.0),
                if resource.bookable {
                    palette.header_text
                } else {
                    palette.muted
                },
            );

            if index > 0 {
                painter.vline(
                    column.left(),
                    header.top()..=full.bottom(),
                    Stroke::new(1.0, palette.divider),
                );
            }
        }

        // Quarter-hour guides between hour lines
        let step = geometry.snap_minutes().max(1);
        let mut minute = geometry.window_start_minutes() + step;
        while minute < geometry.window_end_minutes() {
            if minute % 60 != 0 {
                let y = canvas.top() + geometry.minutes_to_offset(minute);
                painter.hline(canvas.x_range(), y, Stroke::new(0.5, palette.slot_line));
            }
            minute += step;
        }

        for (hour, offset) in geometry.hour_marks() {
            let y = canvas.top() + offset;
            painter.hline(
                full.left()..=full.right(),
                y,
                Stroke::new(1.0, palette.hour_line),
            );
            if hour < geometry.end_hour() {
                painter.text(
                    Pos2::new(canvas.left() - 6.0, y + 2.0),
                    Align2::RIGHT_TOP,
                    format!("{:02}:00", hour),
                    FontId::proportional(11.0),
                    palette.gutter_text,
                );
            }
        }

        painter.vline(
            canvas.left(),
            full.top()..=full.bottom(),
            Stroke::new(1.0, palette.divider),
        );
    }

    fn place_cards<'a>(
        controller: &InteractionController,
        layout: &CanvasLayout,
        bookings: &'a [Booking],
    ) -> Vec<PlacedCard<'a>> {
        let geometry = controller.geometry();
        let mut cards: Vec<PlacedCard<'a>> = bookings
            .iter()
            .filter_map(|booking| {
                let column = controller.column_index(booking.resource)?;
                let rect = card_rect(
                    layout.column_rect(column),
                    geometry,
                    booking.start,
                    booking.duration_minutes,
                );
                // Out-of-window bookings are simply not drawn
                if rect.bottom() <= layout.canvas.top() || rect.top() >= layout.canvas.bottom() {
                    return None;
                }
                let rect = rect.intersect(layout.canvas);
                Some(PlacedCard {
                    booking,
                    rect,
                    handles: HandleRects::for_booking(rect),
                })
            })
            .collect();
        // Canceled first so active cards draw and hit-test on top
        cards.sort_by_key(|card| (!card.booking.is_canceled(), card.booking.start));
        cards
    }

    fn paint_previews(
        ui: &egui::Ui,
        controller: &InteractionController,
        layout: &CanvasLayout,
        palette: &AgendaPalette,
    ) {
        let painter = ui.painter().with_clip_rect(layout.canvas);
        let geometry = controller.geometry();

        match controller.state() {
            GestureState::Idle => {}
            GestureState::Hovering(preview) => {
                let Some(column) = controller.column_index(preview.resource) else {
                    return;
                };
                let rect = card_rect(
                    layout.column_rect(column),
                    geometry,
                    preview.start,
                    preview.duration_minutes,
                );
                painter.rect_filled(rect, 4.0, palette.ghost);
                let outline = Stroke::new(1.0, with_alpha(palette.header_text, 80));
                painter.rect_stroke(rect, 4.0, outline);
                painter.text(
                    rect.left_top() + Vec2::new(8.0, 4.0),
                    Align2::LEFT_TOP,
                    format!("+ New appointment {}", format_hhmm(preview.start)),
                    FontId::proportional(11.0),
                    palette.header_text,
                );
            }
            GestureState::Dragging(drag) => {
                let Some(column) = controller.column_index(drag.hovered_resource) else {
                    return;
                };
                let rect = card_rect(
                    layout.column_rect(column),
                    geometry,
                    drag.hovered_start,
                    drag.duration_minutes,
                );
                let color = if drag.is_valid() {
                    palette.valid_drop
                } else {
                    palette.conflict
                };
                painter.rect_filled(rect, 4.0, with_alpha(color, 50));
                painter.rect_stroke(rect, 4.0, Stroke::new(2.0, color));

                let end = drag.candidate().end_minutes();
                let mut label =
                    format!("{}–{}", format_hhmm(drag.hovered_start), format_minutes(end));
                if !drag.over_grid {
                    label.push_str("  Release to cancel");
                } else if !drag.droppable {
                    label.push_str("  Unavailable");
                } else if drag.conflict {
                    label.push_str("  Conflict");
                }
                painter.text(
                    rect.left_top() + Vec2::new(8.0, 4.0),
                    Align2::LEFT_TOP,
                    label,
                    FontId::proportional(12.0),
                    color,
                );
            }
            GestureState::Resizing(grip) => {
                let Some(column) = controller.column_index(grip.resource()) else {
                    return;
                };
                let rect = card_rect(
                    layout.column_rect(column),
                    geometry,
                    grip.start(),
                    grip.current_duration(),
                );
                let label = format!(
                    "{} min{}",
                    grip.current_duration(),
                    if grip.conflict() { " · Conflict" } else { "" }
                );
                draw_resize_preview(
                    &painter,
                    rect,
                    Color32::from_rgb(59, 130, 246),
                    palette.conflict,
                    grip.conflict(),
                    &label,
                );
            }
        }
    }

    fn render_context_menu(
        ui: &egui::Ui,
        controller: &mut InteractionController,
        bookings: &[Booking],
        just_opened: bool,
        result: &mut DayInteractionResult,
    ) {
        let Some(menu) = controller.context_menu().copied() else {
            return;
        };
        let Some(booking) = bookings.iter().find(|b| b.id == menu.booking_id) else {
            controller.close_context_menu();
            return;
        };

        let outcome = render_booking_context_menu(ui.ctx(), menu.anchor, booking);
        match outcome.action {
            Some(ContextAction::View) => {
                result.view_request = Some(booking.id);
                controller.close_context_menu();
            }
            Some(action) => {
                result.context_actions.push((booking.id, action));
                controller.close_context_menu();
            }
            None if !just_opened => {
                // Any click outside the popup, either button, closes it
                let clicked_outside = ui.input(|i| {
                    i.pointer.any_click()
                        && i.pointer
                            .interact_pos()
                            .map_or(false, |pos| !outcome.rect.contains(pos))
                });
                if clicked_outside {
                    controller.close_context_menu();
                }
            }
            None => {}
        }
    }
}
