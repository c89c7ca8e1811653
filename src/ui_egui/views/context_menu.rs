//! Right-click menu for booking cards.
//!
//! The open/closed state lives in the interaction controller; this module
//! only decides which actions a booking offers and paints the popup.

use egui::{Id, Order, Pos2, Rect, RichText};

use crate::models::booking::{Booking, BookingStatus, PaymentStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextAction {
    CheckIn,
    MarkPaid,
    Cancel,
    View,
}

impl ContextAction {
    pub const ALL: [ContextAction; 4] = [
        ContextAction::CheckIn,
        ContextAction::MarkPaid,
        ContextAction::Cancel,
        ContextAction::View,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContextAction::CheckIn => "✔ Check in",
            ContextAction::MarkPaid => "💳 Mark as paid",
            ContextAction::Cancel => "✖ Cancel appointment",
            ContextAction::View => "🔍 View details",
        }
    }

    /// Whether the action makes sense for the booking in its current state.
    pub fn available_for(&self, booking: &Booking) -> bool {
        match self {
            ContextAction::CheckIn => matches!(
                booking.status,
                BookingStatus::Confirmed | BookingStatus::Pending
            ),
            ContextAction::MarkPaid => {
                !booking.is_canceled() && booking.payment != PaymentStatus::Paid
            }
            ContextAction::Cancel => !matches!(
                booking.status,
                BookingStatus::Canceled | BookingStatus::Completed
            ),
            ContextAction::View => true,
        }
    }
}

pub struct ContextMenuOutcome {
    pub action: Option<ContextAction>,
    /// Screen area covered by the popup, for outside-click detection
    pub rect: Rect,
}

/// Paint the menu for `booking` anchored at `anchor`.
pub fn render_booking_context_menu(
    ctx: &egui::Context,
    anchor: Pos2,
    booking: &Booking,
) -> ContextMenuOutcome {
    let mut action = None;

    let response = egui::Area::new(Id::new("agenda_booking_context_menu"))
        .order(Order::Foreground)
        .fixed_pos(anchor)
        .show(ctx, |ui| {
            egui::Frame::menu(ui.style()).show(ui, |ui| {
                ui.set_width(190.0);
                ui.label(RichText::new(&booking.subject).strong());
                let detail = format!("{} · {}", booking.time_range_label(), booking.procedure);
                ui.label(
                    RichText::new(detail)
                        .size(11.0)
                        .weak(),
                );
                ui.separator();

                for candidate in ContextAction::ALL {
                    if candidate == ContextAction::View {
                        ui.separator();
                    }
                    let enabled = candidate.available_for(booking);
                    if ui
                        .add_enabled(enabled, egui::Button::new(candidate.label()))
                        .clicked()
                    {
                        action = Some(candidate);
                    }
                }
            });
        });

    ContextMenuOutcome {
        action,
        rect: response.response.rect,
    }
}
