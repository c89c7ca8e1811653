//! Rendering of a single booking card on the day grid.
//!
//! Cards are stateless: the day view computes their rect from the booking
//! times and passes in the few flags that change their look.

use chrono::NaiveTime;
use egui::text::{LayoutJob, TextFormat};
use egui::{Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};

use super::palette::{with_alpha, AgendaPalette};
use crate::models::booking::{Booking, BookingCategory, BookingStatus, PaymentStatus};
use crate::services::geometry::TimeGeometry;
use crate::ui_egui::resize::HandleRects;
use crate::ui_egui::resize_drawing::draw_handle;

/// Horizontal gap between a card and its column edges
pub const CARD_INSET: f32 = 4.0;
/// Cards shorter than this collapse to a single line
const COMPACT_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    pub hovered: bool,
    /// Pointer is over the bottom grip
    pub handle_hovered: bool,
    /// The card is the source of an active drag
    pub drag_source: bool,
}

pub fn category_color(category: BookingCategory) -> Color32 {
    match category {
        BookingCategory::Consultation => Color32::from_rgb(59, 130, 246),
        BookingCategory::Aesthetic => Color32::from_rgb(168, 85, 247),
        BookingCategory::Return => Color32::from_rgb(16, 185, 129),
    }
}

/// Label and color of the status pill.
pub fn status_pill(status: BookingStatus) -> (&'static str, Color32) {
    let color = match status {
        BookingStatus::Confirmed => Color32::from_rgb(34, 197, 94),
        BookingStatus::Pending => Color32::from_rgb(234, 179, 8),
        BookingStatus::Completed => Color32::from_rgb(100, 116, 139),
        BookingStatus::Canceled => Color32::from_rgb(239, 68, 68),
        BookingStatus::CheckedIn => Color32::from_rgb(14, 165, 233),
    };
    (status.label(), color)
}

pub fn payment_badge(payment: PaymentStatus) -> (&'static str, Color32) {
    let color = match payment {
        PaymentStatus::Paid => Color32::from_rgb(22, 163, 74),
        PaymentStatus::Pending => Color32::from_rgb(220, 38, 38),
        PaymentStatus::Partial => Color32::from_rgb(217, 119, 6),
        PaymentStatus::Insurance => Color32::from_rgb(79, 70, 229),
    };
    (payment.label(), color)
}

/// Card rect inside `column` (whose top edge is the canvas top) for a
/// booking placed at `start` lasting `duration_minutes`.
pub fn card_rect(
    column: Rect,
    geometry: &TimeGeometry,
    start: NaiveTime,
    duration_minutes: u32,
) -> Rect {
    let top = column.top() + geometry.time_to_offset(start);
    let height = geometry.duration_to_height(duration_minutes);
    Rect::from_min_max(
        Pos2::new(column.left() + CARD_INSET, top + 1.0),
        Pos2::new(column.right() - CARD_INSET, top + height - 1.0),
    )
}

pub fn format_booking_tooltip(booking: &Booking, resource_name: Option<&str>) -> String {
    let mut lines = vec![
        format!("👤 {}", booking.subject),
        format!("💉 {}", booking.procedure),
        format!(
            "🕐 {} ({} min)",
            booking.time_range_label(),
            booking.duration_minutes
        ),
    ];
    if let Some(name) = resource_name {
        lines.push(format!("🩺 {}", name));
    }
    lines.push(format!(
        "{} · {} · {}",
        booking.category.label(),
        booking.status.label(),
        booking.payment.label()
    ));
    if let Some(notes) = booking.notes.as_deref() {
        let preview: String = notes.chars().take(100).collect();
        if preview.len() < notes.len() {
            lines.push(format!("\n📝 {}...", preview));
        } else {
            lines.push(format!("\n📝 {}", preview));
        }
    }
    if booking.is_interactive() {
        lines.push("\n💡 Drag to move, drag the bottom edge to resize".to_string());
        lines.push("Right-click for actions".to_string());
    }
    lines.join("\n")
}

/// Draw a booking card into `rect`.
pub(crate) fn render_booking_card(
    ui: &egui::Ui,
    rect: Rect,
    booking: &Booking,
    palette: &AgendaPalette,
    state: CardState,
) {
    let painter = ui.painter().with_clip_rect(rect.intersect(ui.clip_rect()));
    let canceled = booking.is_canceled();

    let ribbon_color = if canceled {
        palette.muted
    } else {
        category_color(booking.category)
    };
    let mut bg = if canceled {
        with_alpha(palette.card_bg, 150)
    } else {
        palette.card_bg
    };
    if state.drag_source {
        bg = with_alpha(bg, 90);
    }
    let border = if state.hovered && !canceled {
        ribbon_color
    } else {
        with_alpha(palette.hour_line, 200)
    };

    painter.rect_filled(rect, 4.0, bg);
    painter.rect_stroke(rect, 4.0, Stroke::new(1.0, border));

    let ribbon = Rect::from_min_size(rect.min, Vec2::new(4.0, rect.height()));
    painter.rect_filled(ribbon, 2.0, ribbon_color);

    let text_color = if canceled { palette.muted } else { palette.card_text };
    let sub_color = if canceled { palette.muted } else { palette.card_subtext };
    let text_left = ribbon.right() + 6.0;
    let text_width = (rect.right() - text_left - 4.0).max(0.0);

    let mut subject_format = TextFormat {
        font_id: FontId::proportional(13.0),
        color: text_color,
        ..Default::default()
    };
    if canceled {
        subject_format.strikethrough = Stroke::new(1.0, text_color);
    }
    let mut job = LayoutJob::single_section(booking.subject.clone(), subject_format);
    job.wrap.max_width = text_width;
    job.wrap.max_rows = 1;
    let subject = ui.fonts(|f| f.layout_job(job));
    let subject_height = subject.size().y;

    let compact = rect.height() < COMPACT_HEIGHT;
    if compact {
        let y = rect.center().y - subject_height / 2.0;
        painter.galley(Pos2::new(text_left, y), subject, text_color);
        painter.text(
            Pos2::new(rect.right() - 6.0, rect.center().y),
            Align2::RIGHT_CENTER,
            booking.time_range_label(),
            FontId::proportional(10.0),
            sub_color,
        );
    } else {
        painter.galley(Pos2::new(text_left, rect.top() + 4.0), subject, text_color);
        painter.text(
            Pos2::new(text_left, rect.top() + 6.0 + subject_height),
            Align2::LEFT_TOP,
            format!("{} · {}", booking.time_range_label(), booking.procedure),
            FontId::proportional(11.0),
            sub_color,
        );

        if rect.height() >= COMPACT_HEIGHT + 16.0 {
            let pill_y = rect.top() + 8.0 + subject_height + 16.0;
            let (status_label, status_color) = status_pill(booking.status);
            let next_x = draw_pill(
                &painter,
                Pos2::new(text_left, pill_y),
                status_label,
                if canceled { palette.muted } else { status_color },
            );
            if !canceled {
                let (payment_label, payment_color) = payment_badge(booking.payment);
                draw_pill(&painter, Pos2::new(next_x + 4.0, pill_y), payment_label, payment_color);
            }
        }
    }

    if !canceled && (state.hovered || state.handle_hovered) {
        draw_handle(
            &painter,
            &HandleRects::for_booking(rect),
            state.handle_hovered,
            ribbon_color,
        );
    }
}

/// Returns the right edge of the drawn pill.
fn draw_pill(painter: &egui::Painter, min: Pos2, label: &str, color: Color32) -> f32 {
    let galley = painter.layout_no_wrap(label.to_string(), FontId::proportional(10.0), color);
    let pill = Rect::from_min_size(min, galley.size() + Vec2::new(10.0, 4.0));
    painter.rect_filled(pill, 6.0, with_alpha(color, 40));
    painter.galley(min + Vec2::new(5.0, 2.0), galley, color);
    pill.right()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::BookingId;
    use crate::models::resource::ResourceId;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: BookingId(1),
            subject: "Mariana Costa".to_string(),
            procedure: "Botox".to_string(),
            start: t(9, 0),
            duration_minutes: 60,
            status,
            payment: PaymentStatus::Partial,
            category: BookingCategory::Aesthetic,
            resource: ResourceId(1),
            notes: Some("Allergic to lidocaine".to_string()),
        }
    }

    #[test]
    fn test_card_rect_geometry() {
        let geometry = TimeGeometry::default();
        let column = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(200.0, 1440.0));
        let rect = card_rect(column, &geometry, t(9, 30), 45);

        assert_eq!(rect.top(), 50.0 + 180.0 + 1.0);
        assert_eq!(rect.height(), 88.0);
        assert_eq!(rect.left(), 104.0);
        assert_eq!(rect.right(), 296.0);
    }

    #[test]
    fn test_category_colors_are_distinct() {
        let colors: Vec<_> = BookingCategory::ALL.iter().map(|c| category_color(*c)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_status_and_payment_labels() {
        assert_eq!(status_pill(BookingStatus::CheckedIn).0, "Checked in");
        assert_eq!(payment_badge(PaymentStatus::Pending).0, "Unpaid");
        assert_eq!(payment_badge(PaymentStatus::Insurance).0, "Insurance");
    }

    #[test]
    fn test_tooltip_contents() {
        let tooltip =
            format_booking_tooltip(&booking(BookingStatus::Confirmed), Some("Dr. Ana Silva"));
        assert!(tooltip.contains("Mariana Costa"));
        assert!(tooltip.contains("09:00–10:00 (60 min)"));
        assert!(tooltip.contains("Dr. Ana Silva"));
        assert!(tooltip.contains("Aesthetic · Confirmed · Partial"));
        assert!(tooltip.contains("Allergic to lidocaine"));
        assert!(tooltip.contains("Drag to move"));
    }

    #[test]
    fn test_canceled_tooltip_has_no_drag_hint() {
        let tooltip = format_booking_tooltip(&booking(BookingStatus::Canceled), None);
        assert!(!tooltip.contains("Drag to move"));
    }
}
