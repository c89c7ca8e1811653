//! Resize grip drawing and preview rendering.
//!
//! Visual feedback for booking resizes: the grip bar drawn on hovered cards
//! and the translucent silhouette shown while a grip is held.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use super::resize::{HandleRects, HANDLE_VISUAL_SIZE};

/// Draw the bottom grip of a booking card.
pub fn draw_handle(painter: &Painter, handles: &HandleRects, is_hovered: bool, color: Color32) {
    let rect = handles.bottom;
    let bar_y = rect.bottom() - 3.0;
    let bar_width = rect.width().min(40.0);
    let center_x = rect.center().x;

    painter.line_segment(
        [
            Pos2::new(center_x - bar_width / 2.0, bar_y),
            Pos2::new(center_x + bar_width / 2.0, bar_y),
        ],
        Stroke::new(
            if is_hovered { 3.0 } else { 2.0 },
            if is_hovered {
                Color32::WHITE
            } else {
                Color32::from_rgba_unmultiplied(255, 255, 255, 180)
            },
        ),
    );

    if is_hovered {
        let center = Pos2::new(center_x, bar_y - HANDLE_VISUAL_SIZE / 2.0);
        painter.circle_filled(center, HANDLE_VISUAL_SIZE / 2.0 + 1.0, Color32::WHITE);
        painter.circle_stroke(
            center,
            HANDLE_VISUAL_SIZE / 2.0 + 1.0,
            Stroke::new(1.5, color.linear_multiply(0.8)),
        );
    }
}

/// Draw where a held grip would put the booking's bottom edge.
///
/// `preview_rect` spans from the booking top to the previewed end. The
/// silhouette turns to `conflict_color` when the new length would overlap
/// another booking.
pub fn draw_resize_preview(
    painter: &Painter,
    preview_rect: Rect,
    color: Color32,
    conflict_color: Color32,
    conflict: bool,
    label: &str,
) {
    let base = if conflict { conflict_color } else { color };

    painter.rect_filled(
        preview_rect,
        4.0,
        Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), 60),
    );
    painter.rect_stroke(
        preview_rect,
        4.0,
        Stroke::new(
            2.0,
            Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), 160),
        ),
    );

    // Accent bar on the left
    let bar_rect = Rect::from_min_size(preview_rect.min, Vec2::new(4.0, preview_rect.height()));
    painter.rect_filled(
        bar_rect,
        2.0,
        Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), 110),
    );

    painter.text(
        Pos2::new(preview_rect.right() - 6.0, preview_rect.bottom() - 4.0),
        Align2::RIGHT_BOTTOM,
        label,
        FontId::proportional(11.0),
        base,
    );
}
