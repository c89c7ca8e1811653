use egui::{Color32, Visuals};

pub(crate) fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(crate) fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Colors of the day grid, derived from the active egui visuals.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AgendaPalette {
    pub is_dark: bool,
    pub canvas_bg: Color32,
    pub inert_bg: Color32,
    pub gutter_bg: Color32,
    pub gutter_text: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub divider: Color32,
    pub card_bg: Color32,
    pub card_text: Color32,
    pub card_subtext: Color32,
    pub muted: Color32,
    pub ghost: Color32,
    pub valid_drop: Color32,
    pub conflict: Color32,
}

impl AgendaPalette {
    pub fn from_visuals(visuals: &Visuals) -> Self {
        let is_dark = visuals.dark_mode;
        let canvas_bg = visuals.extreme_bg_color;
        let panel = visuals.panel_fill;
        let text = visuals.text_color();
        let border = visuals.widgets.noninteractive.bg_stroke.color;
        let accent = visuals.selection.bg_fill;

        Self {
            is_dark,
            canvas_bg,
            inert_bg: blend(canvas_bg, panel, 0.6),
            gutter_bg: blend(panel, canvas_bg, 0.4),
            gutter_text: visuals.weak_text_color(),
            header_bg: panel,
            header_text: text,
            hour_line: border,
            slot_line: with_alpha(border, 90),
            divider: with_alpha(border, 220),
            card_bg: if is_dark {
                Color32::from_rgb(44, 48, 56)
            } else {
                Color32::from_rgb(250, 250, 252)
            },
            card_text: text,
            card_subtext: visuals.weak_text_color(),
            muted: if is_dark {
                Color32::from_rgb(90, 90, 96)
            } else {
                Color32::from_rgb(175, 175, 180)
            },
            ghost: with_alpha(accent, if is_dark { 80 } else { 55 }),
            valid_drop: Color32::from_rgb(46, 160, 90),
            conflict: Color32::from_rgb(214, 69, 65),
        }
    }

    pub fn from_ui(ui: &egui::Ui) -> Self {
        Self::from_visuals(ui.visuals())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 2.0), b);
    }

    #[test]
    fn test_palette_follows_dark_mode() {
        assert!(AgendaPalette::from_visuals(&Visuals::dark()).is_dark);
        assert!(!AgendaPalette::from_visuals(&Visuals::light()).is_dark);
    }
}
