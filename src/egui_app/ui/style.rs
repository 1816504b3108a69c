use crate::egui_app::state::StatusTone;
use crate::training::LogKind;
use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_ice: Color32,
    pub accent_primary: Color32,
    pub warning: Color32,
    pub danger: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(14, 16, 20),
        bg_secondary: Color32::from_rgb(26, 29, 34),
        bg_tertiary: Color32::from_rgb(40, 44, 50),
        panel_outline: Color32::from_rgb(52, 58, 66),
        grid_soft: Color32::from_rgb(32, 35, 40),
        text_primary: Color32::from_rgb(214, 219, 226),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent_ice: Color32::from_rgb(167, 217, 255),
        accent_primary: Color32::from_rgb(13, 110, 253),
        warning: Color32::from_rgb(255, 193, 7),
        danger: Color32::from_rgb(220, 53, 69),
        success: Color32::from_rgb(40, 167, 69),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.accent_primary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_widget(&mut visuals.widgets.inactive, palette);
    set_widget(&mut visuals.widgets.hovered, palette);
    set_widget(&mut visuals.widgets.active, palette);
    set_widget(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::same(6);
    visuals.menu_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_widget(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn section_stroke() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => palette.accent_primary,
        StatusTone::Info => palette.success,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => palette.danger,
    }
}

/// Fill and text color for a severity or priority badge.
///
/// Unknown values get a neutral badge.
pub fn badge_colors(class: &str) -> (Color32, Color32) {
    let palette = palette();
    match class {
        "critical" | "urgent" => (palette.danger, Color32::WHITE),
        "high" => (Color32::from_rgb(253, 126, 20), Color32::WHITE),
        "medium" => (palette.warning, Color32::BLACK),
        "low" => (palette.success, Color32::WHITE),
        "info" => (Color32::from_rgb(13, 202, 240), Color32::BLACK),
        _ => (palette.bg_tertiary, palette.text_primary),
    }
}

/// Red to amber to green stops behind the confidence bar.
pub fn confidence_gradient() -> [Color32; 3] {
    let palette = palette();
    [palette.danger, palette.warning, palette.success]
}

pub fn log_line_color(kind: LogKind) -> Color32 {
    match kind {
        LogKind::Info => palette().text_muted,
        LogKind::Success => palette().success,
    }
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_badges_are_neutral() {
        let neutral = badge_colors("");
        assert_eq!(badge_colors("catastrophic"), neutral);
        assert_ne!(badge_colors("high"), neutral);
        assert_eq!(badge_colors("urgent"), badge_colors("critical"));
    }
}
