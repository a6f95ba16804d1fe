//! Brand palette shared by the effects layer and the preview window

use crate::core::Rgba;

/// Site palette: deep purple accent on near-black
pub mod colors {
    use super::Rgba;

    // === Accent ===
    pub const BRAND_PURPLE: Rgba = Rgba::rgb(0x6B, 0x46, 0xC1); // #6B46C1 - buttons, bursts

    // === Backgrounds ===
    pub const BG_PRIMARY: Rgba = Rgba::rgb(10, 8, 20); // #0A0814 - hero background
    pub const BG_ELEVATED: Rgba = Rgba::rgb(22, 18, 40); // #161228 - side panels

    // === Text ===
    pub const TEXT_PRIMARY: Rgba = Rgba::WHITE;
    pub const TEXT_MUTED: Rgba = Rgba::rgb(120, 112, 150); // #787096
}

#[cfg(feature = "preview")]
pub fn to_color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Dark egui Visuals in the site palette
#[cfg(feature = "preview")]
pub fn site_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = to_color32(BG_PRIMARY);
    visuals.window_fill = to_color32(BG_ELEVATED);
    visuals.extreme_bg_color = to_color32(BG_PRIMARY);
    visuals.faint_bg_color = to_color32(BG_ELEVATED);

    visuals.override_text_color = Some(to_color32(TEXT_PRIMARY));

    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, to_color32(TEXT_MUTED));
    visuals.widgets.hovered.bg_fill = to_color32(BG_ELEVATED);
    visuals.widgets.active.bg_fill = to_color32(BRAND_PURPLE);

    visuals.selection.bg_fill = to_color32(BRAND_PURPLE);
    visuals.selection.stroke = egui::Stroke::new(1.0, to_color32(TEXT_PRIMARY));

    // Flat
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
