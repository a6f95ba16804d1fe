//! Settings sidebar - field options, applied by rebuilding the field

use eframe::egui;

use super::PreviewApp;
use crate::core::{FieldConfig, Rgba};
use crate::theme::{colors, to_color32};

const PALETTE: &[(&str, Rgba)] = &[
    ("White", Rgba::WHITE),
    ("Purple", colors::BRAND_PURPLE),
];

impl PreviewApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("settings")
            .default_width(240.0)
            .min_width(200.0)
            .resizable(true)
            .frame(
                egui::Frame::new()
                    .fill(to_color32(colors::BG_ELEVATED))
                    .inner_margin(8.0),
            )
            .show(ctx, |ui| {
                let muted = to_color32(colors::TEXT_MUTED);
                let draft = &mut self.draft;

                ui.label(egui::RichText::new("Particles:").color(muted));
                ui.add(egui::Slider::new(&mut draft.particle_count, 1..=300).text("count"));
                ui.add(
                    egui::Slider::new(&mut draft.particle_speed.max, draft.particle_speed.min..=10.0)
                        .text("max speed"),
                );
                ui.horizontal(|ui| {
                    for &(name, color) in PALETTE {
                        ui.radio_value(&mut draft.particle_color, color, name);
                    }
                });

                ui.add_space(8.0);
                ui.label(egui::RichText::new("Connections:").color(muted));
                ui.add(
                    egui::Slider::new(&mut draft.connection_distance, 0.0..=400.0)
                        .text("distance"),
                );
                ui.add(
                    egui::Slider::new(&mut draft.connection_width, 0.5..=4.0).text("width"),
                );

                ui.add_space(8.0);
                ui.checkbox(&mut draft.mouse_interaction, "Pointer interaction");
                ui.checkbox(&mut draft.responsive, "Responsive");

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Defaults").clicked() {
                        *draft = FieldConfig::default();
                    }
                    if ui.button("Hero").clicked() {
                        *draft = FieldConfig::hero();
                    }
                });
                if ui.button("Firework show").clicked() {
                    self.firework_requested = true;
                }
            });
    }
}
