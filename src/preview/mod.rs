//! Native preview window
//!
//! Paints a field through egui so options can be tuned without a browser:
//! hover drives the pointer, clicks explode, the side panel rebuilds the
//! field with new options.

mod painter;
mod settings;

use eframe::egui;
use glam::DVec2;
use tracing::info;

use crate::core::{EffectsManager, FieldConfig, ParticleField};
use crate::fps::FpsCounter;
use crate::theme::{colors, site_visuals, to_color32};
use crate::time::now_seconds;

use painter::EguiPainter;

pub struct PreviewApp {
    /// Options being edited in the side panel
    pub(crate) draft: FieldConfig,
    /// Built on the first frame, once the surface size is known
    field: Option<ParticleField>,
    effects: EffectsManager,
    fps_counter: FpsCounter,
    pub(crate) show_settings: bool,
    pub(crate) firework_requested: bool,
}

impl PreviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: FieldConfig) -> Self {
        cc.egui_ctx.set_visuals(site_visuals());
        Self {
            draft: config.sanitized(),
            field: None,
            effects: EffectsManager::new(0.0, 0.0, colors::BRAND_PURPLE),
            fps_counter: FpsCounter::new(),
            show_settings: true,
            firework_requested: false,
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        self.fps_counter.tick();
        let particles = self.field.as_ref().map_or(0, |f| f.particles().len());
        let connections = self.field.as_ref().map_or(0, |f| f.connections().count());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
                if ui.button(label).clicked() {
                    self.show_settings = !self.show_settings;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{:.0} fps / {} particles / {} connections / {} effects",
                            self.fps_counter.fps(),
                            particles,
                            connections,
                            self.effects.active_count(),
                        ))
                        .color(to_color32(colors::TEXT_MUTED))
                        .monospace(),
                    );
                });
            });
        });
    }

    fn render_field(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let (width, height) = (rect.width() as f64, rect.height() as f64);

        let field = match &mut self.field {
            Some(field) if field.config() == &self.draft => field,
            slot => {
                info!(width, height, count = self.draft.particle_count, "Building preview field");
                self.effects.resize(width, height);
                slot.insert(ParticleField::new(self.draft.clone(), width, height))
            }
        };

        if field.config().responsive && field.resize_if_changed(width, height) {
            self.effects.resize(width, height);
        }

        match response.hover_pos() {
            Some(pos) => field.pointer_moved((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64),
            None if field.pointer().is_some() => field.pointer_left(),
            None => {}
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let at = DVec2::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);
                self.effects.explosion(at, None);
            }
        }
        if std::mem::take(&mut self.firework_requested) {
            self.effects.firework_show(now_seconds());
        }

        let mut surface = EguiPainter::new(&painter, rect.min);
        field.tick(&mut surface);
        self.effects.tick(now_seconds(), &mut surface);
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous animation
        ctx.request_repaint();

        self.render_header(ctx);
        if self.show_settings {
            self.render_settings(ctx);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(to_color32(colors::BG_PRIMARY)))
            .show(ctx, |ui| self.render_field(ui));
    }
}
