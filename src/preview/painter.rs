//! egui implementation of the core `Painter`

use eframe::egui;
use glam::DVec2;

use crate::core::{Painter, Rgba};
use crate::theme::to_color32;

/// Paints in surface coordinates offset by `origin`
pub struct EguiPainter<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> EguiPainter<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn pos(&self, p: DVec2) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }
}

impl Painter for EguiPainter<'_> {
    fn clear(&mut self, _width: f64, _height: f64) {
        // egui rebuilds every frame from the panel fill; nothing to erase
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, opacity: f64) {
        let fill = to_color32(color.with_alpha(color.a * opacity));
        self.painter
            .circle_filled(self.pos(center), radius.max(0.0) as f32, fill);
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.painter.line_segment(
            [self.pos(from), self.pos(to)],
            egui::Stroke::new(width as f32, to_color32(color)),
        );
    }
}
