//! Drawing surface abstraction
//!
//! The field and effects layers only know how to issue these three calls;
//! the canvas, egui and headless hosts each provide an implementation.

use glam::DVec2;

use super::color::Rgba;

pub trait Painter {
    /// Wipe the whole surface
    fn clear(&mut self, width: f64, height: f64);

    /// Filled circle; `opacity` multiplies the color's own alpha
    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, opacity: f64);

    /// Straight line using the color's alpha as-is
    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgba,
        opacity: f64,
    },
    Line {
        from: DVec2,
        to: DVec2,
        color: Rgba,
        width: f64,
    },
}

/// Keeps every command, for inspection in tests and tooling
#[derive(Default, Debug)]
pub struct RecordingPainter {
    pub commands: Vec<DrawCommand>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Painter for RecordingPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, opacity: f64) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            opacity,
        });
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}

/// Counts draw calls without drawing (headless runs)
#[derive(Default, Debug, Clone, Copy)]
pub struct FrameStats {
    pub clears: u64,
    pub circles: u64,
    pub lines: u64,
}

impl FrameStats {
    pub fn take(&mut self) -> FrameStats {
        std::mem::take(self)
    }
}

impl Painter for FrameStats {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, _center: DVec2, _radius: f64, _color: Rgba, _opacity: f64) {
        self.circles += 1;
    }

    fn stroke_line(&mut self, _from: DVec2, _to: DVec2, _color: Rgba, _width: f64) {
        self.lines += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_painter_filters() {
        let mut p = RecordingPainter::new();
        p.clear(10.0, 10.0);
        p.fill_circle(DVec2::ONE, 2.0, Rgba::WHITE, 0.5);
        p.stroke_line(DVec2::ZERO, DVec2::ONE, Rgba::WHITE, 1.0);
        p.fill_circle(DVec2::ZERO, 1.0, Rgba::BLACK, 1.0);

        assert_eq!(p.circles().count(), 2);
        assert_eq!(p.lines().count(), 1);
        p.reset();
        assert!(p.commands.is_empty());
    }

    #[test]
    fn test_frame_stats_take_resets() {
        let mut stats = FrameStats::default();
        stats.clear(1.0, 1.0);
        stats.stroke_line(DVec2::ZERO, DVec2::ONE, Rgba::WHITE, 1.0);
        let taken = stats.take();
        assert_eq!((taken.clears, taken.lines), (1, 1));
        assert_eq!(stats.lines, 0);
    }
}
