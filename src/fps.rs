//! Rolling frames-per-second over the last 60 frames

use std::collections::VecDeque;

use crate::time::now_seconds;

const WINDOW: usize = 60;

pub struct FpsCounter {
    /// Frame timestamps in seconds
    frames: VecDeque<f64>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(WINDOW + 1),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds());
    }

    pub fn tick_at(&mut self, now: f64) {
        self.frames.push_back(now);
        if self.frames.len() > WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_steady_rate() {
        let mut fps = FpsCounter::new();
        for i in 0..120 {
            fps.tick_at(i as f64 / 60.0);
        }
        assert!((fps.fps() - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_degenerate() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        fps.tick_at(1.0);
        assert_eq!(fps.fps(), 0.0);
        fps.tick_at(1.0);
        assert_eq!(fps.fps(), 0.0);
    }
}
