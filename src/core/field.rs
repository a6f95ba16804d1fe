//! ParticleField - the ambient particle layer
//!
//! Owns a fixed number of particles confined to a surface, advances them once
//! per frame, reacts to the pointer and renders the particles plus a
//! distance-faded connection graph.
//!
//! The connection pass checks every unordered pair each frame (O(n²)). That is
//! fine for the tens of particles a page background uses; thousands would need
//! a spatial grid.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::config::FieldConfig;
use super::particle::{fade_ratio, Particle};
use super::render::Painter;

/// A line between two particles closer than the connection distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    /// `1 - distance / connection_distance`, in [0, 1]
    pub opacity: f64,
}

pub struct ParticleField {
    config: FieldConfig,
    bounds: DVec2,
    particles: Vec<Particle>,
    pointer: Option<DVec2>,
    rng: SmallRng,
    frames: u64,
    destroyed: bool,
}

/// Non-finite or negative host dimensions collapse to zero
fn surface_bounds(width: f64, height: f64) -> DVec2 {
    let dim = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    DVec2::new(dim(width), dim(height))
}

impl ParticleField {
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        Self::with_rng(config, width, height, SmallRng::from_entropy())
    }

    /// Deterministic field for tests and reproducible runs
    pub fn with_seed(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
        Self::with_rng(config, width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, width: f64, height: f64, rng: SmallRng) -> Self {
        let config = config.sanitized();
        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            config,
            bounds: surface_bounds(width, height),
            pointer: None,
            rng,
            frames: 0,
            destroyed: false,
        };
        field.populate();

        debug!(
            count = field.particles.len(),
            width = field.bounds.x,
            height = field.bounds.y,
            "Particle field created"
        );
        field
    }

    fn populate(&mut self) {
        let Self {
            ref config,
            bounds,
            ref mut rng,
            ref mut particles,
            ..
        } = *self;
        particles.clear();
        particles.extend((0..config.particle_count).map(|_| Particle::spawn(rng, bounds, config)));
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Pointer position relative to the surface's top-left corner
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if !self.config.mouse_interaction || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.pointer = Some(DVec2::new(x, y));
    }

    /// Pointer left the surface: no influence until it comes back
    pub fn pointer_left(&mut self) {
        if self.pointer.take().is_some() {
            for particle in &mut self.particles {
                particle.relax(&self.config);
            }
        }
    }

    /// New surface size. Particles are re-seeded, not rescaled.
    pub fn resize(&mut self, width: f64, height: f64) {
        if self.destroyed {
            return;
        }
        self.bounds = surface_bounds(width, height);
        self.populate();
        debug!(
            width = self.bounds.x,
            height = self.bounds.y,
            count = self.particles.len(),
            "Particle field resized"
        );
    }

    /// [`resize`](Self::resize) only when the surface size actually differs.
    /// Returns whether the field was re-seeded.
    pub fn resize_if_changed(&mut self, width: f64, height: f64) -> bool {
        if self.destroyed || surface_bounds(width, height) == self.bounds {
            return false;
        }
        self.resize(width, height);
        true
    }

    /// Advance every particle one tick
    pub fn step(&mut self) {
        for particle in &mut self.particles {
            particle.update(self.pointer, self.bounds, &self.config);
        }
    }

    /// Every pair closer than the connection distance
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.config.connection_distance;
        self.particles.iter().enumerate().flat_map(move |(a, pa)| {
            self.particles[a + 1..]
                .iter()
                .enumerate()
                .filter_map(move |(offset, pb)| {
                    let distance = pa.position.distance(pb.position);
                    (distance < threshold).then(|| Connection {
                        a,
                        b: a + 1 + offset,
                        distance,
                        opacity: fade_ratio(distance, threshold),
                    })
                })
        })
    }

    /// Draw particles then connections, without advancing
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        let color = self.config.particle_color;
        for particle in &self.particles {
            painter.fill_circle(particle.position, particle.radius, color, particle.opacity);
        }

        let mut drawn = 0usize;
        for connection in self.connections() {
            let from = self.particles[connection.a].position;
            let to = self.particles[connection.b].position;
            painter.stroke_line(
                from,
                to,
                self.config.connection_color.with_alpha(connection.opacity),
                self.config.connection_width,
            );
            drawn += 1;
        }
        trace!(frame = self.frames, connections = drawn, "Field rendered");
    }

    /// One animation frame: clear, update, draw.
    ///
    /// Returns `false` once the field has been destroyed; the host should
    /// stop scheduling frames then.
    pub fn tick<P: Painter + ?Sized>(&mut self, painter: &mut P) -> bool {
        if self.destroyed {
            return false;
        }
        painter.clear(self.bounds.x, self.bounds.y);
        self.step();
        self.render(painter);
        self.frames += 1;
        true
    }

    /// Stop the field. Returns `true` only on the first call.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.pointer = None;
        debug!(frames = self.frames, "Particle field destroyed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{DrawCommand, RecordingPainter};

    fn two_particle_field() -> ParticleField {
        let config = FieldConfig {
            particle_count: 2,
            connection_distance: 50.0,
            ..FieldConfig::default()
        };
        ParticleField::with_seed(config, 400.0, 300.0, 3)
    }

    fn place(field: &mut ParticleField, a: DVec2, b: DVec2) {
        let particles = field.particles_mut();
        particles[0] = Particle::new(a, DVec2::ZERO, 2.0, 0.3);
        particles[1] = Particle::new(b, DVec2::ZERO, 2.0, 0.3);
    }

    #[test]
    fn test_connection_scenario() {
        let mut field = two_particle_field();
        place(&mut field, DVec2::new(0.0, 0.0), DVec2::new(30.0, 0.0));

        let mut painter = RecordingPainter::new();
        assert!(field.tick(&mut painter));

        let lines: Vec<_> = painter.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCommand::Line { color, width, .. } => {
                assert!((color.a - 0.4).abs() < 1e-12);
                assert_eq!((color.r, color.g, color.b), (255, 255, 255));
                assert_eq!(*width, 1.0);
            }
            other => panic!("unexpected command {other:?}"),
        }

        place(&mut field, DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0));
        painter.reset();
        field.tick(&mut painter);
        assert_eq!(painter.lines().count(), 0);
    }

    #[test]
    fn test_connection_at_threshold_not_drawn() {
        let mut field = two_particle_field();
        place(&mut field, DVec2::new(10.0, 10.0), DVec2::new(60.0, 10.0));
        assert_eq!(field.connections().count(), 0);

        place(&mut field, DVec2::new(10.0, 10.0), DVec2::new(10.0, 10.0));
        let c: Vec<_> = field.connections().collect();
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].opacity, 1.0);
        assert_eq!((c[0].a, c[0].b), (0, 1));
    }

    #[test]
    fn test_connections_cover_each_pair_once() {
        let config = FieldConfig {
            particle_count: 5,
            connection_distance: 1000.0,
            ..FieldConfig::default()
        };
        let field = ParticleField::with_seed(config, 100.0, 100.0, 9);
        // all within 1000px: 5 choose 2
        assert_eq!(field.connections().count(), 10);
        assert!(field.connections().all(|c| c.a < c.b));
    }

    #[test]
    fn test_zero_connection_distance_draws_nothing() {
        let config = FieldConfig {
            particle_count: 10,
            connection_distance: 0.0,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(config, 0.0, 0.0, 1);
        let mut painter = RecordingPainter::new();
        field.tick(&mut painter);
        assert_eq!(painter.lines().count(), 0);
    }

    #[test]
    fn test_tick_order_clear_then_circles_then_lines() {
        let mut field = two_particle_field();
        place(&mut field, DVec2::new(5.0, 5.0), DVec2::new(10.0, 5.0));
        let mut painter = RecordingPainter::new();
        field.tick(&mut painter);

        assert!(matches!(
            painter.commands[0],
            DrawCommand::Clear { width, height } if width == 400.0 && height == 300.0
        ));
        assert!(matches!(painter.commands[1], DrawCommand::Circle { .. }));
        assert!(matches!(painter.commands[2], DrawCommand::Circle { .. }));
        assert!(matches!(painter.commands[3], DrawCommand::Line { .. }));
        assert_eq!(painter.commands.len(), 4);
    }

    #[test]
    fn test_particles_stay_in_bounds() {
        let config = FieldConfig {
            particle_count: 40,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(config, 320.0, 240.0, 11);
        field.pointer_moved(160.0, 120.0);
        for _ in 0..2000 {
            field.step();
            for p in field.particles() {
                assert!(p.position.x >= 0.0 && p.position.x <= 320.0);
                assert!(p.position.y >= 0.0 && p.position.y <= 240.0);
            }
        }
        assert_eq!(field.particles().len(), 40);
    }

    #[test]
    fn test_pointer_near_boosts_size() {
        let mut field = two_particle_field();
        place(&mut field, DVec2::new(100.0, 100.0), DVec2::new(300.0, 200.0));

        field.pointer_moved(140.0, 100.0);
        field.step();
        let p = &field.particles()[0];
        assert!(p.radius > p.base_radius);
        let far = &field.particles()[1];
        assert_eq!(far.radius, far.base_radius);

        field.pointer_left();
        let min_opacity = field.config().particle_opacity.min;
        assert_eq!(field.pointer(), None);
        assert!(field.particles().iter().all(|p| p.radius == p.base_radius));
        assert!(field.particles().iter().all(|p| p.opacity == min_opacity));
        field.step();
        assert!(field.particles().iter().all(|p| p.radius == p.base_radius));
        assert!(field.particles().iter().all(|p| p.opacity == min_opacity));
    }

    #[test]
    fn test_pointer_ignored_without_interaction() {
        let config = FieldConfig {
            particle_count: 3,
            mouse_interaction: false,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(config, 100.0, 100.0, 5);
        field.pointer_moved(50.0, 50.0);
        assert_eq!(field.pointer(), None);
    }

    #[test]
    fn test_resize_regenerates_within_new_bounds() {
        let config = FieldConfig {
            particle_count: 25,
            ..FieldConfig::default()
        };
        let mut field = ParticleField::with_seed(config, 1000.0, 1000.0, 21);
        let before: Vec<_> = field.particles().to_vec();

        field.resize(50.0, 20.0);

        assert_eq!(field.particles().len(), 25);
        assert_eq!(field.bounds(), DVec2::new(50.0, 20.0));
        assert_ne!(field.particles(), before.as_slice());
        for p in field.particles() {
            assert!(p.position.x <= 50.0 && p.position.y <= 20.0);
        }
    }

    #[test]
    fn test_resize_if_changed_skips_same_size() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 300.0, 200.0, 8);
        let before: Vec<_> = field.particles().to_vec();

        assert!(!field.resize_if_changed(300.0, 200.0));
        assert_eq!(field.particles(), before.as_slice());
        // negative sizes map to the zero surface like `resize` does
        assert!(field.resize_if_changed(-1.0, 200.0));
        assert_eq!(field.bounds(), DVec2::new(0.0, 200.0));
        assert!(!field.resize_if_changed(0.0, 200.0));

        assert!(field.resize_if_changed(400.0, 200.0));
        assert_eq!(field.bounds(), DVec2::new(400.0, 200.0));

        field.destroy();
        assert!(!field.resize_if_changed(10.0, 10.0));
        assert_eq!(field.bounds(), DVec2::new(400.0, 200.0));
    }

    #[test]
    fn test_zero_surface_colocates_at_origin() {
        let mut field = ParticleField::with_seed(FieldConfig::default(), 0.0, 0.0, 4);
        let mut painter = RecordingPainter::new();
        field.pointer_moved(0.0, 0.0);
        for _ in 0..10 {
            field.tick(&mut painter);
        }
        assert!(field.particles().iter().all(|p| p.position == DVec2::ZERO));
    }

    #[test]
    fn test_invalid_dimensions_collapse() {
        let field = ParticleField::with_seed(FieldConfig::default(), f64::NAN, -20.0, 4);
        assert_eq!(field.bounds(), DVec2::ZERO);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut field = two_particle_field();
        let mut painter = RecordingPainter::new();
        assert!(field.tick(&mut painter));

        assert!(field.destroy());
        assert!(!field.destroy());
        assert!(field.is_destroyed());

        painter.reset();
        assert!(!field.tick(&mut painter));
        assert!(painter.commands.is_empty());
        assert_eq!(field.frame_count(), 1);
    }

    #[test]
    fn test_invalid_config_is_sanitized() {
        let config = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        let field = ParticleField::with_seed(config, 10.0, 10.0, 0);
        assert_eq!(field.particles().len(), crate::core::config::DEFAULT_PARTICLE_COUNT);
    }
}
