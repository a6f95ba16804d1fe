//! A single ambient particle: motion, edge bounce and pointer reaction

use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

use super::config::FieldConfig;

/// Pointer distance (px) within which particles grow and brighten
pub const INFLUENCE_RADIUS: f64 = 100.0;
/// Radius added at full pointer influence
pub const SIZE_BOOST: f64 = 5.0;
/// Opacity added per tick at full pointer influence
pub const OPACITY_BOOST: f64 = 0.1;

/// `(radius - distance) / radius` clamped to [0, 1].
///
/// A zero (or negative) radius counts as full influence so callers never
/// divide by zero.
pub fn fade_ratio(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 {
        return 1.0;
    }
    ((radius - distance) / radius).clamp(0.0, 1.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Radius drawn from the configured size range
    pub base_radius: f64,
    /// Rendered radius, >= `base_radius`
    pub radius: f64,
    pub opacity: f64,
}

impl Particle {
    pub fn new(position: DVec2, velocity: DVec2, base_radius: f64, opacity: f64) -> Self {
        Self {
            position,
            velocity,
            base_radius,
            radius: base_radius,
            opacity,
        }
    }

    /// Fresh particle somewhere inside `bounds`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: DVec2, config: &FieldConfig) -> Self {
        let position = DVec2::new(rng.gen_range(0.0..=bounds.x), rng.gen_range(0.0..=bounds.y));
        let speed = config.particle_speed.sample(rng);
        let heading = rng.gen_range(0.0..TAU);
        let velocity = DVec2::from_angle(heading) * speed;

        Self::new(
            position,
            velocity,
            config.particle_size.sample(rng),
            config.particle_opacity.sample(rng),
        )
    }

    /// Advance one tick.
    ///
    /// Bounce and clamp are independent: velocity flips on the axis that left
    /// `[0, bounds]`, then the position is clamped back inside.
    pub fn update(&mut self, pointer: Option<DVec2>, bounds: DVec2, config: &FieldConfig) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y;
        }

        match pointer.filter(|_| config.mouse_interaction) {
            Some(pointer) => {
                let distance = self.position.distance(pointer);
                if distance < INFLUENCE_RADIUS {
                    let force = fade_ratio(distance, INFLUENCE_RADIUS);
                    self.radius = self.base_radius + force * SIZE_BOOST;
                    self.opacity =
                        (self.opacity + force * OPACITY_BOOST).min(config.particle_opacity.max);
                } else {
                    self.relax(config);
                }
            }
            None => self.radius = self.base_radius,
        }

        self.position = self.position.clamp(DVec2::ZERO, bounds);
    }

    /// Drop any pointer boost: base radius, minimum opacity
    pub fn relax(&mut self, config: &FieldConfig) {
        self.radius = self.base_radius;
        self.opacity = config.particle_opacity.min;
    }

    pub fn is_boosted(&self) -> bool {
        self.radius > self.base_radius
    }
}
