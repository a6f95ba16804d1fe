//! One-shot overlay effects: explosions, fireworks and staggered bursts
//!
//! Unlike the ambient field these effects are born on demand and die on their
//! own. Time only matters for the staggered spawns; motion is per tick.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::color::Rgba;
use super::render::Painter;

pub const SPARK_MAX_SPEED: f64 = 5.0;
pub const SPARK_GRAVITY: f64 = 0.1;
pub const SPARK_FRICTION: f64 = 0.98;
pub const SPARK_DECAY: f64 = 0.02;
pub const SPARKS_PER_EXPLOSION: usize = 30;

pub const FIREWORK_SPEED: f64 = 2.0;
pub const FIREWORK_RADIUS: f64 = 3.0;
/// Distance to target at which a rocket bursts
pub const FIREWORK_BURST_DISTANCE: f64 = 10.0;
pub const SPARKS_PER_FIREWORK: usize = 20;

/// Fading explosion fragment under gravity and friction
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
    pub color: Rgba,
    /// 1.0 at birth, dead at <= 0
    pub life: f64,
}

impl Spark {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, at: DVec2, color: Rgba) -> Self {
        let velocity = DVec2::new(
            rng.gen_range(-SPARK_MAX_SPEED..=SPARK_MAX_SPEED),
            rng.gen_range(-SPARK_MAX_SPEED..=SPARK_MAX_SPEED),
        );
        Self {
            position: at,
            velocity,
            radius: rng.gen_range(2.0..=6.0),
            color,
            life: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.position += self.velocity;
        self.velocity.y += SPARK_GRAVITY;
        self.velocity *= SPARK_FRICTION;
        self.life -= SPARK_DECAY;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn opacity(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        if self.is_alive() {
            painter.fill_circle(self.position, self.radius, self.color, self.opacity());
        }
    }
}

/// Rocket flying to a target, then a spark burst
#[derive(Clone, Debug, PartialEq)]
pub struct Firework {
    pub position: DVec2,
    pub target: DVec2,
    pub velocity: DVec2,
    pub color: Rgba,
    pub sparks: Vec<Spark>,
    exploded: bool,
}

impl Firework {
    pub fn new(from: DVec2, to: DVec2, color: Rgba) -> Self {
        let heading = (to - from).normalize_or_zero();
        // Launching onto the target itself still needs a direction to fly
        let heading = if heading == DVec2::ZERO { DVec2::NEG_Y } else { heading };
        Self {
            position: from,
            target: to,
            velocity: heading * FIREWORK_SPEED,
            color,
            sparks: Vec::new(),
            exploded: false,
        }
    }

    pub fn has_exploded(&self) -> bool {
        self.exploded
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.exploded {
            self.position += self.velocity;
            if self.position.distance(self.target) < FIREWORK_BURST_DISTANCE {
                self.explode(rng);
            }
        } else {
            for spark in &mut self.sparks {
                spark.update();
            }
            self.sparks.retain(Spark::is_alive);
        }
    }

    fn explode<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.exploded = true;
        let (at, color) = (self.position, self.color);
        self.sparks
            .extend((0..SPARKS_PER_FIREWORK).map(|_| Spark::new(rng, at, color)));
        trace!(x = at.x, y = at.y, "Firework burst");
    }

    /// Exploded and every spark has faded
    pub fn is_finished(&self) -> bool {
        self.exploded && self.sparks.is_empty()
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        if !self.exploded {
            painter.fill_circle(self.position, FIREWORK_RADIUS, self.color, 1.0);
        } else {
            for spark in &self.sparks {
                spark.draw(painter);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Spark(Spark),
    Firework(Firework),
}

impl Effect {
    fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self {
            Effect::Spark(s) => s.update(),
            Effect::Firework(f) => f.update(rng),
        }
    }

    fn is_done(&self) -> bool {
        match self {
            Effect::Spark(s) => !s.is_alive(),
            Effect::Firework(f) => f.is_finished(),
        }
    }

    fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        match self {
            Effect::Spark(s) => s.draw(painter),
            Effect::Firework(f) => f.draw(painter),
        }
    }
}

/// Something to spawn later
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spawn {
    Explosion { at: DVec2, color: Rgba },
    Firework { from: DVec2, to: DVec2, color: Rgba },
}

#[derive(Clone, Copy, Debug)]
struct Scheduled {
    due: f64,
    spawn: Spawn,
}

/// Live effects on a full-viewport overlay plus a queue of delayed spawns
pub struct EffectsManager {
    effects: Vec<Effect>,
    scheduled: Vec<Scheduled>,
    bounds: DVec2,
    color: Rgba,
    rng: SmallRng,
}

impl EffectsManager {
    pub fn new(width: f64, height: f64, color: Rgba) -> Self {
        Self::with_rng(width, height, color, SmallRng::from_entropy())
    }

    pub fn with_seed(width: f64, height: f64, color: Rgba, seed: u64) -> Self {
        Self::with_rng(width, height, color, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(width: f64, height: f64, color: Rgba, rng: SmallRng) -> Self {
        Self {
            effects: Vec::new(),
            scheduled: Vec::new(),
            bounds: DVec2::new(width.max(0.0), height.max(0.0)),
            color,
            rng,
        }
    }

    pub fn bounds(&self) -> DVec2 {
        self.bounds
    }

    pub fn default_color(&self) -> Rgba {
        self.color
    }

    /// Overlay size changed; live effects keep their coordinates
    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = DVec2::new(width.max(0.0), height.max(0.0));
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn active_count(&self) -> usize {
        self.effects.len()
    }

    pub fn pending_count(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_idle(&self) -> bool {
        self.effects.is_empty() && self.scheduled.is_empty()
    }

    pub fn explosion(&mut self, at: DVec2, color: Option<Rgba>) {
        let color = color.unwrap_or(self.color);
        let rng = &mut self.rng;
        self.effects.extend(
            (0..SPARKS_PER_EXPLOSION).map(|_| Effect::Spark(Spark::new(rng, at, color))),
        );
        trace!(x = at.x, y = at.y, "Explosion");
    }

    pub fn firework(&mut self, from: DVec2, to: DVec2, color: Option<Rgba>) {
        let color = color.unwrap_or(self.color);
        self.effects.push(Effect::Firework(Firework::new(from, to, color)));
    }

    /// Run `spawn` once `now` reaches `due` (seconds)
    pub fn schedule(&mut self, due: f64, spawn: Spawn) {
        self.scheduled.push(Scheduled { due, spawn });
    }

    fn jitter(&mut self, at: DVec2, spread: f64) -> DVec2 {
        let half = spread / 2.0;
        at + DVec2::new(
            self.rng.gen_range(-half..=half),
            self.rng.gen_range(-half..=half),
        )
    }

    /// `count` explosions 50ms apart, each within ±10px of `at`
    pub fn trail(&mut self, at: DVec2, count: usize, now: f64) {
        for i in 0..count {
            let at = self.jitter(at, 20.0);
            let color = self.color;
            self.schedule(now + i as f64 * 0.05, Spawn::Explosion { at, color });
        }
    }

    /// Five explosions 100ms apart within ±25px of `at` (card hover)
    pub fn hover_burst(&mut self, at: DVec2, now: f64) {
        for i in 0..5 {
            let at = self.jitter(at, 50.0);
            let color = self.color;
            self.schedule(now + i as f64 * 0.1, Spawn::Explosion { at, color });
        }
    }

    /// Five rockets, one per second, from the bottom edge to near the centre
    pub fn firework_show(&mut self, now: f64) {
        let center = self.bounds / 2.0;
        for i in 0..5 {
            let from = DVec2::new(self.rng.gen_range(0.0..=self.bounds.x), self.bounds.y);
            let to = self.jitter(center, 200.0);
            let color = self.color;
            self.schedule(now + i as f64, Spawn::Firework { from, to, color });
        }
        debug!(width = self.bounds.x, height = self.bounds.y, "Firework show queued");
    }

    fn release_due(&mut self, now: f64) {
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|s| s.due <= now);
        self.scheduled = waiting;
        for s in due {
            match s.spawn {
                Spawn::Explosion { at, color } => self.explosion(at, Some(color)),
                Spawn::Firework { from, to, color } => self.firework(from, to, Some(color)),
            }
        }
    }

    /// One animation frame at time `now` (seconds)
    pub fn tick<P: Painter + ?Sized>(&mut self, now: f64, painter: &mut P) {
        painter.clear(self.bounds.x, self.bounds.y);
        self.release_due(now);

        let rng = &mut self.rng;
        for effect in &mut self.effects {
            effect.update(rng);
            effect.draw(painter);
        }
        self.effects.retain(|e| !e.is_done());
    }

    /// Drop everything, including queued spawns
    pub fn clear(&mut self) {
        self.effects.clear();
        self.scheduled.clear();
    }
}
