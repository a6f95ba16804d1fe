//! Headless runner for the particle field
//!
//! Drives a field (and optionally a firework show) at 60 fps without a
//! display and logs draw statistics. Useful for checking option sets and the
//! cost of the connection pass at a given particle count.
//!
//! Run with: cargo run --features cli --bin field-cli
//!
//! Environment:
//! - FIELD_CONFIG: path to a JSON options object (default: hero preset)
//! - FIELD_SIZE: surface size as WIDTHxHEIGHT (default: 1280x720)
//! - FIELD_FRAMES: stop after this many frames (default: until Ctrl-C)
//! - FIELD_FIREWORKS: set to 1 to run a firework show on the overlay

/// Parse `WIDTHxHEIGHT`
#[cfg(not(target_arch = "wasm32"))]
fn parse_size(s: &str) -> Option<(f64, f64)> {
    let (w, h) = s.trim().split_once(|c: char| c == 'x' || c == 'X')?;
    let w: f64 = w.trim().parse().ok()?;
    let h: f64 = h.trim().parse().ok()?;
    (w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0).then_some((w, h))
}

/// Pointer circling the centre so interaction is exercised
#[cfg(not(target_arch = "wasm32"))]
fn orbiting_pointer(frame: u64, width: f64, height: f64) -> (f64, f64) {
    let t = frame as f64 / 120.0;
    let r = width.min(height) * 0.3;
    (width / 2.0 + r * t.cos(), height / 2.0 + r * t.sin())
}

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use particle_field::core::{EffectsManager, FieldConfig, FrameStats, ParticleField};
    use particle_field::fps::FpsCounter;
    use particle_field::theme::colors;
    use particle_field::time::now_seconds;
    use std::time::{Duration, Instant};
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,particle_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("FIELD_CONFIG") {
        Ok(path) => {
            info!(path = %path, "Loading field options");
            FieldConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => FieldConfig::hero(),
    };

    let (width, height) = match std::env::var("FIELD_SIZE") {
        Ok(s) => parse_size(&s).unwrap_or_else(|| {
            warn!(value = %s, "Invalid FIELD_SIZE, using 1280x720");
            (1280.0, 720.0)
        }),
        Err(_) => (1280.0, 720.0),
    };
    let max_frames: Option<u64> = std::env::var("FIELD_FRAMES").ok().and_then(|v| v.parse().ok());
    let fireworks = std::env::var("FIELD_FIREWORKS").is_ok_and(|v| v == "1");

    let mut field = ParticleField::new(config, width, height);
    let mut effects = EffectsManager::new(width, height, colors::BRAND_PURPLE);
    if fireworks {
        effects.firework_show(now_seconds());
    }

    info!(
        width,
        height,
        particles = field.particles().len(),
        connection_distance = field.config().connection_distance,
        ?max_frames,
        "Running headless field"
    );

    let mut stats = FrameStats::default();
    let mut fps = FpsCounter::new();
    let mut busy = Duration::ZERO;
    let mut window_frames = 0u64;
    let mut frame_interval = tokio::time::interval(Duration::from_micros(16_667));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    stats_interval.tick().await;

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let started = Instant::now();
                let (px, py) = orbiting_pointer(field.frame_count(), width, height);
                field.pointer_moved(px, py);
                field.tick(&mut stats);
                effects.tick(now_seconds(), &mut stats);
                busy += started.elapsed();
                window_frames += 1;
                fps.tick();

                if max_frames.is_some_and(|max| field.frame_count() >= max) {
                    info!(frames = field.frame_count(), "Frame limit reached");
                    break;
                }
            }
            _ = stats_interval.tick() => {
                let window = stats.take();
                let frames = std::mem::take(&mut window_frames).max(1);
                info!(
                    frames = field.frame_count(),
                    fps = format!("{:.1}", fps.fps()),
                    circles_per_frame = window.circles / frames,
                    lines_per_frame = window.lines / frames,
                    effects = effects.active_count(),
                    busy_ms = format!("{:.2}", busy.as_secs_f64() * 1000.0 / frames as f64),
                    "stats"
                );
                busy = Duration::ZERO;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    field.destroy();
    effects.clear();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
