//! Native preview of the particle field
//!
//! Run with: cargo run --features preview --bin field-preview
//! Optional: FIELD_CONFIG=path/to/options.json

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use particle_field::core::FieldConfig;
    use particle_field::preview::PreviewApp;
    use tracing::info;
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

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("particle-field preview")
            .with_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "particle-field preview",
        options,
        Box::new(move |cc| Ok(Box::new(PreviewApp::new(cc, config)))),
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
