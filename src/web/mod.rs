//! Browser host - binds the core to a DOM container, Canvas 2D and
//! `requestAnimationFrame`.
//!
//! Nothing here is global: the page's composition root constructs a
//! `ParticleSystem` per container and at most one `EffectsOverlay`, and owns
//! them until it calls `destroy()`.

pub mod canvas;
mod listener;
mod overlay;
mod raf;
mod system;

use tracing::info;
use wasm_bindgen::prelude::*;

pub use overlay::EffectsOverlay;
pub use system::ParticleSystem;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    info!(version = env!("CARGO_PKG_VERSION"), "particle-field loaded");
}
