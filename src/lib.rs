//! particle-field - ambient particle backgrounds for the web
//!
//! - `core`: platform-agnostic simulation, effects and the `Painter` seam
//! - `web` (feature `wasm`): DOM/Canvas 2D host exported to JavaScript
//! - `preview` (feature `preview`): native egui window for tuning options

pub mod core;
pub mod fps;
pub mod theme;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod web;

#[cfg(all(not(target_arch = "wasm32"), feature = "preview"))]
pub mod preview;
