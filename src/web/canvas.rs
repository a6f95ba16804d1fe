//! Canvas 2D implementation of the core `Painter`

use glam::DVec2;
use std::f64::consts::TAU;
use tracing::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use crate::core::{Painter, Rgba};

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d canvas context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }
}

impl Painter for CanvasPainter {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba, opacity: f64) {
        self.ctx.save();
        self.ctx.set_global_alpha(opacity.clamp(0.0, 1.0));
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        match self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU) {
            Ok(()) => self.ctx.fill(),
            Err(e) => trace!(?e, radius, "arc rejected"),
        }
        self.ctx.restore();
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Rgba, width: f64) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

/// Append a styled `<canvas>` to `parent`
pub fn create_canvas(
    document: &Document,
    parent: &Element,
    css: &str,
) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.style().set_css_text(css);
    parent.append_child(&canvas)?;
    Ok(canvas)
}

/// Append a canvas and hand it to `build`; if `build` fails the canvas is
/// taken back out of the DOM before the error is returned.
pub fn mount_canvas<T>(
    document: &Document,
    parent: &Element,
    css: &str,
    build: impl FnOnce(HtmlCanvasElement) -> Result<T, JsValue>,
) -> Result<T, JsValue> {
    let canvas = create_canvas(document, parent, css)?;
    build(canvas.clone()).inspect_err(|e| {
        debug!(?e, "Mount failed, removing canvas");
        canvas.remove();
    })
}

/// Match the canvas backing store to the given CSS pixel size
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

pub fn element_size(element: &Element) -> (f64, f64) {
    let rect = element.get_bounding_client_rect();
    (rect.width(), rect.height())
}
