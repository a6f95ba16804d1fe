//! `EffectsOverlay` - full-window canvas for explosions and fireworks

use glam::DVec2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, Window};

use super::canvas::{fit_canvas, mount_canvas, CanvasPainter};
use super::listener::EventListener;
use super::raf::{FrameCallback, RafScheduler};
use crate::core::{EffectsManager, FrameLoop, Rgba};
use crate::theme::colors;
use crate::time::now_seconds;

const OVERLAY_CANVAS_CSS: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
                                  pointer-events:none;z-index:9999;";

const DEFAULT_TRAIL_LENGTH: usize = 10;

struct OverlayHost {
    effects: EffectsManager,
    painter: CanvasPainter,
    canvas: HtmlCanvasElement,
    window: Window,
    frames: FrameLoop<RafScheduler>,
    listeners: Vec<EventListener>,
    destroyed: bool,
}

fn viewport_size(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn element_center(element: &Element) -> DVec2 {
    let rect = element.get_bounding_client_rect();
    DVec2::new(
        rect.left() + rect.width() / 2.0,
        rect.top() + rect.height() / 2.0,
    )
}

fn parse_color(color: Option<String>) -> Result<Option<Rgba>, JsValue> {
    color
        .map(|c| c.parse::<Rgba>())
        .transpose()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

impl OverlayHost {
    fn on_frame(&mut self) {
        if !self.frames.frame_fired() {
            return;
        }
        self.effects.tick(now_seconds(), &mut self.painter);
        self.frames.schedule_next();
    }

    fn resize_to_viewport(&mut self) {
        let (width, height) = viewport_size(&self.window);
        fit_canvas(&self.canvas, width, height);
        self.effects.resize(width, height);
    }

    fn teardown(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.frames.stop();
        self.effects.clear();
        self.listeners.clear();
        self.canvas.remove();
        true
    }
}

/// Page-wide effects layer. Create one and pass it to whoever needs bursts.
#[wasm_bindgen]
pub struct EffectsOverlay {
    host: Rc<RefCell<OverlayHost>>,
}

#[wasm_bindgen]
impl EffectsOverlay {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<EffectsOverlay, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let body = document.body().ok_or("no body")?;

        let host = mount_canvas(&document, &body, OVERLAY_CANVAS_CSS, |canvas| {
            Self::mount(window, canvas)
        })?;
        Ok(Self { host })
    }

    /// 30-spark burst at viewport coordinates
    pub fn explosion(&self, x: f64, y: f64, color: Option<String>) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.host
            .borrow_mut()
            .effects
            .explosion(DVec2::new(x, y), color);
        Ok(())
    }

    pub fn firework(
        &self,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        color: Option<String>,
    ) -> Result<(), JsValue> {
        let color = parse_color(color)?;
        self.host.borrow_mut().effects.firework(
            DVec2::new(start_x, start_y),
            DVec2::new(end_x, end_y),
            color,
        );
        Ok(())
    }

    /// Staggered explosions around a point
    pub fn trail(&self, x: f64, y: f64, count: Option<usize>) {
        let count = count.unwrap_or(DEFAULT_TRAIL_LENGTH);
        self.host
            .borrow_mut()
            .effects
            .trail(DVec2::new(x, y), count, now_seconds());
    }

    #[wasm_bindgen(js_name = fireworkShow)]
    pub fn firework_show(&self) {
        self.host.borrow_mut().effects.firework_show(now_seconds());
    }

    /// Explode from the centre of every element matching `selector` on click
    #[wasm_bindgen(js_name = bindClickBursts)]
    pub fn bind_click_bursts(&self, selector: &str) -> Result<usize, JsValue> {
        self.bind_each(selector, "click", |host, at| host.effects.explosion(at, None))
    }

    /// Staggered burst around every element matching `selector` on hover
    #[wasm_bindgen(js_name = bindHoverBursts)]
    pub fn bind_hover_bursts(&self, selector: &str) -> Result<usize, JsValue> {
        self.bind_each(selector, "mouseenter", |host, at| {
            host.effects.hover_burst(at, now_seconds())
        })
    }

    #[wasm_bindgen(getter, js_name = activeEffects)]
    pub fn active_effects(&self) -> usize {
        self.host.borrow().effects.active_count()
    }

    /// Stop animating and remove the overlay. Safe to call twice.
    pub fn destroy(&self) {
        if self.host.borrow_mut().teardown() {
            info!("EffectsOverlay destroyed");
        } else {
            debug!("EffectsOverlay already destroyed");
        }
    }
}

impl EffectsOverlay {
    fn mount(window: Window, canvas: HtmlCanvasElement) -> Result<Rc<RefCell<OverlayHost>>, JsValue> {
        let painter = CanvasPainter::new(&canvas)?;
        let (width, height) = viewport_size(&window);
        fit_canvas(&canvas, width, height);

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let host = Rc::new(RefCell::new(OverlayHost {
            effects: EffectsManager::new(width, height, colors::BRAND_PURPLE),
            painter,
            canvas,
            window: window.clone(),
            frames: FrameLoop::new(RafScheduler::new(window.clone(), frame_callback.clone())),
            listeners: Vec::new(),
            destroyed: false,
        }));

        let weak = Rc::downgrade(&host);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(host) = weak.upgrade() {
                host.borrow_mut().on_frame();
            }
        }) as Box<dyn FnMut(f64)>));

        let weak = Rc::downgrade(&host);
        let resize = EventListener::new(&window, "resize", move |_| {
            if let Some(host) = weak.upgrade() {
                host.borrow_mut().resize_to_viewport();
            }
        })?;

        {
            let mut host = host.borrow_mut();
            host.listeners.push(resize);
            host.frames.start();
        }

        info!(width, height, "EffectsOverlay mounted");
        Ok(host)
    }

    fn bind_each(
        &self,
        selector: &str,
        event: &'static str,
        action: fn(&mut OverlayHost, DVec2),
    ) -> Result<usize, JsValue> {
        if self.host.borrow().destroyed {
            warn!(selector, "Binding on a destroyed overlay ignored");
            return Ok(0);
        }

        let document = self
            .host
            .borrow()
            .window
            .document()
            .ok_or("no document")?;
        let nodes = document.query_selector_all(selector)?;

        let mut bound = Vec::new();
        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let weak: Weak<RefCell<OverlayHost>> = Rc::downgrade(&self.host);
            let target = element.clone();
            bound.push(EventListener::new(&element, event, move |_| {
                if let Some(host) = weak.upgrade() {
                    action(&mut host.borrow_mut(), element_center(&target));
                }
            })?);
        }

        let count = bound.len();
        self.host.borrow_mut().listeners.extend(bound);
        debug!(selector, event, count, "Effect bursts bound");
        Ok(count)
    }
}

impl Drop for EffectsOverlay {
    fn drop(&mut self) {
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.teardown();
        }
    }
}
