//! `ParticleSystem` - the ambient field mounted in a DOM container

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::canvas::{element_size, fit_canvas, mount_canvas, CanvasPainter};
use super::listener::{EventListener, ResizeWatch};
use super::raf::{FrameCallback, RafScheduler};
use crate::core::{FieldConfig, FrameLoop, ParticleField};

/// Covers the container; pointer events go to the container, not the canvas
const FIELD_CANVAS_CSS: &str = "position:absolute;top:0;left:0;width:100%;height:100%;\
                                pointer-events:none;z-index:1;";

struct FieldHost {
    field: ParticleField,
    painter: CanvasPainter,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    frames: FrameLoop<RafScheduler>,
    listeners: Vec<EventListener>,
    resize_watch: Option<ResizeWatch>,
}

impl FieldHost {
    fn on_frame(&mut self) {
        if !self.frames.frame_fired() {
            return;
        }
        if self.field.tick(&mut self.painter) {
            self.frames.schedule_next();
        }
    }

    fn pointer_moved(&mut self, event: &MouseEvent) {
        let rect = self.canvas.get_bounding_client_rect();
        self.field.pointer_moved(
            event.client_x() as f64 - rect.left(),
            event.client_y() as f64 - rect.top(),
        );
    }

    fn resize_to_container(&mut self) {
        let (width, height) = element_size(&self.container);
        if self.field.resize_if_changed(width, height) {
            fit_canvas(&self.canvas, width, height);
        }
    }

    /// Returns `false` if already torn down
    fn teardown(&mut self) -> bool {
        if !self.field.destroy() {
            return false;
        }
        self.frames.stop();
        self.listeners.clear();
        self.resize_watch = None;
        self.canvas.remove();
        true
    }
}

/// Animated particle background for one container element.
///
/// ```js
/// const hero = new ParticleSystem(document.getElementById("hero-particles"),
///                                 JSON.stringify({ particleCount: 30 }));
/// // later
/// hero.destroy();
/// ```
#[wasm_bindgen]
pub struct ParticleSystem {
    host: Rc<RefCell<FieldHost>>,
}

#[wasm_bindgen]
impl ParticleSystem {
    /// `options` is a JSON options object; omitted keys take defaults
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options: Option<String>) -> Result<ParticleSystem, JsValue> {
        let config = match options.as_deref() {
            Some(json) => {
                FieldConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => FieldConfig::default(),
        };

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let host = mount_canvas(&document, &container, FIELD_CANVAS_CSS, |canvas| {
            Self::mount(window, container.clone(), canvas, config)
        })?;
        Ok(Self { host })
    }

    /// Stop animating, unbind events and remove the canvas. Safe to call twice.
    pub fn destroy(&self) {
        if self.host.borrow_mut().teardown() {
            info!("ParticleSystem destroyed");
        } else {
            debug!("ParticleSystem already destroyed");
        }
    }

    #[wasm_bindgen(getter, js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.host.borrow().field.particles().len()
    }

    #[wasm_bindgen(getter, js_name = frameCount)]
    pub fn frame_count(&self) -> f64 {
        self.host.borrow().field.frame_count() as f64
    }

    /// Current surface size in CSS pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f64 {
        self.host.borrow().field.bounds().x
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f64 {
        self.host.borrow().field.bounds().y
    }

    #[wasm_bindgen(getter, js_name = isDestroyed)]
    pub fn is_destroyed(&self) -> bool {
        self.host.borrow().field.is_destroyed()
    }
}

impl ParticleSystem {
    fn mount(
        window: Window,
        container: HtmlElement,
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Result<Rc<RefCell<FieldHost>>, JsValue> {
        let painter = CanvasPainter::new(&canvas)?;
        let (width, height) = element_size(&container);
        fit_canvas(&canvas, width, height);

        let mouse_interaction = config.mouse_interaction;
        let responsive = config.responsive;
        let field = ParticleField::new(config, width, height);

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let host = Rc::new(RefCell::new(FieldHost {
            field,
            painter,
            canvas,
            container: container.clone(),
            frames: FrameLoop::new(RafScheduler::new(window, frame_callback.clone())),
            listeners: Vec::new(),
            resize_watch: None,
        }));

        let weak = Rc::downgrade(&host);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            if let Some(host) = weak.upgrade() {
                host.borrow_mut().on_frame();
            }
        }) as Box<dyn FnMut(f64)>));

        let mut listeners = Vec::new();
        if mouse_interaction {
            let weak = Rc::downgrade(&host);
            listeners.push(EventListener::new(&container, "mousemove", move |e: Event| {
                let (Some(host), Some(e)) = (weak.upgrade(), e.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                host.borrow_mut().pointer_moved(e);
            })?);

            let weak = Rc::downgrade(&host);
            listeners.push(EventListener::new(&container, "mouseleave", move |_| {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().field.pointer_left();
                }
            })?);
        }
        // Observes the container itself, so layout changes count as well as window resizes
        let resize_watch = if responsive {
            let weak = Rc::downgrade(&host);
            Some(ResizeWatch::new(&container, move || {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().resize_to_container();
                }
            })?)
        } else {
            None
        };

        {
            let mut host = host.borrow_mut();
            host.listeners = listeners;
            host.resize_watch = resize_watch;
            host.frames.start();
        }

        info!(
            particles = host.borrow().field.particles().len(),
            width,
            height,
            mouse_interaction,
            responsive,
            "ParticleSystem mounted"
        );
        Ok(host)
    }
}

impl Drop for ParticleSystem {
    fn drop(&mut self) {
        // A pending frame must not fire into a freed closure
        if let Ok(mut host) = self.host.try_borrow_mut() {
            host.teardown();
        }
    }
}
