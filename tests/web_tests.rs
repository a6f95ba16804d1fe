//! Browser tests for the DOM host
//!
//! Run with: wasm-pack test --headless --chrome --features wasm

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use particle_field::web::canvas::mount_canvas;
use particle_field::web::ParticleSystem;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fixed-size div attached to the body
fn container(width: u32, height: u32) -> HtmlElement {
    let doc = document();
    let el = doc.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    let style = el.style();
    style.set_property("position", "relative").unwrap();
    style.set_property("width", &format!("{width}px")).unwrap();
    style.set_property("height", &format!("{height}px")).unwrap();
    doc.body().unwrap().append_child(&el).unwrap();
    el
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn test_failed_mount_leaves_no_canvas() {
    let host = container(100, 100);

    let result: Result<(), JsValue> = mount_canvas(&document(), &host, "", |canvas| {
        assert!(canvas.is_connected());
        Err(JsValue::from_str("context unavailable"))
    });
    assert!(result.is_err());
    assert_eq!(host.child_element_count(), 0);

    let kept = mount_canvas(&document(), &host, "", Ok).unwrap();
    assert!(kept.is_connected());
    assert_eq!(host.child_element_count(), 1);
    host.remove();
}

#[wasm_bindgen_test]
fn test_invalid_options_mount_nothing() {
    let host = container(100, 100);
    assert!(ParticleSystem::new(host.clone(), Some("{".into())).is_err());
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
fn test_named_color_options_mount() {
    let host = container(200, 100);
    let options = r#"{"particleCount": 5, "particleColor": "red", "connectionColor": "hsl(0 0% 100% / 0.1)"}"#;
    let system = ParticleSystem::new(host.clone(), Some(options.into())).unwrap();
    assert_eq!(system.particle_count(), 5);
    assert_eq!(host.child_element_count(), 1);

    system.destroy();
    system.destroy();
    assert!(system.is_destroyed());
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
async fn test_container_resize_without_window_resize() {
    let host = container(200, 100);
    let system = ParticleSystem::new(host.clone(), Some(r#"{"particleCount": 5}"#.into())).unwrap();
    assert_eq!((system.width(), system.height()), (200.0, 100.0));

    host.style().set_property("width", "400px").unwrap();
    next_frame().await;
    next_frame().await;
    assert_eq!((system.width(), system.height()), (400.0, 100.0));

    // Detached observer: later layout changes are ignored
    system.destroy();
    host.style().set_property("width", "300px").unwrap();
    next_frame().await;
    next_frame().await;
    assert_eq!(system.width(), 400.0);
    host.remove();
}
