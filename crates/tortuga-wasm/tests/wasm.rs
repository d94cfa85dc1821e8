//! Browser-context smoke tests, run with `wasm-pack test` or
//! `cargo test --target wasm32-unknown-unknown`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use tortuga_wasm::{version, Scene};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn version_is_exported() {
    assert!(!version().is_empty());
}

#[wasm_bindgen_test]
fn scene_applies_records_and_paints() {
    let mut scene = Scene::new();
    let record = js_sys::JSON::parse(r#"{"kind":"create-turtle","id":0}"#).unwrap();
    assert!(scene.apply(record).is_ok());

    // First tick paints (fresh surface), second has nothing new.
    let painted = scene.tick(320.0, 240.0);
    assert!(!painted.is_null());
    let idle = scene.tick(320.0, 240.0);
    assert_eq!(idle, JsValue::NULL);
}

#[wasm_bindgen_test]
fn malformed_records_are_rejected() {
    let mut scene = Scene::new();
    let record = js_sys::JSON::parse(r#"{"kind":"no-such-kind"}"#).unwrap();
    assert!(scene.apply(record).is_err());
}
