//! Tortuga packaged as a WASM module for browser environments.
//!
//! Two endpoints, one per browser context:
//! - [`Sandbox`] is instantiated inside a Web Worker; every record it
//!   produces is handed, in order, to a JS callback that is expected to
//!   forward it with `postMessage`.
//! - [`Scene`] lives in the page context; it applies incoming records and
//!   returns display lists for the page to replay onto a canvas.
//!
//! Forced termination of a run is the page calling `worker.terminate()`,
//! which throws away the whole sandbox context; the next run gets a fresh
//! worker and with it a fresh [`Sandbox`].

#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use tortuga_sandbox::{EventSink, SandboxConfig, SandboxRuntime};
use tortuga_scene::{DisplayList, Renderer, SceneModel};
use tortuga_types::Event;

/// Forwards every record to a JS callback as it is produced.
struct CallbackSink {
    callback: js_sys::Function,
}

impl EventSink for CallbackSink {
    fn emit(&self, event: Event) {
        let value = serde_wasm_bindgen::to_value(&event).unwrap_or_else(|err| {
            JsValue::from_str(&format!("record serialization error: {err}"))
        });
        // A throwing callback must not take the run down with it.
        let _ = self.callback.call1(&JsValue::NULL, &value);
    }
}

/// Worker-side endpoint: the long-lived sandbox.
#[wasm_bindgen]
pub struct Sandbox {
    runtime: SandboxRuntime,
}

#[wasm_bindgen]
impl Sandbox {
    /// Build the sandbox around the record callback. The callback receives
    /// each record as a plain JS object, in production order.
    #[wasm_bindgen(constructor)]
    pub fn new(on_event: js_sys::Function) -> Sandbox {
        let sink: Rc<dyn EventSink> = Rc::new(CallbackSink { callback: on_event });
        let config = SandboxConfig {
            // No monotonic clock in this context; busy-wait on wall time.
            wait: Rc::new(|seconds: f64| {
                let deadline = js_sys::Date::now() + seconds * 1000.0;
                while js_sys::Date::now() < deadline {}
            }),
            ..SandboxConfig::default()
        };
        Sandbox {
            runtime: SandboxRuntime::with_config(sink, config),
        }
    }

    /// Execute one run to completion.
    pub fn run(&mut self, source: &str) {
        self.runtime.run(source);
    }
}

/// Page-side endpoint: scene mirror plus renderer.
#[wasm_bindgen]
pub struct Scene {
    model: SceneModel,
    renderer: Renderer,
}

#[wasm_bindgen]
impl Scene {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Scene {
        Scene {
            model: SceneModel::new(),
            renderer: Renderer::new(),
        }
    }

    /// Apply one record (a plain JS object, as delivered by the worker).
    pub fn apply(&mut self, event: JsValue) -> Result<(), JsError> {
        let event: Event = serde_wasm_bindgen::from_value(event)
            .map_err(|err| JsError::new(&format!("malformed record: {err}")))?;
        self.model.apply(&event);
        Ok(())
    }

    /// One render timer tick. Returns the display list to replay onto the
    /// canvas, or `null` when nothing needed painting.
    pub fn tick(&mut self, width: f64, height: f64) -> JsValue {
        let mut list = DisplayList::new(width, height);
        if !self.renderer.tick(&mut self.model, &mut list) {
            return JsValue::NULL;
        }
        serde_wasm_bindgen::to_value(&list).unwrap_or(JsValue::NULL)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

/// The playground version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
