//! Browser bindings
//!
//! The JS host owns the canvas, DOM screens and event listeners; it forwards
//! raw events here and draws from `snapshot()` each frame.

use wasm_bindgen::prelude::*;

use crate::best_score::LocalStorageStore;
use crate::input::InputMapper;
use crate::runner::Runner;
use crate::sim::Command;
use crate::variant::{Variant, VariantConfig};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// One runner bound to a canvas-sized touch surface
#[wasm_bindgen]
pub struct WebRunner {
    runner: Runner<LocalStorageStore>,
    mapper: InputMapper,
}

#[wasm_bindgen]
impl WebRunner {
    /// Create a runner for a named variant ("side-jumper", "perspective-lanes", "top-down-lanes")
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str, surface_width: f32) -> Result<WebRunner, JsValue> {
        let variant = Variant::from_str(variant)
            .ok_or_else(|| JsValue::from_str(&format!("unknown variant: {variant}")))?;
        Ok(Self::build(variant.config(), surface_width))
    }

    /// Create a runner from a JSON `VariantConfig`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str, surface_width: f32) -> Result<WebRunner, JsValue> {
        let config = VariantConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(config, surface_width))
    }

    /// Advance to `now_ms` (requestAnimationFrame timestamp); returns events as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        let events = self.runner.frame(now_ms);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Session state as JSON for the renderer
    pub fn snapshot(&self) -> String {
        serde_json::to_string(self.runner.session()).unwrap_or_else(|e| {
            log::warn!("Snapshot failed: {}", e);
            "{}".to_string()
        })
    }

    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, now_ms: f64) -> bool {
        let command = self.mapper.key_down(key, self.runner.phase(), now_ms);
        self.submit(command)
    }

    #[wasm_bindgen(js_name = touchStart)]
    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.mapper.touch_start(x, y);
    }

    #[wasm_bindgen(js_name = touchEnd)]
    pub fn touch_end(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        let command = self.mapper.touch_end(x, y, self.runner.phase(), now_ms);
        self.submit(command)
    }

    pub fn click(&mut self, x: f32, now_ms: f64) -> bool {
        let command = self.mapper.click(x, self.runner.phase(), now_ms);
        self.submit(command)
    }

    #[wasm_bindgen(js_name = setSurfaceWidth)]
    pub fn set_surface_width(&mut self, width: f32) {
        self.mapper.set_surface_width(width);
    }

    pub fn phase(&self) -> String {
        self.runner.phase().as_str().to_string()
    }

    pub fn score(&self) -> f64 {
        self.runner.session().score as f64
    }

    #[wasm_bindgen(js_name = bestScore)]
    pub fn best_score(&self) -> f64 {
        self.runner.best_score() as f64
    }

    /// Share text including the current page URL
    #[wasm_bindgen(js_name = shareMessage)]
    pub fn share_message(&self) -> String {
        let url = web_sys::window().and_then(|w| w.location().href().ok());
        self.runner.share_message(url.as_deref())
    }
}

impl WebRunner {
    fn build(config: VariantConfig, surface_width: f32) -> WebRunner {
        let seed = js_sys::Date::now() as u64;
        let mapper = InputMapper::new(&config, surface_width);
        WebRunner {
            runner: Runner::new(config, seed, LocalStorageStore::default()),
            mapper,
        }
    }

    fn submit(&mut self, command: Option<Command>) -> bool {
        match command {
            Some(command) => {
                if command == Command::Start {
                    self.mapper.reset();
                }
                self.runner.push(command)
            }
            None => false,
        }
    }
}
