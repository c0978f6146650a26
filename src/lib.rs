#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use kaleido_core::{
    GlyphMetrics, GlyphTable, KaleidoSettings, MonospaceMetrics, Regenerator, MAX_SAFE_SEED,
};
use wasm_bindgen::prelude::*;

mod controls;
mod dom;

use controls::{SharedRegen, Trigger};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Browser handle around the regeneration pipeline.
///
/// Typical usage from the page script:
/// - `new KaleidoscopeApp()` then `bindControls()` once the panel exists
/// - every animation frame: `if (app.flush()) rebuildMeshes(app.scene())`
/// - `importSettings(json)` / `exportSettings()` for settings files
#[wasm_bindgen]
pub struct KaleidoscopeApp {
    regen: SharedRegen,
}

impl Default for KaleidoscopeApp {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl KaleidoscopeApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KaleidoscopeApp {
        let seed = (js_sys::Math::random() * MAX_SAFE_SEED as f64) as u64;
        let metrics: Box<dyn GlyphMetrics> = Box::new(MonospaceMetrics::default());
        KaleidoscopeApp {
            regen: Rc::new(RefCell::new(Regenerator::new(metrics, seed))),
        }
    }

    /// Attach panel listeners and queue the initial shape composition.
    #[wasm_bindgen(js_name = bindControls)]
    pub fn bind_controls(&self) -> Result<(), JsError> {
        let document = dom::window_document().ok_or_else(|| JsError::new("no document"))?;
        controls::wire(&document, &self.regen);
        let initial = controls::snapshot(&document, Trigger::Shapes);
        self.regen.borrow_mut().request(initial);
        Ok(())
    }

    /// Queue an exported settings file; returns its generation number.
    #[wasm_bindgen(js_name = importSettings)]
    pub fn import_settings(&self, json: &str) -> Result<f64, JsError> {
        let settings = KaleidoSettings::from_json(json).map_err(to_js_error)?;
        Ok(self.regen.borrow_mut().request(settings) as f64)
    }

    /// Settings of the displayed scene, including the seed that produced it.
    #[wasm_bindgen(js_name = exportSettings)]
    pub fn export_settings(&self) -> Result<Option<String>, JsError> {
        let regen = self.regen.borrow();
        let Some(scene) = regen.scene() else {
            return Ok(None);
        };
        let mut settings = scene.settings.clone();
        settings.seed = Some(scene.seed);
        settings.to_json().map(Some).map_err(to_js_error)
    }

    /// Replace glyph metrics with a `{ char: {width, height, depth} }` table
    /// measured from the loaded font.
    #[wasm_bindgen(js_name = setGlyphMetrics)]
    pub fn set_glyph_metrics(&self, table: JsValue) -> Result<(), JsError> {
        let table: GlyphTable = serde_wasm_bindgen::from_value(table).map_err(to_js_error)?;
        log::info!("[font] glyph metrics for {} characters", table.len());
        self.regen.borrow_mut().set_metrics(Box::new(table));
        Ok(())
    }

    /// Realize the newest queued snapshot. Returns true when the scene changed.
    pub fn flush(&self) -> Result<bool, JsError> {
        let mut regen = self.regen.borrow_mut();
        let changed = regen.flush().map_err(to_js_error)?.is_some();
        Ok(changed)
    }

    pub fn generation(&self) -> f64 {
        self.regen
            .borrow()
            .scene()
            .map(|s| s.generation as f64)
            .unwrap_or(0.0)
    }

    /// Column-major model matrices, 16 floats per item, master slice first.
    #[wasm_bindgen(js_name = instanceMatrices)]
    pub fn instance_matrices(&self) -> js_sys::Float32Array {
        let regen = self.regen.borrow();
        let floats: Vec<f32> = regen
            .scene()
            .map(|s| {
                s.composition
                    .instances()
                    .iter()
                    .flat_map(|inst| inst.model.into_iter().flatten())
                    .collect()
            })
            .unwrap_or_default();
        js_sys::Float32Array::from(floats.as_slice())
    }

    /// The displayed composition (slices, transforms and payloads).
    pub fn scene(&self) -> Result<JsValue, JsError> {
        let regen = self.regen.borrow();
        match regen.scene() {
            Some(scene) => serde_wasm_bindgen::to_value(&scene.composition).map_err(to_js_error),
            None => Ok(JsValue::NULL),
        }
    }
}
