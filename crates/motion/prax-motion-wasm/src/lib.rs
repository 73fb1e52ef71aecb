//! wasm-bindgen bridge for the PRAX motion engine.
//!
//! The host measures its elements, pushes the layout, binds primitives from
//! JSON specs and then forwards scroll, pointer and frame events. Style
//! writes come back from [`PraxMotion::drain`] for the host to apply.

use hashbrown::HashMap;
use js_sys::JSON;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use prax_api_core::{ElementId, LayoutSurface, Rect, ScrollState};
use prax_motion_core::{
    BindingHandle, BindingSpec, FixedPreference, MotionConfig, MotionEngine, MotionError,
    MotionGate, PointerEvent,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn motion_err(e: MotionError) -> JsError {
    JsError::new(&e.to_string())
}

#[wasm_bindgen]
pub struct PraxMotion {
    engine: MotionEngine,
    surface: LayoutSurface,
    handles: HashMap<u32, BindingHandle>,
    next_key: u32,
}

#[wasm_bindgen]
impl PraxMotion {
    /// Create an engine. `config` is a `MotionConfig` object or undefined/null
    /// for defaults; `reduced_motion` is the host's media-query answer, or
    /// undefined when it is unavailable.
    ///
    /// Example:
    ///   new PraxMotion({ durations: { slow: 1.4 } }, matchMedia(q).matches)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, reduced_motion: Option<bool>) -> Result<PraxMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg: MotionConfig = if jsvalue_is_undefined_or_null(&config) {
            MotionConfig::default()
        } else {
            swb::from_value(config)
                .map_err(|e| motion_err(MotionError::Config(e.to_string())))?
        };

        Ok(PraxMotion {
            engine: MotionEngine::new(cfg, MotionGate::new(FixedPreference(reduced_motion))),
            surface: LayoutSurface::default(),
            handles: HashMap::new(),
            next_key: 0,
        })
    }

    /// Whether primitives will animate (false under reduced motion).
    #[wasm_bindgen(js_name = should_animate)]
    pub fn should_animate(&self) -> bool {
        self.engine.should_animate()
    }

    /// Replace the whole layout with a `{ viewport, document_height, elements }`
    /// object and re-measure every live binding.
    #[wasm_bindgen(js_name = set_layout)]
    pub fn set_layout(&mut self, layout: JsValue) -> Result<(), JsError> {
        if jsvalue_is_undefined_or_null(&layout) {
            return Err(JsError::new("set_layout: layout is null/undefined"));
        }
        let text = JSON::stringify(&layout)
            .map_err(|e| JsError::new(&format!("set_layout stringify error: {e:?}")))?
            .as_string()
            .ok_or_else(|| JsError::new("set_layout: stringify produced non-string"))?;
        self.surface =
            LayoutSurface::from_json(&text).map_err(|e| motion_err(MotionError::from(e)))?;
        self.engine.refresh(&self.surface);
        Ok(())
    }

    /// Attach or re-measure one element. Call `refresh` once the batch is done.
    #[wasm_bindgen]
    pub fn measure(&mut self, id: u32, rect: JsValue) -> Result<(), JsError> {
        let rect: Rect = swb::from_value(rect)
            .map_err(|e| motion_err(MotionError::Surface(e.to_string())))?;
        self.surface
            .attach(ElementId(id), rect)
            .map_err(|e| motion_err(MotionError::from(e)))
    }

    /// Forget an element that left the page.
    #[wasm_bindgen]
    pub fn detach(&mut self, id: u32) -> bool {
        self.surface.detach(ElementId(id)).is_some()
    }

    /// Bind a primitive from a `BindingSpec` object. Returns a key for
    /// `dispose`; a primitive that registered nothing still gets one.
    #[wasm_bindgen]
    pub fn bind(&mut self, spec: JsValue) -> Result<u32, JsError> {
        let spec: BindingSpec = swb::from_value(spec)
            .map_err(|e| motion_err(MotionError::Config(format!("binding spec: {e}"))))?;
        let kind = spec.kind();
        let handle = spec.bind(&self.engine, &self.surface);
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        log::debug!("bound {kind} as key {key} (live: {})", handle.is_live());
        self.handles.insert(key, handle);
        Ok(key)
    }

    /// Dispose a binding. Unknown or already disposed keys return false.
    #[wasm_bindgen]
    pub fn dispose(&mut self, key: u32) -> bool {
        match self.handles.remove(&key) {
            Some(handle) => {
                handle.dispose();
                true
            }
            None => false,
        }
    }

    /// Dispose every binding this bridge created.
    #[wasm_bindgen(js_name = dispose_all)]
    pub fn dispose_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.dispose();
        }
    }

    /// Forward a `ScrollState` from the scroll coordinator.
    #[wasm_bindgen]
    pub fn scroll(&mut self, state: JsValue) -> Result<(), JsError> {
        let state: ScrollState =
            swb::from_value(state).map_err(|e| JsError::new(&format!("scroll state error: {e}")))?;
        self.engine.scroll(state);
        Ok(())
    }

    /// Step time-driven bindings by `dt` seconds.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt: f32) {
        self.engine.tick(dt);
    }

    /// Forward `{ type: "move", x, y }` or `{ type: "leave" }`.
    #[wasm_bindgen]
    pub fn pointer(&mut self, event: JsValue) -> Result<(), JsError> {
        let event: PointerEvent =
            swb::from_value(event).map_err(|e| JsError::new(&format!("pointer error: {e}")))?;
        self.engine.pointer(event);
        Ok(())
    }

    /// Re-measure live bindings against the current layout.
    #[wasm_bindgen]
    pub fn refresh(&mut self) {
        self.engine.refresh(&self.surface);
    }

    /// Take the style writes and events produced since the last drain.
    #[wasm_bindgen]
    pub fn drain(&mut self) -> Result<JsValue, JsError> {
        let mut out = self.engine.drain();
        out.writes.compact();
        swb::to_value(&out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    #[wasm_bindgen(js_name = live_bindings)]
    pub fn live_bindings(&self) -> u32 {
        self.engine.live_bindings() as u32
    }

    /// Listener/observer/frame-callback counts, for leak checks.
    #[wasm_bindgen]
    pub fn resources(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.engine.resources())
            .map_err(|e| JsError::new(&format!("resources error: {e}")))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
