use crate::debug::DebugSink;
use crate::error::SceneError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Viewport size in CSS pixels, never zero.
pub fn viewport_size() -> (f64, f64) {
    let Some(w) = web::window() else {
        return (1.0, 1.0);
    };
    let read = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| *v > 0.0)
            .unwrap_or(1.0)
    };
    (read(w.inner_width()), read(w.inner_height()))
}

#[inline]
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// Create the render canvas and append it to `mount`.
pub fn mount_canvas(
    document: &web::Document,
    mount: &web::Element,
    class_name: &str,
) -> Result<web::HtmlCanvasElement, SceneError> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(SceneError::js)?
        .dyn_into()
        .map_err(SceneError::js)?;
    canvas.set_class_name(class_name);
    mount.append_child(&canvas).map_err(SceneError::js)?;
    Ok(canvas)
}

pub fn detach(el: &web::Element) {
    if let Some(parent) = el.parent_node() {
        _ = parent.remove_child(el);
    }
}

/// Adapter for the page's optional `debugApi` object. Each call checks that
/// the member exists and is callable; anything else is silently skipped.
pub struct JsDebugSink {
    api: JsValue,
}

impl JsDebugSink {
    /// Looks up `window[name]`; `None` when absent or not an object.
    pub fn from_window(name: &str) -> Option<Self> {
        let w = web::window()?;
        let api = js_sys::Reflect::get(&w, &JsValue::from_str(name)).ok()?;
        api.is_object().then_some(Self { api })
    }

    fn call(&self, method: &str, args: &[&str]) {
        let Ok(f) = js_sys::Reflect::get(&self.api, &JsValue::from_str(method)) else {
            return;
        };
        let Some(f) = f.dyn_ref::<js_sys::Function>() else {
            return;
        };
        let result = match args {
            [a] => f.call1(&self.api, &JsValue::from_str(a)),
            [a, b] => f.call2(&self.api, &JsValue::from_str(a), &JsValue::from_str(b)),
            _ => f.call0(&self.api),
        };
        if let Err(e) = result {
            log::warn!("[debug] {} threw: {:?}", method, e);
        }
    }
}

impl DebugSink for JsDebugSink {
    fn set(&self, key: &str, value: &str) {
        self.call("set", &[key, value]);
    }

    fn push_err(&self, message: &str) {
        self.call("pushErr", &[message]);
    }
}
