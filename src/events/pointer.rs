use super::{Listener, Subscriptions};
use crate::dom;
use crate::input::{PointerState, PointerTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer-driven light controls: a window `pointermove` listener feeding a
/// [`PointerTracker`]. The scene reads [`PointerLightControls::state`] once
/// per frame.
pub struct PointerLightControls {
    tracker: Rc<RefCell<PointerTracker>>,
    subs: Subscriptions,
}

impl PointerLightControls {
    pub fn wire() -> Self {
        let (vw, vh) = dom::viewport_size();
        let tracker = Rc::new(RefCell::new(PointerTracker::new(
            vw as f32,
            vh as f32,
            dom::now_ms(),
        )));
        let mut subs = Subscriptions::default();
        if let Some(window) = web::window() {
            let t = tracker.clone();
            subs.push(Listener::new(&window, "pointermove", move |ev| {
                let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
                    return;
                };
                let (vw, vh) = dom::viewport_size();
                t.borrow_mut().on_move(
                    ev.client_x() as f32,
                    ev.client_y() as f32,
                    dom::now_ms(),
                    vw as f32,
                    vh as f32,
                );
            }));
        }
        Self { tracker, subs }
    }

    /// Accessor handed to the scene.
    pub fn accessor(&self) -> impl Fn() -> PointerState + 'static {
        let t = self.tracker.clone();
        move || t.borrow().state
    }

    pub fn dispose(&mut self) {
        self.subs.dispose();
    }
}
