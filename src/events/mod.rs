pub mod pointer;
pub mod scroll;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Dropping it unregisters the callback.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

#[derive(Clone, Copy, Default)]
pub struct ListenOptions {
    pub passive: bool,
    pub once: bool,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        Self::with_options(target, event, ListenOptions::default(), handler)
    }

    pub fn with_options(
        target: &web::EventTarget,
        event: &'static str,
        options: ListenOptions,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(options.passive);
        opts.set_once(options.once);
        match target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("[events] {} listener failed: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Listeners owned by one component; released together on dispose.
#[derive(Default)]
pub struct Subscriptions {
    listeners: Vec<Listener>,
}

impl Subscriptions {
    pub fn push(&mut self, listener: Option<Listener>) {
        if let Some(l) = listener {
            self.listeners.push(l);
        }
    }

    pub fn dispose(&mut self) {
        self.listeners.clear();
    }
}
