#![cfg(target_arch = "wasm32")]
use crate::constants::{DEBUG_API, MOUNT_ID};
use crate::debug::{DebugSink, Reporter};
use crate::error::SceneError;
use crate::events::pointer::PointerLightControls;
use crate::events::scroll::{ScrollTracker, Scroller};
use crate::scene::SceneHandle;
use crate::site::{nav_item, SceneOptions, NAV_ITEMS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod assets;
mod camera;
mod constants;
mod controller;
mod crossfade;
mod debug;
mod dom;
mod error;
mod events;
mod frame;
mod input;
mod keyframes;
mod lighting;
mod loader;
mod materials;
mod model;
mod overlay;
mod render;
mod scene;
mod scroll;
mod site;
mod video;

/// Page-level wiring: input sources plus the scene they drive.
struct App {
    scene: SceneHandle,
    pointer: PointerLightControls,
    scroll: ScrollTracker,
}

impl App {
    fn dispose(mut self) {
        self.scene.dispose();
        self.pointer.dispose();
        self.scroll.dispose();
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app(f: impl FnOnce(&App)) {
    APP.with(|app| {
        if let Some(app) = app.borrow().as_ref() {
            f(app);
        }
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Info);
    let reporter = Reporter::new(
        dom::JsDebugSink::from_window(DEBUG_API).map(|s| Rc::new(s) as Rc<dyn DebugSink>),
    );
    spawn_local(async move {
        if let Err(e) = boot(reporter.clone()).await {
            reporter.error(&format!("Scene boot failed: {:#}", e));
        }
    });
}

async fn boot(reporter: Reporter) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or(SceneError::NoDocument)?;
    let mount = document
        .get_element_by_id(MOUNT_ID)
        .ok_or_else(|| SceneError::MissingElement(MOUNT_ID.to_string()))?;

    let pointer = PointerLightControls::wire();
    // `data-scroll-source="<id>"` on the mount pins the scroll container.
    let scroll = match mount
        .get_attribute("data-scroll-source")
        .and_then(|id| Scroller::by_id(&id))
    {
        Some(scroller) => ScrollTracker::wire_with(scroller, &NAV_ITEMS, crossfade_to_nav),
        None => ScrollTracker::wire(&NAV_ITEMS, crossfade_to_nav),
    };
    reporter.set("scroller", &scroll.scroller().describe());

    let mut options = SceneOptions::default();
    if let Some(item) = scroll.active_key().and_then(|k| nav_item(&NAV_ITEMS, k)) {
        options.initial_texture = item.image.to_string();
    }
    let scene =
        SceneHandle::create(&mount, options, scroll.accessor(), pointer.accessor(), reporter).await;
    if !scene.is_active() {
        log::warn!("[scene] running without 3D");
    }

    let previous = APP.with(|app| {
        app.borrow_mut().replace(App {
            scene,
            pointer,
            scroll,
        })
    });
    if let Some(old) = previous {
        old.dispose();
    }
    // Catch up on section changes made while the GPU was starting.
    crossfade_to_active();
    Ok(())
}

/// Fade the background to the image file `name`.
#[wasm_bindgen]
pub fn start_crossfade_to(name: &str) {
    with_app(|app| app.scene.start_crossfade_to(name));
}

/// Fade to the background of the nav item `key`; unknown keys are ignored.
#[wasm_bindgen]
pub fn crossfade_to_nav(key: &str) {
    let Some(item) = nav_item(&NAV_ITEMS, key) else {
        return;
    };
    start_crossfade_to(item.image);
}

/// Return to the background of the section in view (e.g. after a nav hover).
#[wasm_bindgen]
pub fn crossfade_to_active() {
    with_app(|app| {
        if let Some(item) = app.scroll.active_key().and_then(|k| nav_item(&NAV_ITEMS, k)) {
            app.scene.start_crossfade_to(item.image);
        }
    });
}

/// Scroll to the section tagged `key` and fade to its background.
#[wasm_bindgen]
pub fn navigate_to(key: &str) {
    with_app(|app| {
        if !app.scroll.navigate_to(key) {
            return;
        }
        if let Some(item) = nav_item(&NAV_ITEMS, key) {
            app.scene.start_crossfade_to(item.image);
        }
    });
}

/// Tear the scene down. Further calls do nothing.
#[wasm_bindgen]
pub fn destroy() {
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        app.dispose();
    }
}
