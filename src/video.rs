use crate::assets::asset_path;
use crate::constants::VIDEOS_DIR;
use crate::debug::Reporter;
use crate::error::SceneError;
use crate::events::{ListenOptions, Listener, Subscriptions};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// HAVE_CURRENT_DATA: a frame can be copied.
const READY_CURRENT_DATA: u16 = 2;

const GESTURE_EVENTS: [&str; 3] = ["pointerdown", "touchstart", "click"];

/// Muted, looping, inline video feeding the dynamic surface material.
/// Autoplay is attempted at once and retried on the first user gesture.
pub struct VideoSurface {
    el: web::HtmlVideoElement,
    subs: Subscriptions,
}

impl VideoSurface {
    pub fn create(file: &str, reporter: Reporter) -> Result<Self, SceneError> {
        let document = crate::dom::window_document().ok_or(SceneError::NoDocument)?;
        let el: web::HtmlVideoElement = document
            .create_element("video")
            .map_err(SceneError::js)?
            .dyn_into()
            .map_err(SceneError::js)?;
        let url = asset_path(VIDEOS_DIR, file);
        el.set_cross_origin(Some("anonymous"));
        el.set_muted(true);
        el.set_default_muted(true);
        el.set_loop(true);
        el.set_autoplay(true);
        el.set_preload("auto");
        _ = el.set_attribute("playsinline", "");
        _ = el.set_attribute("muted", "");
        el.set_src(&url);
        reporter.set("vid", &url);

        try_play(&el, reporter.clone());

        let mut subs = Subscriptions::default();
        if let Some(window) = web::window() {
            for event in GESTURE_EVENTS {
                let el = el.clone();
                let reporter = reporter.clone();
                subs.push(Listener::with_options(
                    &window,
                    event,
                    ListenOptions {
                        passive: true,
                        once: true,
                    },
                    move |_| {
                        if el.paused() {
                            try_play(&el, reporter.clone());
                        }
                    },
                ));
            }
        }
        Ok(Self { el, subs })
    }

    pub fn element(&self) -> &web::HtmlVideoElement {
        &self.el
    }

    /// A decoded frame is available for upload.
    pub fn has_frame(&self) -> bool {
        self.el.ready_state() >= READY_CURRENT_DATA && self.el.video_width() > 0
    }

    /// Stop playback and release the media resource.
    pub fn dispose(&mut self) {
        self.subs.dispose();
        _ = self.el.pause();
        self.el.set_src("");
        _ = self.el.remove_attribute("src");
        self.el.load();
    }
}

fn try_play(el: &web::HtmlVideoElement, reporter: Reporter) {
    let Ok(promise) = el.play() else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("[video] playing"),
            // Blocked autoplay; the gesture listeners retry.
            Err(e) => reporter.set("vid_play", &format!("blocked: {:?}", e)),
        }
    });
}
