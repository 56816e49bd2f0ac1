use crate::assets::Liveness;
use crate::constants::{CANVAS_CLASS, MAX_RENDER_PIXELS};
use crate::controller::SceneController;
use crate::debug::Reporter;
use crate::dom;
use crate::events::{Listener, Subscriptions};
use crate::frame::{self, FrameContext, RenderLoop};
use crate::input::PointerState;
use crate::loader::AssetLoader;
use crate::overlay;
use crate::render::{GpuState, VideoTexture};
use crate::site::SceneOptions;
use crate::video::VideoSurface;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use web_sys as web;

struct SceneInner {
    ctx: Rc<RefCell<FrameContext>>,
    render_loop: RenderLoop,
    loader: Rc<AssetLoader>,
    live: Liveness,
    subs: Subscriptions,
}

/// Handle to a mounted scene. A scene that could not get a GPU is inert: every
/// call on it is accepted and does nothing.
pub struct SceneHandle {
    inner: Option<SceneInner>,
}

impl SceneHandle {
    pub fn inert() -> Self {
        Self { inner: None }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Mount a canvas in `mount`, start loading assets and begin rendering.
    /// GPU or canvas failures are reported and yield an inert handle.
    pub async fn create(
        mount: &web::Element,
        options: SceneOptions,
        scroll: impl Fn() -> f32 + 'static,
        pointer: impl Fn() -> PointerState + 'static,
        reporter: Reporter,
    ) -> Self {
        let Some(document) = dom::window_document() else {
            reporter.error("Scene init failed: no document");
            return Self::inert();
        };
        let canvas = match dom::mount_canvas(&document, mount, CANVAS_CLASS) {
            Ok(c) => c,
            Err(e) => {
                reporter.error(&format!("Scene init failed: {}", e));
                return Self::inert();
            }
        };
        overlay::hide_context_lost(&document);

        let lost = Arc::new(AtomicBool::new(false));
        let max_pixels = if options.max_render_pixels > 0 {
            options.max_render_pixels
        } else {
            MAX_RENDER_PIXELS
        };
        let gpu = match GpuState::new(&canvas, dom::viewport_size(), max_pixels, lost.clone()).await
        {
            Ok(g) => g,
            Err(e) => {
                reporter.error(&format!("WebGL unavailable: {}", e));
                dom::detach(&canvas);
                return Self::inert();
            }
        };
        let (rw, rh) = gpu.size();
        reporter.set("r", &format!("{}x{}", rw, rh));

        let live = Liveness::default();
        let loader = AssetLoader::new(live.clone(), gpu.uploader(), reporter.clone());
        loader.request_background(&options.initial_texture);
        loader.request_model(&options.model_file);

        let video = options.video_file.as_deref().and_then(|file| {
            VideoSurface::create(file, reporter.clone())
                .map_err(|e| reporter.error(&format!("Video init failed: {}", e)))
                .ok()
        });

        let mut controller = SceneController::new(options.keyframes, options.fade_duration_sec);
        controller.start();

        let resize_pending = Rc::new(Cell::new(false));
        let clock_reset = Rc::new(Cell::new(false));
        let mut subs = Subscriptions::default();
        {
            let reset = clock_reset.clone();
            let doc = document.clone();
            subs.push(Listener::new(&document, "visibilitychange", move |_| {
                if !doc.hidden() {
                    reset.set(true);
                }
            }));
        }
        if let Some(window) = web::window() {
            let pending = resize_pending.clone();
            subs.push(Listener::new(&window, "resize", move |_| pending.set(true)));
        }
        {
            let lost = lost.clone();
            subs.push(Listener::new(&canvas, "webglcontextlost", move |_| {
                lost.store(true, Ordering::SeqCst);
            }));
        }

        let ctx = Rc::new(RefCell::new(FrameContext {
            controller,
            gpu: Some(gpu),
            canvas,
            loader: loader.clone(),
            video,
            video_tex: VideoTexture::new(),
            scroll: Box::new(scroll),
            pointer: Box::new(pointer),
            resize_pending,
            clock_reset,
            lost,
            reporter,
            last_instant: Instant::now(),
        }));
        let render_loop = frame::start_loop(ctx.clone());
        log::info!("[scene] running");

        Self {
            inner: Some(SceneInner {
                ctx,
                render_loop,
                loader,
                live,
                subs,
            }),
        }
    }

    /// Fade the background to the image `name`, loading it first if needed.
    pub fn start_crossfade_to(&self, name: &str) {
        let Some(inner) = &self.inner else {
            return;
        };
        if inner.live.is_alive() {
            inner.loader.request_background(name);
        }
    }

    /// Stop the loop and free everything. Safe to call more than once.
    pub fn dispose(&mut self) {
        let Some(mut inner) = self.inner.take() else {
            return;
        };
        inner.render_loop.cancel();
        inner.live.kill();
        inner.subs.dispose();
        let mut ctx = inner.ctx.borrow_mut();
        if ctx.controller.dispose() {
            ctx.release();
            log::info!("[scene] disposed");
        }
    }
}

impl Drop for SceneHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
