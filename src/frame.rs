use crate::controller::SceneController;
use crate::debug::Reporter;
use crate::input::PointerState;
use crate::loader::AssetLoader;
use crate::overlay;
use crate::render::{FrameTextures, GpuState, TextureHandle, VideoTexture};
use crate::video::VideoSurface;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Largest frame step fed to the easing; keeps a backgrounded tab from
/// snapping everything on return.
const MAX_DT_SEC: f32 = 0.1;

pub struct FrameContext {
    pub controller: SceneController<TextureHandle>,
    pub gpu: Option<GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub loader: Rc<AssetLoader>,
    pub video: Option<VideoSurface>,
    pub video_tex: VideoTexture,
    pub scroll: Box<dyn Fn() -> f32>,
    pub pointer: Box<dyn Fn() -> PointerState>,
    pub resize_pending: Rc<Cell<bool>>,
    /// Set when the page becomes visible again; the next step restarts the clock.
    pub clock_reset: Rc<Cell<bool>>,
    pub lost: Arc<AtomicBool>,
    pub reporter: Reporter,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        if self.clock_reset.replace(false) {
            self.last_instant = now;
        }
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_DT_SEC);
        self.last_instant = now;

        self.handle_context_loss();
        self.drain_loads();
        if self.resize_pending.replace(false) {
            self.apply_resize();
        }

        let pointer = (self.pointer)();
        let scroll = &self.scroll;
        let out = self.controller.frame(dt_sec, || scroll(), &pointer);
        if !out.draw {
            return;
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let video_ready = match &self.video {
            Some(v) if v.has_frame() => {
                self.video_tex.update(&gpu.uploader(), v.element());
                self.video_tex.handle().is_some()
            }
            _ => false,
        };

        let crossfade = self.controller.crossfade();
        let placeholder = gpu.placeholder().clone();
        let current = crossfade
            .current()
            .map(|l| l.texture.clone())
            .unwrap_or_else(|| placeholder.clone());
        let next = crossfade
            .next()
            .map(|l| l.texture.clone())
            .unwrap_or_else(|| current.clone());
        let env = crossfade
            .latest()
            .map(|l| l.texture.clone())
            .unwrap_or_else(|| placeholder.clone());
        let video = if video_ready {
            self.video_tex.handle()
        } else {
            None
        };
        let textures = FrameTextures {
            current: &current,
            next: &next,
            env: &env,
            video,
        };
        match gpu.render(dt_sec, &out, &textures) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.reporter.error("GPU out of memory");
                self.lost.store(true, Ordering::SeqCst);
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
    }

    /// Hand finished async loads to the controller and the GPU.
    fn drain_loads(&mut self) {
        if let Some(loaded) = self.loader.fades.take() {
            let request = self.controller.request_fade(&loaded.name, loaded.texture);
            log::debug!("[tex] {} -> {:?}", loaded.name, request);
        }
        if let Some(model) = self.loader.model.take() {
            if let Some(gpu) = self.gpu.as_mut() {
                let uploaded = gpu.upload_model(&model);
                gpu.set_model(uploaded);
            }
            self.controller.set_model(model.fit());
        }
    }

    fn apply_resize(&mut self) {
        let (w, h) = crate::dom::viewport_size();
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(&self.canvas, w, h);
            let (rw, rh) = gpu.size();
            self.reporter.set("r", &format!("{}x{}", rw, rh));
        }
    }

    fn handle_context_loss(&mut self) {
        if self.controller.is_context_lost() || !self.lost.load(Ordering::SeqCst) {
            return;
        }
        self.controller.mark_context_lost();
        self.reporter.error("WebGL context lost");
        if let Some(document) = crate::dom::window_document() {
            overlay::show_context_lost(&document);
        }
    }

    /// Release GPU and media resources. The controller is disposed separately.
    pub fn release(&mut self) {
        if let Some(mut v) = self.video.take() {
            v.dispose();
        }
        self.gpu = None;
        self.loader.clear();
        crate::dom::detach(&self.canvas);
    }
}

/// A running requestAnimationFrame chain that can be cancelled.
pub struct RenderLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl RenderLoop {
    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference.
        self.tick.borrow_mut().take();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> RenderLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        let Some(w) = web::window() else {
            return;
        };
        if let Some(cb) = tick_clone.borrow().as_ref() {
            raf_clone.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
    RenderLoop { raf_id, tick }
}
