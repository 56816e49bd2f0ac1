use crate::assets::{asset_path, AssetSlot, LoadStart, Liveness, RequestTracker};
use crate::constants::{IMAGES_DIR, MODELS_DIR};
use crate::debug::Reporter;
use crate::error::SceneError;
use crate::materials::{count_roles, MaterialRole};
use crate::model::{parse_glb, ModelData};
use crate::render::{TextureHandle, TextureUploader};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// A background texture ready to be faded in.
pub struct LoadedTexture {
    pub name: String,
    pub texture: TextureHandle,
}

/// Async asset loading for one scene. Completions hand results to the frame
/// loop through slots and are dropped once the scene is disposed.
pub struct AssetLoader {
    live: Liveness,
    uploader: TextureUploader,
    reporter: Reporter,
    requests: RefCell<RequestTracker<TextureHandle>>,
    pub fades: AssetSlot<LoadedTexture>,
    pub model: AssetSlot<ModelData>,
}

impl AssetLoader {
    pub fn new(live: Liveness, uploader: TextureUploader, reporter: Reporter) -> Rc<Self> {
        Rc::new(Self {
            fades: AssetSlot::new(live.clone()),
            model: AssetSlot::new(live.clone()),
            live,
            uploader,
            reporter,
            requests: RefCell::new(RequestTracker::default()),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.live.is_alive()
    }

    pub fn cached_count(&self) -> usize {
        self.requests.borrow().cached_count()
    }

    /// Ask for `name` to become the background. Cached textures are handed
    /// over at once; otherwise the image is fetched, and only the most recent
    /// request is delivered when its load finishes.
    pub fn request_background(self: &Rc<Self>, name: &str) {
        if !self.is_alive() {
            return;
        }
        let start = self.requests.borrow_mut().request(name);
        match start {
            LoadStart::Cached(texture) => {
                self.fades.put(LoadedTexture {
                    name: name.to_string(),
                    texture,
                });
                return;
            }
            LoadStart::Spawn => {}
            LoadStart::Joined | LoadStart::Ignored => return,
        }
        let this = self.clone();
        let name = name.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            let url = asset_path(IMAGES_DIR, &name);
            let result = load_image(&url).await;
            if !this.is_alive() {
                return;
            }
            let texture = match result.and_then(|img| this.uploader.upload_image(&name, &img)) {
                Ok(t) => t,
                Err(e) => {
                    this.requests.borrow_mut().fail(&name);
                    this.reporter
                        .error(&format!("Texture failed: {} ({})", name, e));
                    return;
                }
            };
            log::info!("[tex] loaded {} {}x{}", name, texture.width, texture.height);
            let deliver = this.requests.borrow_mut().complete(&name, texture.clone());
            this.reporter
                .set("tex", &format!("{} cached={}", name, this.cached_count()));
            if deliver {
                this.fades.put(LoadedTexture { name, texture });
            }
        });
    }

    /// Fetch and parse the model in the background.
    pub fn request_model(self: &Rc<Self>, file: &str) {
        let this = self.clone();
        let url = asset_path(MODELS_DIR, file);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match fetch_bytes(&url).await {
                Ok(bytes) => parse_glb(&bytes),
                Err(e) => Err(e),
            };
            if !this.is_alive() {
                return;
            }
            match result {
                Ok(model) => {
                    let counts = count_roles(&model.assignments());
                    log::info!(
                        "[glb] {} meshes={} glass={} swirl={}",
                        url,
                        model.meshes.len(),
                        counts[MaterialRole::Glass.index()],
                        counts[MaterialRole::DynamicSurface.index()]
                    );
                    this.reporter.set("glb", "loaded");
                    this.reporter
                        .set("m_glass", &counts[MaterialRole::Glass.index()].to_string());
                    this.reporter.set(
                        "m_swirl",
                        &counts[MaterialRole::DynamicSurface.index()].to_string(),
                    );
                    this.model.put(model);
                }
                Err(e) => {
                    this.reporter.set("glb", "error");
                    this.reporter.error(&format!("GLB load failed: {}", e));
                }
            }
        });
    }

    pub fn clear(&self) {
        self.fades.clear();
        self.model.clear();
        self.requests.borrow_mut().clear();
    }
}

/// Load and decode an image element.
pub async fn load_image(url: &str) -> Result<web::HtmlImageElement, SceneError> {
    let img = web::HtmlImageElement::new().map_err(SceneError::js)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| SceneError::Fetch {
            url: url.to_string(),
            reason: format!("{:?}", e),
        })?;
    Ok(img)
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, SceneError> {
    let fail = |reason: String| SceneError::Fetch {
        url: url.to_string(),
        reason,
    };
    let window = web::window().ok_or(SceneError::NoWindow)?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fail(format!("{:?}", e)))?;
    let resp: web::Response = resp.dyn_into().map_err(|e| fail(format!("{:?}", e)))?;
    if !resp.ok() {
        return Err(fail(format!("HTTP {}", resp.status())));
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(|e| fail(format!("{:?}", e)))?)
        .await
        .map_err(|e| fail(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buf).to_vec())
}
