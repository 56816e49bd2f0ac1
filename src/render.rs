use crate::camera::{render_resolution, Camera};
use crate::controller::FrameOutput;
use crate::error::SceneError;
use crate::lighting::LightRig;
use crate::model::model_matrix;
use glam::{Mat4, Vec3};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use web_sys as web;

mod background;
mod helpers;
mod mesh;
mod targets;
pub mod textures;

use background::{BackgroundPass, BgUniforms};
pub(crate) use mesh::GpuModel;
use mesh::{MeshFrameUniforms, MeshPass};
use targets::DepthTarget;
pub use textures::{BgTexture, TextureHandle, TextureUploader, VideoTexture};

pub static BACKGROUND_WGSL: &str = include_str!("../shaders/background.wgsl");
pub static MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");

/// Texture bindings for one frame.
pub struct FrameTextures<'t> {
    pub current: &'t TextureHandle,
    pub next: &'t TextureHandle,
    /// Newest requested background; used for reflections.
    pub env: &'t TextureHandle,
    /// `None` until the video has produced a frame.
    pub video: Option<&'t TextureHandle>,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth: DepthTarget,
    sampler: wgpu::Sampler,
    background: BackgroundPass,
    meshes: MeshPass,
    model: Option<GpuModel>,
    placeholder: TextureHandle,
    camera: Camera,
    width: u32,
    height: u32,
    max_pixels: u32,
    time_accum: f32,
    lost: Arc<AtomicBool>,
}

impl GpuState {
    /// Acquire an adapter and device for `canvas`. `lost` is raised by the
    /// device-lost callback.
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        css_size: (f64, f64),
        max_pixels: u32,
        lost: Arc<AtomicBool>,
    ) -> Result<Self, SceneError> {
        let (width, height) = render_resolution(css_size.0, css_size.1, max_pixels);
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| SceneError::Surface(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(SceneError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 limits so the GL fallback accepts the same descriptor
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: Some("scene_device"),
                },
                None,
            )
            .await
            .map_err(|e| SceneError::Device(e.to_string()))?;
        {
            let lost = lost.clone();
            device.set_device_lost_callback(move |reason, message| {
                log::error!("[gpu] device lost ({:?}): {}", reason, message);
                lost.store(true, Ordering::SeqCst);
            });
        }

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| SceneError::Surface("no surface formats".into()))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let depth = DepthTarget::new(&device, width, height);
        let background = BackgroundPass::new(&device, format);
        let meshes = MeshPass::new(&device, format);
        let placeholder =
            TextureUploader::new(device.clone(), queue.clone()).solid("placeholder", [0, 0, 0, 255]);

        let mut camera = Camera::default();
        camera.set_viewport(css_size.0, css_size.1);
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth,
            sampler,
            background,
            meshes,
            model: None,
            placeholder,
            camera,
            width,
            height,
            max_pixels,
            time_accum: 0.0,
            lost,
        })
    }

    pub fn uploader(&self) -> TextureUploader {
        TextureUploader::new(self.device.clone(), self.queue.clone())
    }

    pub fn placeholder(&self) -> &TextureHandle {
        &self.placeholder
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_lost(&self) -> bool {
        self.lost.load(Ordering::SeqCst)
    }

    pub(crate) fn set_model(&mut self, model: GpuModel) {
        self.model = Some(model);
    }

    pub(crate) fn upload_model(&self, data: &crate::model::ModelData) -> GpuModel {
        GpuModel::upload(&self.device, data)
    }

    /// Follow the viewport: new aspect, new (budgeted) backing size.
    pub fn resize(&mut self, canvas: &web::HtmlCanvasElement, css_w: f64, css_h: f64) {
        self.camera.set_viewport(css_w, css_h);
        let (width, height) = render_resolution(css_w, css_h, self.max_pixels);
        if width == self.width && height == self.height {
            return;
        }
        canvas.set_width(width);
        canvas.set_height(height);
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, width, height);
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        out: &FrameOutput,
        textures: &FrameTextures<'_>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        if !out.draw || self.is_lost() {
            return Ok(());
        }

        self.background
            .bind(&self.device, &self.sampler, textures.current, textures.next);
        let video = textures.video.unwrap_or(&self.placeholder);
        self.meshes
            .bind_textures(&self.device, &self.sampler, textures.env, video);

        let view_proj = self.camera.view_proj();
        self.background.write(
            &self.queue,
            &BgUniforms {
                view_proj: view_proj.to_cols_array_2d(),
                plane: [
                    crate::constants::BG_PLANE_SIZE,
                    crate::constants::BG_PLANE_Z,
                    out.mix,
                    self.time_accum,
                ],
            },
        );
        let model_data = match (&self.model, &out.pose) {
            (Some(m), Some(pose)) => Some((m, model_matrix(pose, m.center))),
            _ => None,
        };
        if let Some((_, model)) = &model_data {
            self.meshes.write(
                &self.queue,
                &self.mesh_uniforms(view_proj, *model, &out.lights, textures.video.is_some()),
            );
        }

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.background.draw(&mut rpass);
            if let Some((model, _)) = &model_data {
                self.meshes.draw(&mut rpass, model);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn mesh_uniforms(
        &self,
        view_proj: Mat4,
        model: Mat4,
        lights: &LightRig,
        video_ready: bool,
    ) -> MeshFrameUniforms {
        let normal_mat = model.inverse().transpose();
        let eye = self.camera.eye;
        let ambient = lights.ambient_color * lights.ambient_intensity;
        let dir = lights.directional_color * lights.directional_intensity;
        let dir_pos = Vec3::from(crate::constants::DIR_LIGHT_POSITION);
        MeshFrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_mat: normal_mat.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, self.time_accum],
            ambient: [
                ambient.x,
                ambient.y,
                ambient.z,
                crate::constants::TONE_MAPPING_EXPOSURE,
            ],
            dir_color: [dir.x, dir.y, dir.z, if video_ready { 1.0 } else { 0.0 }],
            dir_pos: [dir_pos.x, dir_pos.y, dir_pos.z, 0.0],
        }
    }
}
