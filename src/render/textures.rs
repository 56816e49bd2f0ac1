use super::helpers;
use crate::error::SceneError;
use std::rc::Rc;
use web_sys as web;

const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A decoded image living on the GPU.
pub struct BgTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for BgTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BgTexture({}x{})", self.width, self.height)
    }
}

/// Shared handle; the background layers and the cache hold the same texture.
pub type TextureHandle = Rc<BgTexture>;

fn external_usage() -> wgpu::TextureUsages {
    wgpu::TextureUsages::TEXTURE_BINDING
        | wgpu::TextureUsages::COPY_DST
        | wgpu::TextureUsages::RENDER_ATTACHMENT
}

fn copy_external(
    queue: &wgpu::Queue,
    source: wgpu::ExternalImageSource,
    texture: &wgpu::Texture,
    width: u32,
    height: u32,
) {
    queue.copy_external_image_to_texture(
        &wgpu::CopyExternalImageSourceInfo {
            source,
            origin: wgpu::Origin2d::ZERO,
            flip_y: false,
        },
        wgpu::CopyExternalImageDestInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
            color_space: wgpu::PredefinedColorSpace::Srgb,
            premultiplied_alpha: false,
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}

/// Device/queue pair that async loaders use to upload finished images.
#[derive(Clone)]
pub struct TextureUploader {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl TextureUploader {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    pub fn upload_image(
        &self,
        label: &str,
        img: &web::HtmlImageElement,
    ) -> Result<TextureHandle, SceneError> {
        let (width, height) = (img.natural_width(), img.natural_height());
        if width == 0 || height == 0 {
            return Err(SceneError::Texture(format!("{} has no pixels", label)));
        }
        let (texture, view) = helpers::create_color_texture(
            &self.device,
            label,
            width,
            height,
            COLOR_FORMAT,
            external_usage(),
        );
        copy_external(
            &self.queue,
            wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
            &texture,
            width,
            height,
        );
        Ok(Rc::new(BgTexture {
            texture,
            view,
            width,
            height,
        }))
    }

    /// 1x1 texture of one color, bound until real images arrive.
    pub fn solid(&self, label: &str, rgba: [u8; 4]) -> TextureHandle {
        let (texture, view) = helpers::create_color_texture(
            &self.device,
            label,
            1,
            1,
            COLOR_FORMAT,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        Rc::new(BgTexture {
            texture,
            view,
            width: 1,
            height: 1,
        })
    }
}

/// Texture refreshed from a playing video every frame. Reallocated when the
/// video's intrinsic size changes.
pub struct VideoTexture {
    current: Option<TextureHandle>,
}

impl VideoTexture {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn handle(&self) -> Option<&TextureHandle> {
        self.current.as_ref()
    }

    /// Copy the current frame. Returns true when the texture was (re)created
    /// and bind groups using it must be rebuilt.
    pub fn update(&mut self, uploader: &TextureUploader, video: &web::HtmlVideoElement) -> bool {
        let (width, height) = (video.video_width(), video.video_height());
        if width == 0 || height == 0 {
            return false;
        }
        let resized = !self
            .current
            .as_ref()
            .is_some_and(|t| t.width == width && t.height == height);
        if resized {
            let (texture, view) = helpers::create_color_texture(
                &uploader.device,
                "video_tex",
                width,
                height,
                COLOR_FORMAT,
                external_usage(),
            );
            self.current = Some(Rc::new(BgTexture {
                texture,
                view,
                width,
                height,
            }));
        }
        if let Some(t) = &self.current {
            copy_external(
                &uploader.queue,
                wgpu::ExternalImageSource::HTMLVideoElement(video.clone()),
                &t.texture,
                width,
                height,
            );
        }
        resized
    }
}
