use super::helpers;
use super::textures::TextureHandle;
use std::rc::Rc;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BgUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    /// size, z, mix, time
    pub(crate) plane: [f32; 4],
}

/// Camera-facing plane behind the model, blending the current and next
/// background images.
pub(crate) struct BackgroundPass {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    uniform_buf: wgpu::Buffer,
    bind_group: Option<wgpu::BindGroup>,
    bound: Option<(TextureHandle, TextureHandle)>,
}

impl BackgroundPass {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("background_shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(super::BACKGROUND_WGSL)),
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("background_bgl"),
            entries: &[
                helpers::uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ),
                helpers::texture_entry(1),
                helpers::texture_entry(2),
                helpers::sampler_entry(3),
            ],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("background_pl"),
            bind_group_layouts: &[&layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_pipeline(
            device,
            &pipeline_layout,
            &shader,
            color_format,
            &helpers::PipelineSpec {
                label: "background_pipeline",
                vs_entry: "vs_plane",
                fs_entry: "fs_background",
                buffers: &[],
                blend: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
                cull_mode: None,
            },
        );
        let uniform_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("background_uniforms"),
            size: std::mem::size_of::<BgUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            pipeline,
            layout,
            uniform_buf,
            bind_group: None,
            bound: None,
        }
    }

    /// Rebind only when the pair actually changed.
    pub(crate) fn bind(
        &mut self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        current: &TextureHandle,
        next: &TextureHandle,
    ) {
        let same = self
            .bound
            .as_ref()
            .is_some_and(|(c, n)| Rc::ptr_eq(c, current) && Rc::ptr_eq(n, next));
        if same {
            return;
        }
        self.bind_group = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("background_bg"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buf.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&current.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&next.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        self.bound = Some((current.clone(), next.clone()));
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, uniforms: &BgUniforms) {
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        let Some(bg) = &self.bind_group else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, bg, &[]);
        rpass.draw(0..6, 0..1);
    }
}
