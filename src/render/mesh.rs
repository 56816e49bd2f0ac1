use super::helpers::{self, PipelineSpec};
use super::textures::TextureHandle;
use crate::materials::{draw_passes, Blend, DrawPass, MaterialRole};
use crate::model::{ModelData, Vertex};
use std::rc::Rc;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshFrameUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal_mat: [[f32; 4]; 4],
    /// eye xyz, time
    pub(crate) camera_pos: [f32; 4],
    /// ambient rgb * intensity, exposure
    pub(crate) ambient: [f32; 4],
    /// directional rgb * intensity, video ready flag
    pub(crate) dir_color: [f32; 4],
    pub(crate) dir_pos: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MaterialUniforms {
    p0: [f32; 4],
    p1: [f32; 4],
}

impl MaterialUniforms {
    fn for_role(role: MaterialRole) -> Self {
        let p = role.params();
        Self {
            p0: [p.roughness, p.metalness, p.transmission, p.ior],
            p1: [p.thickness, p.env_intensity, p.emissive_intensity, 0.0],
        }
    }
}

struct GpuMesh {
    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,
}

/// Uploaded model: buffers per primitive plus the sorted draw list.
pub(crate) struct GpuModel {
    meshes: Vec<GpuMesh>,
    passes: Vec<DrawPass>,
    pub(crate) center: glam::Vec3,
}

impl GpuModel {
    pub(crate) fn upload(device: &wgpu::Device, data: &ModelData) -> Self {
        let meshes = data
            .meshes
            .iter()
            .map(|m| GpuMesh {
                vertex_buf: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&m.name),
                    contents: bytemuck::cast_slice(&m.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                }),
                index_buf: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&m.name),
                    contents: bytemuck::cast_slice(&m.indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                index_count: m.indices.len() as u32,
            })
            .collect();
        Self {
            meshes,
            passes: draw_passes(&data.assignments()),
            center: data.bounds.center(),
        }
    }
}

// Pipeline slots: one per role, plus the additive overlay variant.
const PIPE_STANDARD: usize = 0;
const PIPE_GLASS: usize = 1;
const PIPE_DYNAMIC: usize = 2;
const PIPE_OVERLAY: usize = 3;

fn pipeline_slot(role: MaterialRole, blend: Blend) -> usize {
    match (role, blend) {
        (_, Blend::Additive) => PIPE_OVERLAY,
        (MaterialRole::Standard, _) => PIPE_STANDARD,
        (MaterialRole::Glass, _) => PIPE_GLASS,
        (MaterialRole::DynamicSurface, _) => PIPE_DYNAMIC,
    }
}

pub(crate) struct MeshPass {
    pipelines: [wgpu::RenderPipeline; 4],
    frame_buf: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    tex_layout: wgpu::BindGroupLayout,
    tex_bg: Option<wgpu::BindGroup>,
    tex_bound: Option<(TextureHandle, TextureHandle)>,
    material_bgs: [wgpu::BindGroup; 3],
    _material_bufs: [wgpu::Buffer; 3],
}

impl MeshPass {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("model_shader"),
            source: wgpu::ShaderSource::Wgsl(std::borrow::Cow::Borrowed(super::MODEL_WGSL)),
        });
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_frame_bgl"),
            entries: &[helpers::uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let tex_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_tex_bgl"),
            entries: &[
                helpers::texture_entry(0),
                helpers::texture_entry(1),
                helpers::sampler_entry(2),
            ],
        });
        let material_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mesh_material_bgl"),
            entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::FRAGMENT)],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&frame_layout, &tex_layout, &material_layout],
            push_constant_ranges: &[],
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2],
        };
        let buffers = [vertex_layout];
        let make = |label: &str, fs_entry: &str, role: MaterialRole, blend: Blend| {
            let p = role.params();
            helpers::make_pipeline(
                device,
                &pipeline_layout,
                &shader,
                color_format,
                &PipelineSpec {
                    label,
                    vs_entry: "vs_model",
                    fs_entry,
                    buffers: &buffers,
                    blend: helpers::blend_state(blend),
                    depth_write: p.depth_write && blend == Blend::Opaque,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    cull_mode: match blend {
                        Blend::Opaque => Some(wgpu::Face::Back),
                        _ => None,
                    },
                },
            )
        };
        let pipelines = [
            make("mesh_standard", "fs_standard", MaterialRole::Standard, Blend::Opaque),
            make("mesh_glass", "fs_glass", MaterialRole::Glass, Blend::Transparent),
            make("mesh_dynamic", "fs_dynamic", MaterialRole::DynamicSurface, Blend::Opaque),
            make("mesh_overlay", "fs_dynamic", MaterialRole::DynamicSurface, Blend::Additive),
        ];

        let frame_buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh_frame_uniforms"),
            size: std::mem::size_of::<MeshFrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_frame_bg"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buf.as_entire_binding(),
            }],
        });

        let material_bufs = MaterialRole::ALL.map(|role| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_material_uniforms"),
                contents: bytemuck::bytes_of(&MaterialUniforms::for_role(role)),
                usage: wgpu::BufferUsages::UNIFORM,
            })
        });
        let material_bgs = [0usize, 1, 2].map(|i| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("mesh_material_bg"),
                layout: &material_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: material_bufs[i].as_entire_binding(),
                }],
            })
        });

        Self {
            pipelines,
            frame_buf,
            frame_bg,
            tex_layout,
            tex_bg: None,
            tex_bound: None,
            material_bgs,
            _material_bufs: material_bufs,
        }
    }

    /// Bind the reflection source and the video surface; no-op when unchanged.
    pub(crate) fn bind_textures(
        &mut self,
        device: &wgpu::Device,
        sampler: &wgpu::Sampler,
        env: &TextureHandle,
        video: &TextureHandle,
    ) {
        let same = self
            .tex_bound
            .as_ref()
            .is_some_and(|(e, v)| Rc::ptr_eq(e, env) && Rc::ptr_eq(v, video));
        if same {
            return;
        }
        self.tex_bg = Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_tex_bg"),
            layout: &self.tex_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&env.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&video.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
        self.tex_bound = Some((env.clone(), video.clone()));
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, uniforms: &MeshFrameUniforms) {
        queue.write_buffer(&self.frame_buf, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, model: &GpuModel) {
        let Some(tex_bg) = &self.tex_bg else {
            return;
        };
        rpass.set_bind_group(0, &self.frame_bg, &[]);
        rpass.set_bind_group(1, tex_bg, &[]);
        for pass in &model.passes {
            let Some(mesh) = model.meshes.get(pass.mesh) else {
                continue;
            };
            if mesh.index_count == 0 {
                continue;
            }
            rpass.set_pipeline(&self.pipelines[pipeline_slot(pass.role, pass.blend)]);
            rpass.set_bind_group(2, &self.material_bgs[pass.role.index()], &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buf.slice(..));
            rpass.set_index_buffer(mesh.index_buf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}
