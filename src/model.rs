use super::constants::MODEL_FIT_SIZE;
use super::error::SceneError;
use super::keyframes::{ModelFit, ModelPose};
use super::materials::{classify, MaterialAssignment};
use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// One glTF primitive, baked into model space.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub material_name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub assignment: MaterialAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }
}

/// Parsed model: flattened primitives plus their joint bounds.
#[derive(Debug, Clone)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    pub bounds: Bounds,
}

impl ModelData {
    pub fn assignments(&self) -> Vec<MaterialAssignment> {
        self.meshes.iter().map(|m| m.assignment).collect()
    }

    /// Centre on the bounding box and scale the longest side to the fit size.
    pub fn fit(&self) -> ModelFit {
        fit_bounds(&self.bounds)
    }
}

pub fn fit_bounds(bounds: &Bounds) -> ModelFit {
    let size = bounds.size();
    let max_side = size.max_element();
    let max_side = if max_side > 0.0 { max_side } else { 1.0 };
    let base_scale = MODEL_FIT_SIZE / max_side;
    ModelFit {
        base_scale,
        base_position: Vec3::ZERO,
        bottom_shift: size.y * 0.5 * base_scale,
    }
}

/// World matrix for a pose. The model is recentred on `center` before it is
/// scaled and rotated (XYZ order) about its own middle.
pub fn model_matrix(pose: &ModelPose, center: Vec3) -> Mat4 {
    let rot = Quat::from_euler(EulerRot::XYZ, pose.rotation.x, pose.rotation.y, 0.0);
    Mat4::from_scale_rotation_translation(Vec3::splat(pose.scale), rot, pose.position)
        * Mat4::from_translation(-center)
}

/// Parse a binary glTF (GLB). Node transforms are baked into vertices; each
/// primitive becomes a mesh classified by its material name.
pub fn parse_glb(bytes: &[u8]) -> Result<ModelData, SceneError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let blob = gltf.blob.as_deref();
    if blob.is_none() && gltf.document.buffers().len() > 0 {
        return Err(SceneError::MissingBuffer);
    }

    let mut meshes = Vec::new();
    let scene = gltf
        .document
        .default_scene()
        .or_else(|| gltf.document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            visit_node(&node, Mat4::IDENTITY, blob, &mut meshes);
        }
    }
    if meshes.is_empty() {
        return Err(SceneError::EmptyModel);
    }

    let mut bounds = Bounds::empty();
    for m in &meshes {
        for v in &m.vertices {
            bounds.extend(Vec3::from_array(v.position));
        }
    }
    Ok(ModelData { meshes, bounds })
}

fn visit_node(node: &gltf::Node, parent: Mat4, blob: Option<&[u8]>, out: &mut Vec<MeshData>) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let name = mesh.name().unwrap_or("unnamed");
        for primitive in mesh.primitives() {
            if let Some(m) = read_primitive(name, &primitive, world, blob) {
                out.push(m);
            }
        }
    }
    for child in node.children() {
        visit_node(&child, world, blob, out);
    }
}

fn read_primitive(
    mesh_name: &str,
    primitive: &gltf::Primitive,
    world: Mat4,
    blob: Option<&[u8]>,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| match buffer.source() {
        gltf::buffer::Source::Bin => blob,
        gltf::buffer::Source::Uri(_) => None,
    });
    let positions: Vec<Vec3> = reader.read_positions()?.map(Vec3::from_array).collect();
    if positions.is_empty() {
        return None;
    }
    let indices: Vec<u32> = match reader.read_indices() {
        Some(i) => i.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(n) => n.map(Vec3::from_array).collect(),
        None => smooth_normals(&positions, &indices),
    };
    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(t) => t.into_f32().collect(),
        None => Vec::new(),
    };

    let normal_mat = Mat3::from_mat4(world).inverse().transpose();
    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let n = normals.get(i).copied().unwrap_or(Vec3::Z);
            Vertex {
                position: world.transform_point3(*p).to_array(),
                normal: (normal_mat * n).normalize_or_zero().to_array(),
                uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            }
        })
        .collect();

    let material_name = primitive.material().name().unwrap_or("").to_string();
    Some(MeshData {
        name: mesh_name.to_string(),
        assignment: classify([material_name.as_str()]),
        material_name,
        vertices,
        indices,
    })
}

/// Area-weighted vertex normals for primitives authored without them.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter().map(|n| n.normalize_or_zero()).collect()
}
