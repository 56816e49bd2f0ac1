// Host-side tests for GLB parsing and model fitting.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod error {
    include!("../src/error.rs");
}
mod input {
    include!("../src/input.rs");
}
mod keyframes {
    include!("../src/keyframes.rs");
}
mod materials {
    include!("../src/materials.rs");
}
mod model {
    include!("../src/model.rs");
}

use error::SceneError;
use glam::Vec3;
use keyframes::ModelPose;
use materials::MaterialRole;
use model::*;

/// Assemble a binary glTF container from a JSON document and an optional
/// binary chunk.
fn glb(json: &str, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut bin = bin.map(|b| b.to_vec());
    if let Some(b) = bin.as_mut() {
        while b.len() % 4 != 0 {
            b.push(0);
        }
    }
    let total = 12 + 8 + json.len() + bin.as_ref().map_or(0, |b| 8 + b.len());
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
    out.extend_from_slice(&json);
    if let Some(b) = bin {
        out.extend_from_slice(&(b.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x004E_4942u32.to_le_bytes());
        out.extend_from_slice(&b);
    }
    out
}

fn triangle_glb(material: &str) -> Vec<u8> {
    let positions: [f32; 9] = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let bin: Vec<u8> = positions.iter().flat_map(|f| f.to_le_bytes()).collect();
    let json = format!(
        r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": [0]}}],
  "nodes": [{{"mesh": 0, "translation": [0.0, 1.0, 0.0]}}],
  "meshes": [{{"name": "Body", "primitives": [{{"attributes": {{"POSITION": 0}}, "material": 0}}]}}],
  "materials": [{{"name": "{}"}}],
  "buffers": [{{"byteLength": 36}}],
  "bufferViews": [{{"buffer": 0, "byteOffset": 0, "byteLength": 36}}],
  "accessors": [{{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [2.0, 1.0, 0.0]}}]
}}"#,
        material
    );
    glb(&json, Some(&bin))
}

#[test]
fn parses_triangle_with_baked_node_transform() {
    let model = parse_glb(&triangle_glb("Glass_Body")).expect("valid glb");
    assert_eq!(model.meshes.len(), 1);
    let mesh = &model.meshes[0];
    assert_eq!(mesh.name, "Body");
    assert_eq!(mesh.material_name, "Glass_Body");
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    assert_eq!(mesh.vertices[2].position, [0.0, 2.0, 0.0]);
    assert_eq!(model.bounds.min, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(model.bounds.max, Vec3::new(2.0, 2.0, 0.0));
}

#[test]
fn missing_normals_are_generated() {
    let model = parse_glb(&triangle_glb("metal")).expect("valid glb");
    for v in &model.meshes[0].vertices {
        let n = Vec3::from_array(v.normal);
        assert!((n - Vec3::Z).length() < 1e-5);
        assert_eq!(v.uv, [0.0, 0.0]);
    }
}

#[test]
fn meshes_are_classified_by_material_name() {
    let glass = parse_glb(&triangle_glb("Glass_Body")).expect("glb");
    assert_eq!(glass.meshes[0].assignment.base, MaterialRole::Glass);
    let swirl = parse_glb(&triangle_glb("swirl_core")).expect("glb");
    assert_eq!(swirl.meshes[0].assignment.base, MaterialRole::DynamicSurface);
    let plain = parse_glb(&triangle_glb("metal")).expect("glb");
    assert_eq!(plain.assignments()[0].base, MaterialRole::Standard);
}

#[test]
fn fit_scales_longest_side_to_two_units() {
    let model = parse_glb(&triangle_glb("metal")).expect("glb");
    let fit = model.fit();
    assert!((fit.base_scale - 1.0).abs() < 1e-6);
    assert!((fit.bottom_shift - 0.5).abs() < 1e-6);
    assert_eq!(fit.base_position, Vec3::ZERO);
}

#[test]
fn empty_bounds_fit_without_dividing_by_zero() {
    let fit = fit_bounds(&Bounds::empty());
    assert!(fit.base_scale.is_finite());
    assert_eq!(fit.bottom_shift, 0.0);
}

#[test]
fn model_matrix_recentres_before_scaling() {
    let center = Vec3::new(1.0, 1.5, 0.0);
    let pose = ModelPose {
        scale: 2.0,
        position: Vec3::new(0.0, 0.5, 0.0),
        rotation: Default::default(),
    };
    let m = model_matrix(&pose, center);
    assert!((m.transform_point3(center) - pose.position).length() < 1e-5);
    let edge = m.transform_point3(center + Vec3::X);
    assert!((edge - Vec3::new(2.0, 0.5, 0.0)).length() < 1e-5);
}

#[test]
fn garbage_bytes_are_a_model_error() {
    let err = parse_glb(b"definitely not a model").unwrap_err();
    assert!(matches!(err, SceneError::Model(_)));
}

#[test]
fn document_without_meshes_is_empty() {
    let err = parse_glb(&glb(r#"{"asset":{"version":"2.0"}}"#, None)).unwrap_err();
    assert!(matches!(err, SceneError::EmptyModel));
}

#[test]
fn smooth_normals_ignore_out_of_range_indices() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
    let normals = smooth_normals(&positions, &[0, 1, 2, 0, 1, 9]);
    assert_eq!(normals.len(), 3);
    assert!((normals[0] - Vec3::Z).length() < 1e-6);
}
