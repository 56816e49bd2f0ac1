use super::constants::{RENDER_ORDER_DYNAMIC, RENDER_ORDER_GLASS, RENDER_ORDER_STANDARD};

/// How a mesh is shaded, decided once from its authored material name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    Standard,
    Glass,
    DynamicSurface,
}

impl MaterialRole {
    pub const ALL: [MaterialRole; 3] = [
        MaterialRole::Standard,
        MaterialRole::Glass,
        MaterialRole::DynamicSurface,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            MaterialRole::Standard => 0,
            MaterialRole::Glass => 1,
            MaterialRole::DynamicSurface => 2,
        }
    }

    #[inline]
    pub fn params(self) -> &'static MaterialParams {
        &MATERIAL_TABLE[self.index()]
    }
}

/// Blend behaviour of a material pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    Opaque,
    Transparent,
    Additive,
}

/// Shading constants per role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub roughness: f32,
    pub metalness: f32,
    pub transmission: f32,
    pub ior: f32,
    pub thickness: f32,
    pub env_intensity: f32,
    pub emissive_intensity: f32,
    pub render_order: i32,
    pub depth_write: bool,
    pub blend: Blend,
}

pub const MATERIAL_TABLE: [MaterialParams; 3] = [
    // Standard
    MaterialParams {
        roughness: 0.5,
        metalness: 0.0,
        transmission: 0.0,
        ior: 1.5,
        thickness: 0.0,
        env_intensity: 1.0,
        emissive_intensity: 0.0,
        render_order: RENDER_ORDER_STANDARD,
        depth_write: true,
        blend: Blend::Opaque,
    },
    // Glass
    MaterialParams {
        roughness: 0.16,
        metalness: 0.0,
        transmission: 1.0,
        ior: 1.58,
        thickness: 2.2,
        env_intensity: 1.9,
        emissive_intensity: 0.0,
        render_order: RENDER_ORDER_GLASS,
        depth_write: false,
        blend: Blend::Transparent,
    },
    // DynamicSurface
    MaterialParams {
        roughness: 0.85,
        metalness: 0.0,
        transmission: 0.0,
        ior: 1.5,
        thickness: 0.0,
        env_intensity: 1.0,
        emissive_intensity: 0.85,
        render_order: RENDER_ORDER_DYNAMIC,
        depth_write: true,
        blend: Blend::Opaque,
    },
];

/// Roles for one mesh: a base material and, when a mesh is both glass and a
/// video surface, the video drawn additively on top of the glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialAssignment {
    pub base: MaterialRole,
    pub overlay: Option<MaterialRole>,
}

impl MaterialAssignment {
    pub fn roles(&self) -> smallvec::SmallVec<[MaterialRole; 2]> {
        let mut out = smallvec::SmallVec::new();
        out.push(self.base);
        if let Some(o) = self.overlay {
            out.push(o);
        }
        out
    }
}

const GLASS_TOKEN: &str = "glass";
const DYNAMIC_TOKEN: &str = "swirl";

/// Classify a mesh from the names of the materials it was authored with.
/// Matching is a case-insensitive substring test.
pub fn classify<'a>(material_names: impl IntoIterator<Item = &'a str>) -> MaterialAssignment {
    let mut glass = false;
    let mut dynamic = false;
    for name in material_names {
        let n = name.to_lowercase();
        glass |= n.contains(GLASS_TOKEN);
        dynamic |= n.contains(DYNAMIC_TOKEN);
    }
    match (glass, dynamic) {
        (true, true) => MaterialAssignment {
            base: MaterialRole::Glass,
            overlay: Some(MaterialRole::DynamicSurface),
        },
        (true, false) => MaterialAssignment {
            base: MaterialRole::Glass,
            overlay: None,
        },
        (false, true) => MaterialAssignment {
            base: MaterialRole::DynamicSurface,
            overlay: None,
        },
        (false, false) => MaterialAssignment {
            base: MaterialRole::Standard,
            overlay: None,
        },
    }
}

/// Draw pass for one role of one mesh. Overlays are drawn additively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPass {
    pub mesh: usize,
    pub role: MaterialRole,
    pub blend: Blend,
    pub render_order: i32,
}

/// Expand assignments into draw passes sorted by render order (stable, so
/// meshes keep authored order within a role).
pub fn draw_passes(assignments: &[MaterialAssignment]) -> Vec<DrawPass> {
    let mut passes = Vec::with_capacity(assignments.len());
    for (mesh, a) in assignments.iter().enumerate() {
        let p = a.base.params();
        passes.push(DrawPass {
            mesh,
            role: a.base,
            blend: p.blend,
            render_order: p.render_order,
        });
        if let Some(o) = a.overlay {
            passes.push(DrawPass {
                mesh,
                role: o,
                blend: Blend::Additive,
                // after the glass it decorates
                render_order: p.render_order + 1,
            });
        }
    }
    passes.sort_by_key(|d| d.render_order);
    passes
}

/// Meshes assigned per role (for the `m_glass`/`m_swirl` diagnostics).
pub fn count_roles(assignments: &[MaterialAssignment]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for a in assignments {
        for r in a.roles() {
            counts[r.index()] += 1;
        }
    }
    counts
}
