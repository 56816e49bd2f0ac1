use super::constants::{POINTER_ROTATION_STRENGTH, ROTATION_SMOOTHING, SCROLL_SMOOTHING};
use super::input::TargetRotation;
use glam::Vec3;

/// One scroll "view" of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Multiplier on the fitted base scale.
    pub zoom: f32,
    /// Multiplier on the model's half height, applied upward.
    pub y_shift: f32,
    pub rot_x: f32,
    pub rot_y: f32,
}

impl Keyframe {
    pub const fn new(zoom: f32, y_shift: f32, rot_x: f32, rot_y: f32) -> Self {
        Self {
            zoom,
            y_shift,
            rot_x,
            rot_y,
        }
    }

    pub fn lerp(&self, other: &Keyframe, f: f32) -> Keyframe {
        Keyframe {
            zoom: lerp(self.zoom, other.zoom, f),
            y_shift: lerp(self.y_shift, other.y_shift, f),
            rot_x: lerp(self.rot_x, other.rot_x, f),
            rot_y: lerp(self.rot_y, other.rot_y, f),
        }
    }
}

/// Transform applied to the model each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPose {
    pub scale: f32,
    pub position: Vec3,
    pub rotation: TargetRotation,
}

impl Default for ModelPose {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: Vec3::ZERO,
            rotation: TargetRotation::default(),
        }
    }
}

/// Size facts about the loaded model that keyframes are relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelFit {
    pub base_scale: f32,
    pub base_position: Vec3,
    /// Half the fitted model height; `y_shift` is expressed in these units.
    pub bottom_shift: f32,
}

impl Default for ModelFit {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            base_position: Vec3::ZERO,
            bottom_shift: 0.0,
        }
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + (b - a) * f
}

/// Cubic ease with zero slope at both ends.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Exponential smoothing step: `value += (target - value) * factor`.
#[inline]
pub fn approach(value: f32, target: f32, factor: f32) -> f32 {
    value + (target - value) * factor
}

/// Blend the keyframe sequence at eased progress `t`.
///
/// Returns `None` when there is nothing to blend between (fewer than two
/// keyframes); callers then leave the pose untouched.
pub fn sample(keyframes: &[Keyframe], t: f32) -> Option<Keyframe> {
    if keyframes.len() < 2 {
        return None;
    }
    let last = keyframes.len() - 1;
    let scaled = t.clamp(0.0, 1.0) * last as f32;
    let idx0 = (scaled.floor() as usize).min(last);
    let idx1 = (idx0 + 1).min(last);
    let f = (scaled - idx0 as f32).clamp(0.0, 1.0);
    Some(keyframes[idx0].lerp(&keyframes[idx1], f))
}

/// Turns a raw scroll target into a model pose, frame by frame.
///
/// Scroll is smoothed first (0.12/frame) and eased; the resulting rotation
/// is then smoothed a second time (0.08/frame) so scroll-driven motion reads
/// heavier than pointer tilt.
#[derive(Debug, Clone)]
pub struct KeyframeInterpolator {
    keyframes: Vec<Keyframe>,
    progress: f32,
    rotation: TargetRotation,
}

impl KeyframeInterpolator {
    pub fn new(keyframes: Vec<Keyframe>) -> Self {
        Self {
            keyframes,
            progress: 0.0,
            rotation: TargetRotation::default(),
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Smoothed (not yet eased) scroll progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn rotation(&self) -> TargetRotation {
        self.rotation
    }

    /// Advance one frame. `None` leaves the model pose as it was.
    pub fn step(
        &mut self,
        scroll_target: f32,
        pointer: TargetRotation,
        fit: &ModelFit,
    ) -> Option<ModelPose> {
        self.progress = approach(self.progress, scroll_target.clamp(0.0, 1.0), SCROLL_SMOOTHING);
        let base = sample(&self.keyframes, smoothstep(self.progress))?;

        let target_x = base.rot_x + pointer.x * POINTER_ROTATION_STRENGTH;
        let target_y = base.rot_y + pointer.y * POINTER_ROTATION_STRENGTH;
        self.rotation.x = approach(self.rotation.x, target_x, ROTATION_SMOOTHING);
        self.rotation.y = approach(self.rotation.y, target_y, ROTATION_SMOOTHING);

        Some(ModelPose {
            scale: fit.base_scale * base.zoom,
            position: fit.base_position + Vec3::new(0.0, fit.bottom_shift * base.y_shift, 0.0),
            rotation: self.rotation,
        })
    }
}
