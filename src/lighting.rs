use super::constants::{
    LIGHT_COLOR_FAST, LIGHT_COLOR_SLOW, LIGHT_COLOR_SMOOTHING, LIGHT_INTENSITY_DEFAULT,
    LIGHT_INTENSITY_SMOOTHING,
};
use super::input::PointerState;
use glam::Vec3;

/// Ambient + directional light pair eased toward what the pointer asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub ambient_color: Vec3,
    pub directional_color: Vec3,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient_intensity: LIGHT_INTENSITY_DEFAULT,
            directional_intensity: 1.0,
            ambient_color: Vec3::ONE,
            directional_color: Vec3::ONE,
        }
    }
}

/// Fast pointer motion whitens the light; slow motion tints it cyan.
#[inline]
pub fn target_color(speed_norm: f32) -> Vec3 {
    let slow = Vec3::from_array(LIGHT_COLOR_SLOW);
    let fast = Vec3::from_array(LIGHT_COLOR_FAST);
    slow.lerp(fast, speed_norm.clamp(0.0, 1.0))
}

impl LightRig {
    pub fn update(&mut self, pointer: &PointerState) {
        let target = pointer.light_intensity;
        self.ambient_intensity +=
            (target - self.ambient_intensity) * LIGHT_INTENSITY_SMOOTHING;
        self.directional_intensity +=
            (target - self.directional_intensity) * LIGHT_INTENSITY_SMOOTHING;

        let color = target_color(pointer.light_speed);
        self.ambient_color = self.ambient_color.lerp(color, LIGHT_COLOR_SMOOTHING);
        self.directional_color = self.directional_color.lerp(color, LIGHT_COLOR_SMOOTHING);
    }
}
