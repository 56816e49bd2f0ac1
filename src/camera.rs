use super::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

/// Fixed perspective camera looking down -Z at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Aspect follows the viewport, not the (possibly downscaled) render size.
    pub fn set_viewport(&mut self, css_w: f64, css_h: f64) {
        let w = if css_w > 0.0 { css_w } else { 1.0 };
        let h = if css_h > 0.0 { css_h } else { 1.0 };
        self.aspect = (w / h) as f32;
    }
}

/// Render size for a viewport, uniformly scaled down so the area stays within
/// `max_pixels`. Downscaled sizes are floored so rounding never overshoots the
/// budget. Never returns a zero dimension.
pub fn render_resolution(css_w: f64, css_h: f64, max_pixels: u32) -> (u32, u32) {
    let w = if css_w > 0.0 { css_w } else { 1.0 };
    let h = if css_h > 0.0 { css_h } else { 1.0 };
    let area = w * h;
    let budget = max_pixels.max(1) as f64;
    let scale = if area > budget {
        (budget / area).sqrt()
    } else {
        1.0
    };
    let (rw, rh) = if scale < 1.0 {
        ((w * scale).floor(), (h * scale).floor())
    } else {
        (w.round(), h.round())
    };
    (rw.max(1.0) as u32, rh.max(1.0) as u32)
}
