use super::constants::{
    LIGHT_INTENSITY_DEFAULT, LIGHT_INTENSITY_MAX, LIGHT_INTENSITY_MIN, POINTER_MAX_ANGLE,
    POINTER_MIN_DT_SEC, POINTER_SPEED_NORM_PX_PER_SEC,
};

/// Rotation the model should lean toward, in radians.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TargetRotation {
    pub x: f32,
    pub y: f32,
}

/// What the pointer asks of the scene. Written on pointer moves, read once
/// per frame; the scene side does all smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub target_rotation: TargetRotation,
    pub light_intensity: f32,
    /// Normalised pointer speed in [0, 1].
    pub light_speed: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            target_rotation: TargetRotation::default(),
            light_intensity: LIGHT_INTENSITY_DEFAULT,
            light_speed: 0.0,
        }
    }
}

/// Tracks the previous pointer sample so each move can be turned into a
/// speed and a lean direction.
#[derive(Debug, Clone, Copy)]
pub struct PointerTracker {
    last_x: f32,
    last_y: f32,
    last_time_ms: f64,
    pub state: PointerState,
}

impl PointerTracker {
    /// Start with the pointer parked at the viewport centre.
    pub fn new(viewport_w: f32, viewport_h: f32, now_ms: f64) -> Self {
        Self {
            last_x: viewport_w * 0.5,
            last_y: viewport_h * 0.5,
            last_time_ms: now_ms,
            state: PointerState::default(),
        }
    }

    pub fn on_move(
        &mut self,
        x: f32,
        y: f32,
        now_ms: f64,
        viewport_w: f32,
        viewport_h: f32,
    ) -> PointerState {
        let dt = (((now_ms - self.last_time_ms) / 1000.0) as f32).max(POINTER_MIN_DT_SEC);
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        let speed = (dx * dx + dy * dy).sqrt() / dt;

        self.last_x = x;
        self.last_y = y;
        self.last_time_ms = now_ms;

        let speed_norm = normalized_speed(speed);
        self.state = PointerState {
            target_rotation: lean_toward(x, y, viewport_w, viewport_h),
            light_intensity: intensity_for_speed(speed_norm),
            light_speed: speed_norm,
        };
        self.state
    }
}

#[inline]
pub fn normalized_speed(speed_px_per_sec: f32) -> f32 {
    (speed_px_per_sec / POINTER_SPEED_NORM_PX_PER_SEC).clamp(0.0, 1.0)
}

#[inline]
pub fn intensity_for_speed(speed_norm: f32) -> f32 {
    LIGHT_INTENSITY_MIN + (LIGHT_INTENSITY_MAX - LIGHT_INTENSITY_MIN) * speed_norm.clamp(0.0, 1.0)
}

/// Pointer offset from the viewport centre mapped to a lean. Screen Y grows
/// downward, so it is inverted for the X rotation.
#[inline]
pub fn lean_toward(x: f32, y: f32, viewport_w: f32, viewport_h: f32) -> TargetRotation {
    let nx = x / viewport_w.max(1.0) - 0.5;
    let ny = y / viewport_h.max(1.0) - 0.5;
    TargetRotation {
        x: -ny * POINTER_MAX_ANGLE,
        y: nx * POINTER_MAX_ANGLE,
    }
}
