/// Frame smoothing, lighting and layout tuning constants.
///
/// These express intended behavior (smoothing factors, clamp limits, asset
/// locations) and keep magic numbers out of the per-frame code.
// Background crossfade length (seconds)
pub const FADE_DURATION_SEC: f32 = 0.22;

// Per-frame exponential smoothing factors: value += (target - value) * factor
pub const SCROLL_SMOOTHING: f32 = 0.12;
pub const ROTATION_SMOOTHING: f32 = 0.08;
pub const LIGHT_INTENSITY_SMOOTHING: f32 = 0.1;
pub const LIGHT_COLOR_SMOOTHING: f32 = 0.15;

// How much of the pointer tilt is added on top of the keyframe rotation
pub const POINTER_ROTATION_STRENGTH: f32 = 0.4;

// Pointer speed -> light mapping
pub const POINTER_SPEED_NORM_PX_PER_SEC: f32 = 1000.0;
pub const POINTER_MIN_DT_SEC: f32 = 0.001;
pub const POINTER_MAX_ANGLE: f32 = std::f32::consts::FRAC_PI_3;
pub const LIGHT_INTENSITY_MIN: f32 = 0.4;
pub const LIGHT_INTENSITY_MAX: f32 = 2.5;
pub const LIGHT_INTENSITY_DEFAULT: f32 = 0.7;

// Light colors (hex channels scaled to 0..1)
pub const LIGHT_COLOR_SLOW: [f32; 3] = [0x8f as f32 / 255.0, 0xd9 as f32 / 255.0, 1.0];
pub const LIGHT_COLOR_FAST: [f32; 3] = [1.0, 1.0, 1.0];
pub const DIR_LIGHT_POSITION: [f32; 3] = [5.0, 10.0, 7.5];

// Render target budget: width * height never exceeds this
pub const MAX_RENDER_PIXELS: u32 = 1_000_000;

// Camera
pub const CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_Z: f32 = 5.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.05;

// Background plane placement (world units)
pub const BG_PLANE_SIZE: f32 = 10.0;
pub const BG_PLANE_Z: f32 = -6.0;

// Longest side of the loaded model after fitting
pub const MODEL_FIT_SIZE: f32 = 2.0;

// Material render order (lower draws first)
pub const RENDER_ORDER_STANDARD: i32 = 0;
pub const RENDER_ORDER_DYNAMIC: i32 = 10;
pub const RENDER_ORDER_GLASS: i32 = 20;

// Asset conventions
pub const IMAGES_DIR: &str = "images";
pub const VIDEOS_DIR: &str = "videos";
pub const MODELS_DIR: &str = "models";
pub const DEFAULT_TEXTURE: &str = "1-min.jpg";
pub const MODEL_FILE: &str = "ohm4.glb";
pub const VIDEO_FILE: &str = "swirl-loop.mp4";

// DOM ids
pub const MOUNT_ID: &str = "three-root";
pub const SECTIONS_ROOT_ID: &str = "sections-root";
pub const CONTEXT_LOST_ID: &str = "context-lost";
pub const CANVAS_CLASS: &str = "three-canvas";

/// Name of the optional diagnostics object on `window`.
pub const DEBUG_API: &str = "ohmDebug";
