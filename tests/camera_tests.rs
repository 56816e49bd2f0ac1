// Host-side tests for the camera and render budget.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::*;
use constants::MAX_RENDER_PIXELS;

#[test]
fn oversized_viewport_is_scaled_into_budget() {
    let (w, h) = render_resolution(4000.0, 3000.0, MAX_RENDER_PIXELS);
    assert!(w as u64 * h as u64 <= MAX_RENDER_PIXELS as u64);
    let aspect = w as f64 / h as f64;
    assert!((aspect - 4.0 / 3.0).abs() < 0.01, "aspect {}", aspect);
    assert_eq!((w, h), (1154, 866));
}

#[test]
fn small_viewport_is_untouched() {
    assert_eq!(render_resolution(800.0, 600.0, MAX_RENDER_PIXELS), (800, 600));
    assert_eq!(render_resolution(1000.0, 1000.0, MAX_RENDER_PIXELS), (1000, 1000));
}

#[test]
fn degenerate_viewport_never_yields_zero() {
    assert_eq!(render_resolution(0.0, 0.0, MAX_RENDER_PIXELS), (1, 1));
    let (w, h) = render_resolution(100_000.0, 1.0, MAX_RENDER_PIXELS);
    assert!(w >= 1 && h >= 1);
    assert!(w as u64 * h as u64 <= MAX_RENDER_PIXELS as u64);
}

#[test]
fn default_camera_matches_scene_setup() {
    let cam = Camera::default();
    assert_eq!(cam.eye, glam::Vec3::new(0.0, 0.0, 5.0));
    assert!((cam.fovy_radians - 45f32.to_radians()).abs() < 1e-6);
    assert_eq!(cam.znear, 0.1);
    assert_eq!(cam.zfar, 1000.0);
}

#[test]
fn aspect_follows_css_viewport() {
    let mut cam = Camera::default();
    cam.set_viewport(1920.0, 1080.0);
    assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-5);
    cam.set_viewport(0.0, 0.0);
    assert_eq!(cam.aspect, 1.0);
}

#[test]
fn origin_projects_to_screen_centre() {
    let cam = Camera::default();
    let clip = cam.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
