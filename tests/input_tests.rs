// Host-side tests for pointer tracking and the light rig it drives.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod lighting {
    include!("../src/lighting.rs");
}

use input::*;
use lighting::*;

#[test]
fn still_pointer_gives_minimum_intensity() {
    let mut t = PointerTracker::new(1000.0, 800.0, 0.0);
    let s = t.on_move(500.0, 400.0, 16.0, 1000.0, 800.0);
    assert_eq!(s.light_intensity, 0.4);
    assert_eq!(s.light_speed, 0.0);
}

#[test]
fn fast_pointer_caps_at_maximum() {
    let mut t = PointerTracker::new(1000.0, 800.0, 0.0);
    let s = t.on_move(10_000.0, 400.0, 1.0, 1000.0, 800.0);
    assert!((s.light_intensity - 2.5).abs() < 1e-6);
    assert!(s.light_intensity <= 2.5);
    assert_eq!(s.light_speed, 1.0);
}

#[test]
fn intensity_is_monotonic_in_speed() {
    let mut prev = intensity_for_speed(0.0);
    for i in 1..=20 {
        let v = intensity_for_speed(normalized_speed(i as f32 * 60.0));
        assert!(v >= prev);
        assert!(v <= 2.5);
        prev = v;
    }
}

#[test]
fn zero_time_delta_uses_one_millisecond_floor() {
    let mut t = PointerTracker::new(1000.0, 800.0, 100.0);
    // 1 px in "0" ms reads as 1 px per ms = 1000 px/s.
    let s = t.on_move(501.0, 400.0, 100.0, 1000.0, 800.0);
    assert!(s.light_intensity.is_finite());
    assert!((s.light_speed - 1.0).abs() < 1e-6);
}

#[test]
fn half_normalised_speed_maps_linearly() {
    assert!((intensity_for_speed(0.5) - 1.45).abs() < 1e-6);
    assert_eq!(normalized_speed(500.0), 0.5);
    assert_eq!(normalized_speed(-3.0), 0.0);
}

#[test]
fn lean_follows_pointer_offset() {
    let centre = lean_toward(500.0, 400.0, 1000.0, 800.0);
    assert_eq!(centre, TargetRotation { x: 0.0, y: 0.0 });

    let right = lean_toward(1000.0, 400.0, 1000.0, 800.0);
    assert!(right.y > 0.0);
    assert!((right.y - 0.5 * constants::POINTER_MAX_ANGLE).abs() < 1e-6);

    // Pointer above centre tips the model back.
    let up = lean_toward(500.0, 0.0, 1000.0, 800.0);
    assert!(up.x > 0.0);
}

#[test]
fn default_state_matches_resting_light() {
    let s = PointerState::default();
    assert_eq!(s.light_intensity, constants::LIGHT_INTENSITY_DEFAULT);
    assert_eq!(s.target_rotation, TargetRotation::default());
}

#[test]
fn lights_ease_toward_pointer_intensity() {
    let mut rig = LightRig::default();
    let pointer = PointerState {
        target_rotation: TargetRotation::default(),
        light_intensity: 2.5,
        light_speed: 1.0,
    };
    rig.update(&pointer);
    assert!((rig.ambient_intensity - (0.7 + (2.5 - 0.7) * 0.1)).abs() < 1e-5);
    for _ in 0..300 {
        rig.update(&pointer);
    }
    assert!((rig.directional_intensity - 2.5).abs() < 1e-3);
    assert!((rig.ambient_color - glam::Vec3::ONE).length() < 1e-3);
}

#[test]
fn slow_pointer_tints_light_cyan() {
    let slow = target_color(0.0);
    assert!((slow.x - 0x8f as f32 / 255.0).abs() < 1e-6);
    assert!((slow.y - 0xd9 as f32 / 255.0).abs() < 1e-6);
    assert_eq!(slow.z, 1.0);
    assert_eq!(target_color(1.0), glam::Vec3::ONE);
    assert_eq!(target_color(9.0), glam::Vec3::ONE);
}
