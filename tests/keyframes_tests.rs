// Host-side tests for the scroll keyframe interpolator.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}
mod keyframes {
    include!("../src/keyframes.rs");
}

use input::TargetRotation;
use keyframes::*;

fn two_frames() -> Vec<Keyframe> {
    vec![
        Keyframe::new(1.0, 0.0, 0.0, 0.0),
        Keyframe::new(4.0, 2.0, -1.0, 3.0),
    ]
}

fn site_frames() -> Vec<Keyframe> {
    vec![
        Keyframe::new(1.0, 0.0, 0.0, 0.0),
        Keyframe::new(4.0, 2.5, 0.0, 1.0),
        Keyframe::new(7.0, 2.0, 0.0, 0.0),
        Keyframe::new(5.2, 1.5, -1.15, -3.0),
        Keyframe::new(1.0, 0.0, 0.0, -3.0),
    ]
}

fn between(v: f32, a: f32, b: f32) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    v >= lo - 1e-5 && v <= hi + 1e-5
}

#[test]
fn smoothstep_is_symmetric_and_clamped() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
    assert_eq!(smoothstep(-2.0), 0.0);
    assert_eq!(smoothstep(3.0), 1.0);
    assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-6);
}

#[test]
fn midpoint_of_two_frames_gives_half_zoom() {
    let k = sample(&two_frames(), smoothstep(0.5)).expect("two keyframes");
    assert!((k.zoom - 2.5).abs() < 1e-6);
    assert!((k.y_shift - 1.0).abs() < 1e-6);
}

#[test]
fn endpoints_match_first_and_last_keyframes() {
    let frames = site_frames();
    assert_eq!(sample(&frames, 0.0), Some(frames[0]));
    let last = sample(&frames, 1.0).expect("sample");
    assert!((last.zoom - frames[4].zoom).abs() < 1e-6);
    assert!((last.rot_y - frames[4].rot_y).abs() < 1e-6);
}

#[test]
fn interpolation_never_overshoots_neighbours() {
    let frames = site_frames();
    let segments = (frames.len() - 1) as f32;
    for step in 0..=200 {
        let t = step as f32 / 200.0;
        let k = sample(&frames, t).expect("sample");
        let scaled = t * segments;
        let i0 = (scaled.floor() as usize).min(frames.len() - 1);
        let i1 = (i0 + 1).min(frames.len() - 1);
        let (a, b) = (frames[i0], frames[i1]);
        assert!(between(k.zoom, a.zoom, b.zoom), "zoom at t={}", t);
        assert!(between(k.y_shift, a.y_shift, b.y_shift), "y_shift at t={}", t);
        assert!(between(k.rot_x, a.rot_x, b.rot_x), "rot_x at t={}", t);
        assert!(between(k.rot_y, a.rot_y, b.rot_y), "rot_y at t={}", t);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    let frames = two_frames();
    assert_eq!(sample(&frames, -1.0), Some(frames[0]));
    assert_eq!(sample(&frames, 7.0), sample(&frames, 1.0));
}

#[test]
fn fewer_than_two_keyframes_leave_pose_alone() {
    assert_eq!(sample(&[], 0.5), None);
    assert_eq!(sample(&[Keyframe::new(3.0, 1.0, 0.0, 0.0)], 0.5), None);

    let fit = ModelFit::default();
    let mut empty = KeyframeInterpolator::new(Vec::new());
    assert!(empty.step(1.0, TargetRotation::default(), &fit).is_none());
    let mut single = KeyframeInterpolator::new(vec![Keyframe::new(3.0, 1.0, 0.0, 0.0)]);
    assert!(single.step(1.0, TargetRotation::default(), &fit).is_none());
}

#[test]
fn scroll_progress_is_smoothed_not_jumped() {
    let mut interp = KeyframeInterpolator::new(two_frames());
    let fit = ModelFit::default();
    interp.step(1.0, TargetRotation::default(), &fit);
    assert!((interp.progress() - 0.12).abs() < 1e-6);
    for _ in 0..400 {
        interp.step(1.0, TargetRotation::default(), &fit);
    }
    assert!((interp.progress() - 1.0).abs() < 1e-4);
}

#[test]
fn pose_scales_fit_and_shifts_by_half_height() {
    let mut interp = KeyframeInterpolator::new(two_frames());
    let fit = ModelFit {
        base_scale: 0.5,
        base_position: glam::Vec3::new(0.0, -1.0, 0.0),
        bottom_shift: 0.25,
    };
    let mut pose = None;
    for _ in 0..500 {
        pose = interp.step(1.0, TargetRotation::default(), &fit);
    }
    let pose = pose.expect("pose");
    assert!((pose.scale - 2.0).abs() < 1e-3);
    assert!((pose.position.y - (-1.0 + 0.5)).abs() < 1e-3);
}

#[test]
fn pointer_lean_adds_on_top_of_keyframe_rotation() {
    let frames = vec![
        Keyframe::new(1.0, 0.0, 0.0, 0.0),
        Keyframe::new(1.0, 0.0, 0.0, 0.0),
    ];
    let mut interp = KeyframeInterpolator::new(frames);
    let lean = TargetRotation { x: 1.0, y: -0.5 };
    let first = interp
        .step(0.0, lean, &ModelFit::default())
        .expect("pose");
    assert!((first.rotation.x - 0.4 * 0.08).abs() < 1e-6);
    for _ in 0..500 {
        interp.step(0.0, lean, &ModelFit::default());
    }
    let settled = interp.rotation();
    assert!((settled.x - 0.4).abs() < 1e-3);
    assert!((settled.y + 0.2).abs() < 1e-3);
}
