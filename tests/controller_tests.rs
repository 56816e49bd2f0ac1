// Host-side tests for the per-frame scene controller.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod controller {
    include!("../src/controller.rs");
}
mod crossfade {
    include!("../src/crossfade.rs");
}
mod input {
    include!("../src/input.rs");
}
mod keyframes {
    include!("../src/keyframes.rs");
}
mod lighting {
    include!("../src/lighting.rs");
}

use controller::*;
use crossfade::FadeRequest;
use input::PointerState;
use keyframes::{Keyframe, ModelFit};

fn running() -> SceneController<&'static str> {
    let mut c = SceneController::new(
        vec![
            Keyframe::new(1.0, 0.0, 0.0, 0.0),
            Keyframe::new(4.0, 0.0, 0.0, 0.0),
        ],
        0.22,
    );
    c.start();
    c
}

#[test]
fn frame_without_model_still_draws() {
    let mut c = running();
    let mut scroll_read = false;
    let out = c.frame(
        0.016,
        || {
            scroll_read = true;
            1.0
        },
        &PointerState::default(),
    );
    assert!(out.draw);
    assert!(out.pose.is_none());
    assert!(!scroll_read);
}

#[test]
fn nothing_draws_before_start_or_after_dispose() {
    let mut c: SceneController<&str> = SceneController::new(Vec::new(), 0.22);
    assert_eq!(c.state(), LoopState::Uninitialized);
    assert!(!c.frame(0.016, || 0.0, &PointerState::default()).draw);

    c.start();
    assert_eq!(c.state(), LoopState::Running);
    assert!(c.dispose());
    assert!(!c.dispose());
    assert_eq!(c.state(), LoopState::Disposed);
    c.start();
    assert_eq!(c.state(), LoopState::Disposed);
    assert!(!c.frame(0.016, || 0.0, &PointerState::default()).draw);
}

#[test]
fn loaded_model_follows_scroll() {
    let mut c = running();
    c.set_model(ModelFit {
        base_scale: 2.0,
        ..ModelFit::default()
    });
    assert_eq!(c.pose().scale, 2.0);
    let mut last = None;
    for _ in 0..500 {
        last = c.frame(0.016, || 1.0, &PointerState::default()).pose;
    }
    let pose = last.expect("pose once model loaded");
    assert!((pose.scale - 8.0).abs() < 1e-2);
}

#[test]
fn fade_progresses_through_frames() {
    let mut c = running();
    assert_eq!(c.request_fade("a", "tex-a"), FadeRequest::Initial);
    assert_eq!(c.request_fade("b", "tex-b"), FadeRequest::Started);
    let out = c.frame(0.11, || 0.0, &PointerState::default());
    assert!((out.mix - 0.5).abs() < 1e-5);
    assert!(!out.fade_completed);
    let out = c.frame(0.2, || 0.0, &PointerState::default());
    assert!(out.fade_completed);
    assert_eq!(c.crossfade().current().map(|l| l.texture), Some("tex-b"));
}

#[test]
fn initial_background_skips_the_fade() {
    let mut c = running();
    c.set_initial_background("1-min.jpg", "tex");
    assert!(!c.crossfade().is_fading());
    assert_eq!(c.request_fade("1-min.jpg", "tex"), FadeRequest::Unchanged);
}

#[test]
fn lights_update_every_frame() {
    let mut c = running();
    let pointer = PointerState {
        light_intensity: 2.5,
        light_speed: 1.0,
        ..PointerState::default()
    };
    let before = c.lights().ambient_intensity;
    let out = c.frame(0.016, || 0.0, &pointer);
    assert!(out.lights.ambient_intensity > before);
}

#[test]
fn context_loss_pauses_drawing() {
    let mut c = running();
    c.mark_context_lost();
    assert!(c.is_context_lost());
    let out = c.frame(0.016, || 0.0, &PointerState::default());
    assert!(!out.draw);
    assert_eq!(c.state(), LoopState::Running);
}
