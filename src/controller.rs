use super::crossfade::{Crossfade, FadeRequest, Layer};
use super::input::PointerState;
use super::keyframes::{Keyframe, KeyframeInterpolator, ModelFit, ModelPose};
use super::lighting::LightRig;

/// Render loop lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Uninitialized,
    Running,
    Disposed,
}

/// Everything the GPU side needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub mix: f32,
    /// The fade finished this frame; bind "next" as the new "current".
    pub fade_completed: bool,
    pub lights: LightRig,
    /// Set once a model is loaded.
    pub pose: Option<ModelPose>,
    pub draw: bool,
}

/// Per-frame scene state, independent of any rendering context.
///
/// `T` is whatever handle the renderer uses for a background texture.
pub struct SceneController<T> {
    state: LoopState,
    crossfade: Crossfade<T>,
    lights: LightRig,
    interpolator: KeyframeInterpolator,
    model: Option<ModelFit>,
    pose: ModelPose,
    context_lost: bool,
}

impl<T: Clone> SceneController<T> {
    pub fn new(keyframes: Vec<Keyframe>, fade_duration_sec: f32) -> Self {
        Self {
            state: LoopState::Uninitialized,
            crossfade: Crossfade::new(fade_duration_sec),
            lights: LightRig::default(),
            interpolator: KeyframeInterpolator::new(keyframes),
            model: None,
            pose: ModelPose::default(),
            context_lost: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Uninitialized {
            self.state = LoopState::Running;
        }
    }

    /// Returns false if it was already disposed.
    pub fn dispose(&mut self) -> bool {
        let was_live = self.state != LoopState::Disposed;
        self.state = LoopState::Disposed;
        was_live
    }

    pub fn crossfade(&self) -> &Crossfade<T> {
        &self.crossfade
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn pose(&self) -> &ModelPose {
        &self.pose
    }

    pub fn model_fit(&self) -> Option<&ModelFit> {
        self.model.as_ref()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn is_context_lost(&self) -> bool {
        self.context_lost
    }

    pub fn request_fade(&mut self, name: &str, texture: T) -> FadeRequest {
        self.crossfade.start(Layer {
            name: name.to_string(),
            texture,
        })
    }

    pub fn set_initial_background(&mut self, name: &str, texture: T) {
        self.crossfade.set_initial(Layer {
            name: name.to_string(),
            texture,
        });
    }

    /// The model arrived; its pose starts at the fitted base.
    pub fn set_model(&mut self, fit: ModelFit) {
        self.pose = ModelPose {
            scale: fit.base_scale,
            position: fit.base_position,
            ..self.pose
        };
        self.model = Some(fit);
    }

    pub fn mark_context_lost(&mut self) {
        self.context_lost = true;
    }

    /// One frame: fade, lights, pose, then decide whether to draw.
    ///
    /// `scroll_target` is only consulted when a model is loaded.
    pub fn frame(
        &mut self,
        dt_sec: f32,
        scroll_target: impl FnOnce() -> f32,
        pointer: &PointerState,
    ) -> FrameOutput {
        if self.state != LoopState::Running {
            return FrameOutput {
                mix: self.crossfade.mix(),
                fade_completed: false,
                lights: self.lights,
                pose: None,
                draw: false,
            };
        }

        let fade = self.crossfade.advance(dt_sec);
        self.lights.update(pointer);

        let pose = match &self.model {
            Some(fit) => {
                let target = scroll_target();
                if let Some(p) = self.interpolator.step(target, pointer.target_rotation, fit) {
                    self.pose = p;
                }
                Some(self.pose)
            }
            None => None,
        };

        FrameOutput {
            mix: fade.mix,
            fade_completed: fade.completed,
            lights: self.lights,
            pose,
            draw: !self.context_lost,
        }
    }
}
