/// Crossfade progress. `Fading::mix` rises from 0 to 1 over the fade duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FadeState {
    Idle,
    Fading { mix: f32 },
}

/// Result of advancing a fade by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    pub state: FadeState,
    /// Blend factor to upload this frame.
    pub mix: f32,
    /// The fade just finished; "next" must be promoted to "current".
    pub completed: bool,
}

impl FadeState {
    pub fn step(self, dt_sec: f32, duration_sec: f32) -> FadeStep {
        match self {
            FadeState::Idle => FadeStep {
                state: FadeState::Idle,
                mix: 0.0,
                completed: false,
            },
            FadeState::Fading { mix } => {
                let inc = if duration_sec > 0.0 {
                    dt_sec.max(0.0) / duration_sec
                } else {
                    1.0
                };
                let mix = (mix + inc).min(1.0);
                if mix >= 1.0 {
                    FadeStep {
                        state: FadeState::Idle,
                        mix: 0.0,
                        completed: true,
                    }
                } else {
                    FadeStep {
                        state: FadeState::Fading { mix },
                        mix,
                        completed: false,
                    }
                }
            }
        }
    }
}

/// A named texture taking part in the fade.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<T> {
    pub name: String,
    pub texture: T,
}

/// What a fade request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeRequest {
    /// Nothing was showing yet; the texture became current without a fade.
    Initial,
    Started,
    /// A fade was in flight toward something else; it now heads here.
    Retargeted,
    /// Already showing (or already fading to) this texture.
    Unchanged,
}

/// Current/next background pair plus the fade between them.
#[derive(Debug, Clone)]
pub struct Crossfade<T> {
    current: Option<Layer<T>>,
    next: Option<Layer<T>>,
    state: FadeState,
    duration_sec: f32,
}

impl<T: Clone> Crossfade<T> {
    pub fn new(duration_sec: f32) -> Self {
        Self {
            current: None,
            next: None,
            state: FadeState::Idle,
            duration_sec,
        }
    }

    pub fn current(&self) -> Option<&Layer<T>> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Layer<T>> {
        self.next.as_ref()
    }

    /// The most recently requested texture; drives reflections right away.
    pub fn latest(&self) -> Option<&Layer<T>> {
        self.next.as_ref().or(self.current.as_ref())
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    pub fn is_fading(&self) -> bool {
        matches!(self.state, FadeState::Fading { .. })
    }

    pub fn mix(&self) -> f32 {
        match self.state {
            FadeState::Idle => 0.0,
            FadeState::Fading { mix } => mix,
        }
    }

    /// Show `layer` immediately with no fade.
    pub fn set_initial(&mut self, layer: Layer<T>) {
        self.next = Some(layer.clone());
        self.current = Some(layer);
        self.state = FadeState::Idle;
    }

    /// Begin fading to `layer`. A request during a fade replaces the pending
    /// target and restarts the blend from 0 against it.
    pub fn start(&mut self, layer: Layer<T>) -> FadeRequest {
        let Some(current) = &self.current else {
            self.set_initial(layer);
            return FadeRequest::Initial;
        };
        match self.state {
            FadeState::Idle if current.name == layer.name => FadeRequest::Unchanged,
            FadeState::Fading { .. }
                if self.next.as_ref().is_some_and(|n| n.name == layer.name) =>
            {
                FadeRequest::Unchanged
            }
            FadeState::Idle => {
                self.next = Some(layer);
                self.state = FadeState::Fading { mix: 0.0 };
                FadeRequest::Started
            }
            FadeState::Fading { .. } => {
                self.next = Some(layer);
                self.state = FadeState::Fading { mix: 0.0 };
                FadeRequest::Retargeted
            }
        }
    }

    /// Advance by `dt_sec`; returns the blend factor for this frame.
    pub fn advance(&mut self, dt_sec: f32) -> FadeStep {
        let step = self.state.step(dt_sec, self.duration_sec);
        self.state = step.state;
        if step.completed {
            if let Some(next) = &self.next {
                self.current = Some(next.clone());
            }
        }
        step
    }
}
