/// Failures the scene can run into. None of them cross the scene boundary:
/// they are reported through the debug [`Reporter`](super::debug::Reporter)
/// and the scene keeps running with whatever it already has.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("no window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("missing #{0}")]
    MissingElement(String),

    #[error("no GPU adapter available")]
    NoAdapter,

    #[error("GPU device request failed: {0}")]
    Device(String),

    #[error("surface creation failed: {0}")]
    Surface(String),

    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("texture failed: {0}")]
    Texture(String),

    #[error("GLB failed: {0}")]
    Model(#[from] gltf::Error),

    #[error("model has no binary buffer")]
    MissingBuffer,

    #[error("model has no renderable geometry")]
    EmptyModel,

    #[error("js error: {0}")]
    Js(String),
}

impl SceneError {
    /// Stringify an arbitrary JS exception value.
    pub fn js(value: impl std::fmt::Debug) -> Self {
        SceneError::Js(format!("{:?}", value))
    }
}
