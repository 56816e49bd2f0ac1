/// Optional diagnostics sink supplied by the host page.
///
/// Mirrors the page's `debugApi` object: `set` records a keyed value (render
/// size, asset URLs, material counts) and `push_err` appends an error line.
pub trait DebugSink {
    fn set(&self, key: &str, value: &str);
    fn push_err(&self, message: &str);
}

/// Routes scene diagnostics to `log` and, when present, to a [`DebugSink`].
///
/// The sink is never required; every report is logged regardless.
#[derive(Clone, Default)]
pub struct Reporter {
    sink: Option<std::rc::Rc<dyn DebugSink>>,
}

impl Reporter {
    pub fn new(sink: Option<std::rc::Rc<dyn DebugSink>>) -> Self {
        Self { sink }
    }

    pub fn has_sink(&self) -> bool {
        self.sink.is_some()
    }

    pub fn set(&self, key: &str, value: &str) {
        log::debug!("[scene] {}={}", key, value);
        if let Some(s) = &self.sink {
            s.set(key, value);
        }
    }

    pub fn error(&self, message: &str) {
        log::error!("[scene] {}", message);
        if let Some(s) = &self.sink {
            s.push_err(message);
        }
    }
}
