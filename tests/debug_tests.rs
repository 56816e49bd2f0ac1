// Host-side tests for diagnostics routing.

#![allow(dead_code)]
mod debug {
    include!("../src/debug.rs");
}

use debug::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    values: RefCell<Vec<(String, String)>>,
    errors: RefCell<Vec<String>>,
}

impl DebugSink for Recorder {
    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
    }

    fn push_err(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

#[test]
fn reports_reach_the_sink() {
    let rec = Rc::new(Recorder::default());
    let reporter = Reporter::new(Some(rec.clone() as Rc<dyn DebugSink>));
    assert!(reporter.has_sink());
    reporter.set("r", "1154x866");
    reporter.error("Texture failed: 9-min.jpg");
    assert_eq!(
        rec.values.borrow().as_slice(),
        &[("r".to_string(), "1154x866".to_string())]
    );
    assert_eq!(rec.errors.borrow().len(), 1);
}

#[test]
fn missing_sink_is_fine() {
    let reporter = Reporter::default();
    assert!(!reporter.has_sink());
    reporter.set("glb", "loaded");
    reporter.error("GLB load failed");
}

#[test]
fn clones_share_the_sink() {
    let rec = Rc::new(Recorder::default());
    let reporter = Reporter::new(Some(rec.clone() as Rc<dyn DebugSink>));
    let other = reporter.clone();
    other.error("WebGL context lost");
    assert_eq!(rec.errors.borrow()[0], "WebGL context lost");
}
