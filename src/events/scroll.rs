use super::{ListenOptions, Listener, Subscriptions};
use crate::constants::SECTIONS_ROOT_ID;
use crate::dom;
use crate::scroll::{pick_scroller, ScrollMetrics};
use crate::site::{active_nav_key, centered_section, nav_item, section_scroll_top, NavItem};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Which container owns the page scroll.
#[derive(Clone)]
pub enum Scroller {
    Document,
    Element(web::Element),
}

impl Scroller {
    /// Prefer the element with the largest scrollable range among the
    /// sections root and its ancestors; fall back to the document.
    pub fn detect() -> Self {
        let Some(document) = dom::window_document() else {
            return Scroller::Document;
        };
        let mut elements: Vec<web::Element> = Vec::new();
        let mut cursor = document.get_element_by_id(SECTIONS_ROOT_ID);
        while let Some(el) = cursor {
            if el.tag_name().eq_ignore_ascii_case("html") {
                break;
            }
            cursor = el.parent_element();
            if is_scrollable_overflow(&el) {
                elements.push(el);
            }
        }

        let mut candidates = vec![Scroller::Document.metrics()];
        candidates.extend(elements.iter().map(element_metrics));
        match pick_scroller(&candidates) {
            Some(i) if i > 0 => Scroller::Element(elements[i - 1].clone()),
            _ => Scroller::Document,
        }
    }

    /// A specific scroll container; `None` if the element does not exist.
    pub fn by_id(id: &str) -> Option<Self> {
        dom::window_document()
            .and_then(|d| d.get_element_by_id(id))
            .map(Scroller::Element)
    }

    pub fn metrics(&self) -> ScrollMetrics {
        match self {
            Scroller::Document => document_metrics(),
            Scroller::Element(el) => element_metrics(el),
        }
    }

    pub fn progress(&self) -> f32 {
        self.metrics().progress()
    }

    pub fn event_target(&self) -> Option<web::EventTarget> {
        match self {
            Scroller::Document => web::window().map(|w| w.into()),
            Scroller::Element(el) => Some(el.clone().into()),
        }
    }

    /// Smooth-scroll so the content offset `top` sits at the top.
    pub fn scroll_to(&self, top: f64) {
        let opts = web::ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(web::ScrollBehavior::Smooth);
        match self {
            Scroller::Document => {
                if let Some(w) = web::window() {
                    w.scroll_to_with_scroll_to_options(&opts);
                }
            }
            Scroller::Element(el) => el.scroll_to_with_scroll_to_options(&opts),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Scroller::Document => "document".to_string(),
            Scroller::Element(el) => {
                let id = el.id();
                if id.is_empty() {
                    el.tag_name().to_lowercase()
                } else {
                    format!("#{}", id)
                }
            }
        }
    }
}

fn is_scrollable_overflow(el: &web::Element) -> bool {
    let Some(window) = web::window() else {
        return false;
    };
    let Ok(Some(style)) = window.get_computed_style(el) else {
        return false;
    };
    let overflow = style.get_property_value("overflow-y").unwrap_or_default();
    matches!(overflow.as_str(), "auto" | "scroll" | "overlay")
}

fn element_metrics(el: &web::Element) -> ScrollMetrics {
    ScrollMetrics {
        scroll_top: el.scroll_top() as f64,
        scroll_height: el.scroll_height() as f64,
        viewport_height: el.client_height() as f64,
    }
}

fn document_metrics() -> ScrollMetrics {
    let (_, vh) = dom::viewport_size();
    let scroll_top = web::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0);
    let scroll_height = dom::window_document()
        .and_then(|d| d.document_element())
        .map(|e| e.scroll_height() as f64)
        .unwrap_or(vh);
    ScrollMetrics {
        scroll_top,
        scroll_height,
        viewport_height: vh,
    }
}

/// Scroll progress and active nav section, refreshed on every scroll event of
/// the detected scroller. `on_active_change` fires whenever the active nav key
/// changes after the initial read.
pub struct ScrollTracker {
    scroller: Scroller,
    items: &'static [NavItem],
    target: Rc<RefCell<f32>>,
    active_key: Rc<RefCell<Option<&'static str>>>,
    subs: Subscriptions,
}

impl ScrollTracker {
    /// Track whichever scroller [`Scroller::detect`] picks.
    pub fn wire(
        items: &'static [NavItem],
        on_active_change: impl Fn(&'static str) + 'static,
    ) -> Self {
        Self::wire_with(Scroller::detect(), items, on_active_change)
    }

    pub fn wire_with(
        scroller: Scroller,
        items: &'static [NavItem],
        on_active_change: impl Fn(&'static str) + 'static,
    ) -> Self {
        log::info!("[scroll] source={}", scroller.describe());
        let target = Rc::new(RefCell::new(0.0_f32));
        let active_key: Rc<RefCell<Option<&'static str>>> = Rc::new(RefCell::new(None));
        let on_active_change: Rc<dyn Fn(&'static str)> = Rc::new(on_active_change);

        let refresh = {
            let scroller = scroller.clone();
            let target = target.clone();
            let active_key = active_key.clone();
            move || {
                let m = scroller.metrics();
                *target.borrow_mut() = m.progress();
                let navs = section_navs();
                let refs: Vec<Option<&str>> = navs.iter().map(|n| n.as_deref()).collect();
                let centered = centered_section(m.scroll_top, m.viewport_height, refs.len());
                let next = active_nav_key(&refs, centered, items);
                let prev = active_key.replace(next);
                if let (Some(_), Some(key)) = (prev, next) {
                    if prev != next {
                        on_active_change(key);
                    }
                }
            }
        };
        refresh();

        let mut subs = Subscriptions::default();
        if let Some(t) = scroller.event_target() {
            let on_scroll = refresh.clone();
            subs.push(Listener::with_options(
                &t,
                "scroll",
                ListenOptions {
                    passive: true,
                    once: false,
                },
                move |_| on_scroll(),
            ));
        }
        if let Some(w) = web::window() {
            let on_resize = refresh;
            subs.push(Listener::new(&w, "resize", move |_| on_resize()));
        }

        Self {
            scroller,
            items,
            target,
            active_key,
            subs,
        }
    }

    pub fn scroller(&self) -> &Scroller {
        &self.scroller
    }

    pub fn active_key(&self) -> Option<&'static str> {
        *self.active_key.borrow()
    }

    /// Scroll to the section tagged `key` and make it active right away.
    /// Returns false when no section carries that key.
    pub fn navigate_to(&self, key: &str) -> bool {
        let Some(item) = nav_item(self.items, key) else {
            return false;
        };
        let navs = section_navs();
        let refs: Vec<Option<&str>> = navs.iter().map(|n| n.as_deref()).collect();
        let vh = self.scroller.metrics().viewport_height;
        let Some(top) = section_scroll_top(&refs, item.key, vh) else {
            return false;
        };
        self.scroller.scroll_to(top);
        *self.active_key.borrow_mut() = Some(item.key);
        true
    }

    /// Accessor handed to the scene.
    pub fn accessor(&self) -> impl Fn() -> f32 + 'static {
        let t = self.target.clone();
        move || *t.borrow()
    }

    pub fn dispose(&mut self) {
        self.subs.dispose();
    }
}

/// `data-nav` of every `section.section` under the sections root, in order.
fn section_navs() -> Vec<Option<String>> {
    let Some(root) = dom::window_document().and_then(|d| d.get_element_by_id(SECTIONS_ROOT_ID))
    else {
        return Vec::new();
    };
    let Ok(list) = root.query_selector_all("section.section") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .map(|el| el.get_attribute("data-nav"))
        .collect()
}
