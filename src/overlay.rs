use crate::constants::CONTEXT_LOST_ID;
use web_sys as web;

const CONTEXT_LOST_TEXT: &str = "Graphics context lost. Reload the page to continue.";

/// Show the "reload to continue" prompt, creating it if the page has none.
pub fn show_context_lost(document: &web::Document) {
    let el = match document.get_element_by_id(CONTEXT_LOST_ID) {
        Some(el) => el,
        None => {
            let Ok(el) = document.create_element("div") else {
                return;
            };
            el.set_id(CONTEXT_LOST_ID);
            el.set_text_content(Some(CONTEXT_LOST_TEXT));
            _ = el.set_attribute("role", "alert");
            if let Some(body) = document.body() {
                _ = body.append_child(&el);
            }
            el
        }
    };
    _ = el.class_list().remove_1("hidden");
    // fallback for pages without the CSS class
    _ = el.set_attribute("style", "");
}

pub fn hide_context_lost(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(CONTEXT_LOST_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}
