use wasm_bindgen::JsCast;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use crate::dom::{self, Listener};

/// Leading number of a computed CSS length such as `"12.5px"`.
pub fn parse_px(value: &str) -> f64 {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0.0)
}

/// Scroll position that puts a section's top just under the fixed header.
pub fn scroll_destination(section_top: f64, page_offset: f64, header_offset: f64) -> f64 {
    (section_top + page_offset - header_offset).round().max(0.0)
}

fn header_offset(window: &web_sys::Window) -> f64 {
    let Some(header) = dom::query(".navbar") else {
        return 0.0;
    };
    let margin = window
        .get_computed_style(&header)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("margin-bottom").ok())
        .map(|m| parse_px(&m))
        .unwrap_or(0.0);
    header.get_bounding_client_rect().height() + margin
}

fn scroll_to_anchor(link: &Element) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(href) = link.get_attribute("href").filter(|h| h.starts_with('#')) else {
        return false;
    };
    let Some(section) = dom::query(&href) else {
        return false;
    };

    let page_offset = window.page_y_offset().unwrap_or(0.0);
    let top = scroll_destination(
        section.get_bounding_client_rect().top(),
        page_offset,
        header_offset(&window),
    );
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}

/// Smooth-scrolls in-page `#anchor` links, clearing the sticky header.
pub fn install() {
    for link in dom::query_all(r##"a[href^="#"]"##) {
        if link.get_attribute("href").as_deref() == Some("#") {
            continue;
        }
        Listener::new(&link, "click", move |event| {
            let Some(link) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            if scroll_to_anchor(&link) {
                event.prevent_default();
            }
        })
        .forget();
    }
}
