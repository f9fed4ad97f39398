use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::config::{RevealConfig, REDUCED_MOTION_QUERY};
use crate::dom;

const BUTTON_SELECTORS: &str =
    ".btn-box, .btn-chat, .btn-box-casetudy, .btn-box-frq, .btn-box-faq, .btn-box-cta, .book-btn";

/// `--motion-delay` for the node at `index`: its declared delay, else a stagger.
pub fn motion_delay(index: usize, declared: Option<&str>, config: &RevealConfig) -> String {
    match declared.map(str::trim).filter(|d| !d.is_empty()) {
        Some(delay) => delay.to_string(),
        None => format!("{}ms", index as u32 * config.stagger_ms),
    }
}

/// Fades in `[data-reveal-on-load]` nodes once the first frame has painted.
pub fn install(config: &RevealConfig) {
    let nodes: Vec<HtmlElement> = dom::query_all("[data-reveal-on-load]")
        .into_iter()
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect();
    if nodes.is_empty() {
        return;
    }

    for node in &nodes {
        if node.matches(BUTTON_SELECTORS).unwrap_or(false) {
            let _ = node.class_list().add_1("motion-button");
        }
    }

    if dom::matches_media(REDUCED_MOTION_QUERY) {
        for node in &nodes {
            let _ = node.class_list().add_1("reveal-active");
        }
        return;
    }

    let config = config.clone();
    // Two frames so the initial hidden state is committed before the transition.
    dom::next_frame(move || {
        dom::next_frame(move || {
            for (index, node) in nodes.iter().enumerate() {
                let style = node.style();
                let inline = style.get_property_value("--motion-delay").unwrap_or_default();
                if inline.trim().is_empty() {
                    let declared = node.dataset().get("revealDelay");
                    let delay = motion_delay(index, declared.as_deref(), &config);
                    let _ = style.set_property("--motion-delay", &delay);
                }
                let _ = node.class_list().add_1("reveal-active");
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_delay_wins() {
        let config = RevealConfig::default();
        assert_eq!(motion_delay(4, Some("50ms"), &config), "50ms");
    }

    #[test]
    fn missing_delay_staggers_by_index() {
        let config = RevealConfig::default();
        assert_eq!(motion_delay(0, None, &config), "0ms");
        assert_eq!(motion_delay(3, Some("  "), &config), "360ms");
    }
}
