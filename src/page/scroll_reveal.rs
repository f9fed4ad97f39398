//! Reveals headings and copy as they scroll into view.
//!
//! Text nodes are wrapped in `.split-line > .split-text` so the stylesheet
//! can slide the line up from under its mask once `reveal-active` lands.

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node,
};

use crate::config::{ScrollRevealConfig, REDUCED_MOTION_QUERY};
use crate::dom;

const TARGET_SELECTOR: &str = "[data-split], h1, h2, h3, h4, p, .case-title, .supporting-text-case, .faq-title, .supporting-text-faq, .grid-title, .grid-content span, .label-text, .label-num, .case-section-title, .btn-box-casetudy, [data-on-scroll]";
const CTA_SELECTOR: &str = ".btn-box, .btn-chat, .btn-box-frq, .btn-box-faq, .btn-box-cta";
const REVIEW_CARD_SELECTOR: &str = ".review-card";
/// Revealed as a whole, never wrapped.
const NO_SPLIT_SELECTOR: &str = ".btn-box-casetudy, .label-num";
const SPLIT_MARKUP_SELECTOR: &str = ".split-line, .split-text";

/// Buttons and review cards animate on their own.
pub fn is_target(inside_cta: bool, inside_review_card: bool) -> bool {
    !inside_cta && !inside_review_card
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SplitCheck {
    pub no_split: bool,
    pub has_split_markup: bool,
    pub already_split: bool,
    pub has_text: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitAction {
    /// Leave the node as it is.
    Skip,
    /// Record the node as handled without wrapping anything.
    MarkOnly,
    Wrap,
}

pub fn split_action(check: SplitCheck) -> SplitAction {
    if check.no_split || check.has_split_markup || check.already_split {
        SplitAction::Skip
    } else if !check.has_text {
        SplitAction::MarkOnly
    } else {
        SplitAction::Wrap
    }
}

fn inside(element: &Element, selector: &str) -> bool {
    element.closest(selector).ok().flatten().is_some()
}

fn check(element: &HtmlElement) -> SplitCheck {
    SplitCheck {
        no_split: element.matches(NO_SPLIT_SELECTOR).unwrap_or(false),
        has_split_markup: element
            .query_selector(SPLIT_MARKUP_SELECTOR)
            .ok()
            .flatten()
            .is_some(),
        already_split: element.dataset().get("splitInit").is_some(),
        has_text: element
            .text_content()
            .map_or(false, |text| !text.trim().is_empty()),
    }
}

fn wrap_children(element: &HtmlElement) -> Option<()> {
    let document = dom::document()?;
    let line = document.create_element("span").ok()?;
    line.set_class_name("split-line");
    let text = document.create_element("span").ok()?;
    text.set_class_name("split-text");

    let children = element.child_nodes();
    let nodes: Vec<Node> = (0..children.length())
        .filter_map(|i| children.item(i))
        .collect();
    for node in nodes {
        text.append_child(&node).ok()?;
    }
    line.append_child(&text).ok()?;
    element.append_child(&line).ok()?;
    Some(())
}

fn split(element: &HtmlElement) {
    match split_action(check(element)) {
        SplitAction::Skip => {}
        SplitAction::MarkOnly => {
            let _ = element.dataset().set("splitInit", "true");
        }
        SplitAction::Wrap => {
            let _ = element.dataset().set("splitInit", "true");
            let _ = wrap_children(element);
        }
    }
}

/// Splits every target and adds `reveal-active` the first time each one
/// crosses the visibility threshold. Does nothing under reduced motion.
pub fn install(config: &ScrollRevealConfig) {
    if dom::matches_media(REDUCED_MOTION_QUERY) {
        debug!("reduced motion, scroll reveal disabled");
        return;
    }

    let targets: Vec<HtmlElement> = dom::query_all(TARGET_SELECTOR)
        .into_iter()
        .filter(|el| is_target(inside(el, CTA_SELECTOR), inside(el, REVIEW_CARD_SELECTOR)))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    if targets.is_empty() {
        return;
    }
    for target in &targets {
        split(target);
    }

    let on_intersect = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("reveal-active");
                    observer.unobserve(&target);
                }
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let Ok(observer) =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
    else {
        debug!("IntersectionObserver unavailable, scroll reveal disabled");
        return;
    };
    // The observer calls back for the rest of the page's life.
    on_intersect.forget();

    for target in &targets {
        observer.observe(target);
    }
    debug!("scroll reveal watching {} nodes", targets.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_and_review_cards_are_not_targets() {
        assert!(is_target(false, false));
        assert!(!is_target(true, false));
        assert!(!is_target(false, true));
    }

    #[test]
    fn plain_text_is_wrapped() {
        let check = SplitCheck {
            has_text: true,
            ..Default::default()
        };
        assert_eq!(split_action(check), SplitAction::Wrap);
    }

    #[test]
    fn empty_node_is_marked_but_not_wrapped() {
        assert_eq!(split_action(SplitCheck::default()), SplitAction::MarkOnly);
    }

    #[test]
    fn existing_markup_and_excluded_nodes_are_left_alone() {
        let base = SplitCheck {
            has_text: true,
            ..Default::default()
        };
        for check in [
            SplitCheck { no_split: true, ..base },
            SplitCheck { has_split_markup: true, ..base },
            SplitCheck { already_split: true, ..base },
        ] {
            assert_eq!(split_action(check), SplitAction::Skip);
        }
    }

    #[test]
    fn reveal_threshold_defaults_to_a_fifth() {
        assert_eq!(ScrollRevealConfig::default().threshold, 0.2);
    }
}
