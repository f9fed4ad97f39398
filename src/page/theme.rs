use std::cell::Cell;
use std::rc::Rc;

use web_sys::Element;

use crate::config::ThemeConfig;
use crate::dom::{self, Listener};

const MANAGED_CLASSES: [&str; 2] = ["theme-cta", "theme-footer"];

/// Share of a section currently on screen. Sections taller than the
/// viewport count as fully visible once they fill it.
pub fn visible_ratio(top: f64, bottom: f64, height: f64, viewport_height: f64) -> f64 {
    let visible = (bottom.min(viewport_height) - top.max(0.0)).max(0.0);
    if visible <= 0.0 {
        return 0.0;
    }
    let height = if height > 0.0 { height } else { viewport_height };
    let divisor = height.min(viewport_height);
    if divisor > 0.0 {
        visible / divisor
    } else {
        0.0
    }
}

/// Body theme for the given visibilities. The footer takes precedence.
pub fn pick_theme(cta_ratio: f64, footer_ratio: f64, config: &ThemeConfig) -> Option<&'static str> {
    if footer_ratio > config.footer_threshold {
        Some("theme-footer")
    } else if cta_ratio > config.cta_threshold {
        Some("theme-cta")
    } else {
        None
    }
}

fn ratio_of(section: Option<&Element>, viewport_height: f64) -> f64 {
    section
        .map(|s| {
            let rect = s.get_bounding_client_rect();
            visible_ratio(rect.top(), rect.bottom(), rect.height(), viewport_height)
        })
        .unwrap_or(0.0)
}

fn apply(cta: Option<&Element>, footer: Option<&Element>, config: &ThemeConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(body) = window.document().and_then(|d| d.body()) else {
        return;
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .filter(|h| *h > 0.0)
        .or_else(|| {
            window
                .document()
                .and_then(|d| d.document_element())
                .map(|e| f64::from(e.client_height()))
        })
        .unwrap_or(0.0);

    let classes = body.class_list();
    for class in MANAGED_CLASSES {
        let _ = classes.remove_1(class);
    }
    let theme = pick_theme(
        ratio_of(cta, viewport_height),
        ratio_of(footer, viewport_height),
        config,
    );
    if let Some(theme) = theme {
        let _ = classes.add_1(theme);
    }
}

/// Switches the body background as the CTA or footer scrolls into view.
pub fn install(config: &ThemeConfig) {
    let cta = dom::query(".cta");
    let footer = dom::query(".footer");
    if cta.is_none() && footer.is_none() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };

    let pending = Rc::new(Cell::new(false));
    let config = config.clone();
    // Coalesces bursts of scroll events into one update per frame.
    let schedule = Rc::new(move || {
        if pending.replace(true) {
            return;
        }
        let pending = Rc::clone(&pending);
        let (cta, footer, config) = (cta.clone(), footer.clone(), config.clone());
        dom::next_frame(move || {
            pending.set(false);
            apply(cta.as_ref(), footer.as_ref(), &config);
        });
    });

    for event in ["scroll", "resize", "orientationchange"] {
        let schedule = Rc::clone(&schedule);
        Listener::passive(&window, event, move |_| schedule()).forget();
    }
    schedule();
}
