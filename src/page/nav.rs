use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::config::NavConfig;
use crate::dom::{self, Listener};

pub fn closes_on_resize(viewport_width: f64, config: &NavConfig) -> bool {
    viewport_width > config.close_above_width
}

pub fn closes_on_key(key: &str) -> bool {
    key == "Escape"
}

struct MobileNav {
    toggle: Element,
    menu: Element,
}

impl MobileNav {
    fn is_open(&self) -> bool {
        self.toggle.get_attribute("aria-expanded").as_deref() == Some("true")
    }

    fn set_open(&self, open: bool) {
        let _ = self
            .toggle
            .set_attribute("aria-expanded", if open { "true" } else { "false" });
        if let Some(body) = dom::document().and_then(|d| d.body()) {
            let _ = body.class_list().toggle_with_force("menu-open", open);
        }
    }

    /// Clicks that land on neither the menu nor its toggle.
    fn is_outside(&self, event: &Event) -> bool {
        !dom::contains_target(&self.menu, event.target())
            && !dom::contains_target(&self.toggle, event.target())
    }
}

pub fn install(config: &NavConfig) {
    let (Some(toggle), Some(document)) = (dom::query(".nav-toggle"), dom::document()) else {
        return;
    };
    let Some(menu) = document.get_element_by_id("site-menu") else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let links = dom::query_all_in(&menu, "a");
    let nav = Rc::new(MobileNav { toggle, menu });

    {
        let toggle = nav.toggle.clone();
        let nav = Rc::clone(&nav);
        Listener::new(&toggle, "click", move |_| nav.set_open(!nav.is_open())).forget();
    }

    for link in links {
        let nav = Rc::clone(&nav);
        Listener::new(&link, "click", move |_| nav.set_open(false)).forget();
    }

    {
        let nav = Rc::clone(&nav);
        Listener::new(&document, "click", move |event| {
            if nav.is_outside(&event) {
                nav.set_open(false);
            }
        })
        .forget();
    }

    {
        let nav = Rc::clone(&nav);
        Listener::new(&window, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if closes_on_key(&event.key()) {
                    nav.set_open(false);
                }
            }
        })
        .forget();
    }

    {
        let target = window.clone();
        let config = config.clone();
        Listener::passive(&window, "resize", move |_| {
            let width = target
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(0.0);
            if closes_on_resize(width, &config) {
                nav.set_open(false);
            }
        })
        .forget();
    }
}
