use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::config::ParallaxConfig;
use crate::dom::{self, Listener};
use crate::motion::frame::{FrameLoop, RafLoop};
use crate::motion::parallax::{Bounds, LayerParams, LayerPose, ParallaxScene};

const CONTAINER_SELECTOR: &str = "[data-parallax]";
const GALLERY_SELECTOR: &str = "[data-parallax-gallery]";

/// The hero image stack, wired to pointer and resize events.
pub struct HeroParallax {
    frames: RafLoop,
    _listeners: Vec<Listener>,
}

fn measure(container: &Element) -> Bounds {
    let rect = container.get_bounding_client_rect();
    Bounds {
        width: rect.width(),
        height: rect.height(),
    }
}

fn apply_pose(layer: &HtmlElement, pose: &LayerPose) {
    dom::set_style(layer, "transform", &pose.transform());
    dom::set_style(layer, "opacity", &format!("{:.3}", pose.opacity));
    dom::set_style(layer, "z-index", &pose.z_index.to_string());
}

impl HeroParallax {
    /// Finds the hero container and its gallery. Returns `None` when either
    /// is missing or the gallery has no images.
    pub fn attach(config: &ParallaxConfig) -> Option<Self> {
        let Some(container) = dom::query(CONTAINER_SELECTOR) else {
            debug!("no {} on page, parallax inert", CONTAINER_SELECTOR);
            return None;
        };
        let Some(gallery) = container.query_selector(GALLERY_SELECTOR).ok().flatten() else {
            debug!("no {} in parallax container, parallax inert", GALLERY_SELECTOR);
            return None;
        };

        let layers: Vec<HtmlElement> = dom::query_all_in(&gallery, "img")
            .into_iter()
            .filter_map(|img| img.dyn_into::<HtmlElement>().ok())
            .collect();
        let params = layers
            .iter()
            .enumerate()
            .map(|(index, img)| {
                let dataset = img.dataset();
                LayerParams::from_attrs(index, config, |name| dataset.get(name))
            })
            .collect();

        let Some(scene) = ParallaxScene::new(params, measure(&container)) else {
            debug!("parallax gallery has no images, parallax inert");
            return None;
        };
        info!("Parallax attached with {} layers", scene.len());
        let scene = Rc::new(RefCell::new(scene));

        let frames = {
            let scene = Rc::clone(&scene);
            RafLoop::new(move |_timestamp| {
                let poses = scene.borrow_mut().frame();
                for (layer, pose) in layers.iter().zip(&poses) {
                    apply_pose(layer, pose);
                }
            })
        };

        let mut listeners = Vec::new();
        {
            let scene = Rc::clone(&scene);
            let target = container.clone();
            listeners.push(Listener::passive(&container, "pointermove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let rect = target.get_bounding_client_rect();
                    scene.borrow_mut().pointer_move(
                        f64::from(event.client_x()) - rect.left(),
                        f64::from(event.client_y()) - rect.top(),
                    );
                }
            }));
        }
        {
            let scene = Rc::clone(&scene);
            listeners.push(Listener::passive(&container, "pointerleave", move |_| {
                scene.borrow_mut().pointer_leave();
            }));
        }
        if let Some(window) = web_sys::window() {
            let scene = Rc::clone(&scene);
            let target = container.clone();
            listeners.push(Listener::passive(&window, "resize", move |_| {
                scene.borrow_mut().set_bounds(measure(&target));
            }));
        }

        Some(Self {
            frames,
            _listeners: listeners,
        })
    }

    /// Starts the frame loop and keeps it running for the life of the page.
    pub fn run_forever(self) {
        self.frames.start();
        std::mem::forget(self);
    }
}
