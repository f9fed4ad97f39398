use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, FocusEvent, HtmlElement, MouseEvent};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config::{MarqueeConfig, REDUCED_MOTION_QUERY};
use crate::data::Testimonial;
use crate::dom::{self, Listener};
use crate::motion::frame::RafLoop;
use crate::motion::marquee::{translate_x, Marquee, MarqueeState};
use crate::view::{duplicate_strip, testimonial_card, RenderNode};

#[derive(Properties, PartialEq)]
pub struct TestimonialsProps {
    pub items: Vec<Testimonial>,
    #[prop_or_default]
    pub config: MarqueeConfig,
}

/// Where the strip is in its build: a single copy is rendered and measured
/// first, then it either stays static or is doubled and set scrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Layout {
    Measuring,
    Static,
    Scrolling { base_width: f64 },
}

/// Build decision once the single copy has been measured.
fn choose_layout(
    card_count: usize,
    width: f64,
    is_mobile: bool,
    reduced_motion: bool,
    config: &MarqueeConfig,
) -> Layout {
    if is_mobile || (reduced_motion && config.respect_reduced_motion) {
        return Layout::Static;
    }
    if card_count > 1 && width > 0.0 {
        Layout::Scrolling { base_width: width }
    } else {
        Layout::Static
    }
}

/// Wires pause/resume to pointer and focus moving in and out of `container`.
fn interaction_listeners(container: &web_sys::Element, marquee: &Rc<Marquee<RafLoop>>) -> Vec<Listener> {
    let pause = |event: &'static str| {
        let marquee = Rc::clone(marquee);
        Listener::new(container, event, move |_| marquee.pointer_enter())
    };
    let resume = |event: &'static str| {
        let marquee = Rc::clone(marquee);
        let inside = container.clone();
        Listener::new(container, event, move |event: Event| {
            let next = if let Some(e) = event.dyn_ref::<FocusEvent>() {
                e.related_target()
            } else if let Some(e) = event.dyn_ref::<MouseEvent>() {
                e.related_target()
            } else {
                None
            };
            marquee.pointer_leave(dom::contains_target(&inside, next));
        })
    };
    vec![
        pause("pointerover"),
        pause("focusin"),
        resume("pointerout"),
        resume("focusout"),
    ]
}

#[function_component(Testimonials)]
pub fn testimonials(props: &TestimonialsProps) -> Html {
    let track_ref = use_node_ref();
    let layout = use_state(|| Layout::Measuring);
    let generation = use_state(|| 0u32);

    // Any viewport change rebuilds the strip from scratch.
    {
        let layout = layout.clone();
        let generation = generation.clone();
        use_event_with_window("resize", move |_: Event| {
            layout.set(Layout::Measuring);
            generation.set(generation.wrapping_add(1));
        });
    }

    {
        let track_ref = track_ref.clone();
        let layout_handle = layout.clone();
        let card_count = props.items.len();
        let config = props.config.clone();
        use_effect_with_deps(
            move |(current, _generation): &(Layout, u32)| {
                let mut teardown: Option<(Rc<Marquee<RafLoop>>, Vec<Listener>)> = None;

                if let Some(track) = track_ref.cast::<HtmlElement>() {
                    match *current {
                        Layout::Measuring => {
                            dom::set_style(&track, "transform", "none");
                            let width = f64::from(track.scroll_width());
                            let next = choose_layout(
                                card_count,
                                width,
                                dom::matches_media(config.mobile_query),
                                dom::matches_media(REDUCED_MOTION_QUERY),
                                &config,
                            );
                            debug!("testimonial strip measured at {}px, {:?}", width, next);
                            layout_handle.set(next);
                        }
                        Layout::Static => {}
                        Layout::Scrolling { base_width } => {
                            let state = MarqueeState::new(card_count, base_width, config.speed_px_per_sec);
                            let render_target = track.clone();
                            let marquee = Rc::new(Marquee::<RafLoop>::new(state, move |position| {
                                dom::set_style(&render_target, "transform", &translate_x(position));
                            }));
                            let listeners = track
                                .parent_element()
                                .map(|container| interaction_listeners(&container, &marquee))
                                .unwrap_or_default();

                            let marquee_start = Rc::clone(&marquee);
                            dom::next_frame(move || {
                                dom::set_style(&track, "transform", "translateX(0)");
                                marquee_start.start();
                            });
                            teardown = Some((marquee, listeners));
                        }
                    }
                }

                move || {
                    if let Some((marquee, listeners)) = teardown {
                        drop(listeners);
                        marquee.dispose();
                    }
                }
            },
            (*layout, *generation),
        );
    }

    if props.items.is_empty() {
        return html! {};
    }

    let cards: Vec<RenderNode> = props
        .items
        .iter()
        .map(|item| testimonial_card(item, props.config.show_rating))
        .collect();
    let strip = match *layout {
        Layout::Scrolling { .. } => duplicate_strip(&cards),
        _ => cards,
    };

    html! {
        <div class="review-track" ref={track_ref}>
            { for strip.iter().map(RenderNode::to_html) }
        </div>
    }
}
