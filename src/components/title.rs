use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::TypewriterConfig;
use crate::dom;
use crate::motion::typewriter::Typewriter;

const MEASURE_STYLE: &str = "position: absolute; visibility: hidden; pointer-events: none; \
    animation: none; transform: none; opacity: 1; white-space: nowrap;";

impl Reducible for Typewriter {
    type Action = ();

    fn reduce(self: Rc<Self>, _action: ()) -> Rc<Self> {
        let mut next = (*self).clone();
        next.advance();
        next.into()
    }
}

#[derive(Properties, PartialEq)]
pub struct TitleProps {
    pub words: Vec<String>,
    #[prop_or_default]
    pub config: TypewriterConfig,
    #[prop_or_default]
    pub reduced_motion: bool,
}

#[function_component(TitleRotator)]
pub fn title_rotator(props: &TitleProps) -> Html {
    let writer = {
        let words = props.words.clone();
        let fallback = props.config.fallback_word;
        use_reducer(move || Typewriter::new(words, fallback))
    };
    let shown = use_state(|| false);
    let measured = use_state(|| false);
    let measure_ref = use_node_ref();

    // Reserve room for the widest word so the heading doesn't reflow per word.
    {
        let measure_ref = measure_ref.clone();
        let measured = measured.clone();
        let words = writer.words().to_vec();
        use_effect_with_deps(
            move |_| {
                if let Some(sizer) = measure_ref.cast::<HtmlElement>() {
                    let widest = words
                        .iter()
                        .map(|word| {
                            sizer.set_text_content(Some(word.as_str()));
                            sizer.offset_width()
                        })
                        .max()
                        .unwrap_or(0);
                    sizer.set_text_content(None);
                    if widest > 0 {
                        if let Some(host) = sizer
                            .parent_element()
                            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
                        {
                            dom::set_style(&host, "min-width", &format!("{widest}px"));
                        }
                    }
                }
                measured.set(true);
                || ()
            },
            (),
        );
    }

    {
        let shown = shown.clone();
        let dispatcher = writer.dispatcher();
        let rotates = writer.rotates();
        let reduced = props.reduced_motion;
        let hold = props.config.hold_ms;
        let initial = props.config.initial_delay_ms;
        use_effect_with_deps(
            move |_| {
                let interval: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
                let start_rotation = {
                    let interval = interval.clone();
                    move || {
                        if rotates {
                            *interval.borrow_mut() =
                                Some(Interval::new(hold, move || dispatcher.dispatch(())));
                        }
                    }
                };

                let timeout = if reduced {
                    shown.set(true);
                    start_rotation();
                    None
                } else {
                    Some(Timeout::new(initial, move || {
                        shown.set(true);
                        start_rotation();
                    }))
                };

                move || {
                    drop(timeout);
                    interval.borrow_mut().take();
                }
            },
            (),
        );
    }

    let reduced = props.reduced_motion;
    let class = classes!(
        "dynamic-text",
        (*shown && !reduced).then_some("is-visible")
    );
    let style = reduced.then_some("animation: none; transform: translateY(0); opacity: 1;");

    html! {
        <>
            // Keyed by word so each one gets a fresh element and its entrance animation replays.
            <>
                <span key={writer.index()} class={class} style={style} aria-live="polite">
                    { writer.current() }
                </span>
            </>
            if !*measured {
                <span class="dynamic-text" ref={measure_ref} style={MEASURE_STYLE}></span>
            }
        </>
    }
}
