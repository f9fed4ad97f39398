use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::Renderer;

mod config;
mod data;
mod dom;
mod view;
mod motion;
mod components {
    pub mod hero_parallax;
    pub mod sections;
    pub mod testimonials;
    pub mod title;
}
mod page {
    pub mod anchors;
    pub mod cta;
    pub mod nav;
    pub mod reveal;
    pub mod scroll_reveal;
    pub mod theme;
}

use components::{
    hero_parallax::HeroParallax,
    sections::{CaseStudies, CaseStudiesProps, Faqs, FaqsProps},
    testimonials::{Testimonials, TestimonialsProps},
    title::{TitleProps, TitleRotator},
};
use config::{
    MarqueeConfig, NavConfig, ParallaxConfig, RevealConfig, ScrollRevealConfig, ThemeConfig,
    TypewriterConfig, REDUCED_MOTION_QUERY,
};
use data::PageData;

fn host(selector: &str) -> Option<Element> {
    let found = dom::query(selector);
    if found.is_none() {
        debug!("{} not on page, skipping", selector);
    }
    found
}

fn mount_title() {
    let Some(root) = host(".title-dynamic") else {
        return;
    };
    let Ok(title) = root.clone().dyn_into::<HtmlElement>() else {
        return;
    };
    let dataset = title.dataset();
    if dataset.get("typewriterInit").is_some() {
        return;
    }
    let _ = dataset.set("typewriterInit", "true");

    let words = dom::query_all_in(&root, ".dynamic-word")
        .into_iter()
        .filter_map(|node| node.text_content())
        .collect();
    Renderer::<TitleRotator>::with_root_and_props(
        root,
        TitleProps {
            words,
            config: TypewriterConfig::default(),
            reduced_motion: dom::matches_media(REDUCED_MOTION_QUERY),
        },
    )
    .render();
}

fn mount_sections(data: &PageData) {
    if let Some(root) = host("[data-case-studies]") {
        info!("Rendering {} case studies", data.case_studies.len());
        Renderer::<CaseStudies>::with_root_and_props(
            root,
            CaseStudiesProps {
                items: data.case_studies.clone(),
            },
        )
        .render();
    }

    if let Some(root) = host("[data-testimonials]") {
        info!("Rendering {} testimonials", data.testimonials.len());
        Renderer::<Testimonials>::with_root_and_props(
            root,
            TestimonialsProps {
                items: data.testimonials.clone(),
                config: MarqueeConfig::default(),
            },
        )
        .render();
    }

    if let Some(root) = host("[data-faqs]") {
        info!("Rendering {} FAQs", data.faqs.len());
        Renderer::<Faqs>::with_root_and_props(
            root,
            FaqsProps {
                items: data.faqs.clone(),
            },
        )
        .render();
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page motion");

    let data = data::load().unwrap_or_else(|e| {
        warn!("{e}, rendering sections empty");
        PageData::default()
    });

    if let Some(parallax) = HeroParallax::attach(&ParallaxConfig::default()) {
        parallax.run_forever();
    }
    mount_title();
    mount_sections(&data);
    page::cta::hydrate(&data.cta);

    page::reveal::install(&RevealConfig::default());
    page::scroll_reveal::install(&ScrollRevealConfig::default());
    page::nav::install(&NavConfig::default());
    page::anchors::install();
    page::theme::install(&ThemeConfig::default());
}
