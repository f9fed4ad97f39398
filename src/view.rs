//! Page data to render trees.
//!
//! Builders here are pure: they take a record and return a [`RenderNode`],
//! which only becomes Yew [`Html`] at the component boundary.

use yew::virtual_dom::{VNode, VTag, VText};
use yew::Html;

use crate::data::{non_blank, CaseStudy, Faq, Testimonial};

const FAQ_CHEVRON_PATH: &str = "M15.9922 17.5618L21.7161 11.8379L23.6018 13.7235L15.9922 21.333L8.38281 13.7235L10.2684 11.8379L15.9922 17.5618Z";
const ICON_FILL: &str = "#331F33";
const MAX_STARS: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub enum RenderNode {
    Element(ElementNode),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ElementNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<RenderNode>,
}

pub fn el(tag: &'static str) -> ElementNode {
    ElementNode {
        tag,
        classes: Vec::new(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl ElementNode {
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(RenderNode::Text(text.into()))
    }
}

impl From<ElementNode> for RenderNode {
    fn from(node: ElementNode) -> Self {
        RenderNode::Element(node)
    }
}

impl RenderNode {
    pub fn to_html(&self) -> Html {
        match self {
            RenderNode::Text(text) => VNode::VText(VText::new(text.clone())),
            RenderNode::Element(node) => {
                let mut tag = VTag::new(node.tag);
                if !node.classes.is_empty() {
                    tag.add_attribute("class", node.classes.join(" "));
                }
                for (name, value) in &node.attrs {
                    tag.add_attribute(*name, value.clone());
                }
                for child in &node.children {
                    tag.add_child(child.to_html());
                }
                VNode::VTag(Box::new(tag))
            }
        }
    }
}

pub fn case_study_card(item: &CaseStudy, index: usize) -> RenderNode {
    let title = item.title.clone().unwrap_or_default();
    let number = non_blank(&item.number)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{:02}", index + 1));

    let mut inner = el("div").class("inner-card");
    if let Some(theme) = non_blank(&item.theme).filter(|t| *t != "default") {
        inner = inner.class(format!("inner-card--{theme}"));
    }

    let label = el("div")
        .class("label")
        .child(el("span").class("label-num").text(number))
        .child(
            el("span")
                .class("label-text")
                .text(non_blank(&item.label).unwrap_or("Case Study")),
        );

    let text_main = el("div")
        .class("text-main")
        .child(el("h3").class("case-title").text(title))
        .child(
            el("p")
                .class("supporting-text-case")
                .text(item.description.clone().unwrap_or_default()),
        );

    let button_text = el("span")
        .class("btn-text-small")
        .text(non_blank(&item.button_text).unwrap_or("VIEW CASE STUDY"));
    let button = match non_blank(&item.button_href).filter(|h| *h != "#") {
        Some(href) => {
            let target = non_blank(&item.button_target).unwrap_or("_blank");
            let mut link = el("a")
                .class("btn-box-casetudy")
                .attr("href", href)
                .attr("target", target);
            if target == "_blank" {
                link = link.attr("rel", "noopener");
            }
            link.child(button_text)
        }
        None => el("span")
            .class("btn-box-casetudy")
            .class("is-disabled")
            .attr("aria-disabled", "true")
            .attr("data-disabled", "true")
            .child(button_text),
    };

    let alt = non_blank(&item.image_alt)
        .or_else(|| non_blank(&item.title))
        .unwrap_or("Case study preview");
    let image = el("div").class("image-part").child(
        el("img")
            .attr("src", item.image.clone().unwrap_or_default())
            .attr("alt", alt),
    );

    el("div")
        .class("outer-card")
        .child(
            inner
                .child(
                    el("div")
                        .class("text-container")
                        .child(label)
                        .child(text_main)
                        .child(button),
                )
                .child(image),
        )
        .into()
}

pub fn testimonial_card(item: &Testimonial, show_rating: bool) -> RenderNode {
    let letter = item.fallback_letter();

    let mut logo = el("div").class("review-logo-inner");
    logo = match non_blank(&item.logo) {
        Some(src) => {
            let alt = non_blank(&item.logo_alt)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{letter} logo"));
            logo.child(
                el("img")
                    .attr("src", src)
                    .attr("alt", alt)
                    .attr("width", "35")
                    .attr("height", "35")
                    .attr("loading", "lazy")
                    .attr("decoding", "async"),
            )
        }
        None => logo.text(letter),
    };

    let mut main = el("div").class("review-main").child(
        el("div")
            .class("main-text-review")
            .child(
                el("p")
                    .class("text-bold")
                    .text(item.headline.clone().unwrap_or_default()),
            )
            .child(
                el("p")
                    .class("main-text-body")
                    .text(item.body.clone().unwrap_or_default()),
            ),
    );
    if show_rating {
        main = main.child(star_row(item.stars()));
    }
    let role = non_blank(&item.role).or_else(|| non_blank(&item.author)).unwrap_or("");
    main = main.child(el("p").class("review-title").text(role));
    if let Some(date) = non_blank(&item.date) {
        main = main.child(el("p").class("review-date").text(date));
    }

    let mut card = el("div").class("review-card");
    if let Some(theme) = non_blank(&item.theme) {
        card = card.class(format!("review-card--{theme}"));
    }
    card.child(
        el("div")
            .class("review-card-content")
            .child(logo)
            .child(main),
    )
    .into()
}

fn star_row(filled: u8) -> ElementNode {
    (0..MAX_STARS).fold(
        el("div")
            .class("review-rating")
            .attr("role", "img")
            .attr("aria-label", format!("{filled} out of {MAX_STARS} stars")),
        |row, i| {
            let star = el("span").class("review-star");
            let star = if i < filled { star.class("is-filled") } else { star };
            row.child(star.text("★"))
        },
    )
}

pub fn faq_item(item: &Faq) -> RenderNode {
    let chevron = el("svg")
        .attr("width", "32")
        .attr("height", "32")
        .attr("viewBox", "0 0 32 32")
        .child(el("path").attr("d", FAQ_CHEVRON_PATH).attr("fill", ICON_FILL));

    el("details")
        .class("faq-item")
        .child(
            el("summary")
                .child(el("span").text(item.question.clone().unwrap_or_default()))
                .child(chevron),
        )
        .child(el("p").text(item.answer.clone().unwrap_or_default()))
        .into()
}

/// The strip as two back-to-back copies, so offset `base_width` looks
/// identical to offset `0`.
pub fn duplicate_strip(cards: &[RenderNode]) -> Vec<RenderNode> {
    cards.iter().chain(cards.iter()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    impl ElementNode {
        fn get_attr(&self, name: &str) -> Option<&str> {
            self.attrs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.as_str())
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.iter().any(|c| c == class)
        }

        fn text_content(&self) -> String {
            self.children.iter().map(RenderNode::text_content).collect()
        }
    }

    impl RenderNode {
        /// First element in document order carrying `class`.
        fn find_class(&self, class: &str) -> Option<&ElementNode> {
            match self {
                RenderNode::Text(_) => None,
                RenderNode::Element(node) if node.has_class(class) => Some(node),
                RenderNode::Element(node) => node.children.iter().find_map(|c| c.find_class(class)),
            }
        }

        fn text_content(&self) -> String {
            match self {
                RenderNode::Text(text) => text.clone(),
                RenderNode::Element(node) => node.text_content(),
            }
        }
    }

    fn element(node: &RenderNode) -> &ElementNode {
        match node {
            RenderNode::Element(e) => e,
            RenderNode::Text(_) => panic!("expected element"),
        }
    }

    #[test]
    fn case_study_defaults() {
        let card = case_study_card(&CaseStudy::default(), 2);
        assert_eq!(card.find_class("label-num").unwrap().children, vec![RenderNode::Text("03".into())]);
        assert_eq!(
            card.find_class("label-text").unwrap().text_content(),
            "Case Study"
        );

        let button = card.find_class("btn-box-casetudy").unwrap();
        assert_eq!(button.tag, "span");
        assert!(button.has_class("is-disabled"));
        assert_eq!(button.get_attr("aria-disabled"), Some("true"));

        let image = card.find_class("image-part").unwrap();
        let img = element(&image.children[0]);
        assert_eq!(img.get_attr("alt"), Some("Case study preview"));
    }

    #[test]
    fn case_study_link_and_theme() {
        let item = CaseStudy {
            number: Some("A1".into()),
            title: Some("Clinic portal".into()),
            button_href: Some(" https://example.com/clinic ".into()),
            theme: Some("dark".into()),
            ..Default::default()
        };
        let card = case_study_card(&item, 0);
        assert!(card.find_class("inner-card").unwrap().has_class("inner-card--dark"));

        let button = card.find_class("btn-box-casetudy").unwrap();
        assert_eq!(button.tag, "a");
        assert_eq!(button.get_attr("href"), Some("https://example.com/clinic"));
        assert_eq!(button.get_attr("target"), Some("_blank"));
        assert_eq!(button.get_attr("rel"), Some("noopener"));

        let img = element(&card.find_class("image-part").unwrap().children[0]);
        assert_eq!(img.get_attr("alt"), Some("Clinic portal"));
        assert_eq!(
            card.find_class("label-num").unwrap().text_content(),
            "A1"
        );
    }

    #[test]
    fn hash_href_and_default_theme_are_ignored() {
        let item = CaseStudy {
            button_href: Some("#".into()),
            button_target: Some("_self".into()),
            theme: Some("default".into()),
            ..Default::default()
        };
        let card = case_study_card(&item, 0);
        assert_eq!(card.find_class("btn-box-casetudy").unwrap().tag, "span");
        assert_eq!(card.find_class("inner-card").unwrap().classes, vec!["inner-card"]);
    }

    #[test]
    fn non_blank_target_skips_rel() {
        let item = CaseStudy {
            button_href: Some("/work".into()),
            button_target: Some("_self".into()),
            ..Default::default()
        };
        let card = case_study_card(&item, 0);
        let button = card.find_class("btn-box-casetudy").unwrap();
        assert_eq!(button.get_attr("target"), Some("_self"));
        assert_eq!(button.get_attr("rel"), None);
    }

    #[test]
    fn testimonial_without_logo_shows_letter() {
        let item = Testimonial {
            headline: Some("brilliant team".into()),
            author: Some("Sam".into()),
            ..Default::default()
        };
        let card = testimonial_card(&item, false);
        let logo = card.find_class("review-logo-inner").unwrap();
        assert_eq!(logo.children, vec![RenderNode::Text("B".into())]);
        assert_eq!(
            card.find_class("review-title").unwrap().text_content(),
            "Sam"
        );
        assert!(card.find_class("review-rating").is_none());
        assert!(card.find_class("review-date").is_none());
    }

    #[test]
    fn testimonial_logo_and_rating() {
        let item = Testimonial {
            logo: Some("/img/acme.svg".into()),
            logo_text: Some("acme".into()),
            role: Some("CTO".into()),
            rating: Some(4.0),
            theme: Some("mint".into()),
            ..Default::default()
        };
        let card = testimonial_card(&item, true);
        assert!(element(&card).has_class("review-card--mint"));

        let img = element(&card.find_class("review-logo-inner").unwrap().children[0]);
        assert_eq!(img.get_attr("alt"), Some("A logo"));
        assert_eq!(img.get_attr("loading"), Some("lazy"));

        let rating = card.find_class("review-rating").unwrap();
        assert_eq!(rating.get_attr("aria-label"), Some("4 out of 5 stars"));
        let filled = rating
            .children
            .iter()
            .filter(|s| element(s).has_class("is-filled"))
            .count();
        assert_eq!(rating.children.len(), 5);
        assert_eq!(filled, 4);
    }

    #[test]
    fn faq_has_question_chevron_and_answer() {
        let item = Faq {
            question: Some("How long?".into()),
            answer: None,
        };
        let node = faq_item(&item);
        let details = element(&node);
        assert_eq!(details.tag, "details");
        let summary = element(&details.children[0]);
        assert_eq!(summary.tag, "summary");
        let svg = element(&summary.children[1]);
        assert_eq!(svg.get_attr("viewBox"), Some("0 0 32 32"));
        assert_eq!(element(&svg.children[0]).get_attr("fill"), Some(ICON_FILL));
        assert_eq!(node.text_content(), "How long?");
    }

    #[test]
    fn duplicate_strip_is_two_ordered_copies() {
        let cards: Vec<RenderNode> = ["a", "b", "c"]
            .iter()
            .map(|h| {
                testimonial_card(
                    &Testimonial {
                        headline: Some(h.to_string()),
                        ..Default::default()
                    },
                    false,
                )
            })
            .collect();
        let strip = duplicate_strip(&cards);
        assert_eq!(strip.len(), 6);
        assert_eq!(&strip[..3], &cards[..]);
        assert_eq!(&strip[3..], &cards[..]);
    }
}
