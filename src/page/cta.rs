use crate::data::{non_blank, Cta};
use crate::dom;

/// What the CTA data changes on the static button. Blank values leave the
/// page's own markup alone.
#[derive(Debug, Default, PartialEq)]
pub struct CtaPatch {
    pub href: Option<String>,
    pub text: Option<String>,
}

impl From<&Cta> for CtaPatch {
    fn from(cta: &Cta) -> Self {
        Self {
            href: non_blank(&cta.button_href).map(str::to_string),
            text: non_blank(&cta.button_text).map(str::to_string),
        }
    }
}

pub fn hydrate(cta: &Cta) {
    let Some(button) = dom::query("[data-cta-button]") else {
        return;
    };
    let patch = CtaPatch::from(cta);

    if let Some(href) = &patch.href {
        let _ = button.set_attribute("href", href);
        let _ = button.set_attribute("target", "_blank");
        let _ = button.set_attribute("rel", "noopener");
    }

    if let Some(text) = &patch.text {
        match button.query_selector("[data-cta-button-text]").ok().flatten() {
            Some(label) => label.set_text_content(Some(text)),
            None => button.set_text_content(Some(text)),
        }
    }
}
