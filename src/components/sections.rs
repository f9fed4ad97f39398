use yew::prelude::*;

use crate::data::{CaseStudy, Faq};
use crate::view::{case_study_card, faq_item};

#[derive(Properties, PartialEq)]
pub struct CaseStudiesProps {
    pub items: Vec<CaseStudy>,
}

#[function_component(CaseStudies)]
pub fn case_studies(props: &CaseStudiesProps) -> Html {
    html! {
        <>
            { for props.items.iter().enumerate().map(|(index, item)| case_study_card(item, index).to_html()) }
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct FaqsProps {
    pub items: Vec<Faq>,
}

#[function_component(Faqs)]
pub fn faqs(props: &FaqsProps) -> Html {
    html! {
        <>
            { for props.items.iter().map(|item| faq_item(item).to_html()) }
        </>
    }
}
