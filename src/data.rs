use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

/// Global the page template assigns its content to before loading the bundle.
const DATA_GLOBAL: &str = "portfolioData";

#[derive(Debug, Error)]
pub enum PageDataError {
    #[error("window.portfolioData is not defined")]
    Missing,
    #[error("window.portfolioData could not be read: {0}")]
    Malformed(String),
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PageData {
    #[serde(deserialize_with = "list")]
    pub case_studies: Vec<CaseStudy>,
    #[serde(deserialize_with = "list")]
    pub testimonials: Vec<Testimonial>,
    #[serde(deserialize_with = "list")]
    pub faqs: Vec<Faq>,
    #[serde(deserialize_with = "or_default")]
    pub cta: Cta,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CaseStudy {
    #[serde(deserialize_with = "text")]
    pub number: Option<String>,
    #[serde(deserialize_with = "text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "text")]
    pub button_text: Option<String>,
    #[serde(deserialize_with = "text")]
    pub button_href: Option<String>,
    #[serde(deserialize_with = "text")]
    pub button_target: Option<String>,
    #[serde(deserialize_with = "text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "text")]
    pub image_alt: Option<String>,
    #[serde(deserialize_with = "text")]
    pub theme: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(deserialize_with = "text")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "text")]
    pub body: Option<String>,
    #[serde(deserialize_with = "text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "text")]
    pub author: Option<String>,
    #[serde(deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "text")]
    pub logo: Option<String>,
    #[serde(deserialize_with = "text")]
    pub logo_alt: Option<String>,
    #[serde(deserialize_with = "text")]
    pub logo_text: Option<String>,
    #[serde(deserialize_with = "text")]
    pub theme: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Faq {
    #[serde(deserialize_with = "text")]
    pub question: Option<String>,
    #[serde(deserialize_with = "text")]
    pub answer: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Cta {
    #[serde(deserialize_with = "text")]
    pub button_text: Option<String>,
    #[serde(deserialize_with = "text")]
    pub button_href: Option<String>,
}

impl Testimonial {
    /// Star count clamped to `0..=5`; absent or non-finite ratings count as zero.
    pub fn stars(&self) -> u8 {
        match self.rating {
            Some(r) if r.is_finite() => r.round().clamp(0.0, 5.0) as u8,
            _ => 0,
        }
    }

    /// Letter shown in place of a missing logo.
    pub fn fallback_letter(&self) -> String {
        [&self.logo_text, &self.headline, &self.author]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .and_then(|s| s.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Returns the trimmed value, or `None` when it is absent or blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// Field-level tolerance: a value of the wrong type degrades to its default
// instead of failing the whole document.

#[derive(Deserialize)]
#[serde(untagged)]
enum OrIgnored<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(f64),
    Other(IgnoredAny),
}

fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match OrIgnored::<T>::deserialize(deserializer)? {
        OrIgnored::Valid(value) => value,
        OrIgnored::Invalid(_) => T::default(),
    })
}

/// A non-array becomes empty; entries that are not records are dropped.
fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Vec<OrIgnored<T>> = or_default(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            OrIgnored::Valid(value) => Some(value),
            OrIgnored::Invalid(_) => None,
        })
        .collect())
}

/// Strings pass through and numbers are printed; anything else is absent.
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => Some(s),
        Scalar::Number(n) if n.is_finite() => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers pass through and numeric strings are parsed; anything else is absent.
fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Number(n) => Some(n),
        Scalar::Text(s) => s.trim().parse().ok(),
        Scalar::Other(_) => None,
    })
}

/// Reads `window.portfolioData`.
pub fn load() -> Result<PageData, PageDataError> {
    let window = web_sys::window().ok_or(PageDataError::Missing)?;
    let value = Reflect::get(&window, &JsValue::from_str(DATA_GLOBAL))
        .map_err(|_| PageDataError::Missing)?;
    if value.is_undefined() || value.is_null() {
        return Err(PageDataError::Missing);
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| PageDataError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let data: PageData = serde_json::from_str(r#"{ "faqs": [{ "question": "Why?" }] }"#).unwrap();
        assert!(data.case_studies.is_empty());
        assert!(data.testimonials.is_empty());
        assert_eq!(data.faqs.len(), 1);
        assert_eq!(data.faqs[0].answer, None);
        assert_eq!(data.cta, Cta::default());
    }

    #[test]
    fn camel_case_fields_are_read() {
        let data: PageData = serde_json::from_str(
            r#"{
                "caseStudies": [{ "title": "Clinic", "buttonHref": "/c", "imageAlt": "shot" }],
                "cta": { "buttonText": " Book a call " }
            }"#,
        )
        .unwrap();
        assert_eq!(data.case_studies[0].button_href.as_deref(), Some("/c"));
        assert_eq!(data.case_studies[0].image_alt.as_deref(), Some("shot"));
        assert_eq!(non_blank(&data.cta.button_text), Some("Book a call"));
    }

    #[test]
    fn rating_is_clamped() {
        let mut t = Testimonial::default();
        assert_eq!(t.stars(), 0);
        t.rating = Some(7.0);
        assert_eq!(t.stars(), 5);
        t.rating = Some(-2.0);
        assert_eq!(t.stars(), 0);
        t.rating = Some(3.6);
        assert_eq!(t.stars(), 4);
    }

    #[test]
    fn fallback_letter_prefers_logo_text_then_headline_then_author() {
        let mut t = Testimonial {
            author: Some("maria".into()),
            ..Default::default()
        };
        assert_eq!(t.fallback_letter(), "M");
        t.headline = Some("  great work".into());
        assert_eq!(t.fallback_letter(), "G");
        t.logo_text = Some("acme".into());
        assert_eq!(t.fallback_letter(), "A");
        assert_eq!(Testimonial::default().fallback_letter(), "?");
    }

    #[test]
    fn mistyped_fields_degrade_only_themselves() {
        let data: PageData = serde_json::from_str(
            r#"{
                "faqs": [{ "question": "Q", "answer": "A" }],
                "caseStudies": [{ "number": 7, "title": "Clinic", "image": false }],
                "testimonials": [{ "headline": "Great", "rating": "5", "author": ["x"] }]
            }"#,
        )
        .unwrap();
        assert_eq!(data.faqs[0].answer.as_deref(), Some("A"));
        assert_eq!(data.case_studies[0].number.as_deref(), Some("7"));
        assert_eq!(data.case_studies[0].title.as_deref(), Some("Clinic"));
        assert_eq!(data.case_studies[0].image, None);
        assert_eq!(data.testimonials[0].headline.as_deref(), Some("Great"));
        assert_eq!(data.testimonials[0].rating, Some(5.0));
        assert_eq!(data.testimonials[0].author, None);
        assert_eq!(data.testimonials[0].stars(), 5);
    }

    #[test]
    fn wrong_shaped_sections_fall_back_to_defaults() {
        let data: PageData = serde_json::from_str(
            r#"{
                "caseStudies": "soon",
                "testimonials": [42, { "headline": "Kept" }, null],
                "faqs": { "question": "not a list" },
                "cta": ["Book"]
            }"#,
        )
        .unwrap();
        assert!(data.case_studies.is_empty());
        assert_eq!(data.testimonials.len(), 1);
        assert_eq!(data.testimonials[0].headline.as_deref(), Some("Kept"));
        assert!(data.faqs.is_empty());
        assert_eq!(data.cta, Cta::default());
    }

    #[test]
    fn null_and_unparsable_values_are_absent() {
        let t: Testimonial =
            serde_json::from_str(r#"{ "headline": null, "rating": "five" }"#).unwrap();
        assert_eq!(t.headline, None);
        assert_eq!(t.rating, None);
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }
}
