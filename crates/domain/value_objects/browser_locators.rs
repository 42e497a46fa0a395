use std::fmt::Display;

/// How the probe finds an element, independent of the WebDriver dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// A `<button>` whose text contains any of the given fragments.
    ButtonContaining(Vec<String>),
    /// A `<button>` whose text contains the fragment, ignoring ASCII case.
    ButtonContainingIgnoreCase(String),
    /// Any element whose own text is exactly this string (whitespace trimmed).
    ExactText(String),
    /// Any element whose text contains this string.
    TextContaining(String),
    Css(String),
}

impl Locator {
    pub fn button_containing(fragments: &[&str]) -> Self {
        Locator::ButtonContaining(fragments.iter().map(|f| f.to_string()).collect())
    }

    pub fn button_containing_ignore_case(fragment: &str) -> Self {
        Locator::ButtonContainingIgnoreCase(fragment.to_string())
    }

    pub fn exact_text(text: &str) -> Self {
        Locator::ExactText(text.to_string())
    }

    pub fn text_containing(text: &str) -> Self {
        Locator::TextContaining(text.to_string())
    }

    pub fn css(selector: &str) -> Self {
        Locator::Css(selector.to_string())
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::ButtonContaining(fragments) => {
                write!(f, "button~/{}/", fragments.join("|"))
            }
            Locator::ButtonContainingIgnoreCase(fragment) => write!(f, "button~/{}/i", fragment),
            Locator::ExactText(text) => write!(f, "text='{}'", text),
            Locator::TextContaining(text) => write!(f, "text~'{}'", text),
            Locator::Css(selector) => write!(f, "css={}", selector),
        }
    }
}
