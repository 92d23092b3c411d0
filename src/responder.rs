//! Canned chat replies chosen by keyword

use serde_json::Value;

const PRICE_KEYWORDS: &[&str] = &["price", "estimate"];
const GREETING_KEYWORDS: &[&str] = &["hello", "hi"];

/// One of the fixed chat replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Asks for the estimator inputs
    PricePrompt,
    Greeting,
    /// Fallback when no keyword matched
    Help,
}

impl Reply {
    /// Pick a reply for `message`.
    ///
    /// Matching is a case-insensitive substring test; the price keywords
    /// win over the greeting keywords. Note that "hi" also matches inside
    /// words such as "this".
    pub fn for_message(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if mentions(PRICE_KEYWORDS) {
            Self::PricePrompt
        } else if mentions(GREETING_KEYWORDS) {
            Self::Greeting
        } else {
            Self::Help
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::PricePrompt => {
                "To estimate price share area (sqft), number of bedrooms and a location factor (1-5)."
            }
            Self::Greeting => {
                "Hello! I'm Pixel Perfect — tell me about the property (area, bedrooms, location)."
            }
            Self::Help => {
                "I can help with property price estimates and simple analysis. Ask about price or area."
            }
        }
    }
}

/// Message text from a request value; anything but a JSON string reads as empty
pub fn message_text(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).unwrap_or("")
}

/// Reply text for a raw request value
pub fn respond(message: Option<&Value>) -> &'static str {
    Reply::for_message(message_text(message)).text()
}
