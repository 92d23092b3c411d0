//! Heuristic property price estimate
//!
//! Inputs arrive as loosely-typed JSON values. Each one is coerced to its
//! numeric type with [`parse_or_default`]; a value that cannot be coerced
//! takes its default, so estimation has no error path.

use serde_json::Value;

/// Price per square foot (INR)
pub const PRICE_PER_SQFT: f64 = 5200.0;

/// Flat addition per bedroom (INR)
pub const BEDROOM_BOOST: f64 = 150_000.0;

/// Share of each location-factor step above 1 added to the multiplier
pub const LOCATION_WEIGHT: f64 = 0.2;

pub const DEFAULT_AREA: f64 = 0.0;
pub const DEFAULT_BEDROOMS: f64 = 0.0;
pub const DEFAULT_LOCATION_FACTOR: f64 = 1.0;

/// Lossy conversion from a JSON value to a numeric input
pub trait Coerce: Sized {
    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for f64 {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A whole number held as `f64` so that counts past `i64` keep their magnitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Whole(pub f64);

impl Coerce for Whole {
    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(|f| Self(f.trunc())),
            Value::Bool(b) => Some(Self(if *b { 1.0 } else { 0.0 })),
            Value::String(s) => {
                let s = s.trim();
                let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                s.parse().ok().map(Self)
            }
            _ => None,
        }
    }
}

/// Coerce `value` to `T`, falling back to `default` when absent or unusable
pub fn parse_or_default<T: Coerce>(value: Option<&Value>, default: T) -> T {
    value.and_then(T::coerce).unwrap_or(default)
}

/// Coerced estimator inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyInput {
    pub area: f64,
    /// Always integral; see [`Whole`]
    pub bedrooms: f64,
    pub location_factor: f64,
}

impl Default for PropertyInput {
    fn default() -> Self {
        Self {
            area: DEFAULT_AREA,
            bedrooms: DEFAULT_BEDROOMS,
            location_factor: DEFAULT_LOCATION_FACTOR,
        }
    }
}

impl PropertyInput {
    #[allow(dead_code)] // Used in tests
    pub fn new(area: f64, bedrooms: f64, location_factor: f64) -> Self {
        Self {
            area,
            bedrooms,
            location_factor,
        }
    }

    /// Build from raw request values, never failing
    pub fn from_values(
        area: Option<&Value>,
        bedrooms: Option<&Value>,
        location_factor: Option<&Value>,
    ) -> Self {
        Self {
            area: parse_or_default(area, DEFAULT_AREA),
            bedrooms: parse_or_default(bedrooms, Whole(DEFAULT_BEDROOMS)).0,
            location_factor: parse_or_default(location_factor, DEFAULT_LOCATION_FACTOR),
        }
    }

    /// Multiplier applied to the base price: 1 at factor 1, +0.2 per step
    pub fn location_multiplier(&self) -> f64 {
        1.0 + (self.location_factor - 1.0) * LOCATION_WEIGHT
    }
}

/// Estimated price rounded to 2 decimal places.
///
/// No range checks: negative or extreme inputs produce whatever the
/// formula yields.
pub fn estimate_price(input: &PropertyInput) -> f64 {
    let base = input.area * PRICE_PER_SQFT;
    let bedroom_boost = input.bedrooms * BEDROOM_BOOST;
    round_cents((base + bedroom_boost) * input.location_multiplier())
}

/// Above 2^52 every `f64` is already a whole number
const NO_FRACTION_ABOVE: f64 = 4_503_599_627_370_496.0;

fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || value.abs() >= NO_FRACTION_ABOVE {
        return value;
    }
    scaled.round() / 100.0
}

/// Magnitude from which prices switch to exponent notation
const EXPONENT_FROM: f64 = 1e16;

/// Render a price with thousands separators, e.g. `5,650,000.0`.
///
/// Very large magnitudes use exponent notation with a signed, two-digit
/// minimum exponent (`1.5e+25`).
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return price.to_string();
    }
    if price.abs() >= EXPONENT_FROM {
        return format_exponent(price);
    }

    let rendered = price.abs().to_string();
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "0"));

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + fraction.len() + 2);
    if price.is_sign_negative() {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }
    grouped.push('.');
    grouped.push_str(fraction);
    grouped
}

fn format_exponent(price: f64) -> String {
    let rendered = format!("{price:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}
