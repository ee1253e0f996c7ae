use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::utils::formatting::js_number;

/// Product identifier read from a product card.
///
/// Card attributes are coerced the same way for every read, so an id can end
/// up as `NaN` when the card is malformed. Identity follows the id's canonical
/// text: every `NaN` id is the same key, and `1` equals `1.0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(f64);

impl ProductId {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_nan()
    }

    /// Text used as the row's `data-id` attribute and as the basket key.
    pub fn key(&self) -> String {
        js_number(self.0)
    }
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ProductId {}

impl Hash for ProductId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl From<f64> for ProductId {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// One "add" request: what a product card says about the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// `None` when the card had no name attribute.
    pub name: Option<String>,
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            price,
        }
    }

    /// Reads a card's raw attributes without validating them.
    pub fn from_card(card: &CardData) -> Self {
        Self {
            id: ProductId::new(coerce_number(card.id.as_deref())),
            name: card.name.clone(),
            price: coerce_number(card.price.as_deref()),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("undefined")
    }
}

/// Raw data attributes of a product card, exactly as the page holds them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

impl CardData {
    pub fn new(id: &str, name: &str, price: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            price: Some(price.to_string()),
        }
    }
}

/// Unary-plus number coercion for attribute text.
///
/// A missing attribute is `NaN`, blank text is `0`, anything that does not
/// parse as a number is `NaN`. Unsigned `0x`, `0o` and `0b` literals are read
/// in their radix.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Rust's parser accepts spellings like "inf" and "nan" that attribute
    // coercion rejects.
    let body = trimmed.trim_start_matches(['+', '-']);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`, `0o` and `0b` literals, unsigned. `None` when there is no prefix.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }

    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    // Accumulate in f64 so literals wider than u64 still get a value.
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}
