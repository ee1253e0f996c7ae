use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::models::CardData;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid click target '{0}'")]
    InvalidTarget(String),
    #[error("Card #{index} is out of range (catalog has {len} cards)")]
    CardOutOfRange { index: usize, len: usize },
}

/// Kind of control an activation landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControlKind {
    AddToCart,
}

/// A resolved activation: which control, and the card it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub control: ControlKind,
    pub card: CardData,
}

/// Turns an opaque activation target into the control and card data it hit.
pub trait ProductSource {
    type Target;

    /// `None` when the target is not inside any recognised control.
    fn resolve(&self, target: &Self::Target) -> Option<Activation>;
}

/// One element on the path from the clicked element up to the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    AddToCart,
    Card(usize),
    Plain,
}

/// The clicked element followed by its ancestors, nearest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub path: Vec<Element>,
}

impl ClickTarget {
    pub fn new(path: Vec<Element>) -> Self {
        Self { path }
    }

    /// A click directly on a card's add button.
    pub fn add_button(card: usize) -> Self {
        Self::new(vec![Element::AddToCart, Element::Card(card)])
    }

    /// A click on an icon nested inside a card's add button.
    pub fn inside_add_button(card: usize) -> Self {
        Self::new(vec![Element::Plain, Element::AddToCart, Element::Card(card)])
    }

    /// A click on a card outside of its add button.
    pub fn card_body(card: usize) -> Self {
        Self::new(vec![Element::Plain, Element::Card(card)])
    }

    /// A click on the product list background.
    pub fn list_background() -> Self {
        Self::new(vec![Element::Plain])
    }

    /// Nearest element on the path matching `predicate`, the target itself
    /// included.
    pub fn closest(&self, predicate: impl Fn(&Element) -> bool) -> Option<Element> {
        self.path.iter().copied().find(|element| predicate(element))
    }
}

impl FromStr for ClickTarget {
    type Err = CatalogError;

    /// Parses `plain,add,card:0` style paths.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part {
                "add" => Ok(Element::AddToCart),
                "plain" => Ok(Element::Plain),
                _ => part
                    .strip_prefix("card:")
                    .and_then(|index| index.parse().ok())
                    .map(Element::Card)
                    .ok_or_else(|| CatalogError::InvalidTarget(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if path.is_empty() {
            return Err(CatalogError::InvalidTarget(s.to_string()));
        }
        Ok(Self { path })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    cards: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default, deserialize_with = "attribute_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "attribute_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "attribute_text")]
    price: Option<String>,
}

// Data attributes are text; accept JSON numbers and booleans as their text.
fn attribute_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// In-memory product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<CardData>,
}

impl Catalog {
    pub fn new(cards: Vec<CardData>) -> Self {
        Self { cards }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let cards = file
            .cards
            .into_iter()
            .map(|entry| CardData {
                id: entry.id,
                name: entry.name,
                price: entry.price,
            })
            .collect();
        Ok(Self { cards })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading catalog from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!("Catalog loaded with {} cards", catalog.len());
        Ok(catalog)
    }

    pub fn cards(&self) -> &[CardData] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&CardData> {
        self.cards.get(index)
    }

    /// Like [`Catalog::get`], but a missing card is an error.
    pub fn card(&self, index: usize) -> Result<&CardData, CatalogError> {
        self.cards.get(index).ok_or(CatalogError::CardOutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl ProductSource for Catalog {
    type Target = ClickTarget;

    fn resolve(&self, target: &ClickTarget) -> Option<Activation> {
        target.closest(|element| matches!(element, Element::AddToCart))?;

        // A control outside any card still counts; its data reads as missing.
        let card = match target.closest(|element| matches!(element, Element::Card(_))) {
            Some(Element::Card(index)) => self.get(index).cloned().unwrap_or_else(|| {
                tracing::warn!("Click resolved to unknown card #{}", index);
                CardData::default()
            }),
            _ => {
                tracing::warn!("Add control clicked outside any product card");
                CardData::default()
            }
        };

        Some(Activation {
            control: ControlKind::AddToCart,
            card,
        })
    }
}
