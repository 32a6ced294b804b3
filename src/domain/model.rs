use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{parse_price, parse_quantity};
use serde::{Deserialize, Serialize};

pub const INVALID_NUMBERS: &str = "Invalid price or quantity. Please enter numeric values.";

/// One inventory line item. Records have no identity beyond their position
/// in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl Part {
    pub fn new(name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Builds a record from three raw text fields, trimming each one.
    /// Returns `None` when either numeric field does not parse.
    pub fn from_fields(name: &str, price: &str, quantity: &str) -> Option<Self> {
        Some(Self {
            name: name.trim().to_string(),
            price: parse_price(price)?,
            quantity: parse_quantity(quantity)?,
        })
    }
}

/// Raw user-entered field values, as typed into the add/update prompts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartInput {
    pub name: String,
    pub price: String,
    pub quantity: String,
}

impl PartInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }

    /// Pre-fills the prompts with an existing record's values.
    pub fn from_part(part: &Part) -> Self {
        Self {
            name: part.name.clone(),
            price: part.price.to_string(),
            quantity: part.quantity.to_string(),
        }
    }

    pub fn parse(&self) -> Result<Part> {
        Part::from_fields(&self.name, &self.price, &self.quantity)
            .ok_or_else(|| ShopError::invalid_input(INVALID_NUMBERS))
    }
}

/// Result of decoding one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub parts: Vec<Part>,
    /// Lines rejected for a wrong field count or an unparseable number.
    pub skipped: usize,
}

impl Decoded {
    pub fn new(parts: Vec<Part>, skipped: usize) -> Self {
        Self { parts, skipped }
    }
}
