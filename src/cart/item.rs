//! Cart Item Module
//!
//! Defines a single cart row and the currency text helpers the cart uses.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};

/// Currency symbol used when no item carries one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

// == Cart Item ==
/// One row of the cart, keyed by title.
///
/// Field names match the persisted `cartItems` snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Display title, also the de-duplication key
    pub title: String,
    /// Currency-formatted unit price, e.g. `"£19.99"`
    pub price: String,
    /// Cover image URL
    pub image: String,
    /// Number of copies, always >= 1
    pub quantity: u32,
}

impl CartItem {
    // == Constructor ==
    /// Creates a new cart row with quantity 1.
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            image: image.into(),
            quantity: 1,
        }
    }

    /// Parsed unit price.
    pub fn unit_price(&self) -> CartResult<Decimal> {
        parse_price(&self.price)
    }

    /// Unit price multiplied by quantity.
    ///
    /// A product outside the `Decimal` range is reported as an invalid price.
    pub fn line_total(&self) -> CartResult<Decimal> {
        self.unit_price()?
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CartError::InvalidPrice(self.price.clone()))
    }
}

// == Currency Helpers ==
/// Extracts an amount from rendered price text.
///
/// Every character other than ASCII digits and `.` is stripped before
/// parsing, so `"£19.99"` and `"19.99 GBP"` both yield `19.99`.
pub fn parse_price(text: &str) -> CartResult<Decimal> {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if numeric.is_empty() {
        return Err(CartError::InvalidPrice(text.to_string()));
    }

    Decimal::from_str(&numeric).map_err(|_| CartError::InvalidPrice(text.to_string()))
}

/// Returns the leading non-numeric prefix of a price, e.g. `"£"` for `"£19.99"`.
pub fn currency_symbol(text: &str) -> Option<&str> {
    let end = text.find(|c: char| c.is_ascii_digit() || c == '.')?;
    let symbol = text[..end].trim();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

/// Formats an amount with a currency prefix and two decimal places.
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    format!("{}{:.2}", symbol, amount.round_dp(2))
}
