//! Cart Store Module
//!
//! Ordered, title-keyed list of cart rows with quantity and total bookkeeping.

use rust_decimal::Decimal;

use crate::cart::item::{currency_symbol, CartItem, DEFAULT_CURRENCY_SYMBOL};
use crate::error::{CartError, CartResult};

/// Result of adding an item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended
    Inserted,
    /// An existing row's quantity was bumped to the contained value
    Incremented(u32),
}

// == Cart ==
/// The cart model. Rows keep insertion order; at most one row per title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    // == Constructor ==
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from a persisted snapshot.
    ///
    /// Duplicate titles are merged and zero quantities raised to 1, so a
    /// hand-edited snapshot cannot break the row invariants. Merged
    /// quantities saturate at `u32::MAX`.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            item.quantity = item.quantity.max(1);
            match cart.position(&item.title) {
                Some(index) => {
                    let merged = &mut cart.items[index].quantity;
                    *merged = merged.saturating_add(item.quantity);
                }
                None => cart.items.push(item),
            }
        }
        cart
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    fn item_mut(&mut self, title: &str) -> CartResult<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.title == title)
            .ok_or_else(|| CartError::ItemNotFound(title.to_string()))
    }

    // == Add ==
    /// Adds one copy of `item`.
    ///
    /// A title already in the cart has its quantity incremented instead of
    /// gaining a second row. The price must parse, and the cart total must
    /// stay representable; otherwise the cart is left unchanged.
    pub fn add(&mut self, item: CartItem) -> CartResult<AddOutcome> {
        item.unit_price()?;
        let before = self.clone();

        let outcome = match self.position(&item.title) {
            Some(index) => {
                let existing = &mut self.items[index];
                existing.quantity = existing.quantity.saturating_add(1);
                AddOutcome::Incremented(existing.quantity)
            }
            None => {
                self.items.push(CartItem {
                    quantity: 1,
                    ..item
                });
                AddOutcome::Inserted
            }
        };

        self.keep_total_or_revert(before)?;
        Ok(outcome)
    }

    // == Increment ==
    /// Adds one to a row's quantity and returns the new quantity.
    ///
    /// Quantity saturates at `u32::MAX`.
    pub fn increment(&mut self, title: &str) -> CartResult<u32> {
        let before = self.clone();
        let item = self.item_mut(title)?;
        item.quantity = item.quantity.saturating_add(1);
        let quantity = item.quantity;

        self.keep_total_or_revert(before)?;
        Ok(quantity)
    }

    /// Restores `before` if the total no longer fits in a `Decimal`.
    fn keep_total_or_revert(&mut self, before: Cart) -> CartResult<()> {
        if let Err(e) = self.total() {
            *self = before;
            return Err(e);
        }
        Ok(())
    }

    // == Decrement ==
    /// Removes one from a row's quantity.
    ///
    /// Quantity never drops below 1; returns `false` when nothing changed.
    pub fn decrement(&mut self, title: &str) -> CartResult<bool> {
        let item = self.item_mut(title)?;
        if item.quantity <= 1 {
            return Ok(false);
        }
        item.quantity -= 1;
        Ok(true)
    }

    // == Remove ==
    /// Removes a row entirely and returns it.
    pub fn remove(&mut self, title: &str) -> CartResult<CartItem> {
        let index = self
            .position(title)
            .ok_or_else(|| CartError::ItemNotFound(title.to_string()))?;
        Ok(self.items.remove(index))
    }

    // == Clear ==
    /// Removes every row.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // == Totals ==
    /// Sum of unit price times quantity, rounded to two decimals.
    pub fn total(&self) -> CartResult<Decimal> {
        let mut total = Decimal::ZERO;
        for item in &self.items {
            total = total
                .checked_add(item.line_total()?)
                .ok_or_else(|| CartError::InvalidPrice(item.price.clone()))?;
        }
        Ok(total.round_dp(2))
    }

    /// Sum of quantities, shown on the item-count badge.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Currency prefix used for the displayed total.
    pub fn currency_symbol(&self) -> &str {
        self.items
            .iter()
            .find_map(|item| currency_symbol(&item.price))
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }

    /// Row lookup by title.
    pub fn get(&self, title: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.title == title)
    }

    /// Rows in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the cart has no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
