//! Shopping cart state for the ordering flow.
//!
//! Prices are integer cents. Items are keyed by menu item id: adding an
//! item that is already in the cart increases its quantity instead of
//! creating a second line.
//!
//! # Example
//!
//! ```
//! use checkout_validator::cart::{format_price, Cart, MenuItem};
//!
//! let burger = MenuItem::new(1, "Burger", 1250);
//! let fries = MenuItem::new(2, "Fries", 399);
//!
//! let mut cart = Cart::new();
//! cart.add_item(&burger, 1);
//! cart.add_item(&fries, 2);
//! cart.add_item(&burger, 1);
//!
//! assert_eq!(cart.items().len(), 2);
//! assert_eq!(cart.total_price(), 2 * 1250 + 2 * 399);
//! assert_eq!(format_price(cart.total_price()), "$32.98");
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sales tax rate in basis points (6%).
pub const TAX_RATE_BASIS_POINTS: u64 = 600;

/// A menu entry as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MenuItem {
    /// Backend id of the menu item.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Description shown on the menu card.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Unit price in cents.
    pub price: u64,
    /// Image location.
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: String,
    /// Menu category, if any.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub category: Option<String>,
}

impl MenuItem {
    /// Creates a menu item with an empty description and image.
    pub fn new(id: u64, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image_url: String::new(),
            category: None,
        }
    }
}

/// A menu item in the cart with its quantity and annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CartItem {
    /// The menu item.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub item: MenuItem,
    /// How many were ordered.
    pub quantity: u32,
    /// Free-text preparation notes.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub notes: Option<String>,
    /// Which party member the item is for.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub party_member: Option<String>,
}

impl CartItem {
    /// Returns the menu item id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.item.id
    }

    /// Returns price times quantity, in cents.
    #[inline]
    pub fn line_total(&self) -> u64 {
        self.item.price.saturating_mul(self.quantity as u64)
    }
}

/// The customer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the items in the order they were first added.
    #[inline]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns the cart line for `id`, if present.
    pub fn get(&self, id: u64) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == id)
    }

    /// Adds `quantity` of `item`, merging with an existing line for the same id.
    ///
    /// Adding a quantity of zero is a no-op.
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.items.iter_mut().find(|i| i.id() == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem {
                item: item.clone(),
                quantity,
                notes: None,
                party_member: None,
            }),
        }
    }

    /// Removes the line for `id`. Returns true if something was removed.
    pub fn remove_item(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id() != id);
        self.items.len() != before
    }

    /// Replaces the notes of the line for `id`. An empty string clears them.
    ///
    /// Returns false if the item is not in the cart.
    pub fn update_notes(&mut self, id: u64, notes: &str) -> bool {
        self.update(id, |item| item.notes = non_empty(notes))
    }

    /// Sets which party member the line for `id` is for. An empty string
    /// clears it.
    ///
    /// Returns false if the item is not in the cart.
    pub fn update_party_member(&mut self, id: u64, party_member: &str) -> bool {
        self.update(id, |item| item.party_member = non_empty(party_member))
    }

    /// Empties the cart.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns true if the cart has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Returns the sum of price times quantity over all lines, in cents.
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, i| total.saturating_add(i.line_total()))
    }

    /// Computes the order breakdown for this cart with a tip in cents.
    pub fn totals(&self, tip: i64) -> Result<OrderTotals, TotalsError> {
        OrderTotals::new(self.total_price(), tip)
    }

    fn update(&mut self, id: u64, f: impl FnOnce(&mut CartItem)) -> bool {
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Subtotal, tax, tip and grand total of an order, all in cents.
///
/// ```
/// use checkout_validator::cart::OrderTotals;
///
/// let totals = OrderTotals::new(1000, 150).unwrap();
/// assert_eq!(totals.tax, 60);
/// assert_eq!(totals.total, 1210);
/// assert!(OrderTotals::new(1000, -1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderTotals {
    /// Sum of line totals.
    pub subtotal: u64,
    /// Sales tax on the subtotal.
    pub tax: u64,
    /// Customer tip.
    pub tip: u64,
    /// `subtotal + tax + tip`.
    pub total: u64,
}

impl OrderTotals {
    /// Builds the breakdown for a subtotal and tip.
    ///
    /// Tax is rounded half up to the nearest cent. Negative tips are
    /// rejected.
    pub fn new(subtotal: u64, tip: i64) -> Result<Self, TotalsError> {
        let tip = u64::try_from(tip).map_err(|_| TotalsError::NegativeTip(tip))?;
        let tax = sales_tax(subtotal);

        Ok(Self {
            subtotal,
            tax,
            tip,
            total: subtotal.saturating_add(tax).saturating_add(tip),
        })
    }
}

/// Error building [`OrderTotals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsError {
    /// The tip is below zero.
    NegativeTip(i64),
}

impl fmt::Display for TotalsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTip(tip) => write!(f, "tip cannot be negative (got {} cents)", tip),
        }
    }
}

impl std::error::Error for TotalsError {}

/// Tax on `subtotal` cents at [`TAX_RATE_BASIS_POINTS`], rounded half up.
pub fn sales_tax(subtotal: u64) -> u64 {
    let scaled = u128::from(subtotal) * u128::from(TAX_RATE_BASIS_POINTS) + 5_000;
    u64::try_from(scaled / 10_000).unwrap_or(u64::MAX)
}

/// Formats cents as dollars with two decimals, e.g. `$12.50`.
pub fn format_price(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
