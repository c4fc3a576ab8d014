//! # checkout_validator
//!
//! Payment-field validation for a venue food-ordering checkout, plus the
//! cart and order payload helpers around it.
//!
//! ## Features
//!
//! - Luhn card number check (formatting characters are stripped)
//! - Expiry month/year check against an explicit or local-clock "now"
//! - Three-digit CVV check
//! - Checkout form gate with per-field errors
//! - Cart state, order totals and redacted order payloads
//! - Order history filtering and sorting
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use checkout_validator::{is_valid_card_number, is_valid_cvv, is_valid_expiry_at, YearMonth};
//!
//! assert!(is_valid_card_number("4532 0151 1283 0366"));
//! assert!(!is_valid_card_number("1234567812345678"));
//! assert!(!is_valid_card_number("abcd"));
//!
//! let now = YearMonth::new(2026, 10).unwrap();
//! assert!(is_valid_expiry_at(10, 2026, now));
//! assert!(is_valid_expiry_at("12", "28", now));
//! assert!(!is_valid_expiry_at(9, 2026, now));
//!
//! assert!(is_valid_cvv(" 123 "));
//! assert!(!is_valid_cvv("12a"));
//! ```
//!
//! All boolean validators are total: malformed input yields `false`, never a
//! panic. Each has a `validate_*` sibling returning a `Result` that says why.
//!
//! ## Checkout
//!
//! ```rust
//! use checkout_validator::checkout::{CheckoutForm, Field};
//! use checkout_validator::YearMonth;
//!
//! let now = YearMonth::new(2026, 10).unwrap();
//! let form = CheckoutForm::new("", "4532015112830366", "12", "28", "12");
//! let validation = form.validate_at(now);
//!
//! assert!(!validation.can_submit());
//! let invalid: Vec<Field> = validation.errors().map(|(field, _)| field).collect();
//! assert_eq!(invalid, vec![Field::CardholderName, Field::Cvv]);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | JSON (de)serialization of cart, form and order types |
//! | `tracing` | Debug events when order payloads are built |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly bindings for the checkout page |
//!
//! ## Security
//!
//! - Card digits and CVVs are zeroed on drop
//! - `Debug` and `Display` show masked values only
//! - Order payloads carry `REDACTED` in place of card number and CVV
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod cart;
pub mod checkout;
pub mod cvv;
pub mod error;
pub mod expiry;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod orders;
pub mod validate;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::CardNumber;
pub use cart::{Cart, CartItem, MenuItem, OrderTotals, TotalsError};
pub use checkout::{build_order_request, CheckoutError, CheckoutForm, CheckoutValidation};
pub use cvv::{is_valid_cvv, validate_cvv, CvvError, ValidatedCvv};
pub use error::CardNumberError;
pub use expiry::{
    is_valid_expiry, is_valid_expiry_at, validate_expiry, validate_expiry_at, ExpiryDate,
    ExpiryError, YearMonth,
};
pub use orders::{filter_orders, sort_orders, OrderSummary, SortDirection, SortKey, SortState};
pub use validate::{is_valid_card_number, validate_card_number};
