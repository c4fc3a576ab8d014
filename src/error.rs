//! Error types for card number validation.
//!
//! Expiry and CVV failures have their own error types in [`crate::expiry`]
//! and [`crate::cvv`]; checkout-level errors live in [`crate::checkout`].

use std::fmt;

/// Reasons a card number can fail validation.
///
/// Formatting characters are never an error on their own: anything that is
/// not a digit is stripped before the checksum runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardNumberError {
    /// The input string was empty.
    Empty,

    /// The input had characters, but none of them were digits.
    NoDigits,

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    InvalidChecksum,
}

impl fmt::Display for CardNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "card number is empty"),
            Self::NoDigits => write!(f, "card number contains no digits"),
            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }
        }
    }
}

impl std::error::Error for CardNumberError {}
