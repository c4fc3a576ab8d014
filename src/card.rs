//! The validated card number type.
//!
//! A [`CardNumber`] only exists after the digits passed the Luhn check. Its
//! digits are private, zeroed on drop, and never shown unmasked by `Debug`
//! or `Display`.

use std::fmt;
use zeroize::Zeroizing;

/// A card number that passed validation.
///
/// # Security
///
/// - Digits are only reachable through [`CardNumber::number`]
/// - Memory is zeroed on drop using the `zeroize` crate
/// - Debug and Display output is masked
#[derive(Clone)]
pub struct CardNumber {
    digits: Zeroizing<Vec<u8>>,
}

impl CardNumber {
    /// Wraps digits (values 0-9) that already passed validation.
    #[inline]
    pub(crate) fn new(digits: Vec<u8>) -> Self {
        Self {
            digits: Zeroizing::new(digits),
        }
    }

    /// Returns the number of digits.
    #[inline]
    pub fn length(&self) -> usize {
        self.digits.len()
    }

    /// Returns the last four digits, or all of them for shorter numbers.
    ///
    /// Safe for logging and display.
    pub fn last_four(&self) -> String {
        let start = self.digits.len().saturating_sub(4);
        to_string(&self.digits[start..])
    }

    /// Returns the full card number as a digit string.
    ///
    /// # Security Warning
    ///
    /// This exposes the full card number. Never log the result; use
    /// [`CardNumber::masked`] for display.
    pub fn number(&self) -> String {
        to_string(&self.digits)
    }

    /// Returns the number masked down to its last four digits,
    /// e.g. `****-****-****-0366`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_digits(&self.digits)
    }

    /// Returns the number grouped in fours for display, e.g.
    /// `4532 0151 1283 0366`.
    ///
    /// # Security Warning
    ///
    /// Like [`CardNumber::number`], this exposes every digit.
    pub fn formatted(&self) -> String {
        crate::format::format_card_number(&self.number())
    }
}

fn to_string(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("number", &self.masked())
            .field("length", &self.length())
            .finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
