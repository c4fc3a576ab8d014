//! Card number validation entry points.
//!
//! Every non-digit character (spaces, dashes, dots, letters) is stripped and
//! the remaining digits go through the Luhn check. There is no length rule:
//! one digit is enough.

use crate::card::CardNumber;
use crate::error::CardNumberError;
use crate::luhn;

/// Validates a card number string.
///
/// # Returns
///
/// * `Ok(CardNumber)` - the digits passed the Luhn check
/// * `Err(CardNumberError::Empty)` - the input was empty
/// * `Err(CardNumberError::NoDigits)` - nothing was left after stripping
/// * `Err(CardNumberError::InvalidChecksum)` - the Luhn check failed
///
/// # Example
///
/// ```
/// use checkout_validator::{validate_card_number, CardNumberError};
///
/// let card = validate_card_number("4532 0151 1283 0366").unwrap();
/// assert_eq!(card.last_four(), "0366");
///
/// let err = validate_card_number("1234567812345678").unwrap_err();
/// assert_eq!(err, CardNumberError::InvalidChecksum);
/// ```
pub fn validate_card_number(input: &str) -> Result<CardNumber, CardNumberError> {
    if input.is_empty() {
        return Err(CardNumberError::Empty);
    }

    let digits = luhn::digits_of(input);

    if digits.is_empty() {
        return Err(CardNumberError::NoDigits);
    }

    if !luhn::validate(&digits) {
        return Err(CardNumberError::InvalidChecksum);
    }

    Ok(CardNumber::new(digits))
}

/// Checks whether a card number string passes validation.
///
/// Never panics; malformed input is simply invalid.
///
/// # Example
///
/// ```
/// use checkout_validator::is_valid_card_number;
///
/// assert!(is_valid_card_number("4532015112830366"));
/// assert!(!is_valid_card_number("1234567812345678"));
/// assert!(!is_valid_card_number("abcd"));
/// ```
#[inline]
pub fn is_valid_card_number(input: &str) -> bool {
    validate_card_number(input).is_ok()
}
