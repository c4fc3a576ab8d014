//! CVV validation.
//!
//! The checkout accepts exactly three digits. Surrounding whitespace is
//! trimmed first; anything else (letters, inner spaces, a fourth digit)
//! makes the value invalid.
//!
//! # Example
//!
//! ```
//! use checkout_validator::cvv::{is_valid_cvv, validate_cvv};
//!
//! assert!(is_valid_cvv("123"));
//! assert!(is_valid_cvv(" 123 "));
//! assert!(!is_valid_cvv("12"));
//! assert!(!is_valid_cvv("12a"));
//!
//! let cvv = validate_cvv("007").unwrap();
//! assert_eq!(cvv.to_string(), "***");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// Number of digits a CVV must have.
pub const CVV_LENGTH: usize = 3;

/// A validated CVV.
#[derive(Clone)]
pub struct ValidatedCvv {
    digits: [u8; CVV_LENGTH],
}

impl ValidatedCvv {
    /// Returns the CVV as a string.
    ///
    /// # Security Warning
    ///
    /// Never log the result.
    pub fn as_str(&self) -> String {
        self.digits.iter().map(|&d| (b'0' + d) as char).collect()
    }

    /// Returns the CVV digits as values 0-9.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}

impl fmt::Debug for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedCvv").field("value", &"***").finish()
    }
}

impl fmt::Display for ValidatedCvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&"*".repeat(CVV_LENGTH))
    }
}

impl Drop for ValidatedCvv {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// Errors that can occur during CVV validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CvvError {
    /// The input is empty or only whitespace.
    Empty,
    /// The CVV contains a non-digit character.
    InvalidCharacter {
        /// The invalid character found.
        character: char,
        /// Position of the invalid character in the trimmed input.
        position: usize,
    },
    /// The CVV does not have exactly three digits.
    InvalidLength {
        /// Number of digits provided.
        length: usize,
    },
}

impl fmt::Display for CvvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "CVV is empty"),
            Self::InvalidCharacter { character, position } => {
                write!(
                    f,
                    "invalid character '{}' at position {}",
                    character.escape_default(),
                    position
                )
            }
            Self::InvalidLength { length } => {
                write!(f, "CVV must be {} digits, got {}", CVV_LENGTH, length)
            }
        }
    }
}

impl std::error::Error for CvvError {}

/// Validates a CVV string.
pub fn validate_cvv(input: &str) -> Result<ValidatedCvv, CvvError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(CvvError::Empty);
    }

    let mut digits = [0u8; CVV_LENGTH];
    let mut count = 0;

    for (position, c) in input.chars().enumerate() {
        if !c.is_ascii_digit() {
            digits.zeroize();
            return Err(CvvError::InvalidCharacter {
                character: c,
                position,
            });
        }
        if count < CVV_LENGTH {
            digits[count] = (c as u8) - b'0';
        }
        count += 1;
    }

    if count != CVV_LENGTH {
        digits.zeroize();
        return Err(CvvError::InvalidLength { length: count });
    }

    Ok(ValidatedCvv { digits })
}

/// Checks if a string is a valid three-digit CVV.
#[inline]
pub fn is_valid_cvv(input: &str) -> bool {
    validate_cvv(input).is_ok()
}
