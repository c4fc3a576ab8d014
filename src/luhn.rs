//! Luhn (mod 10) checksum over card number digits.
//!
//! Starting from the rightmost digit and moving left, every second digit is
//! doubled (subtracting 9 when the result exceeds 9), all digits are summed,
//! and the number is valid when the sum is divisible by 10.
//!
//! Length is not part of the check: any non-empty digit sequence is
//! accepted, so `"0"` and `"0000"` both pass.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Extracts the decimal digits of `input` as values 0-9, skipping every
/// other character.
///
/// # Example
///
/// ```
/// use checkout_validator::luhn::digits_of;
///
/// assert_eq!(digits_of("45 32-01"), vec![4, 5, 3, 2, 0, 1]);
/// assert!(digits_of("abcd").is_empty());
/// ```
pub fn digits_of(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect()
}

/// Validates a digit sequence using the Luhn algorithm.
///
/// Returns `false` for an empty slice.
///
/// # Example
///
/// ```
/// use checkout_validator::luhn::validate;
///
/// let digits = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];
/// assert!(validate(&digits));
///
/// let invalid = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 7];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a digit sequence.
///
/// The rightmost digit is kept as is, the one to its left is doubled, and so
/// on alternately.
#[inline]
pub fn checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Computes the check digit that completes `digits` into a Luhn-valid number.
///
/// Once appended, every existing digit shifts one place left, so the digits
/// that are doubled here are the ones at even offsets from the right.
///
/// # Example
///
/// ```
/// use checkout_validator::luhn::check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(check_digit(&partial), 6);
/// ```
#[inline]
pub fn check_digit(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
