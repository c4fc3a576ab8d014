//! Card number formatting for the checkout input field.
//!
//! The field shows digits in groups of four (placeholder
//! `•••• •••• •••• ••••`), with any remainder in a shorter final group.
//!
//! # Example
//!
//! ```
//! use checkout_validator::format::{format_card_number, format_with_separator, strip_formatting};
//!
//! assert_eq!(format_card_number("4532015112830366"), "4532 0151 1283 0366");
//! assert_eq!(format_with_separator("4532015112830366", "-"), "4532-0151-1283-0366");
//! assert_eq!(strip_formatting("4532-0151-1283-0366"), "4532015112830366");
//! ```

/// Number of digits per display group.
pub const GROUP_SIZE: usize = 4;

/// Formats a card number in space-separated groups of four.
pub fn format_card_number(input: &str) -> String {
    format_with_separator(input, " ")
}

/// Formats a card number in groups of four with a custom separator.
///
/// Non-digit characters in the input are dropped. Returns an empty string
/// when there are no digits.
pub fn format_with_separator(input: &str, separator: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result =
        String::with_capacity(digits.len() + (digits.len() / GROUP_SIZE) * separator.len());

    for (i, group) in digits.chunks(GROUP_SIZE).enumerate() {
        if i > 0 {
            result.push_str(separator);
        }
        result.extend(group);
    }

    result
}

/// Removes everything except ASCII digits.
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}
