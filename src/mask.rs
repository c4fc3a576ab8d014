//! Card number masking for display and logs.
//!
//! Only the last four digits are ever shown. The full card number must never
//! be logged or echoed back to the customer.

/// Placeholder sent in place of sensitive payment fields.
pub const REDACTED: &str = "REDACTED";

/// Masks digit values (0-9), keeping only the last four.
///
/// Format: `****-****-****-1234`. Sequences of four digits or fewer are
/// masked entirely.
pub fn mask_digits(digits: &[u8]) -> String {
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    for &d in &digits[masked_count..] {
        result.push((b'0' + d) as char);
    }

    result
}

/// Masks a raw card number string.
///
/// Non-digit characters are stripped first, so this works on unvalidated
/// form input.
///
/// # Example
///
/// ```
/// use checkout_validator::mask::mask_string;
///
/// assert_eq!(mask_string("4532 0151 1283 0366"), "****-****-****-0366");
/// assert_eq!(mask_string("123"), "***");
/// ```
pub fn mask_string(input: &str) -> String {
    mask_digits(&crate::luhn::digits_of(input))
}

/// Extracts the last four digits from a card number string.
///
/// Returns an empty string if there are fewer than 4 digits.
pub fn last_four(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        String::new()
    }
}
