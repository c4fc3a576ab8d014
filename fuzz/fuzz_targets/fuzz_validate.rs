//! Fuzz target for card number validation.
//!
//! Checks the validators never panic and agree with each other.

#![no_main]

use checkout_validator::{format, is_valid_card_number, luhn, mask, validate_card_number};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let result = validate_card_number(data);
    assert_eq!(result.is_ok(), is_valid_card_number(data));

    let digits = luhn::digits_of(data);
    assert_eq!(result.is_ok(), luhn::validate(&digits));

    if let Ok(card) = result {
        let _ = card.masked();
        let _ = card.last_four();
        let _ = format!("{:?}", card);
        let _ = format!("{}", card);
    }

    // Formatting and masking work on unvalidated input too.
    let formatted = format::format_card_number(data);
    assert_eq!(format::strip_formatting(&formatted), format::strip_formatting(data));
    let _ = format::format_with_separator(data, "-");
    let _ = mask::mask_string(data);
});
