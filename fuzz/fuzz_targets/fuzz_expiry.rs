//! Fuzz target for expiry parsing and validation.

#![no_main]

use arbitrary::Arbitrary;
use checkout_validator::expiry::{self, YearMonth};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    month: &'a str,
    year: &'a str,
    month_num: i64,
    year_num: i64,
    now_year: i16,
    now_month: u8,
}

fuzz_target!(|input: Input<'_>| {
    let now = match YearMonth::new(i32::from(input.now_year), input.now_month % 12 + 1) {
        Some(now) => now,
        None => return,
    };

    let strings = expiry::validate_expiry_at(input.month, input.year, now);
    assert_eq!(strings.is_ok(), expiry::is_valid_expiry_at(input.month, input.year, now));

    let numbers = expiry::validate_expiry_at(input.month_num, input.year_num, now);
    let as_text = expiry::validate_expiry_at(
        input.month_num.to_string(),
        input.year_num.to_string(),
        now,
    );
    assert_eq!(numbers, as_text);

    if let Ok(exp) = numbers {
        assert!(!exp.is_expired_at(now));
        let _ = exp.months_until_expiry_at(now);
        let _ = exp.format_short();
        let _ = exp.format_long();
    }

    let _ = expiry::parse_expiry(input.month, now);
});
