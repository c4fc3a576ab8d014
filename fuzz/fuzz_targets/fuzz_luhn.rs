//! Fuzz target for the Luhn checksum.

#![no_main]

use checkout_validator::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();

    let valid = luhn::validate(&digits);
    if digits.is_empty() {
        assert!(!valid);
        return;
    }
    assert_eq!(valid, luhn::checksum(&digits) % 10 == 0);

    let check = luhn::check_digit(&digits);
    assert!(check <= 9, "Check digit should be 0-9");

    let mut with_check = digits;
    with_check.push(check);
    assert!(luhn::validate(&with_check), "Appending the check digit should make it valid");
});
