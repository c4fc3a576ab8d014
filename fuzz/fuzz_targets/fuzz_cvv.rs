//! Fuzz target for CVV validation.

#![no_main]

use checkout_validator::cvv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let result = cvv::validate_cvv(data);
    assert_eq!(result.is_ok(), cvv::is_valid_cvv(data));

    if let Ok(validated) = result {
        assert_eq!(validated.as_str(), data.trim());
        assert_eq!(validated.digits().len(), cvv::CVV_LENGTH);
        assert!(!format!("{:?}", validated).contains(data.trim()));
    }
});
