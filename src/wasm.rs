//! WebAssembly bindings for the checkout page.
//!
//! The expiry checks read "now" from the browser's `Date`, so results match
//! the customer's local calendar month.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { isValidCardNumber, isValidExpiry, isValidCVV, validateCheckout } from 'checkout_validator';
//!
//! await init();
//!
//! isValidCardNumber("4532 0151 1283 0366");  // true
//! isValidExpiry("12", "28");                 // true
//! isValidExpiry(12, 2028);                   // true
//! isValidCVV(" 123 ");                       // true
//!
//! const result = validateCheckout(name, cardNumber, month, year, cvv);
//! if (!result.valid) {
//!     for (const field of result.invalidFields) {
//!         console.log(field, result.messageFor(field));
//!     }
//! }
//! ```

#![cfg(feature = "wasm")]

use crate::checkout::{CheckoutForm, CheckoutValidation, Field};
use crate::expiry::YearMonth;
use wasm_bindgen::prelude::*;

/// Current year and month from the browser clock.
fn browser_now() -> Option<YearMonth> {
    let date = js_sys::Date::new_0();
    YearMonth::new(date.get_full_year() as i32, date.get_month() as u8 + 1)
}

/// Reads a form value that may be a string or a number.
fn field_text(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.as_f64() {
        Some(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", n as i64),
        _ => String::new(),
    }
}

/// Checks a card number with the Luhn algorithm.
#[wasm_bindgen(js_name = isValidCardNumber)]
pub fn is_valid_card_number(card_number: &str) -> bool {
    crate::is_valid_card_number(card_number)
}

/// Checks that an expiry month/year is not in the past.
///
/// Month and year may be strings or numbers; two-digit years are read in
/// the current century.
#[wasm_bindgen(js_name = isValidExpiry)]
pub fn is_valid_expiry(month: JsValue, year: JsValue) -> bool {
    match browser_now() {
        Some(now) => crate::is_valid_expiry_at(field_text(&month), field_text(&year), now),
        None => false,
    }
}

/// Checks that a CVV is exactly three digits.
#[wasm_bindgen(js_name = isValidCVV)]
pub fn is_valid_cvv(cvv: &str) -> bool {
    crate::is_valid_cvv(cvv)
}

/// Formats a card number in groups of four.
#[wasm_bindgen(js_name = formatCardNumber)]
pub fn format_card_number(card_number: &str) -> String {
    crate::format::format_card_number(card_number)
}

/// Masks a card number, showing only the last 4 digits.
#[wasm_bindgen(js_name = maskCardNumber)]
pub fn mask_card_number(card_number: &str) -> String {
    crate::mask::mask_string(card_number)
}

/// Result of validating the whole checkout form.
#[wasm_bindgen]
pub struct CheckoutResult {
    validation: CheckoutValidation,
}

#[wasm_bindgen]
impl CheckoutResult {
    /// True when the form can be submitted.
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.validation.can_submit()
    }

    /// Keys of the invalid fields, in form order.
    #[wasm_bindgen(getter, js_name = invalidFields)]
    pub fn invalid_fields(&self) -> js_sys::Array {
        self.validation
            .errors()
            .map(|(field, _)| JsValue::from_str(field.key()))
            .collect()
    }

    /// Inline message for a field key, or `undefined` when it is valid.
    #[wasm_bindgen(js_name = messageFor)]
    pub fn message_for(&self, key: &str) -> Option<String> {
        let field = match key {
            "cardholderName" => Field::CardholderName,
            "cardNumber" => Field::CardNumber,
            "expiry" => Field::Expiry,
            "cvv" => Field::Cvv,
            _ => return None,
        };
        self.validation.get(field).map(|e| e.message().to_string())
    }
}

/// Validates every checkout field at once.
#[wasm_bindgen(js_name = validateCheckout)]
pub fn validate_checkout(
    cardholder_name: &str,
    card_number: &str,
    expiry_month: JsValue,
    expiry_year: JsValue,
    cvv: &str,
) -> Result<CheckoutResult, JsValue> {
    let now = browser_now().ok_or_else(|| JsValue::from_str("browser clock unavailable"))?;
    let form = CheckoutForm::new(
        cardholder_name,
        card_number,
        field_text(&expiry_month),
        field_text(&expiry_year),
        cvv,
    );

    Ok(CheckoutResult {
        validation: form.validate_at(now),
    })
}
