//! Checkout form validation and order payload construction.
//!
//! The form is submittable when the cardholder name is non-empty and the
//! card number, expiry and CVV all pass their validators. The order payload
//! sent to the backend never carries the card number or the CVV; both are
//! replaced by [`REDACTED`].
//!
//! # Example
//!
//! ```
//! use checkout_validator::cart::{Cart, MenuItem};
//! use checkout_validator::checkout::{build_order_request, CheckoutForm};
//! use checkout_validator::expiry::YearMonth;
//!
//! let now = YearMonth::new(2026, 10).unwrap();
//! let form = CheckoutForm::new("Ada Lovelace", "4532 0151 1283 0366", "12", "28", "123");
//! assert!(form.validate_at(now).can_submit());
//!
//! let mut cart = Cart::new();
//! cart.add_item(&MenuItem::new(3, "Nachos", 899), 2);
//!
//! let order = build_order_request(&cart, &form, now).unwrap();
//! assert_eq!(order.payment_info.card_number, "REDACTED");
//! assert_eq!(order.payment_info.expiry_year, 2028);
//! ```

use crate::cart::Cart;
use crate::cvv::{self, CvvError};
use crate::error::CardNumberError;
use crate::expiry::{self, ExpiryDate, ExpiryError, YearMonth};
use crate::mask::{self, REDACTED};
use crate::validate::validate_card_number;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw checkout form input, exactly as typed.
///
/// The contents are zeroed on drop and masked in `Debug` output.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CheckoutForm {
    /// Name on the card.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cardholder_name: String,
    /// Card number, possibly with spaces or dashes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_number: String,
    /// Expiry month, `MM`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_month: String,
    /// Expiry year, `YY` or `YYYY`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_year: String,
    /// Three-digit CVV.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cvv: String,
}

impl CheckoutForm {
    /// Creates a form from field values.
    pub fn new(
        cardholder_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            cardholder_name: cardholder_name.into(),
            card_number: card_number.into(),
            expiry_month: expiry_month.into(),
            expiry_year: expiry_year.into(),
            cvv: cvv.into(),
        }
    }

    /// Validates every field against the reference month `now`.
    pub fn validate_at(&self, now: YearMonth) -> CheckoutValidation {
        self.check(now).0
    }

    /// Validates every field against the local clock.
    pub fn validate(&self) -> CheckoutValidation {
        self.validate_at(YearMonth::now())
    }

    fn check(&self, now: YearMonth) -> (CheckoutValidation, Option<ExpiryDate>) {
        let cardholder_name = if self.cardholder_name.trim().is_empty() {
            Some(FieldError::NameRequired)
        } else {
            None
        };

        let card_number = validate_card_number(&self.card_number)
            .err()
            .map(FieldError::CardNumber);

        // Expiry is only checked once either part has been typed.
        let expiry = if self.expiry_month.is_empty() && self.expiry_year.is_empty() {
            Err(FieldError::ExpiryRequired)
        } else {
            expiry::validate_expiry_at(&self.expiry_month, &self.expiry_year, now)
                .map_err(FieldError::Expiry)
        };

        let cvv = cvv::validate_cvv(&self.cvv).err().map(FieldError::Cvv);

        let (expiry_date, expiry_error) = match expiry {
            Ok(date) => (Some(date), None),
            Err(e) => (None, Some(e)),
        };

        (
            CheckoutValidation {
                cardholder_name,
                card_number,
                expiry: expiry_error,
                cvv,
            },
            expiry_date,
        )
    }
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("cardholder_name", &self.cardholder_name)
            .field("card_number", &mask::mask_string(&self.card_number))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvv", &"***")
            .finish()
    }
}

/// The fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Name on the card.
    CardholderName,
    /// Card number.
    CardNumber,
    /// Expiry month and year, checked together.
    Expiry,
    /// CVV.
    Cvv,
}

impl Field {
    /// Returns the field key used in JSON payloads.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CardholderName => "cardholderName",
            Self::CardNumber => "cardNumber",
            Self::Expiry => "expiry",
            Self::Cvv => "cvv",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a single checkout field is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The cardholder name is empty.
    NameRequired,
    /// The card number failed validation.
    CardNumber(CardNumberError),
    /// Neither expiry month nor year was entered.
    ExpiryRequired,
    /// The expiry failed validation.
    Expiry(ExpiryError),
    /// The CVV failed validation.
    Cvv(CvvError),
}

impl FieldError {
    /// Returns the short message shown next to the field.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NameRequired => "Please enter the name on the card.",
            Self::CardNumber(_) => "Invalid card number.",
            Self::ExpiryRequired => "Please enter the expiry date.",
            Self::Expiry(_) => "Invalid or expired date.",
            Self::Cvv(_) => "CVV must be 3 digits.",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRequired => write!(f, "cardholder name is required"),
            Self::CardNumber(e) => write!(f, "{}", e),
            Self::ExpiryRequired => write!(f, "expiry date is required"),
            Self::Expiry(e) => write!(f, "{}", e),
            Self::Cvv(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CardNumber(e) => Some(e),
            Self::Expiry(e) => Some(e),
            Self::Cvv(e) => Some(e),
            Self::NameRequired | Self::ExpiryRequired => None,
        }
    }
}

/// Field-level result of validating a [`CheckoutForm`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutValidation {
    /// Error for the cardholder name, if any.
    pub cardholder_name: Option<FieldError>,
    /// Error for the card number, if any.
    pub card_number: Option<FieldError>,
    /// Error for the expiry, if any.
    pub expiry: Option<FieldError>,
    /// Error for the CVV, if any.
    pub cvv: Option<FieldError>,
}

impl CheckoutValidation {
    /// Returns true if every field is valid.
    pub fn can_submit(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Returns the error for one field.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::CardholderName => self.cardholder_name.as_ref(),
            Field::CardNumber => self.card_number.as_ref(),
            Field::Expiry => self.expiry.as_ref(),
            Field::Cvv => self.cvv.as_ref(),
        }
    }

    /// Iterates over the invalid fields in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        [Field::CardholderName, Field::CardNumber, Field::Expiry, Field::Cvv]
            .into_iter()
            .filter_map(move |field| self.get(field).map(|e| (field, e)))
    }
}

/// Reasons an order payload cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing in the cart.
    EmptyCart,
    /// At least one form field is invalid.
    InvalidForm(CheckoutValidation),
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCart => write!(f, "Your cart is empty."),
            Self::InvalidForm(validation) => {
                let fields: Vec<&str> = validation.errors().map(|(field, _)| field.key()).collect();
                write!(f, "invalid checkout fields: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for CheckoutError {}

/// Order creation payload for the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderRequest {
    /// One entry per cart line.
    pub items: Vec<OrderItemRequest>,
    /// Payment details with sensitive values redacted.
    pub payment_info: PaymentInfo,
}

/// One cart line in an [`OrderRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrderItemRequest {
    /// Menu item id.
    pub menu_item_id: u64,
    /// Quantity ordered.
    pub quantity: u32,
    /// Preparation notes, `null` when there are none.
    pub notes: Option<String>,
}

/// Payment section of an [`OrderRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaymentInfo {
    /// Always [`REDACTED`].
    pub card_number: String,
    /// Expiry month, 1-12.
    pub expiry_month: u8,
    /// Four-digit expiry year.
    pub expiry_year: i32,
    /// Always [`REDACTED`].
    pub cvv: String,
}

#[cfg(feature = "serde")]
impl OrderRequest {
    /// Serializes the payload as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Builds the order payload for `cart` once `form` passes validation.
///
/// The expiry is sent normalized (four-digit year); card number and CVV are
/// replaced by [`REDACTED`].
pub fn build_order_request(
    cart: &Cart,
    form: &CheckoutForm,
    now: YearMonth,
) -> Result<OrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let (validation, expiry) = form.check(now);
    let expiry = match expiry {
        Some(expiry) if validation.can_submit() => expiry,
        _ => return Err(CheckoutError::InvalidForm(validation)),
    };

    let request = OrderRequest {
        items: cart
            .items()
            .iter()
            .map(|line| OrderItemRequest {
                menu_item_id: line.id(),
                quantity: line.quantity,
                notes: line.notes.clone(),
            })
            .collect(),
        payment_info: PaymentInfo {
            card_number: REDACTED.to_string(),
            expiry_month: expiry.month(),
            expiry_year: expiry.year(),
            cvv: REDACTED.to_string(),
        },
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        items = request.items.len(),
        card = %mask::mask_string(&form.card_number),
        expiry = %expiry,
        "built order request"
    );

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MenuItem;

    fn now() -> YearMonth {
        YearMonth::new(2026, 10).unwrap()
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm::new("Ada Lovelace", "4532 0151 1283 0366", "12", "28", "123")
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&MenuItem::new(3, "Nachos", 899), 2);
        cart.add_item(&MenuItem::new(5, "Lemonade", 300), 1);
        cart.update_notes(3, "extra cheese");
        cart
    }

    #[test]
    fn test_valid_form_can_submit() {
        let validation = valid_form().validate_at(now());
        assert!(validation.can_submit());
        assert_eq!(validation.errors().count(), 0);
    }

    #[test]
    fn test_name_required() {
        let mut form = valid_form();
        form.cardholder_name = "   ".to_string();
        let validation = form.validate_at(now());
        assert!(!validation.can_submit());
        assert_eq!(validation.cardholder_name, Some(FieldError::NameRequired));
    }

    #[test]
    fn test_each_field_reports_its_own_error() {
        let form = CheckoutForm::new("Ada", "1234567812345678", "09", "2026", "12a");
        let validation = form.validate_at(now());

        assert_eq!(validation.cardholder_name, None);
        assert_eq!(
            validation.card_number,
            Some(FieldError::CardNumber(CardNumberError::InvalidChecksum))
        );
        assert!(matches!(
            validation.expiry,
            Some(FieldError::Expiry(ExpiryError::Expired { month: 9, year: 2026 }))
        ));
        assert!(matches!(validation.cvv, Some(FieldError::Cvv(_))));

        let fields: Vec<Field> = validation.errors().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::CardNumber, Field::Expiry, Field::Cvv]);
    }

    #[test]
    fn test_expiry_missing_vs_partial() {
        let mut form = valid_form();
        form.expiry_month.clear();
        form.expiry_year.clear();
        assert_eq!(
            form.validate_at(now()).expiry,
            Some(FieldError::ExpiryRequired)
        );

        form.expiry_month = "12".to_string();
        assert_eq!(
            form.validate_at(now()).expiry,
            Some(FieldError::Expiry(ExpiryError::Empty))
        );
    }

    #[test]
    fn test_build_order_request() {
        let order = build_order_request(&cart(), &valid_form(), now()).unwrap();

        assert_eq!(
            order.items,
            vec![
                OrderItemRequest {
                    menu_item_id: 3,
                    quantity: 2,
                    notes: Some("extra cheese".to_string()),
                },
                OrderItemRequest {
                    menu_item_id: 5,
                    quantity: 1,
                    notes: None,
                },
            ]
        );
        assert_eq!(order.payment_info.card_number, REDACTED);
        assert_eq!(order.payment_info.cvv, REDACTED);
        assert_eq!(order.payment_info.expiry_month, 12);
        assert_eq!(order.payment_info.expiry_year, 2028);
    }

    #[test]
    fn test_build_order_request_empty_cart() {
        let err = build_order_request(&Cart::new(), &valid_form(), now()).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty.");
    }

    #[test]
    fn test_build_order_request_invalid_form() {
        let mut form = valid_form();
        form.cvv = "12".to_string();
        let err = build_order_request(&cart(), &form, now()).unwrap_err();

        match &err {
            CheckoutError::InvalidForm(validation) => {
                assert!(validation.cvv.is_some());
                assert!(validation.card_number.is_none());
            }
            other => panic!("Expected InvalidForm, got {:?}", other),
        }
        assert_eq!(err.to_string(), "invalid checkout fields: cvv");
    }

    #[test]
    fn test_form_debug_is_masked() {
        let debug = format!("{:?}", valid_form());
        assert!(!debug.contains("4532 0151 1283 0366"));
        assert!(!debug.contains("4532015112830366"));
        assert!(!debug.contains("123\""));
        assert!(debug.contains("0366"));
    }

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::NameRequired.to_string(), "cardholder name is required");
        assert_eq!(
            FieldError::CardNumber(CardNumberError::NoDigits).to_string(),
            "card number contains no digits"
        );
        assert_eq!(
            FieldError::Cvv(CvvError::Empty).message(),
            "CVV must be 3 digits."
        );
        assert_eq!(Field::CardholderName.key(), "cardholderName");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_order_request_json_shape() {
        let order = build_order_request(&cart(), &valid_form(), now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&order.to_json().unwrap()).unwrap();

        assert_eq!(value["items"][0]["menuItemId"], 3);
        assert_eq!(value["items"][0]["notes"], "extra cheese");
        assert!(value["items"][1]["notes"].is_null());
        assert_eq!(value["paymentInfo"]["cardNumber"], "REDACTED");
        assert_eq!(value["paymentInfo"]["cvv"], "REDACTED");
        assert_eq!(value["paymentInfo"]["expiryMonth"], 12);
        assert_eq!(value["paymentInfo"]["expiryYear"], 2028);
        assert!(!value.to_string().contains("4532"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_form_deserializes_from_camel_case() {
        let form: CheckoutForm = serde_json::from_str(
            r#"{"cardholderName":"Ada","cardNumber":"4532015112830366","expiryMonth":"12","expiryYear":"28","cvv":"123"}"#,
        )
        .unwrap();
        assert!(form.validate_at(now()).can_submit());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_form_missing_fields_default_to_empty() {
        let form: CheckoutForm = serde_json::from_str(r#"{"cardNumber":"4532015112830366"}"#).unwrap();
        assert_eq!(form.card_number, "4532015112830366");
        assert!(form.cardholder_name.is_empty());
        assert!(form.cvv.is_empty());

        let validation = form.validate_at(now());
        assert_eq!(validation.cardholder_name, Some(FieldError::NameRequired));
        assert!(validation.card_number.is_none());
        assert_eq!(validation.expiry, Some(FieldError::ExpiryRequired));
    }
}
