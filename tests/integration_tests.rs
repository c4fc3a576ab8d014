//! Integration tests for checkout_validator.
//!
//! These cover the public API end to end: the three field validators, the
//! checkout gate and the order payload.

use checkout_validator::{
    build_order_request, cart::format_price, checkout::Field, checkout::FieldError, cvv,
    expiry::parse_expiry, format, is_valid_card_number, is_valid_cvv, is_valid_expiry,
    is_valid_expiry_at, luhn, mask, validate_card_number, validate_expiry_at, Cart,
    CardNumberError, CheckoutError, CheckoutForm, ExpiryError, MenuItem, SortKey, SortState,
    TotalsError, YearMonth,
};
use checkout_validator::orders::{filter_and_sort, filter_orders, OrderSummary};

// =============================================================================
// TEST CARD NUMBERS
// =============================================================================
// Public test numbers from payment processors. They pass Luhn but are not
// real cards.

mod test_cards {
    pub const VISA_1: &str = "4532015112830366";
    pub const VISA_2: &str = "4111111111111111";
    pub const VISA_3: &str = "4012888888881881";
    pub const VISA_13: &str = "4222222222222";
    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";
    pub const DISCOVER: &str = "6011111111111117";
    pub const DINERS: &str = "30569309025904";
    pub const JCB: &str = "3530111333300000";
}

fn reference() -> YearMonth {
    YearMonth::new(2026, 10).unwrap()
}

// =============================================================================
// CARD NUMBER
// =============================================================================

#[test]
fn test_all_test_cards_are_valid() {
    for card in [
        test_cards::VISA_1,
        test_cards::VISA_2,
        test_cards::VISA_3,
        test_cards::VISA_13,
        test_cards::MC_1,
        test_cards::MC_2,
        test_cards::AMEX_1,
        test_cards::AMEX_2,
        test_cards::DISCOVER,
        test_cards::DINERS,
        test_cards::JCB,
    ] {
        assert!(is_valid_card_number(card), "{} should be valid", card);
    }
}

#[test]
fn test_single_digit_change_is_detected() {
    let digits: Vec<char> = test_cards::VISA_1.chars().collect();
    for i in 0..digits.len() {
        let mut changed = digits.clone();
        let d = changed[i].to_digit(10).unwrap();
        changed[i] = char::from_digit((d + 1) % 10, 10).unwrap();
        let changed: String = changed.into_iter().collect();
        assert!(!is_valid_card_number(&changed), "{} should be invalid", changed);
    }
}

#[test]
fn test_known_invalid_number() {
    assert!(!is_valid_card_number("1234567812345678"));
    assert_eq!(
        validate_card_number("1234567812345678").unwrap_err(),
        CardNumberError::InvalidChecksum
    );
}

#[test]
fn test_input_as_typed_in_the_form() {
    assert!(is_valid_card_number("4532 0151 1283 0366"));
    assert!(is_valid_card_number("  4532-0151-1283-0366  "));
    assert!(is_valid_card_number("4532\t0151\n1283 0366"));
}

#[test]
fn test_no_digit_inputs() {
    for input in ["", "abcd", "    ", "----", "•••• •••• •••• ••••"] {
        assert!(!is_valid_card_number(input), "{:?} should be invalid", input);
    }
}

#[test]
fn test_all_zero_numbers_pass() {
    assert!(is_valid_card_number("0"));
    assert!(is_valid_card_number("0000 0000 0000 0000"));
    assert!(is_valid_card_number(&"0".repeat(100)));
}

#[test]
fn test_very_long_numbers_are_checked_not_rejected() {
    let mut digits = vec![7u8; 63];
    digits.push(luhn::check_digit(&digits));
    let number: String = digits.iter().map(|d| (b'0' + d) as char).collect();
    assert!(is_valid_card_number(&number));
}

#[test]
fn test_validated_card_never_leaks_number() {
    let card = validate_card_number(test_cards::VISA_1).unwrap();
    assert!(!format!("{}", card).contains(test_cards::VISA_1));
    assert!(!format!("{:?}", card).contains(test_cards::VISA_1));
    assert_eq!(card.last_four(), "0366");
    assert_eq!(card.number(), test_cards::VISA_1);
}

// =============================================================================
// EXPIRY
// =============================================================================

#[test]
fn test_expiry_invalid_month() {
    assert!(!is_valid_expiry(13, 2025));
    assert!(!is_valid_expiry(0, 2099));
    assert!(!is_valid_expiry_at("13", "30", reference()));
}

#[test]
fn test_expiry_past_year() {
    assert!(!is_valid_expiry(1, 2020));
    assert!(!is_valid_expiry_at(12, 2025, reference()));
}

#[test]
fn test_expiry_current_month_is_valid() {
    let now = reference();
    assert!(is_valid_expiry_at(now.month(), now.year(), now));
    assert!(is_valid_expiry_at(now.month(), now.year() % 100, now));
}

#[test]
fn test_expiry_month_before_current_is_invalid() {
    let now = reference();
    assert!(!is_valid_expiry_at(now.month() - 1, now.year(), now));
}

#[test]
fn test_expiry_every_month_of_reference_year() {
    let now = reference();
    for month in 1..=12u8 {
        assert_eq!(
            is_valid_expiry_at(month, now.year(), now),
            month >= now.month(),
            "month {}",
            month
        );
    }
}

#[test]
fn test_expiry_two_and_four_digit_years_agree() {
    let now = reference();
    for year in 20..=40 {
        for month in 1..=12 {
            assert_eq!(
                is_valid_expiry_at(month, year, now),
                is_valid_expiry_at(month, 2000 + year, now),
                "{}/{}",
                month,
                year
            );
        }
    }
}

#[test]
fn test_expiry_no_upper_bound() {
    assert!(is_valid_expiry_at(12, 9999, reference()));
    assert!(is_valid_expiry_at("01", "99", reference()));
}

#[test]
fn test_expiry_numeric_strings_and_numbers_agree() {
    let now = reference();
    assert_eq!(
        validate_expiry_at("7", "2030", now),
        validate_expiry_at(7u8, 2030u16, now)
    );
    assert_eq!(
        validate_expiry_at("abc", "2030", now),
        Err(ExpiryError::InvalidFormat)
    );
}

#[test]
fn test_combined_expiry_string() {
    let expiry = parse_expiry("12/28", reference()).unwrap();
    assert_eq!(expiry.month(), 12);
    assert_eq!(expiry.year(), 2028);
    assert!(!expiry.is_expired_at(reference()));
    assert!(parse_expiry("01/20", reference()).unwrap().is_expired_at(reference()));
}

// =============================================================================
// CVV
// =============================================================================

#[test]
fn test_cvv_cases() {
    assert!(is_valid_cvv("123"));
    assert!(!is_valid_cvv("12"));
    assert!(!is_valid_cvv("12a"));
    assert!(is_valid_cvv(" 123 "));
    assert!(!is_valid_cvv("1234"));
    assert!(!is_valid_cvv(""));
    assert!(matches!(
        cvv::validate_cvv("12a"),
        Err(cvv::CvvError::InvalidCharacter { character: 'a', .. })
    ));
}

// =============================================================================
// FORMAT AND MASK
// =============================================================================

#[test]
fn test_format_then_validate() {
    let formatted = format::format_card_number(test_cards::VISA_1);
    assert_eq!(formatted, "4532 0151 1283 0366");
    assert!(is_valid_card_number(&formatted));
    assert_eq!(format::strip_formatting(&formatted), test_cards::VISA_1);
}

#[test]
fn test_mask_of_raw_input() {
    assert_eq!(mask::mask_string("4532 0151 1283 0366"), "****-****-****-0366");
    assert_eq!(mask::last_four("4532 0151 1283 0366"), "0366");
}

// =============================================================================
// CHECKOUT
// =============================================================================

fn filled_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new(10, "Hot Dog", 650), 2);
    cart.add_item(&MenuItem::new(11, "Popcorn", 500), 1);
    cart.update_party_member(10, "Jordan");
    cart
}

#[test]
fn test_checkout_happy_path() {
    let cart = filled_cart();
    assert_eq!(format_price(cart.total_price()), "$18.00");

    let form = CheckoutForm::new("Jordan Smith", "4532 0151 1283 0366", "10", "26", " 123 ");
    assert!(form.validate_at(reference()).can_submit());

    let order = build_order_request(&cart, &form, reference()).unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].menu_item_id, 10);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.payment_info.expiry_month, 10);
    assert_eq!(order.payment_info.expiry_year, 2026);
    assert_eq!(order.payment_info.card_number, mask::REDACTED);
    assert_eq!(order.payment_info.cvv, mask::REDACTED);
}

#[test]
fn test_checkout_gate_requires_every_field() {
    let now = reference();
    let base = ["Jordan", "4532015112830366", "12", "28", "123"];

    for (i, field) in [
        Field::CardholderName,
        Field::CardNumber,
        Field::Expiry,
        Field::Cvv,
    ]
    .into_iter()
    .enumerate()
    {
        let mut values = base;
        // Expiry spans two inputs; clear the month.
        let index = if i >= 3 { i + 1 } else { i };
        values[index] = "";
        let form = CheckoutForm::new(values[0], values[1], values[2], values[3], values[4]);
        let validation = form.validate_at(now);

        assert!(!validation.can_submit(), "{} should block submit", field);
        let invalid: Vec<Field> = validation.errors().map(|(f, _)| f).collect();
        assert_eq!(invalid, vec![field]);
    }

    assert!(CheckoutForm::new(base[0], base[1], base[2], base[3], base[4])
        .validate_at(now)
        .can_submit());
}

#[test]
fn test_checkout_empty_form() {
    let validation = CheckoutForm::default().validate_at(reference());
    assert!(!validation.can_submit());
    assert_eq!(validation.cardholder_name, Some(FieldError::NameRequired));
    assert_eq!(
        validation.card_number,
        Some(FieldError::CardNumber(CardNumberError::Empty))
    );
    assert_eq!(validation.expiry, Some(FieldError::ExpiryRequired));
    assert!(validation.cvv.is_some());
}

#[test]
fn test_checkout_empty_cart_wins() {
    let err = build_order_request(&Cart::new(), &CheckoutForm::default(), reference()).unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
}

#[test]
fn test_checkout_after_clear_cart() {
    let mut cart = filled_cart();
    let form = CheckoutForm::new("Jordan", "4532015112830366", "12", "28", "123");
    assert!(build_order_request(&cart, &form, reference()).is_ok());

    cart.clear();
    assert_eq!(
        build_order_request(&cart, &form, reference()).unwrap_err(),
        CheckoutError::EmptyCart
    );
}

#[test]
fn test_checkout_expired_card() {
    let form = CheckoutForm::new("Jordan", "4532015112830366", "09", "26", "123");
    let err = build_order_request(&filled_cart(), &form, reference()).unwrap_err();
    match err {
        CheckoutError::InvalidForm(validation) => {
            assert!(matches!(
                validation.expiry,
                Some(FieldError::Expiry(ExpiryError::Expired { .. }))
            ));
        }
        other => panic!("Expected InvalidForm, got {:?}", other),
    }
}

// =============================================================================
// ORDER TOTALS AND HISTORY
// =============================================================================

#[test]
fn test_order_summary_breakdown() {
    let cart = filled_cart();
    let totals = cart.totals(250).unwrap();

    assert_eq!(format_price(totals.subtotal), "$18.00");
    assert_eq!(format_price(totals.tax), "$1.08");
    assert_eq!(format_price(totals.tip), "$2.50");
    assert_eq!(format_price(totals.total), "$21.58");
    assert_eq!(cart.totals(-100), Err(TotalsError::NegativeTip(-100)));
}

#[test]
fn test_order_history_table() {
    let orders = vec![
        OrderSummary::new(1, "2026-10-01T12:00:00Z", "2026-10-01T12:15:00Z")
            .with_status("completed")
            .with_place("Main Lobby", "Pickup Counter"),
        OrderSummary::new(2, "2026-10-05T12:00:00Z", "2026-10-05T12:15:00Z").with_status("pending"),
        OrderSummary::new(3, "", "").with_status("pending"),
    ];

    let sort = SortState::default();
    let newest: Vec<u64> = filter_and_sort(&orders, "", sort).iter().map(|o| o.id).collect();
    assert_eq!(newest, vec![2, 1, 3]);

    let oldest: Vec<u64> = filter_and_sort(&orders, "", sort.select(SortKey::OrderTime))
        .iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(oldest, vec![1, 2, 3]);

    let pending: Vec<u64> = filter_orders(&orders, "Pending").iter().map(|o| o.id).collect();
    assert_eq!(pending, vec![2, 3]);
}
