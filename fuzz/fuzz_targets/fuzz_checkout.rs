//! Fuzz target for the checkout form gate.

#![no_main]

use arbitrary::Arbitrary;
use checkout_validator::{
    build_order_request, is_valid_card_number, is_valid_cvv, is_valid_expiry_at, Cart,
    CheckoutForm, MenuItem, YearMonth,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    card: String,
    month: String,
    year: String,
    cvv: String,
    items: Vec<(u8, u16, u8)>,
}

fuzz_target!(|input: Input| {
    let Some(now) = YearMonth::new(2026, 10) else {
        return;
    };

    let expected = !input.name.trim().is_empty()
        && is_valid_card_number(&input.card)
        && is_valid_expiry_at(&input.month, &input.year, now)
        && is_valid_cvv(&input.cvv);

    let form = CheckoutForm::new(
        input.name.as_str(),
        input.card.as_str(),
        input.month.as_str(),
        input.year.as_str(),
        input.cvv.as_str(),
    );
    assert_eq!(form.validate_at(now).can_submit(), expected);

    let mut cart = Cart::new();
    for (id, price, qty) in &input.items {
        cart.add_item(&MenuItem::new(u64::from(*id), "Item", u64::from(*price)), u32::from(*qty));
    }

    match build_order_request(&cart, &form, now) {
        Ok(order) => {
            assert!(expected && !cart.is_empty());
            assert_eq!(order.items.len(), cart.items().len());
        }
        Err(_) => assert!(!expected || cart.is_empty()),
    }
});
