//! Benchmarks for checkout_validator.
//!
//! Run with: cargo bench

use checkout_validator::{
    is_valid_card_number, luhn, validate_card_number, validate_cvv, validate_expiry_at, Cart,
    CheckoutForm, MenuItem, YearMonth,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const VISA_16: &str = "4532015112830366";
const VISA_16_FORMATTED: &str = "4532 0151 1283 0366";
const AMEX: &str = "378282246310005";
const INVALID: &str = "1234567812345678";

const VISA_DIGITS: [u8; 16] = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];

fn reference() -> YearMonth {
    YearMonth::new(2026, 10).unwrap()
}

fn bench_card_number(c: &mut Criterion) {
    let mut group = c.benchmark_group("card_number");

    group.bench_function("visa_16_raw", |b| {
        b.iter(|| is_valid_card_number(black_box(VISA_16)))
    });

    group.bench_function("visa_16_formatted", |b| {
        b.iter(|| is_valid_card_number(black_box(VISA_16_FORMATTED)))
    });

    group.bench_function("amex_15", |b| {
        b.iter(|| is_valid_card_number(black_box(AMEX)))
    });

    group.bench_function("invalid_checksum", |b| {
        b.iter(|| is_valid_card_number(black_box(INVALID)))
    });

    group.bench_function("validate_with_error", |b| {
        b.iter(|| validate_card_number(black_box(VISA_16_FORMATTED)))
    });

    group.finish();
}

/// Luhn on pre-parsed digits, skipping input cleanup
fn bench_luhn(c: &mut Criterion) {
    let mut group = c.benchmark_group("luhn");

    group.bench_function("validate_16", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("check_digit_15", |b| {
        b.iter(|| luhn::check_digit(black_box(&VISA_DIGITS[..15])))
    });

    for len in [16usize, 64, 256] {
        let digits: Vec<u8> = (0..len).map(|i| (i % 10) as u8).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("validate_len", len), &digits, |b, d| {
            b.iter(|| luhn::validate(black_box(d)))
        });
    }

    group.finish();
}

fn bench_expiry(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    let now = reference();

    group.bench_function("strings_two_digit_year", |b| {
        b.iter(|| validate_expiry_at(black_box("12"), black_box("28"), now))
    });

    group.bench_function("strings_four_digit_year", |b| {
        b.iter(|| validate_expiry_at(black_box("12"), black_box("2028"), now))
    });

    group.bench_function("integers", |b| {
        b.iter(|| validate_expiry_at(black_box(12u8), black_box(2028i32), now))
    });

    group.bench_function("expired", |b| {
        b.iter(|| validate_expiry_at(black_box("01"), black_box("20"), now))
    });

    group.finish();
}

fn bench_cvv(c: &mut Criterion) {
    let mut group = c.benchmark_group("cvv");

    group.bench_function("valid", |b| b.iter(|| validate_cvv(black_box("123"))));

    group.bench_function("padded", |b| b.iter(|| validate_cvv(black_box("  123 "))));

    group.bench_function("invalid_char", |b| {
        b.iter(|| validate_cvv(black_box("12a")))
    });

    group.finish();
}

fn bench_checkout(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkout");
    let now = reference();

    let valid = CheckoutForm::new("Jordan Smith", VISA_16_FORMATTED, "12", "28", "123");
    let invalid = CheckoutForm::new("", INVALID, "13", "28", "12");

    group.bench_function("valid_form", |b| {
        b.iter(|| black_box(&valid).validate_at(now).can_submit())
    });

    group.bench_function("invalid_form", |b| {
        b.iter(|| black_box(&invalid).validate_at(now).can_submit())
    });

    let mut cart = Cart::new();
    for id in 0..20 {
        cart.add_item(&MenuItem::new(id, "Item", 100 + id * 25), 2);
    }

    group.bench_function("build_order_request_20_items", |b| {
        b.iter(|| checkout_validator::build_order_request(black_box(&cart), &valid, now))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_card_number,
    bench_luhn,
    bench_expiry,
    bench_cvv,
    bench_checkout,
);

criterion_main!(benches);
