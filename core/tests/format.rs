//! Currency and percentage formatting.

use lifesim_core::format::{format_currency, format_currency_full, format_percentage};

#[test]
fn abbreviated_currency() {
    assert_eq!(format_currency(0.0), "$0");
    assert_eq!(format_currency(500.0), "$500");
    assert_eq!(format_currency(999.0), "$999");
    assert_eq!(format_currency(5_000.0), "$5.0K");
    assert_eq!(format_currency(15_500.0), "$15.5K");
    assert_eq!(format_currency(1_500_000.0), "$1.5M");
}

#[test]
fn abbreviated_currency_negative() {
    assert_eq!(format_currency(-5_000.0), "-$5.0K");
    assert_eq!(format_currency(-250.0), "-$250");
}

#[test]
fn full_currency_groups_thousands() {
    assert_eq!(format_currency_full(12_345.0), "$12,345");
    assert_eq!(format_currency_full(999.0), "$999");
    assert_eq!(format_currency_full(1_000_000.0), "$1,000,000");
    assert_eq!(format_currency_full(-29_500.0), "-$29,500");
    assert_eq!(format_currency_full(-0.2), "$0");
}

#[test]
fn percentages() {
    assert_eq!(format_percentage(0.05), "5.0%");
    assert_eq!(format_percentage(0.123), "12.3%");
    assert_eq!(format_percentage(0.0), "0.0%");
}

#[test]
fn ties_round_away_from_zero() {
    assert_eq!(format_currency(1_250.0), "$1.3K");
    assert_eq!(format_currency(-1_250.0), "-$1.3K");
    assert_eq!(format_currency(2_250_000.0), "$2.3M");
    assert_eq!(format_percentage(0.0025), "0.3%");
}

#[test]
fn full_currency_never_prints_negative_zero() {
    assert_eq!(format_currency_full(-0.3), "$0");
    assert_eq!(format_currency_full(-0.5), "-$1");
}
