//! Display formatting for currency and percentages.
//!
//! One-decimal output rounds ties away from zero, so 1.25 shows as 1.3.

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Abbreviated currency: `$950`, `$15.5K`, `-$1.2M`.
pub fn format_currency(amount: f64) -> String {
    let abs = amount.abs();
    let formatted = if abs >= 1_000_000.0 {
        format!("${:.1}M", round_tenths(abs / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("${:.1}K", round_tenths(abs / 1_000.0))
    } else {
        format!("${}", abs.round() as u64)
    };
    if amount < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Whole dollars with thousands separators: `$12,345`, `-$1,000`.
/// Amounts that round to zero print as `$0`, never `-$0`.
pub fn format_currency_full(amount: f64) -> String {
    let dollars = amount.abs().round() as u64;
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && dollars > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `0.123` becomes `12.3%`.
pub fn format_percentage(decimal: f64) -> String {
    format!("{:.1}%", round_tenths(decimal * 100.0))
}
