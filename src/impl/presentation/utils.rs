use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, USD = 2).
fn decimal_places(currency: Currency) -> usize {
    currency.exponent().unwrap_or(0) as usize
}

/// Format an amount with currency symbol, correct number of decimal places
/// and thousands separators (ex. `-1,234.50 $`).
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale or currency.
pub(crate) fn format_amount(amount: f64, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10f64.powi(decimal_places as i32);
    // Round once in minor units so 0.995 doesn't print as 0.100.
    let minor_units = (amount.abs() * scale).round() as i64;
    let sign = if amount < 0.0 && minor_units != 0 { "-" } else { "" };
    let integer_part = (minor_units / scale as i64).to_formatted_string(&Locale::en);
    if decimal_places == 0 {
        format!("{}{} {}", sign, integer_part, currency.symbol())
    } else {
        format!(
            "{}{}.{:0decimal_places$} {}",
            sign,
            integer_part,
            minor_units % scale as i64,
            currency.symbol(),
        )
    }
}

/// Section header padded with dashes to 80 columns.
pub(crate) fn section_header(title: &str) -> String {
    let prefix = format!("--- {} ", title);
    format!("{}{}\n\n", prefix, "-".repeat(80usize.saturating_sub(prefix.len())))
}
