//! Free-text normalization for values captured outside the engine.
//!
//! Contract forms and spreadsheets carry numbers, flags and dates as text.
//! These helpers turn that text into typed values so the measurement math
//! only ever sees `Decimal`, `bool` and `NaiveDate`.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Extract the leading decimal number of a free-text field.
///
/// "4" → 4, "4 years" → 4, "3.5y" → 3.5, ".5" → 0.5, "2e1" → 20.
/// Text that does not start with a number ("year 4", "", "n/a") → 0.
pub fn parse_leading_number(text: &str) -> Decimal {
    leading_number(text).unwrap_or(Decimal::ZERO)
}

fn leading_number(text: &str) -> Option<Decimal> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    let mantissa_end = end;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let mut mantissa = s[..mantissa_end].to_string();
    if mantissa.ends_with('.') {
        mantissa.pop();
    }
    if mantissa.starts_with('.') || mantissa.starts_with("-.") || mantissa.starts_with("+.") {
        mantissa = mantissa.replacen('.', "0.", 1);
    }
    let mantissa = mantissa.trim_start_matches('+');

    if end > mantissa_end {
        Decimal::from_scientific(&format!("{mantissa}{}", &s[mantissa_end..end])).ok()
    } else {
        Decimal::from_str(mantissa).ok()
    }
}

/// Parse a spreadsheet or form amount. Thousands separators, currency
/// symbols and a trailing percent sign are ignored. Returns `None` when the
/// text holds no number at all.
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '_' | '%' | '₦' | '$' | '€' | '£'))
        .collect();
    leading_number(&cleaned)
}

/// "true", "yes", "y" and "1" (any case) are true; everything else is false.
pub fn parse_bool_lenient(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Imported rates and likelihoods above 1 are percentages (14 → 0.14).
pub fn normalize_fraction(value: Decimal) -> Decimal {
    if value > Decimal::ONE {
        value / dec!(100)
    } else {
        value
    }
}

/// Parse a calendar date from ISO text, day-first or year-first slashed
/// text, an ISO timestamp, or a spreadsheet serial day number.
pub fn parse_date_lenient(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if s.len() > 10 && s.is_char_boundary(10) {
        if let Ok(d) = NaiveDate::parse_from_str(&s[..10], "%Y-%m-%d") {
            return Some(d);
        }
    }
    s.parse::<f64>().ok().and_then(serial_to_date)
}

/// 1900 date system: serial 1 is 1900-01-01, and serial 60 is the
/// nonexistent 1900-02-29 kept for Lotus compatibility.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.floor() as u64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let offset = if days < 61 { days + 1 } else { days };
    epoch.checked_add_days(Days::new(offset))
}
