//! Currency Formatting
//!
//! en-US style rendering of a decimal amount in a given currency. Whole
//! amounts drop the fraction (`$144`), anything else shows the currency's
//! minor digits (`$144.50`). Never fails: a currency that cannot be rendered
//! comes back as `"<currency> <amount>"`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Digits shown for amounts that are not whole.
const FRACTION_DIGITS: u32 = 2;

/// Format `amount` in `currency`, falling back to `"<currency> <amount>"`.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    try_format(amount, currency).unwrap_or_else(|| format!("{currency} {amount}"))
}

fn try_format(amount: Decimal, currency: &str) -> Option<String> {
    let code = currency.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let (prefix, max_digits) = match symbol(&code) {
        Some((symbol, digits)) => (symbol.to_string(), digits),
        None => (format!("{code}\u{a0}"), FRACTION_DIGITS),
    };

    let whole = amount.fract().is_zero();
    let min_digits = if whole { 0 } else { FRACTION_DIGITS };
    if min_digits > max_digits {
        // e.g. JPY 1.5: no minor unit to show it in
        return None;
    }

    let rounded = amount.round_dp_with_strategy(max_digits, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let digits = if whole {
        abs.trunc().to_string()
    } else {
        format!("{:.*}", max_digits as usize, abs)
    };

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&prefix);
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

/// en-US display symbol and minor digits for common currencies
fn symbol(code: &str) -> Option<(&'static str, u32)> {
    let entry = match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "CNY" => ("CN¥", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "HKD" => ("HK$", 2),
        "TWD" => ("NT$", 2),
        "INR" => ("₹", 2),
        "KRW" => ("₩", 0),
        _ => return None,
    };
    Some(entry)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
