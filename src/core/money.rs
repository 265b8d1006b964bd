//! Monetary normalization.
//!
//! [`round_currency`] is the only rounding rule used for money in this crate:
//! two decimal places, midpoint away from zero. Every derived amount passes
//! through it before it is stored or compared, which keeps repeated
//! recomputation idempotent.
//!
//! Aggregates are summed in integer minor units (grosze) via [`sum_cents`]
//! and converted back once at the end.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal_macros::dec;
use serde_json::Value;

/// Number of decimal places for stored money values.
pub const CURRENCY_SCALE: u32 = 2;

/// Largest magnitude accepted for a stored amount (10^15 zł).
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Whether `value` fits within [`MAX_AMOUNT`] in either direction.
pub fn amount_in_range(value: Decimal) -> bool {
    value.abs() <= MAX_AMOUNT
}

/// Round to 2 decimal places, half away from zero.
///
/// ```
/// use faktura_vat::core::money::round_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_currency(dec!(2.345)), dec!(2.35));
/// assert_eq!(round_currency(dec!(-2.345)), dec!(-2.35));
/// assert_eq!(round_currency(round_currency(dec!(7.005))), round_currency(dec!(7.005)));
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_SCALE,
        rust_decimal::RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Round a native float to currency precision.
///
/// NaN and infinities map to zero, as does anything outside the decimal range.
pub fn currency_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value)
        .map(round_currency)
        .unwrap_or(Decimal::ZERO)
}

/// Express an amount in minor currency units after rounding it.
pub fn to_cents(value: Decimal) -> i128 {
    let mut rounded = round_currency(value);
    rounded.rescale(CURRENCY_SCALE);
    rounded.mantissa()
}

/// Convert minor currency units back to a 2-dp decimal, saturating at the
/// decimal range.
pub fn from_cents(cents: i128) -> Decimal {
    Decimal::try_from_i128_with_scale(cents, CURRENCY_SCALE).unwrap_or(if cents < 0 {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Sum amounts in integer cents and convert back once.
pub fn sum_cents<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    from_cents(
        values
            .into_iter()
            .map(to_cents)
            .fold(0i128, i128::saturating_add),
    )
}

/// Storage representation of an amount, always with two decimals (`"123.00"`).
pub fn fixed_2dp(value: Decimal) -> String {
    let mut rounded = round_currency(value);
    rounded.rescale(CURRENCY_SCALE);
    rounded.to_string()
}

/// Extract a number from a loosely typed JSON value.
///
/// Accepts native numbers, strings with thousands/decimal punctuation
/// (`"1 234,56 zł"` reads as `1234.56`) and wrapper objects exposing the raw
/// value under `_` or `Val`. Returns `None` when nothing numeric is present,
/// which is distinct from an explicit zero.
pub fn parse_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => decimal_from_json_number(number),
        Value::String(text) => parse_numeric_text(text),
        Value::Object(map) => {
            if let Some(raw) = map.get("_") {
                return parse_number(raw);
            }
            map.get("Val").and_then(parse_number)
        }
        _ => None,
    }
}

/// Like [`parse_number`], but absent values read as zero.
pub fn parse_currency(value: &Value) -> Decimal {
    parse_number(value).unwrap_or(Decimal::ZERO)
}

fn decimal_from_json_number(number: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = number.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Decimal::from_u64(u);
    }
    // The textual form keeps the literal exact (0.1 stays 0.1).
    let literal = number.to_string();
    Decimal::from_str(&literal)
        .or_else(|_| Decimal::from_scientific(&literal))
        .ok()
}

/// Parse free text the way a lenient float parser would after stripping
/// everything but digits, separators and the minus sign.
fn parse_numeric_text(text: &str) -> Option<Decimal> {
    let normalized: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let mut rest = normalized.as_str();
    let negative = rest.starts_with('-');
    if negative {
        rest = &rest[1..];
    }

    let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let int_part = &rest[..int_len];
    rest = &rest[int_len..];

    let frac_part = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            &after_dot[..frac_len]
        }
        None => "",
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = String::with_capacity(int_part.len() + frac_part.len() + 3);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }
    Decimal::from_str(&literal).ok()
}
