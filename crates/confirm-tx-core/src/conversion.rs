//! Wei / hex / decimal arithmetic used to derive display values.
//!
//! Hex quantities are parsed into `U256`. Decimal strings are held as
//! non-negative fixed-point `U256` values in ether units (18 fractional
//! digits), so a wei amount is already a fixed-point native amount. Rounding
//! is half-down, and trailing zeros are trimmed on output (`"1"`, `"0.0021"`,
//! `"468.58"`).

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;
use thiserror::Error;

/// Fractional digits carried by fixed-point decimals.
pub const DECIMAL_SCALE: u32 = 18;

const DECIMAL_UNIT: &str = "ether";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid hex quantity '{0}'")]
    InvalidHex(String),
    #[error("invalid decimal amount '{0}'")]
    InvalidDecimal(String),
    #[error("arithmetic overflow")]
    Overflow,
}

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Parses a `0x`-prefixed (or bare) hex quantity. Empty input and a lone
/// `0x` are zero.
pub fn parse_hex_quantity(raw: &str) -> Result<U256, ConversionError> {
    let s = raw.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| ConversionError::InvalidHex(raw.to_owned()))
}

pub fn to_hex_quantity(value: U256) -> String {
    format!("0x{value:x}")
}

pub fn hex_to_decimal(raw: &str) -> Result<String, ConversionError> {
    Ok(parse_hex_quantity(raw)?.to_string())
}

pub fn multiply_hexes(a: &str, b: &str) -> Result<String, ConversionError> {
    let product = parse_hex_quantity(a)?
        .checked_mul(parse_hex_quantity(b)?)
        .ok_or(ConversionError::Overflow)?;
    Ok(to_hex_quantity(product))
}

pub fn sum_hexes(a: &str, b: &str) -> Result<String, ConversionError> {
    let sum = parse_hex_quantity(a)?
        .checked_add(parse_hex_quantity(b)?)
        .ok_or(ConversionError::Overflow)?;
    Ok(to_hex_quantity(sum))
}

/// `a - b` as a hex quantity. A negative difference is not clamped; it is
/// rendered with the sign after the prefix (`0x-64`).
pub fn subtract_hexes(a: &str, b: &str) -> Result<String, ConversionError> {
    let a = parse_hex_quantity(a)?;
    let b = parse_hex_quantity(b)?;
    if a >= b {
        Ok(to_hex_quantity(a - b))
    } else {
        Ok(format!("0x-{:x}", b - a))
    }
}

pub fn is_negative_quantity(raw: &str) -> bool {
    raw.trim().trim_start_matches("0x").starts_with('-')
}

/// Parses a non-negative decimal string in `unit` into wei. Digits beyond
/// the unit's precision are truncated.
fn parse_unsigned_units(raw: &str, unit: &str) -> Result<U256, ConversionError> {
    let invalid = || ConversionError::InvalidDecimal(raw.to_owned());
    let s = raw.trim();
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if (int_part.is_empty() && frac_part.is_empty())
        || !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }
    match parse_units(s, unit).map_err(|_| invalid())? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(invalid()),
    }
}

/// Parses a non-negative decimal string into fixed-point.
pub fn parse_decimal(raw: &str) -> Result<U256, ConversionError> {
    parse_unsigned_units(raw, DECIMAL_UNIT)
}

/// Rounds half-down to `decimals` fractional digits.
pub fn round_decimal(value: U256, decimals: u32) -> U256 {
    if decimals >= DECIMAL_SCALE {
        return value;
    }
    let step = pow10(DECIMAL_SCALE - decimals);
    let quotient = value / step;
    let remainder = value % step;
    let rounded = if remainder > step / U256::from(2u64) {
        quotient + U256::from(1u64)
    } else {
        quotient
    };
    rounded * step
}

pub fn format_decimal(value: U256) -> Result<String, ConversionError> {
    let formatted = format_units(value, DECIMAL_UNIT)
        .map_err(|_| ConversionError::InvalidDecimal(value.to_string()))?;
    Ok(match formatted.split_once('.') {
        Some((int_part, frac)) => match frac.trim_end_matches('0') {
            "" => int_part.to_owned(),
            frac => format!("{int_part}.{frac}"),
        },
        None => formatted,
    })
}

fn rate_to_decimal(rate: f64) -> Result<U256, ConversionError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ConversionError::InvalidDecimal(rate.to_string()));
    }
    parse_decimal(&rate.to_string())
}

fn apply_rate(amount: U256, rate: f64) -> Result<U256, ConversionError> {
    let rate = rate_to_decimal(rate)?;
    amount
        .checked_mul(rate)
        .map(|v| v / pow10(DECIMAL_SCALE))
        .ok_or(ConversionError::Overflow)
}

/// Converts a hex wei amount into a display string in `to_currency`.
///
/// The rate is applied only when the currencies differ; if it is needed but
/// unknown, no value is produced.
pub fn value_from_wei_hex(
    value: &str,
    from_currency: &str,
    to_currency: &str,
    conversion_rate: Option<f64>,
    decimals: u32,
) -> Result<Option<String>, ConversionError> {
    let mut amount = parse_hex_quantity(value)?;
    if from_currency != to_currency {
        let Some(rate) = conversion_rate else {
            return Ok(None);
        };
        amount = apply_rate(amount, rate)?;
    }
    format_decimal(round_decimal(amount, decimals)).map(Some)
}

/// Like [`value_from_wei_hex`], but an unknown rate leaves the fee in native
/// units instead of producing nothing.
pub fn transaction_fee(
    value: &str,
    from_currency: &str,
    to_currency: &str,
    conversion_rate: Option<f64>,
    decimals: u32,
) -> Result<String, ConversionError> {
    let mut fee = parse_hex_quantity(value)?;
    if from_currency != to_currency {
        if let Some(rate) = conversion_rate {
            fee = apply_rate(fee, rate)?;
        }
    }
    format_decimal(round_decimal(fee, decimals))
}

/// Sums decimal strings and rounds the result to `decimals` places.
pub fn add_decimals(values: &[&str], decimals: u32) -> Result<String, ConversionError> {
    let mut total = U256::ZERO;
    for value in values {
        total = total
            .checked_add(parse_decimal(value)?)
            .ok_or(ConversionError::Overflow)?;
    }
    format_decimal(round_decimal(total, decimals))
}

/// Decimal gwei (as reported by gas estimators) to a hex wei quantity.
pub fn dec_gwei_to_hex_wei(gwei: &str) -> Result<String, ConversionError> {
    parse_unsigned_units(gwei, "gwei").map(to_hex_quantity)
}
