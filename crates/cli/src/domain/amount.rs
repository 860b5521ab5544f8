use std::str::FromStr;

use alloy::primitives::U256;
use podium_core::CurrencyAmount;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Largest scale `rust_decimal` can represent.
pub const MAX_DECIMALS: u8 = 28;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount {0:?}")]
    Invalid(String),
    #[error("amount {0} is negative")]
    Negative(String),
    #[error("amount {amount} has more than {decimals} decimal places")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("{0} decimals is more than the supported {MAX_DECIMALS}")]
    UnsupportedDecimals(u8),
    #[error("overflow while converting {0} to base units")]
    Overflow(String),
}

pub type AmountResult<T> = Result<T, AmountError>;

/// Convert a human amount ("1.1") into base units of a currency with
/// `decimals` decimals.
pub fn base_units(human: &str, decimals: u8) -> AmountResult<CurrencyAmount> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::UnsupportedDecimals(decimals));
    }

    let trimmed = human.trim();
    let value = Decimal::from_str(trimmed).map_err(|_| AmountError::Invalid(human.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    let scale = Decimal::from_i128_with_scale(10_i128.pow(decimals as u32), 0);
    let scaled = value
        .checked_mul(scale)
        .ok_or_else(|| AmountError::Overflow(trimmed.to_string()))?;
    if !scaled.fract().is_zero() {
        return Err(AmountError::TooPrecise {
            amount: trimmed.to_string(),
            decimals,
        });
    }

    let units = scaled
        .to_u128()
        .ok_or_else(|| AmountError::Overflow(trimmed.to_string()))?;
    Ok(CurrencyAmount::new(U256::from(units)))
}

/// Render base units back as a human amount, for display only. Values too
/// large for a decimal fall back to the raw base-unit integer.
pub fn human_units(amount: CurrencyAmount, decimals: u8) -> String {
    let raw = amount.as_u256();
    let Ok(units) = i128::try_from(raw) else {
        return raw.to_string();
    };
    if decimals > MAX_DECIMALS {
        return raw.to_string();
    }

    match Decimal::try_from_i128_with_scale(units, decimals as u32) {
        Ok(value) => value.normalize().to_string(),
        Err(_) => raw.to_string(),
    }
}
