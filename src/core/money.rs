//! Fixed-point currency handling.
//!
//! Amounts travel as two-decimal [`Decimal`] values and are stored as integer
//! cents, so sums computed by the store never drift.

use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Number of decimal places every stored amount carries.
pub const SCALE: u32 = 2;

/// Converts a two-decimal amount into cents.
///
/// Rejects amounts with more than two significant decimal places and amounts
/// that do not fit in the storage column.
pub fn to_cents(field: &str, amount: Decimal) -> Result<i64> {
    if amount.normalize().scale() > SCALE {
        return Err(Error::validation(
            field,
            format!("{amount} has more than {SCALE} decimal places"),
        ));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.trunc().to_i64())
        .ok_or_else(|| Error::validation(field, format!("{amount} is out of range")))
}

/// Converts stored cents back into a two-decimal amount.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, SCALE)
}

/// Strictly positive amount, in cents.
pub fn positive_cents(field: &str, amount: Decimal) -> Result<i64> {
    let cents = to_cents(field, amount)?;
    if cents <= 0 {
        return Err(Error::validation(field, "must be greater than zero"));
    }
    Ok(cents)
}

/// Zero or positive amount, in cents.
pub fn non_negative_cents(field: &str, amount: Decimal) -> Result<i64> {
    let cents = to_cents(field, amount)?;
    if cents < 0 {
        return Err(Error::validation(field, "must not be negative"));
    }
    Ok(cents)
}

/// Serde adapter exposing a cents column as a two-decimal amount.
pub mod cents {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serializes cents as a decimal amount.
    pub fn serialize<S>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&super::from_cents(*cents), serializer)
    }

    /// Deserializes a decimal amount into cents.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        super::to_cents("amount", amount).map_err(serde::de::Error::custom)
    }
}
