//! Integer amounts in base units
//!
//! Balances are non-negative integers (wei, token base units). Arithmetic is
//! checked; conversions to and from human-readable decimals go through
//! rust_decimal so no floating point is ever involved.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::TypesError;

/// Quantity of an asset in its smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);
    pub const MAX: Amount = Amount(u128::MAX);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Raw base-unit value
    pub const fn value(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }

    /// Convert a human-readable quantity into base units.
    ///
    /// `from_readable(1.5, 18)` is `1_500_000_000_000_000_000`. Fails if the
    /// value is negative, carries more fractional digits than `decimals`, or
    /// does not fit in 128 bits.
    pub fn from_readable(value: Decimal, decimals: u32) -> Result<Amount, TypesError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(TypesError::InvalidAmount {
                reason: format!("negative value {}", value),
            });
        }

        let value = value.normalize();
        let mantissa = u128::try_from(value.mantissa()).map_err(|_| TypesError::InvalidAmount {
            reason: format!("negative value {}", value),
        })?;
        let scale = value.scale();

        let base_units = if scale <= decimals {
            pow10(decimals - scale).and_then(|factor| mantissa.checked_mul(factor))
        } else {
            let divisor = pow10(scale - decimals).ok_or_else(|| TypesError::InvalidAmount {
                reason: format!("scale {} out of range", scale),
            })?;
            if mantissa % divisor != 0 {
                return Err(TypesError::InvalidAmount {
                    reason: format!("{} has more than {} decimal places", value, decimals),
                });
            }
            Some(mantissa / divisor)
        };

        base_units.map(Amount).ok_or_else(|| TypesError::InvalidAmount {
            reason: format!("{} overflows with {} decimals", value, decimals),
        })
    }

    /// Convert base units into a human-readable decimal.
    pub fn to_readable(&self, decimals: u32) -> Result<Decimal, TypesError> {
        let raw = i128::try_from(self.0).map_err(|_| TypesError::InvalidAmount {
            reason: format!("{} exceeds decimal range", self.0),
        })?;
        Decimal::try_from_i128_with_scale(raw, decimals)
            .map(|d| d.normalize())
            .map_err(|e| TypesError::InvalidAmount {
                reason: e.to_string(),
            })
    }
}

fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Amount)
            .map_err(|e| TypesError::InvalidAmount {
                reason: format!("{}: {}", s, e),
            })
    }
}

// Serialized as a decimal string so 128-bit values survive JSON consumers.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
