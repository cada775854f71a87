//! Fixed-point coin amounts.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Errors converting a floating-point daemon value into an [`Amount`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmountError {
    #[error("amount is negative: {0}")]
    Negative(f64),
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount out of range: {0}")]
    OutOfRange(f64),
}

/// Fixed-point coin amount with 8 decimal places.
/// Matches the daemon's satoshi precision, so sums are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(pub u64);

impl Amount {
    /// Number of decimal places (8, one satoshi)
    pub const DECIMALS: u32 = 8;
    /// Scale factor: 10^8
    pub const SCALE: u64 = 100_000_000;
    pub const ZERO: Amount = Amount(0);

    /// Convert a JSON number reported by the daemon, rounding to the nearest satoshi.
    pub fn try_from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::NotFinite);
        }
        if value < 0.0 {
            return Err(AmountError::Negative(value));
        }
        let units = (value * Self::SCALE as f64).round();
        if units > u64::MAX as f64 {
            return Err(AmountError::OutOfRange(value));
        }
        Ok(Self(units as u64))
    }

    /// Create from f64 (for testing/convenience). Invalid input becomes zero.
    pub fn from_f64(value: f64) -> Self {
        Self::try_from_f64(value).unwrap_or(Self::ZERO)
    }

    /// Create from a whole number of coins.
    pub const fn from_coins(coins: u64) -> Self {
        Self(coins * Self::SCALE)
    }

    /// Convert to f64 (for display and the on-disk format)
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Whole coins, fractional part truncated.
    #[inline]
    pub fn whole(self) -> u64 {
        self.0 / Self::SCALE
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:08}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

// Stored as a plain JSON number so state files stay readable by hand.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::try_from_f64(value).map_err(serde::de::Error::custom)
    }
}
