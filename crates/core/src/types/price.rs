//! Monetary amounts using decimal arithmetic.
//!
//! All prices in the demo are reais (BRL) with two decimal places. Floating
//! point never touches a stored amount: random prices are rounded to 2 dp at
//! the boundary and everything downstream is `Decimal`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in BRL, normalized to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount, rounding to two decimal places.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp(2))
    }

    /// Create a price from an amount in centavos.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this unit price.
    #[must_use]
    pub fn line_total(&self, quantity: i32) -> Self {
        Self((self.0 * Decimal::from(quantity)).round_dp(2))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}
