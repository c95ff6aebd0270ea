//! Korean won amounts
//!
//! Wages are whole-won amounts in practice, but daily wages multiplied by
//! fractional hours can produce sub-won values, so amounts are kept as
//! `Decimal` and only rounded for display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// An amount in Korean won (KRW)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Won(Decimal);

impl Won {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn from_i64(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    pub fn zero() -> Self {
        Self(dec!(0))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl Add for Won {
    type Output = Won;

    fn add(self, rhs: Won) -> Won {
        Won(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Won {
    fn add_assign(&mut self, rhs: Won) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Won {
    fn sum<I: Iterator<Item = Won>>(iter: I) -> Won {
        iter.fold(Won::zero(), |acc, w| acc + w)
    }
}

impl From<Decimal> for Won {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

/// Formats with thousands separators, e.g. `2,200,000원`
impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.0.round_dp(0);
        let digits = rounded.abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
        write!(f, "{}{}원", sign, grouped)
    }
}
