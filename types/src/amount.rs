//! Native currency amounts.
//!
//! Amounts are held as motes (u128), the smallest indivisible unit. One CSPR
//! is 10^9 motes. Display values are derived, never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CasperFlowError;

/// Motes in one display unit (CSPR).
pub const MOTES_PER_CSPR: u128 = 1_000_000_000;

/// Number of fractional digits a display amount may carry.
const CSPR_DECIMALS: usize = 9;

/// An amount of the native currency in motes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Motes(u128);

impl Motes {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by `numerator / denominator`, rounding down.
    pub fn mul_div(self, numerator: u128, denominator: u128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        self.0.checked_mul(numerator).map(|v| Self(v / denominator))
    }

    /// Format in CSPR with exactly two decimals, rounding half up.
    ///
    /// `5_000_000_000` motes renders as `"5.00"`.
    pub fn to_display(&self) -> String {
        const MOTES_PER_CENT: u128 = MOTES_PER_CSPR / 100;
        let cents = self.0 / MOTES_PER_CENT + u128::from(self.0 % MOTES_PER_CENT >= MOTES_PER_CENT / 2);
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    /// Parse a non-negative CSPR display amount such as `"12"` or `"1.5"`.
    ///
    /// At most nine fractional digits are accepted; anything finer than a mote
    /// is rejected rather than silently truncated.
    pub fn parse_cspr(input: &str) -> Result<Self, CasperFlowError> {
        let s = input.trim();
        let invalid = || CasperFlowError::InvalidAmount(input.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) || frac.len() > CSPR_DECIMALS {
            return Err(invalid());
        }

        let whole_motes = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .map_err(|_| CasperFlowError::AmountOverflow)?
                .checked_mul(MOTES_PER_CSPR)
                .ok_or(CasperFlowError::AmountOverflow)?
        };
        let frac_motes = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<width$}", width = CSPR_DECIMALS);
            padded.parse::<u128>().map_err(|_| invalid())?
        };

        whole_motes
            .checked_add(frac_motes)
            .map(Self)
            .ok_or(CasperFlowError::AmountOverflow)
    }
}

impl fmt::Display for Motes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} CSPR", self.to_display())
    }
}
