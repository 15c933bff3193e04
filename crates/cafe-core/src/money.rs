//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    Every amount is an i64 number of cents. Percentage math works    │
//! │    on basis points with explicit half-up rounding, the same result  │
//! │    a decimal type with scale 2 and ROUND_HALF_UP would produce.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cafe_core::money::Money;
//!
//! let price = Money::from_cents(1099); // ₹10.99
//! let line = price * 3;                // ₹32.97
//! let off = line.percent(Money::bps_from_percent(10.0)); // 10% = ₹3.30
//! assert_eq!((line - off).cents(), 2967);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: room for differences and refund-style math
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde transparent**: serializes as a bare integer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Converts a human percentage (e.g. `12.5`) into basis points (`1250`).
    #[inline]
    pub fn bps_from_percent(pct: f64) -> u32 {
        (pct * 100.0).round() as u32
    }

    /// Computes a percentage of this amount with half-up rounding.
    ///
    /// `bps` is the rate in basis points: 1250 = 12.50%. The result equals
    /// `round_half_up(amount × pct / 100, 2)` in decimal terms.
    ///
    /// ## Implementation
    /// Integer math in i128 to avoid overflow: `(cents · bps + 5000) / 10000`.
    /// The `+ 5000` performs the half-up rounding (5000/10000 = 0.5).
    pub fn percent(&self, bps: u32) -> Money {
        let cents = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Divides this amount by a count with half-up rounding to whole cents.
    ///
    /// Used for average-bill reporting. `divisor` must be positive; a
    /// non-positive divisor yields zero (callers guard the empty case).
    pub fn divide_round(&self, divisor: i64) -> Money {
        if divisor <= 0 {
            return Money::zero();
        }
        // (2a + n) / 2n rounds a/n half-up for non-negative a
        let cents = (self.0 as i128 * 2 + divisor as i128) / (divisor as i128 * 2);
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display for debugging and receipts: `12.50`, `-3.07`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 399].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 749);
    }

    #[test]
    fn test_percent_exact() {
        // 100.00 at 10% = 10.00
        let amount = Money::from_cents(10_000);
        assert_eq!(amount.percent(1000).cents(), 1000);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 10.01 at 12.5% = 1.25125 → 1.25
        assert_eq!(Money::from_cents(1001).percent(1250).cents(), 125);
        // 10.00 at 8.25% = 0.825 → 0.83
        assert_eq!(Money::from_cents(1000).percent(825).cents(), 83);
        // 0.02 at 25% = 0.005 → 0.01 (exact half rounds up)
        assert_eq!(Money::from_cents(2).percent(2500).cents(), 1);
    }

    #[test]
    fn test_percent_bounds() {
        let amount = Money::from_cents(12_345);
        assert_eq!(amount.percent(0).cents(), 0);
        assert_eq!(amount.percent(10_000).cents(), 12_345);
    }

    #[test]
    fn test_final_amount_never_negative_for_valid_percent() {
        let total = Money::from_cents(9_999);
        for bps in [0u32, 1, 500, 825, 5000, 9999, 10_000] {
            let discount = total.percent(bps);
            assert!((total - discount).cents() >= 0, "bps={bps}");
        }
    }

    #[test]
    fn test_divide_round() {
        // 100 / 3 = 33.33... → 33
        assert_eq!(Money::from_cents(100).divide_round(3).cents(), 33);
        // 105 / 2 = 52.5 → 53
        assert_eq!(Money::from_cents(105).divide_round(2).cents(), 53);
        // guard: zero divisor
        assert_eq!(Money::from_cents(100).divide_round(0).cents(), 0);
    }

    #[test]
    fn test_bps_from_percent() {
        assert_eq!(Money::bps_from_percent(8.25), 825);
        assert_eq!(Money::bps_from_percent(100.0), 10_000);
        assert_eq!(Money::bps_from_percent(0.0), 0);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
