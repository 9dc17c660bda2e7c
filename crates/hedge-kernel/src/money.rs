//! Fixed-point money type.
//!
//! # Scale
//!
//! All money amounts in the kernel are signed 64-bit integers scaled by
//! 10_000: one currency unit = `Money(10_000)`, so the smallest representable
//! amount is 1/10_000 of a unit ("basis points of currency").  Quantities
//! (share counts) stay plain `i64` and never convert implicitly.
//!
//! # Range
//!
//! The Money range is exactly `i64::MIN ..= i64::MAX`.  This is part of the
//! kernel's public contract: a conforming implementation in any language must
//! use the same bounds so overflow is detected at the same inputs.
//!
//! # Arithmetic
//!
//! Only checked arithmetic is exposed.  There are no `Add`/`Sub`/`Neg`
//! operator impls.  Every operation returns `Option<Money>`; `None` means the
//! true result is outside the Money range.

use std::fmt;

/// A fixed-point monetary amount at 1e-4 scale.
///
/// 1 currency unit = `Money::new(10_000)`.
///
/// There is intentionally no `From<i64>` implementation; use [`Money::new`]
/// when a raw integer is known to be a basis-point amount and
/// [`Money::raw`] to hand it back across a boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Basis points per currency unit.
    pub const SCALE: i64 = 10_000;

    pub const ZERO: Money = Money(0);

    /// Largest representable amount.
    pub const MAX: Money = Money(i64::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(i64::MIN);

    /// Construct from a raw basis-point integer.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Money(raw)
    }

    /// Whole currency units, e.g. `from_units(50)` is $50.00.
    ///
    /// `None` if `units * SCALE` leaves the Money range.
    #[inline]
    pub fn from_units(units: i64) -> Option<Money> {
        units.checked_mul(Self::SCALE).map(Money)
    }

    /// Underlying basis-point integer.
    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    #[inline]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// `None` only for `Money::MIN`, which has no positive counterpart.
    #[inline]
    pub fn checked_neg(self) -> Option<Money> {
        self.0.checked_neg().map(Money)
    }

    /// Multiply a per-unit price by an integer quantity.
    ///
    /// `qty` is a plain unit count, not a Money value.  A zero quantity
    /// always yields `Some(Money::ZERO)`, whatever the price.
    #[inline]
    pub fn checked_mul_qty(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `/` and `%` by a positive constant cannot overflow, even for i64::MIN.
        let units = self.0 / Self::SCALE;
        let frac = (self.0 % Self::SCALE).unsigned_abs();
        // Truncation toward zero drops the sign for -1 < value < 0.
        if self.0 < 0 && units == 0 {
            write!(f, "-0.{frac:04}")
        } else {
            write!(f, "{units}.{frac:04}")
        }
    }
}
