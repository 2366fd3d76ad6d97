//! Exact rational arithmetic for fara'id share computation.
//!
//! Every share in classical Islamic inheritance reduces to a small fixed set
//! of denominators (2, 3, 4, 6, 8, 12, 24, ...), so `i64` numerator/denominator
//! pairs are sufficient; there is no need for arbitrary-precision integers.
//! [`Rational`] keeps itself in lowest terms and with a positive denominator
//! after every operation so two equal fractions always compare equal with
//! `==`, which the calculator and its tests rely on.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An exact fraction `numerator / denominator`, always kept in lowest terms
/// with a strictly positive denominator.
#[derive(Debug, Clone, Copy, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// The additive identity, `0/1`.
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    /// The multiplicative identity, `1/1`.
    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Builds a new rational, reducing to lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero; the calculator never constructs a
    /// zero denominator, since every fard and `aʿsaba` unit divisor is a
    /// positive heir count or a fixed scriptural denominator.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert_ne!(denominator, 0, "rational denominator must not be zero");
        let (numerator, denominator) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let g = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1);
        Rational {
            numerator: numerator / g as i64,
            denominator: denominator / g as i64,
        }
    }

    /// Builds a rational from a whole number.
    pub fn from_int(n: i64) -> Self {
        Rational::new(n, 1)
    }

    /// Returns `true` when the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns `true` when the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Numerator in lowest terms.
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Denominator in lowest terms (always positive).
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Renders as `"p/q"`, the wire format the output contract requires.
    pub fn as_fraction_string(&self) -> String {
        format!("{}/{}", self.numerator, self.denominator)
    }

    /// Converts to a percentage (numerator·100/denominator), rounded
    /// half-to-even to two decimal places as the output contract specifies.
    pub fn as_percent(&self) -> f64 {
        let raw = (self.numerator as f64) * 100.0 / (self.denominator as f64);
        round_half_to_even(raw, 2)
    }
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        Rational::new(
            self.numerator * rhs.denominator + rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        Rational::new(
            self.numerator * rhs.denominator - rhs.numerator * self.denominator,
            self.denominator * rhs.denominator,
        )
    }
}

impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        Rational::new(self.numerator * rhs.numerator, self.denominator * rhs.denominator)
    }
}

impl Div for Rational {
    type Output = Rational;
    fn div(self, rhs: Rational) -> Rational {
        Rational::new(self.numerator * rhs.denominator, self.denominator * rhs.numerator)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_fraction_string())
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_int(n)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Rounds `value` to `places` decimal digits using round-half-to-even
/// (banker's rounding), matching the output contract's percentage rule.
fn round_half_to_even(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let floor = scaled.floor();
    let diff = scaled - floor;
    let rounded = if (diff - 0.5).abs() < 1e-9 {
        // Exactly halfway: round to the nearest even integer.
        if (floor as i64) % 2 == 0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        scaled.round()
    };
    rounded / factor
}
