//! Exact rational damage modifier.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Mul, MulAssign};

use serde::{Serialize, Serializer};

/// A multiplier kept as a reduced fraction so chained products never drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Modifier {
    num: u64,
    den: u64,
}

const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Modifier {
    /// 0x (immunity).
    pub const ZERO: Self = Self::new(0, 1);

    /// 0.25x
    pub const QUARTER: Self = Self::new(1, 4);

    /// 0.5x
    pub const HALF: Self = Self::new(1, 2);

    /// 1.0x
    pub const ONE: Self = Self::new(1, 1);

    /// 1.1x (Muscle Band, Wise Glasses, natures).
    pub const ONE_POINT_ONE: Self = Self::new(11, 10);

    /// 1.2x (Expert Belt, type-boosting items).
    pub const ONE_POINT_TWO: Self = Self::new(6, 5);

    /// 1.3x (Life Orb, terrain boosts).
    pub const ONE_POINT_THREE: Self = Self::new(13, 10);

    /// 1.5x
    pub const ONE_POINT_FIVE: Self = Self::new(3, 2);

    /// 2.0x
    pub const DOUBLE: Self = Self::new(2, 1);

    /// 4.0x
    pub const QUADRUPLE: Self = Self::new(4, 1);

    /// 0.9x (hindering nature).
    pub const NINE_TENTHS: Self = Self::new(9, 10);

    /// Screens in Doubles (Reflect/Light Screen/Aurora Veil).
    pub const SCREENS_DOUBLES: Self = Self::new(2, 3);

    /// Spread move penalty in Doubles.
    pub const SPREAD: Self = Self::new(3, 4);

    /// Create a modifier from a numerator and denominator. A zero denominator
    /// is treated as one.
    pub const fn new(num: u64, den: u64) -> Self {
        let den = if den == 0 { 1 } else { den };
        if num == 0 {
            return Self { num: 0, den: 1 };
        }
        let g = gcd(num, den);
        Self {
            num: num / g,
            den: den / g,
        }
    }

    pub const fn num(self) -> u64 {
        self.num
    }

    pub const fn den(self) -> u64 {
        self.den
    }

    /// Floating-point view, for display and probability weights.
    pub fn value(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    pub const fn is_zero(self) -> bool {
        self.num == 0
    }

    pub const fn is_neutral(self) -> bool {
        self.num == self.den
    }

    /// Strictly greater than 1x.
    pub const fn is_boost(self) -> bool {
        self.num > self.den
    }

    /// `floor(value * self)`.
    pub fn apply_floor(self, value: u64) -> u64 {
        let product = value as u128 * self.num as u128 / self.den as u128;
        product.min(u64::MAX as u128) as u64
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::ONE
    }
}

impl Mul for Modifier {
    type Output = Modifier;

    fn mul(self, rhs: Modifier) -> Modifier {
        if self.num == 0 || rhs.num == 0 {
            return Modifier::ZERO;
        }
        // Cross-reduce first so the products stay small.
        let g1 = gcd(self.num, rhs.den);
        let g2 = gcd(rhs.num, self.den);
        Modifier::new(
            (self.num / g1) * (rhs.num / g2),
            (self.den / g2) * (rhs.den / g1),
        )
    }
}

impl MulAssign for Modifier {
    fn mul_assign(&mut self, rhs: Modifier) {
        *self = *self * rhs;
    }
}

impl std::iter::Product for Modifier {
    fn product<I: Iterator<Item = Modifier>>(iter: I) -> Modifier {
        iter.fold(Modifier::ONE, |acc, m| acc * m)
    }
}

impl PartialOrd for Modifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Modifier {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.num as u128 * other.den as u128;
        let rhs = other.num as u128 * self.den as u128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}x", self.num)
        } else {
            write!(f, "{}/{}x", self.num, self.den)
        }
    }
}

impl Serialize for Modifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// Build a `Modifier` from a fraction literal.
///
/// # Example
/// ```rust
/// use poke_calc::modifier;
/// const BOOST: poke_calc::damage::Modifier = modifier!(3 / 2);
/// assert_eq!(BOOST, poke_calc::damage::Modifier::ONE_POINT_FIVE);
/// ```
#[macro_export]
macro_rules! modifier {
    ($num:literal / $den:literal) => {
        $crate::damage::Modifier::new($num, $den)
    };
    ($num:literal) => {
        $crate::damage::Modifier::new($num, 1)
    };
}
