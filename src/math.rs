//! Shared numerical primitives anchored on `num-complex`.

use std::fmt;
use std::ops::{Add, Mul};

use thiserror::Error;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for phasor arithmetic.
pub type CScalar = num_complex::Complex<Scalar>;

/// Errors raised by low-level complex arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Raised when taking the reciprocal of an exactly-zero complex value.
    #[error("division by zero in complex reciprocal")]
    DivisionByZero,
}

/// Immutable complex number used for impedance arithmetic.
///
/// Equality is exact on both fields (no tolerance); use
/// [`approx`](https://docs.rs/approx) in tests when comparing computed sums.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: Scalar,
    /// Imaginary part.
    pub im: Scalar,
}

impl Complex {
    /// The additive identity `0 + 0j`.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Creates a complex number from its real and imaginary parts.
    #[must_use]
    pub const fn new(re: Scalar, im: Scalar) -> Self {
        Self { re, im }
    }

    /// Returns the sum `self + other`.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::from(CScalar::from(self) + CScalar::from(other))
    }

    /// Returns the product `self * other`.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        Self::from(CScalar::from(self) * CScalar::from(other))
    }

    /// Returns the reciprocal `1 / self`.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::DivisionByZero`] when both parts are
    /// exactly zero.
    pub fn reciprocal(self) -> Result<Self, ArithmeticError> {
        let denom = self.re * self.re + self.im * self.im;
        if denom == 0.0 {
            return Err(ArithmeticError::DivisionByZero);
        }
        Ok(Self::new(self.re / denom, -self.im / denom))
    }

    /// Returns the magnitude `|self|`, computed via `hypot`.
    #[must_use]
    pub fn magnitude(self) -> Scalar {
        self.re.hypot(self.im)
    }
}

impl From<CScalar> for Complex {
    fn from(z: CScalar) -> Self {
        Self { re: z.re, im: z.im }
    }
}

impl From<Complex> for CScalar {
    fn from(z: Complex) -> Self {
        Self::new(z.re, z.im)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::add(self, other)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.multiply(other)
    }
}

impl fmt::Display for Complex {
    /// Canonical textual form: `"%.6g + %.6gj"`, with the sign of the
    /// imaginary part folded into the separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}j", format_sig(self.re, 6), format_sig(self.im, 6))
        } else {
            write!(f, "{} - {}j", format_sig(self.re, 6), format_sig(-self.im, 6))
        }
    }
}

/// Formats `value` with `digits` significant digits, `printf`-`%g` style.
///
/// Decimal notation is used when the rounded decimal exponent lies in
/// `[-4, digits)`, scientific notation (`1.00000e-06`) otherwise. Trailing
/// zeros are kept, matching Java's `%g` rather than C's.
#[must_use]
pub fn format_sig(value: Scalar, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{:.*}", digits - 1, value);
    }
    let sci = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp >= -4 && exp < digits as i32 {
        let frac = (digits as i32 - 1 - exp).max(0) as usize;
        format!("{value:.frac$}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    }
}
