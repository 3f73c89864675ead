//! Element trait for mapping Rust types to DType

use super::{Complex, DType};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Trait for types that can be coefficients of a matrix
///
/// This trait connects Rust's type system to numval's runtime domain tags.
/// It is implemented for the four scalar domains: `bool`, `i64`, `f64` and
/// [`Complex`].
///
/// Coefficient arithmetic lives in [`Arithmetic`] and [`Numeric`].
pub trait Element:
    Copy + Clone + Send + Sync + fmt::Debug + fmt::Display + PartialEq + Default + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Whether a scalar multiplier may be kept pending on a matrix handle
    /// instead of being applied to every coefficient
    const LAZY_SCALE: bool;

    /// Additive identity, also the default coefficient of a new cell
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// The "not a number" value of the domain (`0` / `false` for the
    /// integral domains, which have no NaN)
    fn nan() -> Self;

    /// Build from a boolean (`1` for true, `0` for false)
    fn from_bool(value: bool) -> Self;

    /// Lossless promotion to the complex domain
    fn to_complex(self) -> Complex;

    /// Absolute value as a real number
    fn magnitude(self) -> f64;

    /// Complex conjugate (identity outside the complex domain)
    #[inline]
    fn conj(self) -> Self {
        self
    }

    /// Apply a pending scalar multiplier
    fn scale_by(self, factor: Self) -> Self;

    /// Total order used for sorting and for keys of ordered containers
    fn relative_order(&self, other: &Self) -> Ordering;

    /// True if this is the domain's zero
    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// True if this is the default coefficient of a new cell, bit for bit
    ///
    /// Sparse stores keep every other value, so `-0.0` survives a swap of
    /// representation.
    #[inline]
    fn is_default(&self) -> bool {
        self.is_zero()
    }
}

/// Elements that form a ring: integer, real and complex
pub trait Numeric:
    Element + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// Division that reports failure instead of panicking
    ///
    /// Integer division truncates towards zero and fails on a zero divisor;
    /// real and complex division always succeed (IEEE semantics).
    fn checked_div(self, rhs: Self) -> Option<Self>;
}

/// Coefficient arithmetic as used by matrix operations
///
/// Boolean coefficients compute through integer promotion followed by
/// `≠ 0`, which makes `+` an OR, `−` an XOR, `*` an AND and negation the
/// identity.
pub trait Arithmetic: Element {
    /// `self + rhs`
    fn plus(self, rhs: Self) -> Self;
    /// `self − rhs`
    fn minus(self, rhs: Self) -> Self;
    /// `self · rhs`
    fn times(self, rhs: Self) -> Self;
    /// `−self`
    fn negate(self) -> Self;
}

impl Arithmetic for bool {
    #[inline]
    fn plus(self, rhs: Self) -> Self {
        self | rhs
    }

    #[inline]
    fn minus(self, rhs: Self) -> Self {
        self ^ rhs
    }

    #[inline]
    fn times(self, rhs: Self) -> Self {
        self & rhs
    }

    #[inline]
    fn negate(self) -> Self {
        self
    }
}

macro_rules! impl_ring_arithmetic {
    ($($t:ty),*) => {
        $(
            impl Arithmetic for $t {
                #[inline]
                fn plus(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn minus(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn times(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn negate(self) -> Self {
                    -self
                }
            }
        )*
    };
}

impl_ring_arithmetic!(f64, Complex);

// Integer matrices wrap on overflow instead of panicking in debug builds.
impl Arithmetic for i64 {
    #[inline]
    fn plus(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline]
    fn minus(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }

    #[inline]
    fn times(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }

    #[inline]
    fn negate(self) -> Self {
        self.wrapping_neg()
    }
}

impl Element for bool {
    const DTYPE: DType = DType::Boolean;
    const LAZY_SCALE: bool = false;

    #[inline]
    fn zero() -> Self {
        false
    }

    #[inline]
    fn one() -> Self {
        true
    }

    #[inline]
    fn nan() -> Self {
        false
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        value
    }

    #[inline]
    fn to_complex(self) -> Complex {
        if self { Complex::ONE } else { Complex::ZERO }
    }

    #[inline]
    fn magnitude(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    #[inline]
    fn scale_by(self, factor: Self) -> Self {
        self && factor
    }

    #[inline]
    fn relative_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for i64 {
    const DTYPE: DType = DType::Integer;
    const LAZY_SCALE: bool = false;

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn one() -> Self {
        1
    }

    #[inline]
    fn nan() -> Self {
        0
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        value as i64
    }

    #[inline]
    fn to_complex(self) -> Complex {
        Complex::new(self as f64, 0.0)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        (self as f64).abs()
    }

    #[inline]
    fn scale_by(self, factor: Self) -> Self {
        self.wrapping_mul(factor)
    }

    #[inline]
    fn relative_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::Real;
    const LAZY_SCALE: bool = true;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn nan() -> Self {
        f64::NAN
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        if value { 1.0 } else { 0.0 }
    }

    #[inline]
    fn to_complex(self) -> Complex {
        Complex::new(self, 0.0)
    }

    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn scale_by(self, factor: Self) -> Self {
        self * factor
    }

    #[inline]
    fn relative_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.to_bits() == 0
    }
}

impl Element for Complex {
    const DTYPE: DType = DType::Complex;
    const LAZY_SCALE: bool = true;

    #[inline]
    fn zero() -> Self {
        Complex::ZERO
    }

    #[inline]
    fn one() -> Self {
        Complex::ONE
    }

    #[inline]
    fn nan() -> Self {
        Complex::NAN
    }

    #[inline]
    fn from_bool(value: bool) -> Self {
        if value { Complex::ONE } else { Complex::ZERO }
    }

    #[inline]
    fn to_complex(self) -> Complex {
        self
    }

    #[inline]
    fn magnitude(self) -> f64 {
        Complex::magnitude(self)
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(self)
    }

    #[inline]
    fn scale_by(self, factor: Self) -> Self {
        self * factor
    }

    #[inline]
    fn is_default(&self) -> bool {
        self.re.to_bits() == 0 && self.im.to_bits() == 0
    }

    /// Orders by magnitude, then real part, then imaginary part.
    #[inline]
    fn relative_order(&self, other: &Self) -> Ordering {
        complex_order(*self, *other)
    }
}

/// Total order on complex numbers: magnitude, then real part, then
/// imaginary part
pub fn complex_order(a: Complex, b: Complex) -> Ordering {
    a.magnitude()
        .total_cmp(&b.magnitude())
        .then_with(|| a.re.total_cmp(&b.re))
        .then_with(|| a.im.total_cmp(&b.im))
}

impl Numeric for i64 {
    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        i64::checked_div(self, rhs)
    }
}

impl Numeric for f64 {
    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }
}

impl Numeric for Complex {
    #[inline]
    fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(self / rhs)
    }
}
