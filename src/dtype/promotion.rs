//! Type promotion rules for binary operations

use super::{Complex, DType};

/// Promote two dtypes to a common dtype for binary operations
///
/// The scalar domains form a chain `Boolean ≺ Integer ≺ Real ≺ Complex`, so
/// the join of two domains is simply the higher ranked one.
pub fn promote(lhs: DType, rhs: DType) -> DType {
    if lhs.rank() >= rhs.rank() { lhs } else { rhs }
}

/// Check if a dtype can be cast to another without data loss
///
/// Integer to real may round for magnitudes above 2^53; the lattice still
/// treats it as a widening conversion.
pub fn can_cast_safely(from: DType, to: DType) -> bool {
    from.rank() <= to.rank()
}

/// Lossless element conversion up the promotion lattice
///
/// `PromoteTo<T>` is implemented exactly for the pairs where
/// `can_cast_safely(Self::DTYPE, T::DTYPE)` holds.
pub trait PromoteTo<T> {
    /// Convert into the wider domain
    fn promote(self) -> T;
}

macro_rules! impl_promote {
    ($from:ty => $to:ty, |$v:ident| $body:expr) => {
        impl PromoteTo<$to> for $from {
            #[inline]
            fn promote(self) -> $to {
                let $v = self;
                $body
            }
        }
    };
}

impl_promote!(bool => bool, |v| v);
impl_promote!(bool => i64, |v| v as i64);
impl_promote!(bool => f64, |v| if v { 1.0 } else { 0.0 });
impl_promote!(bool => Complex, |v| if v { Complex::ONE } else { Complex::ZERO });
impl_promote!(i64 => i64, |v| v);
impl_promote!(i64 => f64, |v| v as f64);
impl_promote!(i64 => Complex, |v| Complex::new(v as f64, 0.0));
impl_promote!(f64 => f64, |v| v);
impl_promote!(f64 => Complex, |v| Complex::new(v, 0.0));
impl_promote!(Complex => Complex, |v| v);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_type_promotion() {
        assert_eq!(promote(DType::Real, DType::Real), DType::Real);
        assert_eq!(promote(DType::Boolean, DType::Boolean), DType::Boolean);
    }

    #[test]
    fn test_join() {
        assert_eq!(promote(DType::Boolean, DType::Integer), DType::Integer);
        assert_eq!(promote(DType::Integer, DType::Real), DType::Real);
        assert_eq!(promote(DType::Real, DType::Integer), DType::Real);
        assert_eq!(promote(DType::Complex, DType::Boolean), DType::Complex);
    }

    #[test]
    fn test_safe_cast() {
        assert!(can_cast_safely(DType::Boolean, DType::Complex));
        assert!(can_cast_safely(DType::Integer, DType::Real));
        assert!(!can_cast_safely(DType::Real, DType::Integer));
        assert!(!can_cast_safely(DType::Complex, DType::Real));
    }

    #[test]
    fn test_promote_elements() {
        let c: Complex = 3i64.promote();
        assert_eq!(c, Complex::new(3.0, 0.0));
        let r: f64 = true.promote();
        assert_eq!(r, 1.0);
    }
}
