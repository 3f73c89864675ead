//! Total order across every [`Variant`]

use super::Variant;
use crate::dtype::complex_order;
use std::cmp::Ordering;

/// Group of a value in the implicit order
///
/// Integer, real and complex scalars share a group and compare as complex
/// numbers.
fn group(value: &Variant) -> u8 {
    match value {
        Variant::None => 0,
        Variant::Boolean(_) => 1,
        Variant::Integer(_) | Variant::Real(_) | Variant::Complex(_) => 2,
        Variant::Set(_) => 3,
        Variant::Tuple(_) => 4,
        Variant::MatrixBoolean(_) => 5,
        Variant::MatrixInteger(_) => 6,
        Variant::MatrixReal(_) => 7,
        Variant::MatrixComplex(_) => 8,
    }
}

/// Total order used to sort heterogeneous containers
///
/// Values order by group: booleans, numeric scalars, sets, tuples, then
/// boolean, integer, real and complex matrices. Numeric scalars order by
/// magnitude, then real part, then imaginary part. Ties within a group
/// break on the domain's own relative order.
pub fn implicit_ordering(a: &Variant, b: &Variant) -> Ordering {
    group(a).cmp(&group(b)).then_with(|| match (a, b) {
        (Variant::Boolean(x), Variant::Boolean(y)) => x.cmp(y),
        (Variant::Integer(x), Variant::Integer(y)) => x
            .unsigned_abs()
            .cmp(&y.unsigned_abs())
            .then_with(|| x.cmp(y)),
        (Variant::Set(x), Variant::Set(y)) => x.cmp(y),
        (Variant::Tuple(x), Variant::Tuple(y)) => x.cmp(y),
        (Variant::MatrixBoolean(x), Variant::MatrixBoolean(y)) => x.relative_order(y),
        (Variant::MatrixInteger(x), Variant::MatrixInteger(y)) => x.relative_order(y),
        (Variant::MatrixReal(x), Variant::MatrixReal(y)) => x.relative_order(y),
        (Variant::MatrixComplex(x), Variant::MatrixComplex(y)) => x.relative_order(y),
        _ => match (a.scalar_complex(), b.scalar_complex()) {
            (Some(x), Some(y)) => complex_order(x, y),
            _ => Ordering::Equal,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{Set, Tuple};
    use crate::dtype::Complex;
    use crate::matrix::{MatrixInteger, MatrixReal};
    use crate::variant::ValueType;

    #[test]
    fn test_groups() {
        let mut values = vec![
            Variant::from(MatrixReal::identity(1).unwrap()),
            Variant::Tuple(Tuple::from([1])),
            Variant::Real(0.5),
            Variant::from(MatrixInteger::identity(1).unwrap()),
            Variant::Set(Set::from([1])),
            Variant::Boolean(true),
            Variant::None,
        ];
        values.sort_by(implicit_ordering);
        let tags: Vec<_> = values.iter().map(Variant::value_type).collect();
        assert_eq!(
            tags,
            vec![
                ValueType::None,
                ValueType::Boolean,
                ValueType::Real,
                ValueType::Set,
                ValueType::Tuple,
                ValueType::MatrixInteger,
                ValueType::MatrixReal,
            ]
        );
    }

    #[test]
    fn test_numeric_scalars_merge() {
        let mut values = vec![
            Variant::Complex(Complex::new(0.0, 2.0)),
            Variant::Integer(-3),
            Variant::Real(1.5),
            Variant::Integer(1),
        ];
        values.sort_by(implicit_ordering);
        assert_eq!(values[0], Variant::Integer(1));
        assert_eq!(values[1], Variant::Real(1.5));
        assert_eq!(values[2], Variant::Complex(Complex::new(0.0, 2.0)));
        assert_eq!(values[3], Variant::Integer(-3));
    }

    #[test]
    fn test_integer_ties() {
        assert_eq!(
            implicit_ordering(&Variant::Integer(-2), &Variant::Integer(2)),
            Ordering::Less
        );
        assert_eq!(
            implicit_ordering(&Variant::Integer(2), &Variant::Real(2.0)),
            Ordering::Equal
        );
    }
}
