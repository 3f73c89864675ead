//! Linear algebra across domains
//!
//! Boolean and integer arguments run in the real domain; a complex
//! argument keeps the whole computation complex.

use super::dispatch::{is_scalar, join, linalg_dtype, operand_dtype};
use crate::dtype::{Complex, DType, Element, promote};
use crate::error::{Error, Result};
use crate::matrix::{Eigen, Equilibration, Hessenberg, LinalgOptions, Lq, Plu, Qr, Schur, Svd};
use crate::variant::{Variant, VariantElement};

/// Determinant, widened to complex
pub fn determinant(a: impl Into<Variant>) -> Result<Complex> {
    let a = a.into();
    let dtype = linalg_dtype("determinant", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.determinant()?.to_complex())
    })
}

/// Inverse; empty if the matrix is singular
pub fn inverse(a: impl Into<Variant>) -> Result<Variant> {
    inverse_with(a, LinalgOptions::default())
}

/// Inverse with an explicit failure policy
pub fn inverse_with(a: impl Into<Variant>, options: LinalgOptions) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("inverse", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.inverse_with(options)?))
    })
}

/// LU factorisation with partial pivoting
pub fn plu(a: impl Into<Variant>) -> Result<Plu<Variant>> {
    let a = a.into();
    let dtype = linalg_dtype("plu", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.plu()?.map(T::matrix_into_variant))
    })
}

/// Thin singular value decomposition
pub fn svd(a: impl Into<Variant>) -> Result<Svd<Variant>> {
    let a = a.into();
    let dtype = linalg_dtype("svd", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.svd()?.map(T::matrix_into_variant))
    })
}

/// QR factorisation
pub fn qr(a: impl Into<Variant>) -> Result<Qr<Variant>> {
    let a = a.into();
    let dtype = linalg_dtype("qr", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.qr()?.map(T::matrix_into_variant))
    })
}

/// LQ factorisation
pub fn lq(a: impl Into<Variant>) -> Result<Lq<Variant>> {
    let a = a.into();
    let dtype = linalg_dtype("lq", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.lq()?.map(T::matrix_into_variant))
    })
}

/// Lower Cholesky factor; empty unless Hermitian positive definite
pub fn cholesky(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("cholesky", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.cholesky()?))
    })
}

/// Upper Cholesky factor; empty unless Hermitian positive definite
pub fn upper_cholesky(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("upper_cholesky", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(T::matrix_into_variant(a.try_to_matrix::<T>()?.upper_cholesky()?))
    })
}

/// Upper Hessenberg reduction
pub fn hessenberg(a: impl Into<Variant>) -> Result<Hessenberg<Variant>> {
    let a = a.into();
    let dtype = linalg_dtype("hessenberg", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(a.try_to_matrix::<T>()?.hessenberg()?.map(T::matrix_into_variant))
    })
}

/// Complex Schur decomposition
pub fn schur(a: impl Into<Variant>) -> Result<Schur> {
    let a = a.into();
    let dtype = linalg_dtype("schur", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.schur()
    })
}

/// Eigenvalues and right eigenvectors
pub fn eigenvectors(a: impl Into<Variant>) -> Result<Eigen> {
    let a = a.into();
    let dtype = linalg_dtype("eigenvectors", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.eigenvectors()
    })
}

/// Number of singular values above `epsilon · σ_max`
pub fn rank(a: impl Into<Variant>, epsilon: f64) -> Result<usize> {
    let a = a.into();
    let dtype = linalg_dtype("rank", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.rank(epsilon)
    })
}

/// Two-norm condition number
pub fn condition_number(a: impl Into<Variant>) -> Result<f64> {
    let a = a.into();
    let dtype = linalg_dtype("condition_number", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.condition_number()
    })
}

/// Entry-wise `p`-norm
///
/// `p` may be any numeric scalar; a complex `p` must have a zero imaginary
/// part and its real part is used as is.
pub fn p_norm(a: impl Into<Variant>, p: impl Into<Variant>) -> Result<f64> {
    let (a, p) = (a.into(), p.into());
    if !is_scalar(&p) {
        return Err(Error::type_mismatch("p_norm", p.value_type()));
    }
    let order = p.try_to_real()?;
    let dtype = operand_dtype("p_norm", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        a.try_to_matrix::<T>()?.p_norm(order)
    })
}

/// Entry-wise 2-norm
pub fn euclidean_norm(a: impl Into<Variant>) -> Result<f64> {
    let a = a.into();
    let dtype = operand_dtype("euclidean_norm", &a)?;
    crate::dispatch_dtype!(dtype, T => {
        a.try_to_matrix::<T>()?.euclidean_norm()
    })
}

/// Maximum absolute column sum
pub fn one_norm(a: impl Into<Variant>) -> Result<f64> {
    let a = a.into();
    let dtype = linalg_dtype("one_norm", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.one_norm()
    })
}

/// Maximum absolute row sum
pub fn infinity_norm(a: impl Into<Variant>) -> Result<f64> {
    let a = a.into();
    let dtype = linalg_dtype("infinity_norm", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.infinity_norm()
    })
}

/// Row and column equilibration factors
pub fn equilibrate(a: impl Into<Variant>) -> Result<Equilibration> {
    let a = a.into();
    let dtype = linalg_dtype("equilibrate", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        a.try_to_matrix::<T>()?.equilibrate()
    })
}

/// Solve `A·X = Y` in the join domain; empty if `A` is singular
pub fn solve(a: impl Into<Variant>, y: impl Into<Variant>) -> Result<Variant> {
    solve_with(a, y, LinalgOptions::default())
}

/// Solve `A·X = Y` with an explicit failure policy
pub fn solve_with(
    a: impl Into<Variant>,
    y: impl Into<Variant>,
    options: LinalgOptions,
) -> Result<Variant> {
    let (a, y) = (a.into(), y.into());
    let dtype = promote(join("solve", &a, &y)?, DType::Real);
    crate::dispatch_linalg!(dtype, T => {
        let x = a.try_to_matrix::<T>()?.solve_with(&y.try_to_matrix::<T>()?, options)?;
        Ok(T::matrix_into_variant(x))
    })
}

/// Least-squares solution of `A·X ≈ B`; empty if `A` is rank deficient
pub fn least_squares(a: impl Into<Variant>, b: impl Into<Variant>) -> Result<Variant> {
    least_squares_with(a, b, LinalgOptions::default())
}

/// Least-squares solution with an explicit failure policy
pub fn least_squares_with(
    a: impl Into<Variant>,
    b: impl Into<Variant>,
    options: LinalgOptions,
) -> Result<Variant> {
    let (a, b) = (a.into(), b.into());
    let dtype = promote(join("least_squares", &a, &b)?, DType::Real);
    crate::dispatch_linalg!(dtype, T => {
        let x = a
            .try_to_matrix::<T>()?
            .least_squares_with(&b.try_to_matrix::<T>()?, options)?;
        Ok(T::matrix_into_variant(x))
    })
}

/// Forward DFT of a vector, or of every column
pub fn dft(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("dft", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(Variant::MatrixComplex(a.try_to_matrix::<T>()?.dft()?))
    })
}

/// Inverse DFT of a vector, or of every column
pub fn idft(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("idft", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(Variant::MatrixComplex(a.try_to_matrix::<T>()?.idft()?))
    })
}

/// Orthonormal DCT-II; real domains only
pub fn dct(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    real_only("dct", &a)?;
    Ok(Variant::MatrixReal(a.try_to_matrix_real()?.dct()?))
}

/// Orthonormal DCT-III; real domains only
pub fn idct(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    real_only("idct", &a)?;
    Ok(Variant::MatrixReal(a.try_to_matrix_real()?.idct()?))
}

/// Analytic signal of a vector
pub fn hilbert_transform(a: impl Into<Variant>) -> Result<Variant> {
    let a = a.into();
    let dtype = linalg_dtype("hilbert_transform", &a)?;
    crate::dispatch_linalg!(dtype, T => {
        Ok(Variant::MatrixComplex(a.try_to_matrix::<T>()?.hilbert_transform()?))
    })
}

fn real_only(op: &'static str, a: &Variant) -> Result<()> {
    if operand_dtype(op, a)? == DType::Complex {
        return Err(Error::type_mismatch(op, a.value_type()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
    use crate::variant::ValueType;

    #[test]
    fn test_determinant_is_complex() {
        let a = MatrixInteger::from_rows(&[[2, 1], [1, 3]]).unwrap();
        let d = determinant(&a).unwrap();
        assert!((d - Complex::new(5.0, 0.0)).magnitude() < 1e-12);
        let c = MatrixComplex::from_rows(&[[Complex::I]]).unwrap();
        assert!((determinant(&c).unwrap() - Complex::I).magnitude() < 1e-12);
        assert!(determinant(crate::collections::Set::from([1])).is_err());
    }

    #[test]
    fn test_integer_inverse_is_real() {
        let a = MatrixInteger::from_rows(&[[2, 0], [0, 4]]).unwrap();
        let inv = inverse(&a).unwrap();
        assert_eq!(inv.value_type(), ValueType::MatrixReal);
        assert_eq!(inv.to_matrix_real().at(2, 2).unwrap(), 0.25);

        let singular = MatrixBoolean::from_rows(&[[true, true], [true, true]]).unwrap();
        assert!(inverse(&singular).unwrap().to_matrix_real().is_empty());
        assert!(inverse_with(&singular, LinalgOptions::strict()).is_err());
    }

    #[test]
    fn test_factor_tuples_carry_domain() {
        let a = MatrixReal::from_rows(&[[4.0, 1.0], [2.0, 3.0]]).unwrap();
        let f = plu(&a).unwrap();
        assert!(f.non_singular);
        assert_eq!(f.l.value_type(), ValueType::MatrixReal);
        let s = svd(&a).unwrap();
        assert!(s.ok);
        let q = qr(&a).unwrap();
        assert_eq!(q.r.value_type(), ValueType::MatrixReal);
        let schur = schur(&a).unwrap();
        let mut w = schur.eigenvalues.to_column_major_vec().unwrap();
        w.sort_by(|x, y| x.re.total_cmp(&y.re));
        assert!((w[0] - Complex::new(2.0, 0.0)).magnitude() < 1e-10);
        assert!((w[1] - Complex::new(5.0, 0.0)).magnitude() < 1e-10);
    }

    #[test]
    fn test_solve_in_join_domain() {
        let a = MatrixInteger::from_rows(&[[2, 0], [0, 1]]).unwrap();
        let y = MatrixComplex::from_rows(&[[Complex::new(2.0, 2.0)], [Complex::I]]).unwrap();
        let x = solve(&a, &y).unwrap();
        assert_eq!(x.value_type(), ValueType::MatrixComplex);
        let x = x.to_matrix_complex();
        assert!((x.at(1, 1).unwrap() - Complex::new(1.0, 1.0)).magnitude() < 1e-12);
    }

    #[test]
    fn test_norms() {
        let v = MatrixInteger::from_rows(&[[3, -4]]).unwrap();
        assert!((euclidean_norm(&v).unwrap() - 5.0).abs() < 1e-12);
        assert!((p_norm(&v, 1i64).unwrap() - 7.0).abs() < 1e-12);
        assert!((p_norm(&v, Complex::new(1.0, 0.0)).unwrap() - 7.0).abs() < 1e-12);
        assert!(p_norm(&v, Complex::I).is_err());
        assert!((p_norm(&v, 1.5).unwrap() - (3f64.powf(1.5) + 4f64.powf(1.5)).powf(1.0 / 1.5)).abs() < 1e-12);
        assert_eq!(one_norm(&v).unwrap(), 4.0);
        assert_eq!(infinity_norm(&v).unwrap(), 7.0);
    }

    #[test]
    fn test_transforms() {
        let v = MatrixInteger::from_rows(&[[1, 1, 1, 1]]).unwrap();
        let f = dft(&v).unwrap().to_matrix_complex();
        assert!((f.at(1, 1).unwrap() - Complex::new(4.0, 0.0)).magnitude() < 1e-12);
        assert!(f.at(1, 2).unwrap().magnitude() < 1e-12);
        assert_eq!(dct(&v).unwrap().value_type(), ValueType::MatrixReal);
        assert!(dct(MatrixComplex::identity(2).unwrap()).is_err());
        assert_eq!(
            hilbert_transform(&v).unwrap().value_type(),
            ValueType::MatrixComplex
        );
    }
}
