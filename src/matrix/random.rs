//! Random matrix generation from a caller-owned [`Prng`]

use super::{Matrix, MatrixBoolean, MatrixComplex, MatrixInteger, MatrixReal};
use crate::dtype::Complex;
use crate::error::{Error, Result};
use crate::runtime::Prng;

impl MatrixReal {
    /// Coefficients drawn uniformly from `[0, 1)`
    pub fn random_uniform<P: Prng + ?Sized>(rows: usize, cols: usize, rng: &mut P) -> Result<Self> {
        Matrix::from_fn(rows, cols, |_, _| rng.next_uniform())
    }

    /// Coefficients drawn from the standard normal distribution
    pub fn random_normal<P: Prng + ?Sized>(rows: usize, cols: usize, rng: &mut P) -> Result<Self> {
        Matrix::from_fn(rows, cols, |_, _| rng.next_normal())
    }
}

impl MatrixComplex {
    /// Real and imaginary parts drawn independently from `[0, 1)`
    pub fn random_uniform<P: Prng + ?Sized>(rows: usize, cols: usize, rng: &mut P) -> Result<Self> {
        Matrix::from_fn(rows, cols, |_, _| {
            let re = rng.next_uniform();
            Complex::new(re, rng.next_uniform())
        })
    }

    /// Real and imaginary parts drawn independently from the standard normal
    /// distribution
    pub fn random_normal<P: Prng + ?Sized>(rows: usize, cols: usize, rng: &mut P) -> Result<Self> {
        Matrix::from_fn(rows, cols, |_, _| {
            let re = rng.next_normal();
            Complex::new(re, rng.next_normal())
        })
    }
}

impl MatrixInteger {
    /// Coefficients drawn uniformly from `low..=high`
    pub fn random_integer<P: Prng + ?Sized>(
        rows: usize,
        cols: usize,
        low: i64,
        high: i64,
        rng: &mut P,
    ) -> Result<Self> {
        if low > high {
            return Err(Error::invalid_parameter(
                "high",
                format!("empty range {low}..={high}"),
            ));
        }
        Matrix::from_fn(rows, cols, |_, _| rng.next_integer(low, high))
    }
}

impl MatrixBoolean {
    /// Coefficients that are true with probability `p`
    pub fn random_boolean<P: Prng + ?Sized>(
        rows: usize,
        cols: usize,
        p: f64,
        rng: &mut P,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_parameter(
                "p",
                format!("probability {p} is outside [0, 1]"),
            ));
        }
        Matrix::from_fn(rows, cols, |_, _| rng.next_boolean(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_uniform_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = MatrixReal::random_uniform(4, 5, &mut rng).unwrap();
        assert_eq!(m.shape(), (4, 5));
        assert!(m.iter().all(|v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = MatrixComplex::random_normal(3, 3, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = MatrixComplex::random_normal(3, 3, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_integer_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = MatrixInteger::random_integer(10, 10, -2, 2, &mut rng).unwrap();
        assert!(m.iter().all(|v| (-2..=2).contains(&v)));
        assert!(MatrixInteger::random_integer(1, 1, 3, 2, &mut rng).is_err());
    }

    #[test]
    fn test_boolean_probability() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(MatrixBoolean::random_boolean(3, 3, 0.0, &mut rng).unwrap().iter().all(|v| !v));
        assert!(MatrixBoolean::random_boolean(3, 3, 1.0, &mut rng).unwrap().iter().all(|v| v));
        assert!(MatrixBoolean::random_boolean(1, 1, 1.5, &mut rng).is_err());
    }
}
