//! Fourier and cosine transforms
//!
//! Power-of-two lengths use the Stockham autosort algorithm:
//! - No bit-reversal permutation (Cooley-Tukey's main bottleneck)
//! - Sequential memory access patterns
//! - Natural double-buffering
//!
//! Other lengths are reduced to a power-of-two circular convolution with
//! Bluestein's chirp-z algorithm. The DCT pair reorders the input and runs
//! one complex FFT of the same length (Makhoul's algorithm).
//!
//! # Algorithm: Stockham Radix-2 FFT
//!
//! ```text
//! For each stage s = 0..log2(N):
//!     half_m = 2^s
//!     m = 2^(s+1)
//!     For each group g = 0..(N/m):
//!         For each butterfly b = 0..half_m:
//!             twiddle = exp(sign * 2πi * b / m)
//!             even = src[g * half_m + b]
//!             odd = src[N/2 + g * half_m + b] * twiddle
//!             dst[g * m + b] = even + odd
//!             dst[g * m + b + half_m] = even - odd
//!     swap(src, dst)
//! ```

use crate::dtype::Complex;
use std::f64::consts::PI;

/// Stockham FFT of a power-of-two length signal (unnormalised)
fn stockham(input: &[Complex], inverse: bool) -> Vec<Complex> {
    let n = input.len();
    debug_assert!(n.is_power_of_two(), "N must be power of 2");
    if n <= 1 {
        return input.to_vec();
    }

    let log_n = n.trailing_zeros() as usize;
    let sign = if inverse { 1.0f64 } else { -1.0f64 };

    let mut src = input.to_vec();
    let mut dst = vec![Complex::ZERO; n];

    for stage in 0..log_n {
        let m = 1 << (stage + 1);
        let half_m = 1 << stage;
        let groups = n / m;

        for b in 0..half_m {
            let theta = sign * 2.0 * PI * (b as f64) / (m as f64);
            let twiddle = Complex::from_polar(1.0, theta);
            for g in 0..groups {
                let even = src[g * half_m + b];
                let odd = src[n / 2 + g * half_m + b] * twiddle;
                dst[g * m + b] = even + odd;
                dst[g * m + b + half_m] = even - odd;
            }
        }

        std::mem::swap(&mut src, &mut dst);
    }
    src
}

/// Bluestein chirp-z transform for an arbitrary length (unnormalised)
///
/// # Algorithm
/// ```text
/// c_j  = exp(sign * iπ j² / n)
/// a_j  = x_j * c_j                  (zero padded to M ≥ 2n − 1)
/// b_j  = conj(c_|j|)                (circular, both ends)
/// X_k  = c_k * (a ⊛ b)_k
/// ```
fn bluestein(input: &[Complex], inverse: bool) -> Vec<Complex> {
    let n = input.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    let chirp: Vec<Complex> = (0..n)
        .map(|j| {
            // j² mod 2n keeps the angle small and exact
            let jj = (j as u128 * j as u128 % (2 * n as u128)) as f64;
            Complex::from_polar(1.0, sign * PI * jj / n as f64)
        })
        .collect();

    let len = (2 * n - 1).next_power_of_two();
    let mut a = vec![Complex::ZERO; len];
    for (dst, (&x, &c)) in a.iter_mut().zip(input.iter().zip(&chirp)) {
        *dst = x * c;
    }
    let mut b = vec![Complex::ZERO; len];
    b[0] = chirp[0].conj();
    for j in 1..n {
        b[j] = chirp[j].conj();
        b[len - j] = chirp[j].conj();
    }

    let fa = stockham(&a, false);
    let fb = stockham(&b, false);
    let product: Vec<Complex> = fa.iter().zip(&fb).map(|(&x, &y)| x * y).collect();
    let conv = stockham(&product, true);
    let scale = 1.0 / len as f64;

    (0..n).map(|k| chirp[k] * conv[k].scale(scale)).collect()
}

fn transform(input: &[Complex], inverse: bool) -> Vec<Complex> {
    if input.len().is_power_of_two() || input.is_empty() {
        stockham(input, inverse)
    } else {
        bluestein(input, inverse)
    }
}

/// Forward DFT, `X_k = Σ x_j·exp(−2πi·jk/n)`
pub fn dft(input: &[Complex]) -> Vec<Complex> {
    transform(input, false)
}

/// Inverse DFT, `x_j = (1/n)·Σ X_k·exp(2πi·jk/n)`
pub fn idft(input: &[Complex]) -> Vec<Complex> {
    let n = input.len();
    let scale = 1.0 / n.max(1) as f64;
    transform(input, true)
        .into_iter()
        .map(|v| v.scale(scale))
        .collect()
}

/// Orthonormal DCT-II
///
/// `X_k = s_k·Σ x_j·cos(πk(2j + 1)/(2n))` with `s_0 = √(1/n)` and
/// `s_k = √(2/n)` otherwise.
pub fn dct(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let mut v = vec![Complex::ZERO; n];
    for j in 0..n.div_ceil(2) {
        v[j] = Complex::new(input[2 * j], 0.0);
    }
    for j in 0..n / 2 {
        v[n - 1 - j] = Complex::new(input[2 * j + 1], 0.0);
    }
    let spectrum = dft(&v);

    let s0 = (1.0 / n as f64).sqrt();
    let sk = (2.0 / n as f64).sqrt();
    (0..n)
        .map(|k| {
            let w = Complex::from_polar(1.0, -PI * k as f64 / (2.0 * n as f64));
            let value = (spectrum[k] * w).re;
            value * if k == 0 { s0 } else { sk }
        })
        .collect()
}

/// Orthonormal DCT-III, the inverse of [`dct`]
pub fn idct(input: &[f64]) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }
    let s0 = (n as f64).sqrt();
    let sk = (n as f64 / 2.0).sqrt();
    let x: Vec<f64> = input
        .iter()
        .enumerate()
        .map(|(k, &v)| v * if k == 0 { s0 } else { sk })
        .collect();

    // V_k = exp(iπk/2n)·(X_k − i·X_{n−k}), X_n = 0
    let spectrum: Vec<Complex> = (0..n)
        .map(|k| {
            let mirrored = if k == 0 { 0.0 } else { x[n - k] };
            let w = Complex::from_polar(1.0, PI * k as f64 / (2.0 * n as f64));
            w * Complex::new(x[k], -mirrored)
        })
        .collect();
    let v = idft(&spectrum);

    let mut out = vec![0.0; n];
    for j in 0..n.div_ceil(2) {
        out[2 * j] = v[j].re;
    }
    for j in 0..n / 2 {
        out[2 * j + 1] = v[n - 1 - j].re;
    }
    out
}
