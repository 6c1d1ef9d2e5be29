//! Capability implementations for the concrete scalar types.
//!
//! `f32` and `f64` forward every method 1:1 to the `single` / `double` entry
//! point of the [`crate::kernel`] modules; neither precision ever routes
//! through the other. Integer types get plain loops with wrapping arithmetic
//! and stop at `Reduction`, `MatMul`, `Padding` and `RandomFill`: they have
//! no `Update`, no `Factorization` and no transcendentals.
//!
//! # References
//! - [num-traits crate documentation](https://docs.rs/num-traits)
//! - [rand crate documentation](https://docs.rs/rand)

use crate::core::traits::{
    Arithmetic, Exponential, Factorization, Logarithmic, MatMul, Padding, Power, RandomFill,
    Reduction, Scalar, Trigonometric, Update,
};
use crate::kernel::lapack::Transpose;
use crate::kernel::{blas, elementwise, lapack, transcendental};
use rand::Rng;

macro_rules! impl_float_capabilities {
    ($t:ty, $prec:ident, $rtol:expr) => {
        impl Scalar for $t {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
        }

        impl Arithmetic for $t {
            fn add(a: &[Self], b: &[Self], out: &mut [Self]) {
                elementwise::$prec::add(a, b, out)
            }
            fn sub(a: &[Self], b: &[Self], out: &mut [Self]) {
                elementwise::$prec::sub(a, b, out)
            }
            fn mul(a: &[Self], b: &[Self], out: &mut [Self]) {
                elementwise::$prec::mul(a, b, out)
            }
            fn div(a: &[Self], b: &[Self], out: &mut [Self]) {
                elementwise::$prec::div(a, b, out)
            }
            fn add_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                elementwise::$prec::add_scalar(a, s, out)
            }
            fn sub_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                elementwise::$prec::sub_scalar(a, s, out)
            }
            fn mul_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                elementwise::$prec::mul_scalar(a, s, out)
            }
            fn div_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                elementwise::$prec::div_scalar(a, s, out)
            }
            fn neg(a: &[Self], out: &mut [Self]) {
                elementwise::$prec::neg(a, out)
            }
        }

        impl Reduction for $t {
            type Norm = $t;

            fn sum(a: &[Self]) -> Self {
                a.iter().fold(0.0, |acc, v| acc + v)
            }
            fn dot(a: &[Self], b: &[Self]) -> Self {
                blas::$prec::dot(a, b)
            }
            fn asum(a: &[Self]) -> Self::Norm {
                blas::$prec::asum(a)
            }
            fn norm(a: &[Self]) -> Self::Norm {
                blas::$prec::nrm2(a)
            }
            fn scale(alpha: Self, a: &mut [Self]) {
                blas::$prec::scal(alpha, a)
            }
            fn default_rtol() -> Self::Norm {
                $rtol
            }
        }

        impl MatMul for $t {
            fn gemm(
                m: usize,
                n: usize,
                k: usize,
                alpha: Self,
                a: &[Self],
                lda: usize,
                b: &[Self],
                ldb: usize,
                beta: Self,
                c: &mut [Self],
                ldc: usize,
            ) {
                blas::$prec::gemm(m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
            }
        }

        impl Update for $t {
            fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
                blas::$prec::axpy(alpha, x, y)
            }
        }

        impl Factorization for $t {
            fn getrf(m: usize, n: usize, a: &mut [Self], lda: usize, ipiv: &mut [i32]) -> i32 {
                lapack::$prec::getrf(m, n, a, lda, ipiv)
            }
            fn getri(n: usize, a: &mut [Self], lda: usize, ipiv: &[i32], work: &mut [Self]) -> i32 {
                lapack::$prec::getri(n, a, lda, ipiv, work)
            }
            fn getrs(
                trans: Transpose,
                n: usize,
                nrhs: usize,
                a: &[Self],
                lda: usize,
                ipiv: &[i32],
                b: &mut [Self],
                ldb: usize,
            ) -> i32 {
                lapack::$prec::getrs(trans, n, nrhs, a, lda, ipiv, b, ldb)
            }
        }

        impl Trigonometric for $t {
            fn sin(a: &[Self], out: &mut [Self]) {
                transcendental::$prec::sin(a, out)
            }
            fn cos(a: &[Self], out: &mut [Self]) {
                transcendental::$prec::cos(a, out)
            }
            fn tan(a: &[Self], out: &mut [Self]) {
                transcendental::$prec::tan(a, out)
            }
        }

        impl Exponential for $t {
            fn exp(a: &[Self], out: &mut [Self]) {
                transcendental::$prec::exp(a, out)
            }
        }

        impl Logarithmic for $t {
            fn ln(a: &[Self], out: &mut [Self]) {
                transcendental::$prec::ln(a, out)
            }
        }

        impl Power for $t {
            fn pow(a: &[Self], p: Self, out: &mut [Self]) {
                transcendental::$prec::pow(a, p, out)
            }
        }

        impl Padding for $t {}

        impl RandomFill for $t {
            fn random_fill<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self]) {
                for x in out.iter_mut() {
                    *x = rng.r#gen();
                }
            }
        }
    };
}

impl_float_capabilities!(f32, single, 1e-6);
impl_float_capabilities!(f64, double, 1e-8);

fn check_len(a: usize, b: usize, out: usize) {
    assert!(
        a == b && b == out,
        "elementwise operation: length mismatch (a = {a}, b = {b}, out = {out})"
    );
}

macro_rules! impl_int_capabilities {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            #[inline]
            fn zero() -> Self {
                0
            }
            #[inline]
            fn one() -> Self {
                1
            }
        }

        impl Arithmetic for $t {
            fn add(a: &[Self], b: &[Self], out: &mut [Self]) {
                check_len(a.len(), b.len(), out.len());
                for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
                    *o = x.wrapping_add(*y);
                }
            }
            fn sub(a: &[Self], b: &[Self], out: &mut [Self]) {
                check_len(a.len(), b.len(), out.len());
                for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
                    *o = x.wrapping_sub(*y);
                }
            }
            fn mul(a: &[Self], b: &[Self], out: &mut [Self]) {
                check_len(a.len(), b.len(), out.len());
                for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
                    *o = x.wrapping_mul(*y);
                }
            }
            fn div(a: &[Self], b: &[Self], out: &mut [Self]) {
                check_len(a.len(), b.len(), out.len());
                for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
                    *o = x.wrapping_div(*y);
                }
            }
            fn add_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                check_len(a.len(), a.len(), out.len());
                for (o, x) in out.iter_mut().zip(a.iter()) {
                    *o = x.wrapping_add(s);
                }
            }
            fn sub_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                check_len(a.len(), a.len(), out.len());
                for (o, x) in out.iter_mut().zip(a.iter()) {
                    *o = x.wrapping_sub(s);
                }
            }
            fn mul_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                check_len(a.len(), a.len(), out.len());
                for (o, x) in out.iter_mut().zip(a.iter()) {
                    *o = x.wrapping_mul(s);
                }
            }
            fn div_scalar(a: &[Self], s: Self, out: &mut [Self]) {
                check_len(a.len(), a.len(), out.len());
                for (o, x) in out.iter_mut().zip(a.iter()) {
                    *o = x.wrapping_div(s);
                }
            }
            fn neg(a: &[Self], out: &mut [Self]) {
                check_len(a.len(), a.len(), out.len());
                for (o, x) in out.iter_mut().zip(a.iter()) {
                    *o = x.wrapping_neg();
                }
            }
        }

        impl Reduction for $t {
            type Norm = f64;

            fn sum(a: &[Self]) -> Self {
                a.iter().fold(0, |acc: $t, v| acc.wrapping_add(*v))
            }
            fn dot(a: &[Self], b: &[Self]) -> Self {
                assert_eq!(a.len(), b.len(), "dot: vectors must have the same length");
                a.iter()
                    .zip(b.iter())
                    .fold(0, |acc: $t, (x, y)| acc.wrapping_add(x.wrapping_mul(*y)))
            }
            fn asum(a: &[Self]) -> f64 {
                a.iter().map(|v| (*v as f64).abs()).sum()
            }
            fn norm(a: &[Self]) -> f64 {
                a.iter()
                    .map(|v| {
                        let x = *v as f64;
                        x * x
                    })
                    .sum::<f64>()
                    .sqrt()
            }
            fn scale(alpha: Self, a: &mut [Self]) {
                for x in a.iter_mut() {
                    *x = x.wrapping_mul(alpha);
                }
            }
            fn default_rtol() -> f64 {
                1e-8
            }
        }

        impl MatMul for $t {
            fn gemm(
                m: usize,
                n: usize,
                k: usize,
                alpha: Self,
                a: &[Self],
                lda: usize,
                b: &[Self],
                ldb: usize,
                beta: Self,
                c: &mut [Self],
                ldc: usize,
            ) {
                assert!(lda >= k.max(1), "gemm: lda = {lda} < max(1, k = {k})");
                assert!(ldb >= n.max(1), "gemm: ldb = {ldb} < max(1, n = {n})");
                assert!(ldc >= n.max(1), "gemm: ldc = {ldc} < max(1, n = {n})");
                for i in 0..m {
                    for j in 0..n {
                        let mut acc: $t = 0;
                        for p in 0..k {
                            acc = acc.wrapping_add(a[i * lda + p].wrapping_mul(b[p * ldb + j]));
                        }
                        let idx = i * ldc + j;
                        let ab = alpha.wrapping_mul(acc);
                        c[idx] = if beta == 0 { ab } else { ab.wrapping_add(beta.wrapping_mul(c[idx])) };
                    }
                }
            }
        }

        impl Padding for $t {}

        impl RandomFill for $t {
            fn random_fill<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self]) {
                for x in out.iter_mut() {
                    *x = rng.r#gen();
                }
            }
        }
    )*};
}

impl_int_capabilities!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn integer_arithmetic_wraps() {
        let mut out = [0u8; 2];
        <u8 as Arithmetic>::add(&[250, 1], &[10, 1], &mut out);
        assert_eq!(out, [4, 2]);
        <u8 as Arithmetic>::neg(&[1, 0], &mut out);
        assert_eq!(out, [255, 0]);

        let mut out = [0i32; 2];
        <i32 as Arithmetic>::mul(&[i32::MAX, 3], &[2, 4], &mut out);
        assert_eq!(out, [-2, 12]);
    }

    #[test]
    fn integer_norm_accumulates_in_f64() {
        // i32::MAX squared overflows i32 and i64 sums would wrap quickly;
        // the f64 accumulator does not.
        let big = [i32::MAX, i32::MAX];
        let x = i32::MAX as f64;
        let expected = (x * x + x * x).sqrt();
        assert_eq!(<i32 as Reduction>::norm(&big), expected);
        assert_eq!(<i32 as Reduction>::norm(&[3, 4]), 5.0);
    }

    #[test]
    fn integer_gemm_matches_hand_computation() {
        let a = [1i64, 2, 3, 4];
        let b = [5i64, 6, 7, 8];
        let mut c = [0i64; 4];
        <i64 as MatMul>::gemm(2, 2, 2, 1, &a, 2, &b, 2, 0, &mut c, 2);
        assert_eq!(c, [19, 22, 43, 50]);
    }

    #[test]
    fn float_dispatch_keeps_precision() {
        let x = [1.0f32, 2.0, 2.0];
        let n: f32 = <f32 as Reduction>::norm(&x);
        assert_eq!(n, 3.0);
        assert_eq!(<f32 as Reduction>::default_rtol(), 1e-6);
        assert_eq!(<f64 as Reduction>::default_rtol(), 1e-8);
    }

    #[test]
    fn padding_surrounds_source() {
        let padded = <i16 as Padding>::pad(&[1, 2], 1, 2, 0);
        assert_eq!(padded, vec![0, 1, 2, 0, 0]);
    }

    #[test]
    fn random_fill_floats_are_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut out = [0.0f64; 64];
        <f64 as RandomFill>::random_fill(&mut rng, &mut out);
        assert!(out.iter().all(|x| (0.0..1.0).contains(x)));
    }
}
