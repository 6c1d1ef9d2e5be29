//! Scalar capabilities.
//!
//! Every numeric operation family is a trait that an element type may or may
//! not implement. Containers expose an operation only when their element type
//! carries the matching capability, so unsupported combinations are rejected
//! at compile time:
//!
//! ```text
//! Scalar
//!   ├── Arithmetic ── Reduction ── Update ── Factorization   (f32, f64)
//!   │        └──────── MatMul
//!   ├── Trigonometric / Exponential / Logarithmic / Power      (f32, f64)
//!   ├── Padding                                                (all)
//!   └── RandomFill                                             (all)
//! ```
//!
//! Integers stop at `Reduction` and `MatMul`: they have no `Update` (axpy) and
//! no `Factorization`, so `Matrix<i32>::determinant` does not exist.
//!
//! Implementations live in [`crate::core::wrappers`].

use crate::core::buffer::Buffer;
use crate::kernel::lapack::Transpose;
use num_traits::Float;
use rand::Rng;
use std::fmt::{Debug, Display};
use std::ops::{Mul, Neg};

/// Root bound for every element type storable in a container.
pub trait Scalar: Copy + Default + PartialEq + Debug + Display + Send + Sync + 'static {
    fn zero() -> Self;
    fn one() -> Self;
}

/// Elementwise arithmetic over equal-length slices.
///
/// Binary methods panic when `a`, `b` and `out` differ in length. Integer
/// implementations wrap on overflow and panic on division by zero.
pub trait Arithmetic: Scalar {
    fn add(a: &[Self], b: &[Self], out: &mut [Self]);
    fn sub(a: &[Self], b: &[Self], out: &mut [Self]);
    fn mul(a: &[Self], b: &[Self], out: &mut [Self]);
    fn div(a: &[Self], b: &[Self], out: &mut [Self]);
    fn add_scalar(a: &[Self], s: Self, out: &mut [Self]);
    fn sub_scalar(a: &[Self], s: Self, out: &mut [Self]);
    fn mul_scalar(a: &[Self], s: Self, out: &mut [Self]);
    fn div_scalar(a: &[Self], s: Self, out: &mut [Self]);
    fn neg(a: &[Self], out: &mut [Self]);
}

/// Reductions and in-place scaling.
pub trait Reduction: Arithmetic {
    /// Real type norms and tolerances are expressed in.
    type Norm: Float + Debug + Display + Send + Sync;

    fn sum(a: &[Self]) -> Self;
    fn dot(a: &[Self], b: &[Self]) -> Self;
    /// `Σ |aᵢ|`
    fn asum(a: &[Self]) -> Self::Norm;
    /// Euclidean norm `sqrt(Σ aᵢ²)`.
    ///
    /// Integer implementations convert each element to `f64` before squaring
    /// and accumulate in `f64`, so they never wrap; precision is lost only once
    /// partial sums exceed 2^53.
    fn norm(a: &[Self]) -> Self::Norm;
    /// `a ← α a`
    fn scale(alpha: Self, a: &mut [Self]);
    /// Relative tolerance used by approximate comparisons when none is given.
    fn default_rtol() -> Self::Norm;
}

/// Row-major general matrix product `C ← α A B + β C`.
pub trait MatMul: Arithmetic {
    #[allow(clippy::too_many_arguments)]
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
    );
}

/// Vector update `y ← y + α x`.
pub trait Update: Reduction {
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]);
}

/// LU factorization kernels with LAPACK status codes.
///
/// The kernels use LAPACK's column-major storage, so a row-major buffer is
/// factored as its transpose. See [`crate::kernel::lapack`] for the argument
/// and `INFO` conventions.
pub trait Factorization: Update + MatMul + Neg<Output = Self> + Mul<Output = Self> {
    fn getrf(m: usize, n: usize, a: &mut [Self], lda: usize, ipiv: &mut [i32]) -> i32;
    fn getri(n: usize, a: &mut [Self], lda: usize, ipiv: &[i32], work: &mut [Self]) -> i32;
    #[allow(clippy::too_many_arguments)]
    fn getrs(
        trans: Transpose,
        n: usize,
        nrhs: usize,
        a: &[Self],
        lda: usize,
        ipiv: &[i32],
        b: &mut [Self],
        ldb: usize,
    ) -> i32;
}

pub trait Trigonometric: Scalar {
    fn sin(a: &[Self], out: &mut [Self]);
    fn cos(a: &[Self], out: &mut [Self]);
    fn tan(a: &[Self], out: &mut [Self]);
}

pub trait Exponential: Scalar {
    fn exp(a: &[Self], out: &mut [Self]);
}

pub trait Logarithmic: Scalar {
    /// Natural logarithm.
    fn ln(a: &[Self], out: &mut [Self]);
}

pub trait Power: Scalar {
    fn pow(a: &[Self], p: Self, out: &mut [Self]);
}

/// Padding a run of elements with a constant.
pub trait Padding: Scalar {
    /// `before` copies of `value`, then `src`, then `after` copies of `value`.
    fn pad(src: &[Self], before: usize, after: usize, value: Self) -> Vec<Self> {
        let mut out = Vec::with_capacity(before + src.len() + after);
        out.resize(before, value);
        out.extend_from_slice(src);
        out.resize(before + src.len() + after, value);
        out
    }
}

/// Random fill from a caller-supplied generator.
pub trait RandomFill: Scalar {
    /// Floats draw uniformly from `[0, 1)`, integers from their full range.
    fn random_fill<R: Rng + ?Sized>(rng: &mut R, out: &mut [Self]);
}

/// Uniform access to the shape and storage of a dense container.
pub trait Indexing {
    type Elem: Scalar;

    /// Extent of every dimension, outermost first.
    fn dims(&self) -> Vec<usize>;

    fn buffer(&self) -> &Buffer<Self::Elem>;

    /// Total number of elements.
    fn count(&self) -> usize {
        self.buffer().count()
    }
}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    fn matvec(&self, x: &V, y: &mut V);
}
