//! BLAS-style level 1 and level 3 kernels.
//!
//! Level 1 routines operate on contiguous slices (unit stride). `gemm` works
//! on row-major operands with explicit leading dimensions and hands the
//! product itself to faer's dense matmul.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - Lawson et al., *Basic Linear Algebra Subprograms for Fortran Usage*

macro_rules! blas_kernels {
    ($name:ident, $t:ty) => {
        pub mod $name {
            use faer::{Mat, MatRef};

            /// Computes `xᵀ y`.
            pub fn dot(x: &[$t], y: &[$t]) -> $t {
                assert_eq!(x.len(), y.len(), "dot: vectors must have the same length");
                #[cfg(feature = "rayon")]
                {
                    use rayon::prelude::*;
                    x.par_iter()
                        .zip(y.par_iter())
                        .map(|(xi, yi)| *xi * *yi)
                        .reduce(|| 0.0, |acc, v| acc + v)
                }
                #[cfg(not(feature = "rayon"))]
                {
                    x.iter().zip(y.iter()).map(|(xi, yi)| *xi * *yi).fold(0.0, |acc, v| acc + v)
                }
            }

            /// Euclidean norm `‖x‖₂`.
            pub fn nrm2(x: &[$t]) -> $t {
                #[cfg(feature = "rayon")]
                {
                    use rayon::prelude::*;
                    x.par_iter().map(|xi| *xi * *xi).reduce(|| 0.0, |acc, v| acc + v).sqrt()
                }
                #[cfg(not(feature = "rayon"))]
                {
                    x.iter().map(|xi| *xi * *xi).fold(0.0, |acc, v| acc + v).sqrt()
                }
            }

            /// Sum of absolute values `Σ |xᵢ|`.
            pub fn asum(x: &[$t]) -> $t {
                #[cfg(feature = "rayon")]
                {
                    use rayon::prelude::*;
                    x.par_iter().map(|xi| xi.abs()).reduce(|| 0.0, |acc, v| acc + v)
                }
                #[cfg(not(feature = "rayon"))]
                {
                    x.iter().map(|xi| xi.abs()).fold(0.0, |acc, v| acc + v)
                }
            }

            /// `x ← α x`
            pub fn scal(alpha: $t, x: &mut [$t]) {
                for xi in x.iter_mut() {
                    *xi *= alpha;
                }
            }

            /// `y ← y + α x`
            pub fn axpy(alpha: $t, x: &[$t], y: &mut [$t]) {
                assert_eq!(x.len(), y.len(), "axpy: vectors must have the same length");
                for (yi, xi) in y.iter_mut().zip(x.iter()) {
                    *yi += alpha * *xi;
                }
            }

            /// Exchanges the contents of `x` and `y`.
            pub fn swap(x: &mut [$t], y: &mut [$t]) {
                assert_eq!(x.len(), y.len(), "swap: vectors must have the same length");
                x.swap_with_slice(y);
            }

            /// `y ← x`
            pub fn copy(x: &[$t], y: &mut [$t]) {
                assert_eq!(x.len(), y.len(), "copy: vectors must have the same length");
                y.copy_from_slice(x);
            }

            /// Row-major `C ← α A B + β C` with `A: m×k`, `B: k×n`, `C: m×n`.
            ///
            /// When `beta == 0` the previous contents of `C` are not read, so `C`
            /// may hold garbage (including NaN) on entry.
            ///
            /// # Panics
            /// Panics if a leading dimension is smaller than the row width it
            /// describes or a slice is too short for the declared shape.
            #[allow(clippy::too_many_arguments)]
            pub fn gemm(
                m: usize,
                n: usize,
                k: usize,
                alpha: $t,
                a: &[$t],
                lda: usize,
                b: &[$t],
                ldb: usize,
                beta: $t,
                c: &mut [$t],
                ldc: usize,
            ) {
                assert!(lda >= k.max(1), "gemm: lda = {lda} < max(1, k = {k})");
                assert!(ldb >= n.max(1), "gemm: ldb = {ldb} < max(1, n = {n})");
                assert!(ldc >= n.max(1), "gemm: ldc = {ldc} < max(1, n = {n})");
                if m == 0 || n == 0 {
                    return;
                }
                assert!(c.len() >= (m - 1) * ldc + n, "gemm: C is too short for {m}x{n}");

                let product: Mat<$t> = if k == 0 {
                    Mat::zeros(m, n)
                } else {
                    let a = MatRef::from_row_major_slice_with_stride(a, m, k, lda);
                    let b = MatRef::from_row_major_slice_with_stride(b, k, n, ldb);
                    a * b
                };

                for i in 0..m {
                    for j in 0..n {
                        let idx = i * ldc + j;
                        let ab = alpha * product[(i, j)];
                        c[idx] = if beta == 0.0 { ab } else { ab + beta * c[idx] };
                    }
                }
            }
        }
    };
}

blas_kernels!(single, f32);
blas_kernels!(double, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn level1_double() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, -5.0, 6.0];
        assert_abs_diff_eq!(double::dot(&x, &y), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(double::nrm2(&x), 14.0f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(double::asum(&y), 15.0, epsilon = 1e-12);

        let mut z = y;
        double::axpy(2.0, &x, &mut z);
        assert_eq!(z, [6.0, -1.0, 12.0]);
        double::scal(0.5, &mut z);
        assert_eq!(z, [3.0, -0.5, 6.0]);

        let mut p = [1.0, 1.0];
        let mut q = [2.0, 3.0];
        double::swap(&mut p, &mut q);
        assert_eq!((p, q), ([2.0, 3.0], [1.0, 1.0]));
    }

    #[test]
    fn gemm_matches_naive_product() {
        // A: 2x3, B: 3x2
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [7.0f32, 8.0, 9.0, 10.0, 11.0, 12.0];
        let mut c = [f32::NAN; 4];
        single::gemm(2, 2, 3, 1.0, &a, 3, &b, 2, 0.0, &mut c, 2);
        assert_eq!(c, [58.0, 64.0, 139.0, 154.0]);

        // accumulate with beta
        single::gemm(2, 2, 3, 1.0, &a, 3, &b, 2, 1.0, &mut c, 2);
        assert_eq!(c, [116.0, 128.0, 278.0, 308.0]);
    }

    #[test]
    fn gemm_honours_leading_dimensions() {
        // A is 2x2 stored with a padded row stride of 3.
        let a = [1.0f64, 2.0, -1.0, 3.0, 4.0, -1.0];
        let b = [1.0f64, 0.0, 0.0, 1.0];
        let mut c = [0.0f64; 6];
        double::gemm(2, 2, 2, 2.0, &a, 3, &b, 2, 0.0, &mut c, 3);
        assert_eq!(c, [2.0, 4.0, 0.0, 6.0, 8.0, 0.0]);
    }

    #[test]
    fn gemm_with_empty_inner_dimension_zeroes_output() {
        let mut c = [5.0f64; 4];
        double::gemm(2, 2, 0, 1.0, &[], 1, &[], 2, 0.0, &mut c, 2);
        assert_eq!(c, [0.0; 4]);
    }
}
