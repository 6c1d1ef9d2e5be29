//! LAPACK-style LU factorization, inversion and solve.
//!
//! The routines follow the reference `?getrf` / `?getri` / `?getrs` contracts,
//! including LAPACK's column-major storage: element `(i, j)` of an `m × n`
//! operand lives at `a[i + j * lda]`. A row-major buffer handed to these
//! kernels is therefore seen as its transpose. The factors of `Aᵀ` carry the
//! same determinant as `A`, [`single::getri`] leaves `A⁻¹` in row-major order,
//! and [`Transpose::Yes`] makes `getrs` solve with `A` itself.
//!
//! - pivots are 1-based: row `i` was interchanged with row `ipiv[i] - 1`;
//! - the return value is LAPACK's `INFO`: `0` on success, `-k` when argument
//!   `k` (1-based, in signature order) is invalid, and `k > 0` when `U[k-1, k-1]`
//!   is exactly zero;
//! - `getrf` keeps factoring after a zero pivot and reports the first one, so
//!   the returned factors are complete even for singular input.
//!
//! # References
//! - Anderson et al., *LAPACK Users' Guide*, 3rd ed.
//! - Golub & Van Loan, *Matrix Computations*, §3.4

/// Which system `getrs` solves with the factors of `M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// `M X = B`
    No,
    /// `Mᵀ X = B`
    Yes,
}

/// Minimum slice length holding `rows × cols` column-major elements with
/// column stride `ld`.
#[inline]
fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 { 0 } else { (cols - 1) * ld + rows }
}

macro_rules! lapack_kernels {
    ($name:ident, $t:ty) => {
        pub mod $name {
            use super::{Transpose, required_len};

            /// LU factorization with partial pivoting, `P M = L U`.
            ///
            /// On exit `a` holds `L` (strictly below the diagonal, unit diagonal
            /// implied) and `U` (on and above the diagonal). `ipiv` receives
            /// `min(m, n)` 1-based pivot rows.
            pub fn getrf(m: usize, n: usize, a: &mut [$t], lda: usize, ipiv: &mut [i32]) -> i32 {
                if a.len() < required_len(m, n, lda.max(m)) {
                    return -3;
                }
                if lda < m.max(1) {
                    return -4;
                }
                let steps = m.min(n);
                if ipiv.len() < steps {
                    return -5;
                }

                let mut info = 0;
                for j in 0..steps {
                    let col = j * lda;
                    // First row holding the largest |a[i, j]| for i >= j.
                    let mut p = j;
                    let mut max = a[col + j].abs();
                    for i in (j + 1)..m {
                        let v = a[col + i].abs();
                        if v > max {
                            max = v;
                            p = i;
                        }
                    }
                    ipiv[j] = (p + 1) as i32;

                    if a[col + p] != 0.0 {
                        if p != j {
                            for k in 0..n {
                                a.swap(j + k * lda, p + k * lda);
                            }
                        }
                        let pivot = a[col + j];
                        if pivot.abs() >= <$t>::MIN_POSITIVE {
                            let r = 1.0 / pivot;
                            for i in (j + 1)..m {
                                a[col + i] *= r;
                            }
                        } else {
                            for i in (j + 1)..m {
                                a[col + i] /= pivot;
                            }
                        }
                    } else if info == 0 {
                        info = (j + 1) as i32;
                    }

                    // Rank-1 update of the trailing submatrix, column by column.
                    for k in (j + 1)..n {
                        let u = a[j + k * lda];
                        if u == 0.0 {
                            continue;
                        }
                        for i in (j + 1)..m {
                            a[i + k * lda] -= a[col + i] * u;
                        }
                    }
                }
                info
            }

            /// Inverse of a matrix from its [`getrf`] factorization.
            ///
            /// `work` is scratch space of at least `max(1, n)` elements. On
            /// success `a` holds `M⁻¹`. A zero diagonal entry in `U` leaves `a`
            /// untouched and returns its 1-based position.
            pub fn getri(n: usize, a: &mut [$t], lda: usize, ipiv: &[i32], work: &mut [$t]) -> i32 {
                if a.len() < required_len(n, n, lda.max(n)) {
                    return -2;
                }
                if lda < n.max(1) {
                    return -3;
                }
                if ipiv.len() < n {
                    return -4;
                }
                if work.len() < n.max(1) {
                    return -5;
                }
                if n == 0 {
                    return 0;
                }
                for i in 0..n {
                    if a[i + i * lda] == 0.0 {
                        return (i + 1) as i32;
                    }
                }

                // inv(U), column by column, in place (upper, non-unit).
                for j in 0..n {
                    let col = j * lda;
                    a[col + j] = 1.0 / a[col + j];
                    let ajj = -a[col + j];
                    // a[0..j, j] = inv(U)[0..j, 0..j] * U[0..j, j]
                    for jj in 0..j {
                        let temp = a[col + jj];
                        if temp != 0.0 {
                            for ii in 0..jj {
                                a[col + ii] += temp * a[ii + jj * lda];
                            }
                            a[col + jj] *= a[jj + jj * lda];
                        }
                    }
                    for i in 0..j {
                        a[col + i] *= ajj;
                    }
                }

                // Solve inv(M) * L = inv(U) for inv(M), right to left.
                for j in (0..n).rev() {
                    let col = j * lda;
                    for i in (j + 1)..n {
                        work[i] = a[col + i];
                        a[col + i] = 0.0;
                    }
                    for c in (j + 1)..n {
                        let temp = -work[c];
                        for r in 0..n {
                            a[col + r] += temp * a[r + c * lda];
                        }
                    }
                }

                // Undo the row interchanges as column interchanges.
                for j in (0..n.saturating_sub(1)).rev() {
                    let jp = (ipiv[j] - 1) as usize;
                    if jp != j {
                        for r in 0..n {
                            a.swap(r + j * lda, r + jp * lda);
                        }
                    }
                }
                0
            }

            /// Solves `M X = B` or `Mᵀ X = B` from the [`getrf`] factorization
            /// of `M`.
            ///
            /// `b` is `n × nrhs` column-major with column stride `ldb` and is
            /// overwritten by `X`.
            #[allow(clippy::too_many_arguments)]
            pub fn getrs(
                trans: Transpose,
                n: usize,
                nrhs: usize,
                a: &[$t],
                lda: usize,
                ipiv: &[i32],
                b: &mut [$t],
                ldb: usize,
            ) -> i32 {
                if a.len() < required_len(n, n, lda.max(n)) {
                    return -4;
                }
                if lda < n.max(1) {
                    return -5;
                }
                if ipiv.len() < n {
                    return -6;
                }
                if b.len() < required_len(n, nrhs, ldb.max(n)) {
                    return -7;
                }
                if ldb < n.max(1) {
                    return -8;
                }
                if n == 0 || nrhs == 0 {
                    return 0;
                }

                for k in 0..nrhs {
                    let x = &mut b[k * ldb..k * ldb + n];
                    match trans {
                        Transpose::No => {
                            // P B, then L Y = P B (unit lower), then U X = Y.
                            for i in 0..n {
                                let p = (ipiv[i] - 1) as usize;
                                x.swap(i, p);
                            }
                            for j in 0..n {
                                let xj = x[j];
                                if xj != 0.0 {
                                    for i in (j + 1)..n {
                                        x[i] -= xj * a[i + j * lda];
                                    }
                                }
                            }
                            for j in (0..n).rev() {
                                if x[j] != 0.0 {
                                    x[j] /= a[j + j * lda];
                                    let xj = x[j];
                                    for i in 0..j {
                                        x[i] -= xj * a[i + j * lda];
                                    }
                                }
                            }
                        }
                        Transpose::Yes => {
                            // Uᵀ Y = B, then Lᵀ Z = Y, then X = Pᵀ Z.
                            for i in 0..n {
                                let mut temp = x[i];
                                for l in 0..i {
                                    temp -= a[l + i * lda] * x[l];
                                }
                                x[i] = temp / a[i + i * lda];
                            }
                            for i in (0..n).rev() {
                                let mut temp = x[i];
                                for l in (i + 1)..n {
                                    temp -= a[l + i * lda] * x[l];
                                }
                                x[i] = temp;
                            }
                            for i in (0..n).rev() {
                                let p = (ipiv[i] - 1) as usize;
                                x.swap(i, p);
                            }
                        }
                    }
                }
                0
            }
        }
    };
}

lapack_kernels!(single, f32);
lapack_kernels!(double, f64);
