//! Dense LU with partial pivoting: determinant, inverse and linear solves.
//!
//! Every entry point factors a copy of its input with the `getrf` kernel,
//! so the caller's matrix is never modified. Kernel status codes are mapped
//! to [`NumericFailure`]:
//!
//! - `info < 0`: argument `-info` (1-based) was illegal, reported zero-based;
//! - `info > 0`: `U[info-1, info-1]` is exactly zero.
//!
//! The free functions return `Result`. The same-named methods on
//! [`Matrix`] panic with the failure's message instead, for callers that
//! treat a singular input as a bug.
//!
//! Only element types with the `Factorization` capability get these
//! operations:
//!
//! ```compile_fail
//! use numkit::Matrix;
//! let m = Matrix::<i32>::identity(2);
//! let _ = m.determinant();
//! ```
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §3.4

use crate::core::traits::Factorization;
use crate::error::{LuStage, NumericFailure};
use crate::kernel::lapack::Transpose;
use crate::matrix::{Matrix, Vector};
use crate::solver::LinearSolver;

/// LU factors of a square matrix, with 1-based pivot rows.
///
/// The kernels read the row-major buffer column-major, so `factors` holds
/// `P Aᵀ = L U`. `det(Aᵀ) = det(A)`, inverting in place yields `A⁻¹` in
/// row-major order, and solves go through the transposed system.
#[derive(Debug, Clone)]
struct PivotedFactorization<T> {
    factors: Matrix<T>,
    pivots: Vec<i32>,
}

impl<T: Factorization> PivotedFactorization<T> {
    #[track_caller]
    fn new(matrix: &Matrix<T>) -> Result<Self, NumericFailure<T>> {
        assert!(
            matrix.is_square(),
            "LU factorization requires a square matrix, got {}x{}",
            matrix.rows(),
            matrix.columns()
        );
        let n = matrix.rows();
        let mut factors = matrix.copy();
        let mut pivots = vec![0i32; n];
        let info = T::getrf(n, n, factors.as_mut_slice(), n.max(1), &mut pivots);
        log::trace!("getrf on {n}x{n} matrix returned info {info}");
        let factors = NumericFailure::check_info(info, LuStage::Factorization, factors).inspect_err(log_failure)?;
        Ok(PivotedFactorization { factors, pivots })
    }

    fn order(&self) -> usize {
        self.factors.rows()
    }

    /// `Π U[i,i]`, negated once per row interchange.
    fn determinant(&self) -> T {
        let n = self.order();
        let a = self.factors.as_slice();
        let mut det = T::one();
        for i in 0..n {
            det = det * a[i * n + i];
            if self.pivots[i] != (i + 1) as i32 {
                det = -det;
            }
        }
        det
    }

    fn into_inverse(self) -> Result<Matrix<T>, NumericFailure<T>> {
        let n = self.order();
        let mut inv = self.factors;
        let mut work = vec![T::zero(); n.max(1)];
        let info = T::getri(n, inv.as_mut_slice(), n.max(1), &self.pivots, &mut work);
        log::trace!("getri on {n}x{n} factors returned info {info}");
        NumericFailure::check_info(info, LuStage::Inversion, inv).inspect_err(log_failure)
    }

    /// Solves `A x = b` in place.
    fn solve_in_place(&self, x: &mut Vector<T>) -> Result<(), NumericFailure<T>> {
        let n = self.order();
        assert_eq!(
            x.len(),
            n,
            "LU solve: right-hand side has length {}, system has order {n}",
            x.len()
        );
        let info = T::getrs(
            Transpose::Yes,
            n,
            1,
            self.factors.as_slice(),
            n.max(1),
            &self.pivots,
            x.as_mut_slice(),
            n.max(1),
        );
        NumericFailure::check_info(info, LuStage::Solve, self.factors.clone())
            .map(drop)
            .inspect_err(log_failure)
    }
}

fn log_failure<T: Factorization>(failure: &NumericFailure<T>) {
    log::debug!("{failure}");
}

/// Determinant of a square matrix.
///
/// # Errors
/// `Singular` when the factorization finds an exactly-zero pivot.
///
/// # Panics
/// Panics if `matrix` is not square.
#[track_caller]
pub fn determinant<T: Factorization>(matrix: &Matrix<T>) -> Result<T, NumericFailure<T>> {
    Ok(PivotedFactorization::new(matrix)?.determinant())
}

/// Inverse of a square matrix.
///
/// # Errors
/// `Singular` with stage `Factorization` (or `Inversion`) when `U` has an
/// exactly-zero diagonal entry.
///
/// # Panics
/// Panics if `matrix` is not square.
#[track_caller]
pub fn inverse<T: Factorization>(matrix: &Matrix<T>) -> Result<Matrix<T>, NumericFailure<T>> {
    PivotedFactorization::new(matrix)?.into_inverse()
}

/// Solution `x` of `matrix · x = rhs`.
///
/// # Panics
/// Panics if `matrix` is not square or `rhs` has the wrong length.
#[track_caller]
pub fn solve<T: Factorization>(matrix: &Matrix<T>, rhs: &Vector<T>) -> Result<Vector<T>, NumericFailure<T>> {
    let lu = PivotedFactorization::new(matrix)?;
    let mut x = rhs.copy();
    lu.solve_in_place(&mut x)?;
    Ok(x)
}

impl<T: Factorization> Matrix<T> {
    /// Determinant; see [`determinant`].
    ///
    /// # Panics
    /// Panics with the failure's message if the matrix is singular.
    #[track_caller]
    pub fn determinant(&self) -> T {
        determinant(self).unwrap_or_else(|failure| panic!("{failure}"))
    }

    /// Inverse; see [`inverse`].
    ///
    /// # Panics
    /// Panics with the failure's message if the matrix is singular.
    #[track_caller]
    pub fn inverse(&self) -> Matrix<T> {
        inverse(self).unwrap_or_else(|failure| panic!("{failure}"))
    }

    /// Solution of `self · x = rhs`; see [`solve`].
    ///
    /// # Panics
    /// Panics with the failure's message if the matrix is singular.
    #[track_caller]
    pub fn solve(&self, rhs: &Vector<T>) -> Vector<T> {
        solve(self, rhs).unwrap_or_else(|failure| panic!("{failure}"))
    }
}

/// LU solver that keeps the last factorization for repeated right-hand
/// sides.
#[derive(Debug, Clone)]
pub struct LuSolver<T> {
    factor: Option<PivotedFactorization<T>>,
}

impl<T: Factorization> LuSolver<T> {
    /// Create a new LU solver (no factorization yet).
    pub fn new() -> Self {
        LuSolver { factor: None }
    }

    /// Factors `a`, replacing any cached factorization. On failure the
    /// cache is left empty.
    pub fn factorize(&mut self, a: &Matrix<T>) -> Result<(), NumericFailure<T>> {
        self.factor = None;
        self.factor = Some(PivotedFactorization::new(a)?);
        Ok(())
    }

    pub fn is_factorized(&self) -> bool {
        self.factor.is_some()
    }

    /// Determinant of the cached factorization.
    pub fn determinant(&self) -> Option<T> {
        self.factor.as_ref().map(PivotedFactorization::determinant)
    }

    /// Solve using the cached LU factorization.
    ///
    /// # Panics
    /// Panics if called before any factorization has been performed, or if
    /// `b` does not match the factored order.
    pub fn solve_cached(&self, b: &Vector<T>, x: &mut Vector<T>) -> Result<(), NumericFailure<T>> {
        let Some(factor) = &self.factor else {
            panic!("LuSolver: solve_cached called before factorization");
        };
        assert_eq!(b.len(), x.len(), "LuSolver: b and x must have the same length");
        x.as_mut_slice().copy_from_slice(b.as_slice());
        factor.solve_in_place(x)
    }
}

impl<T: Factorization> Default for LuSolver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Factorization> LinearSolver<Matrix<T>, Vector<T>> for LuSolver<T> {
    type Error = NumericFailure<T>;

    /// Factors `a` (caching the result) and solves `a · x = b`.
    fn solve(&mut self, a: &Matrix<T>, b: &Vector<T>, x: &mut Vector<T>) -> Result<(), NumericFailure<T>> {
        self.factorize(a)?;
        self.solve_cached(b, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn determinant_of_two_by_two_is_exact() {
        let a = Matrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
        assert_eq!(determinant(&a).unwrap(), -2.0);
        assert_eq!(a.determinant(), -2.0);
    }

    #[test]
    fn determinant_single_precision() {
        let a = Matrix::from_rows(&[[1.0f32, 12.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.5]]);
        let det = Vector::from_vec(vec![a.determinant()]);
        assert!(det.is_approximately_equal(&Vector::from_vec(vec![38.500015f32])), "det = {det}");
    }

    #[test]
    fn empty_matrix_has_unit_determinant() {
        let a = Matrix::<f64>::zeros(0, 0);
        assert_eq!(a.determinant(), 1.0);
        assert_eq!(a.inverse().shape(), (0, 0));
    }

    #[test]
    fn inverse_matches_closed_form() {
        let a = Matrix::from_rows(&[[1.0f64, 2.0], [3.0, 4.0]]);
        let expected = Matrix::from_rows(&[[-2.0, 1.0], [1.5, -0.5]]);
        assert_eq!(inverse(&a).unwrap(), expected);

        let a = Matrix::from_rows(&[[1.0f32, 2.0], [3.0, 4.0]]);
        let expected = Matrix::from_rows(&[[-2.0f32, 1.0], [1.5, -0.5]]);
        assert_eq!(inverse(&a).unwrap(), expected);
        assert_eq!(a.inverse(), expected);
    }

    #[test]
    fn singular_input_reports_zero_pivot() {
        let a = Matrix::from_rows(&[[0.0f64, 12.0, 0.0], [4.0, 5.0, 0.0], [7.0, 0.0, 0.0]]);
        let err = determinant(&a).unwrap_err();
        assert!(err.is_singular());
        assert_eq!(err.index(), 2);
        assert_eq!(err.stage(), LuStage::Factorization);
        // partial holds the completed factors, not the input
        assert_eq!(err.partial().get(0, 0), 12.0);
        assert_eq!(inverse(&a).unwrap_err().index(), 2);
        assert_eq!(a.get(0, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "U[1, 1] is exactly zero")]
    fn aborting_determinant_panics_on_singular() {
        Matrix::from_rows(&[[1.0f32, 2.0], [2.0, 4.0]]).determinant();
    }

    #[test]
    #[should_panic(expected = "requires a square matrix")]
    fn rectangular_input_panics() {
        let _ = determinant(&Matrix::<f64>::zeros(2, 3));
    }

    #[test]
    fn solve_recovers_known_solution() {
        let a = Matrix::from_rows(&[[2.0f64, 1.0, 1.0], [1.0, 3.0, 2.0], [1.0, 0.0, 0.0]]);
        let b = Vector::from_vec(vec![4.0, 5.0, 6.0]);
        let x = solve(&a, &b).unwrap();
        let expected = Vector::from_vec(vec![6.0, 15.0, -23.0]);
        assert!(x.is_approximately_equal(&expected), "x = {x}");
    }

    #[test]
    fn lu_solver_reuses_factorization() {
        let a = Matrix::from_rows(&[[4.0f64, 3.0], [6.0, 3.0]]);
        let mut solver = LuSolver::new();
        let mut x = Vector::zeros(2);
        solver.solve(&a, &Vector::from_vec(vec![10.0, 12.0]), &mut x).unwrap();
        assert_relative_eq!(x.get(0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.get(1), 2.0, epsilon = 1e-12);

        solver.solve_cached(&Vector::from_vec(vec![7.0, 9.0]), &mut x).unwrap();
        assert_relative_eq!(x.get(0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.get(1), 1.0, epsilon = 1e-12);
        assert_relative_eq!(solver.determinant().unwrap(), -6.0, epsilon = 1e-12);
    }

    #[test]
    fn failed_factorization_clears_cache() {
        let mut solver = LuSolver::new();
        solver.factorize(&Matrix::<f64>::identity(2)).unwrap();
        assert!(solver.is_factorized());
        assert!(solver.factorize(&Matrix::zeros(2, 2)).is_err());
        assert!(!solver.is_factorized());
    }

    #[test]
    #[should_panic(expected = "before factorization")]
    fn solve_cached_without_factorization_panics() {
        let solver = LuSolver::<f32>::new();
        let mut x = Vector::zeros(1);
        let _ = solver.solve_cached(&Vector::zeros(1), &mut x);
    }
}
