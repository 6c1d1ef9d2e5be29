//! Direct solver interfaces.

/// Common interface for linear solvers.
pub trait LinearSolver<M, V> {
    type Error;
    /// Solve A·x = b, writing result into `x`.
    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<(), Self::Error>;
}

pub mod direct_lu;
pub use direct_lu::{LuSolver, determinant, inverse, solve};
