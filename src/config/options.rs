//! Tolerances for approximate comparisons.
//!
//! `ApproxOptions` carries the absolute and relative tolerances used by
//! [`crate::utils::tolerance::is_approximately_equal`]. Two containers `x` and
//! `y` compare equal when
//!
//! ```text
//! ‖x − y‖ ≤ max(atol, rtol · max(‖x‖, ‖y‖))
//! ```

use crate::core::traits::Reduction;
use num_traits::Float;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxOptions<R> {
    /// Absolute tolerance.
    atol: R,
    /// Relative tolerance, scaled by the larger norm.
    rtol: R,
}

impl<R: Float> ApproxOptions<R> {
    pub fn new(atol: R, rtol: R) -> Self {
        ApproxOptions { atol, rtol }
    }

    /// `atol = 0` and the element type's default `rtol`
    /// (`1e-6` for f32, `1e-8` for f64 and integers).
    pub fn for_scalar<T: Reduction<Norm = R>>() -> Self {
        ApproxOptions {
            atol: R::zero(),
            rtol: T::default_rtol(),
        }
    }

    pub fn atol(&self) -> R { self.atol }
    pub fn set_atol(&mut self, atol: R) { self.atol = atol; }
    pub fn rtol(&self) -> R { self.rtol }
    pub fn set_rtol(&mut self, rtol: R) { self.rtol = rtol; }

    pub fn with_atol(mut self, atol: R) -> Self {
        self.atol = atol;
        self
    }

    pub fn with_rtol(mut self, rtol: R) -> Self {
        self.rtol = rtol;
        self
    }

    /// Largest admissible distance for operands with norms `nx` and `ny`.
    pub fn threshold(&self, nx: R, ny: R) -> R {
        self.atol.max(self.rtol * nx.max(ny))
    }
}

impl<R: fmt::Display> fmt::Display for ApproxOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApproxOptions(atol={}, rtol={})", self.atol, self.rtol)
    }
}
