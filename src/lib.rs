//! numkit: dense numeric containers over BLAS/LAPACK-style kernels
//!
//! This crate provides vectors, matrices and N-dimensional arrays backed by
//! copy-on-write storage, with operations gated by the element type's
//! capabilities: floats get the full set (elementwise math, reductions,
//! matrix products, LU-based determinant/inverse/solve), integers get
//! wrapping arithmetic, reductions and products but no factorizations.
//!
//! ```
//! use numkit::{Matrix, Vector};
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]);
//! assert_eq!(a.determinant(), -2.0);
//! let x = a.solve(&Vector::from_vec(vec![5.0, 11.0]));
//! assert!(x.is_approximately_equal(&Vector::from_vec(vec![1.0, 2.0])));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::matrix::*;
pub use crate::solver::*;
pub use crate::utils::*;
