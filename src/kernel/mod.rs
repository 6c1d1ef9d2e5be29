//! Numeric kernels with BLAS/LAPACK-shaped entry points.
//!
//! Each family is split into a `single` (f32) and a `double` (f64) module with
//! identical argument shapes. Containers never call these directly; they go
//! through the scalar capability traits in [`crate::core::traits`], which pick
//! the entry point matching the element type.
//!
//! `gemm` takes row-major operands whose leading dimensions are row strides.
//! The LU kernels in [`lapack`] keep LAPACK's column-major convention, where
//! leading dimensions are column strides.

pub mod blas;
pub mod elementwise;
pub mod lapack;
pub mod transcendental;
