use crate::core::traits::Scalar;
use crate::matrix::Matrix;
use std::fmt;
use thiserror::Error;

/// Kernel step that reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuStage {
    /// `getrf`: the LU factorization itself.
    Factorization,
    /// `getri`: inverting from the factors.
    Inversion,
    /// `getrs`: solving from the factors.
    Solve,
}

impl fmt::Display for LuStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LuStage::Factorization => "LU factorization",
            LuStage::Inversion => "LU inversion",
            LuStage::Solve => "LU solve",
        };
        f.write_str(name)
    }
}

/// Recoverable failure reported by a factorization kernel.
///
/// Every variant carries the matrix as it stood when the kernel stopped
/// (`partial`), so callers can inspect the factors that led to the failure.
/// Indexes are zero-based.
#[derive(Error, Debug, Clone)]
pub enum NumericFailure<T: Scalar> {
    #[error("{stage}: argument {index} (zero-based) had an illegal value")]
    InvalidArgument {
        index: usize,
        stage: LuStage,
        partial: Matrix<T>,
    },
    #[error("{stage}: {message}")]
    Singular {
        diagonal_index: usize,
        message: String,
        stage: LuStage,
        partial: Matrix<T>,
    },
}

impl<T: Scalar> NumericFailure<T> {
    /// Maps a LAPACK `INFO` code to a failure. `info == 0` hands the matrix
    /// back unchanged.
    pub(crate) fn check_info(info: i32, stage: LuStage, partial: Matrix<T>) -> Result<Matrix<T>, Self> {
        match info {
            0 => Ok(partial),
            i if i < 0 => Err(NumericFailure::InvalidArgument {
                index: i.unsigned_abs() as usize - 1,
                stage,
                partial,
            }),
            i => {
                let d = (i - 1) as usize;
                Err(NumericFailure::Singular {
                    diagonal_index: d,
                    message: format!(
                        "U[{d}, {d}] is exactly zero; the factorization has been completed, \
                         but U is exactly singular, and division by zero will occur if it is \
                         used to solve a system of equations"
                    ),
                    stage,
                    partial,
                })
            }
        }
    }

    /// Zero-based argument position or diagonal position.
    pub fn index(&self) -> usize {
        match self {
            NumericFailure::InvalidArgument { index, .. } => *index,
            NumericFailure::Singular { diagonal_index, .. } => *diagonal_index,
        }
    }

    pub fn stage(&self) -> LuStage {
        match self {
            NumericFailure::InvalidArgument { stage, .. } | NumericFailure::Singular { stage, .. } => *stage,
        }
    }

    pub fn partial(&self) -> &Matrix<T> {
        match self {
            NumericFailure::InvalidArgument { partial, .. } | NumericFailure::Singular { partial, .. } => partial,
        }
    }

    pub fn into_partial(self) -> Matrix<T> {
        match self {
            NumericFailure::InvalidArgument { partial, .. } | NumericFailure::Singular { partial, .. } => partial,
        }
    }

    pub fn is_singular(&self) -> bool {
        matches!(self, NumericFailure::Singular { .. })
    }
}
