use num_bigint::ParseBigIntError;
use thiserror::Error;

/// Errors raised by matrix construction, arithmetic and inversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The matrix has no rows.
    #[error("Matrix is empty")]
    Empty,

    /// A row does not have the same length as the first one.
    #[error("Row {row} has {got} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Inversion needs a square matrix.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// A pivot was exactly zero when it had to be used as a divisor.
    #[error("Singular matrix: zero pivot on row {pivot}")]
    Singular { pivot: usize },

    /// Operands of `+` or `*` have incompatible shapes, as `(rows, cols)`.
    #[error("Dimensions not compatible: {lhs:?} and {rhs:?}")]
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FractionError {
    #[error("Denominator cannot be zero")]
    ZeroDenominator,

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] ParseBigIntError),

    #[error("Cannot convert non finite value {0} to a fraction")]
    NonFinite(f64),

    #[error("Tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),
}

#[cfg(feature = "python")]
mod python {
    use super::{FractionError, MatrixError};
    use pyo3::exceptions::PyValueError;
    use pyo3::PyErr;

    impl From<MatrixError> for PyErr {
        fn from(error: MatrixError) -> PyErr {
            PyValueError::new_err(error.to_string())
        }
    }

    impl From<FractionError> for PyErr {
        fn from(error: FractionError) -> PyErr {
            PyValueError::new_err(error.to_string())
        }
    }
}
