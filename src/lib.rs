pub mod matrix {
    pub mod gauss_jordan;
    pub mod inverse_config;
    pub mod matrix;
    pub mod matrix_gen;
}
pub mod rings {
    pub mod fraction;
}

pub mod error;
pub mod utils;

pub use error::{FractionError, MatrixError};
pub use matrix::gauss_jordan::{invert, invert_all};
pub use matrix::inverse_config::{InverseConfig, Pivoting};
pub use matrix::matrix::Matrix;
pub use matrix::matrix_gen::{FieldElement, GenElement, MatrixGen};
pub use rings::fraction::Fraction;

#[cfg(feature = "python")]
mod python {
    use crate::matrix::inverse_config::{InverseConfig, Pivoting};
    use crate::matrix::matrix::Matrix;
    use crate::matrix::matrix_gen::MatrixGen;
    use crate::rings::fraction::{Fraction, DEFAULT_TOLERANCE};
    use num_bigint::BigInt;
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    /// Exact inverse of a matrix of `(numerator, denominator)` pairs.
    #[pyfunction]
    #[pyo3(signature = (lines, pivoting = false))]
    fn matrix_inverse(
        lines: Vec<Vec<(BigInt, BigInt)>>,
        pivoting: bool,
    ) -> PyResult<Vec<Vec<(BigInt, BigInt)>>> {
        let lines = lines
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|(num, den)| Fraction::try_new(num, den))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pivoting = if pivoting {
            Pivoting::FirstNonZero
        } else {
            Pivoting::Disabled
        };
        let config = InverseConfig::new().with_pivoting(pivoting);
        let inverse = MatrixGen::from_list(lines)?.inverse_with(&config)?;

        Ok(inverse
            .to_list()
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|f| (f.numer().clone(), f.denom().clone()))
                    .collect()
            })
            .collect())
    }

    #[pyfunction]
    #[pyo3(signature = (x, error = DEFAULT_TOLERANCE))]
    fn dec_to_frac(x: f64, error: f64) -> PyResult<(BigInt, BigInt)> {
        let f = Fraction::from_f64_with_tolerance(x, error)?;
        Ok((f.numer().clone(), f.denom().clone()))
    }

    #[pyfunction]
    fn count_trailing_zeros(n: u64) -> PyResult<u32> {
        crate::utils::count_trailing_zeros(n)
            .ok_or_else(|| PyValueError::new_err("Zero has no trailing zeros count"))
    }

    /// A Python module implemented in Rust.
    #[pymodule]
    fn rational_matrix(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(matrix_inverse, m)?)?;
        m.add_function(wrap_pyfunction!(dec_to_frac, m)?)?;
        m.add_function(wrap_pyfunction!(count_trailing_zeros, m)?)?;
        Ok(())
    }
}
