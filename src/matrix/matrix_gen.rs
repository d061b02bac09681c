use itertools::Itertools;
use num_traits::{One, Zero};

use crate::error::MatrixError;
use crate::matrix::gauss_jordan::GaussJordan;
use crate::matrix::inverse_config::InverseConfig;
use crate::matrix::matrix::Matrix;
use std::fmt;
use std::ops;
use std::ops::{Add, Div, Mul, Sub};

pub trait GenElement:  // Avoid repeating all the traits
    Clone
    + Zero
    + One
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + std::iter::Sum<Self>
    + std::fmt::Display
    + std::cmp::Ord
    + std::fmt::Debug
{
}

impl<T> GenElement for T where
    T: Clone
        + Zero
        + One
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + std::iter::Sum<T>
        + std::fmt::Display
        + std::cmp::Ord
        + std::fmt::Debug
{
}

/// Elements with an exact division, `a / b * b == a` for every nonzero `b`.
///
/// Only these can be inverted: with a truncating division (`i64`, `BigInt`)
/// Gauss-Jordan would return a matrix that is not the inverse.
///
/// ```
/// use rational_matrix::{Fraction, Matrix, MatrixGen};
///
/// let m = MatrixGen::<Fraction>::from_list(vec![
///     vec![Fraction::from(2), Fraction::from(1)],
///     vec![Fraction::from(1), Fraction::from(1)],
/// ])
/// .unwrap();
/// assert!(m.inverse().is_ok());
/// ```
///
/// ```compile_fail
/// use rational_matrix::{Matrix, MatrixGen};
///
/// let m = MatrixGen::<i64>::from_list(vec![vec![2, 1], vec![1, 1]]).unwrap();
/// let _ = m.inverse();
/// ```
pub trait FieldElement: GenElement {}

/// Dense row-major matrix over `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixGen<T> {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<T>,
}

impl<T: GenElement> Matrix<T> for MatrixGen<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);

        if let Some((row, line)) = lines.iter().enumerate().find(|(_, l)| l.len() != cols) {
            return Err(MatrixError::RaggedRows {
                row,
                expected: cols,
                got: line.len(),
            });
        }

        Ok(MatrixGen {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    fn identity(n: usize) -> MatrixGen<T> {
        MatrixGen {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn transpose(&self) -> MatrixGen<T> {
        MatrixGen {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        self.cells[row * self.cols + col].clone()
    }
}

impl<T: FieldElement> MatrixGen<T> {
    /// Exact inverse by Gauss-Jordan elimination, without row swapping.
    pub fn inverse(&self) -> Result<MatrixGen<T>, MatrixError> {
        self.inverse_with(&InverseConfig::default())
    }

    pub fn inverse_with(&self, config: &InverseConfig) -> Result<MatrixGen<T>, MatrixError> {
        GaussJordan::invert(self, config)
    }
}

impl<T> MatrixGen<T> {
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl<T: GenElement> ops::Add<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>, MatrixError>;

    fn add(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>, MatrixError> {
        if self.shape() != rhs.shape() {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        Ok(MatrixGen {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.to_owned() + b.to_owned())
                .collect(),
        })
    }
}

impl<T: GenElement> ops::Mul<&MatrixGen<T>> for &MatrixGen<T> {
    type Output = Result<MatrixGen<T>, MatrixError>;

    fn mul(self, rhs: &MatrixGen<T>) -> Result<MatrixGen<T>, MatrixError> {
        if self.cols != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                lhs: self.shape(),
                rhs: rhs.shape(),
            });
        }

        Ok(MatrixGen {
            rows: self.rows,
            cols: rhs.cols,
            cells: (0..self.rows)
                .flat_map(|i| {
                    (0..rhs.cols)
                        .map(move |j| (0..self.cols).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                })
                .collect(),
        })
    }
}

impl<T: GenElement> fmt::Display for MatrixGen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = (0..self.rows)
            .map(|r| format!("[{}]", self.row(r).iter().join(", ")))
            .join("\n");
        write!(f, "{}", lines)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
