use rayon::prelude::*;

use crate::error::MatrixError;
use crate::matrix::inverse_config::{InverseConfig, Pivoting};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_gen::{FieldElement, MatrixGen};

/// Augmented matrix `[M | I]` reduced in place to `[I | M^-1]`.
///
/// Each row is its own buffer, the pivot row is read while the other rows
/// are written.
pub struct GaussJordan<T> {
    size: usize,
    pivoting: Pivoting,
    rows: Vec<Vec<T>>,
}

impl<T: FieldElement> GaussJordan<T> {
    /// Build `[matrix | I]`. Shape errors are reported here, before any
    /// elimination.
    pub fn augment(matrix: &MatrixGen<T>, pivoting: Pivoting) -> Result<Self, MatrixError> {
        if matrix.rows == 0 {
            return Err(MatrixError::Empty);
        }
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare {
                rows: matrix.rows,
                cols: matrix.cols,
            });
        }

        let size = matrix.rows;
        let rows = (0..size)
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .cloned()
                    .chain((0..size).map(|j| if i == j { T::one() } else { T::zero() }))
                    .collect()
            })
            .collect();

        Ok(GaussJordan {
            size,
            pivoting,
            rows,
        })
    }

    pub fn invert(
        matrix: &MatrixGen<T>,
        config: &InverseConfig,
    ) -> Result<MatrixGen<T>, MatrixError> {
        let mut gauss_jordan = GaussJordan::augment(matrix, config.pivoting)?;
        log::trace!("Augmented matrix: {:?}", gauss_jordan.rows);

        gauss_jordan.eliminate()?;
        gauss_jordan.normalize()?;
        Ok(gauss_jordan.into_inverse())
    }

    /// Clear every off-diagonal entry of the left half, one pivot column at
    /// a time. All rows are cleared for a pivot before moving to the next.
    pub fn eliminate(&mut self) -> Result<(), MatrixError> {
        for r in 0..self.size {
            self.prepare_pivot(r)?;

            for c in 0..self.size {
                if c == r {
                    continue;
                }

                let ratio = self.rows[c][r].clone() / self.rows[r][r].clone();
                if ratio.is_zero() {
                    continue;
                }

                let (target, pivot) = self.row_pair(c, r);
                for (t, p) in target.iter_mut().zip(pivot) {
                    *t = t.clone() - ratio.clone() * p.clone();
                }
            }
        }
        Ok(())
    }

    /// Divide each row by its diagonal entry.
    pub fn normalize(&mut self) -> Result<(), MatrixError> {
        for r in 0..self.size {
            let multiple = self.rows[r][r].clone();
            if multiple.is_zero() {
                log::debug!("Zero pivot on row {} while normalizing", r);
                return Err(MatrixError::Singular { pivot: r });
            }

            for cell in self.rows[r].iter_mut() {
                *cell = cell.clone() / multiple.clone();
            }
        }
        Ok(())
    }

    /// Right half of the augmented matrix.
    pub fn into_inverse(self) -> MatrixGen<T> {
        let size = self.size;
        MatrixGen {
            rows: size,
            cols: size,
            cells: self
                .rows
                .into_iter()
                .flat_map(|row| row.into_iter().skip(size))
                .collect(),
        }
    }

    // Make sure `rows[r][r]` can be used as a divisor.
    fn prepare_pivot(&mut self, r: usize) -> Result<(), MatrixError> {
        if !self.rows[r][r].is_zero() {
            return Ok(());
        }

        if self.pivoting == Pivoting::FirstNonZero {
            if let Some(swap) = (r + 1..self.size).find(|&k| !self.rows[k][r].is_zero()) {
                log::debug!("Swapping rows {} and {} for a nonzero pivot", r, swap);
                self.rows.swap(r, swap);
                return Ok(());
            }
        }

        log::debug!("Zero pivot on row {}, matrix is singular", r);
        Err(MatrixError::Singular { pivot: r })
    }

    // (mutable target row, pivot row), `target != pivot`
    fn row_pair(&mut self, target: usize, pivot: usize) -> (&mut [T], &[T]) {
        if target < pivot {
            let (lo, hi) = self.rows.split_at_mut(pivot);
            (lo[target].as_mut_slice(), hi[0].as_slice())
        } else {
            let (lo, hi) = self.rows.split_at_mut(target);
            (hi[0].as_mut_slice(), lo[pivot].as_slice())
        }
    }
}

/// Exact inverse of a matrix given as a list of rows.
pub fn invert<T: FieldElement>(lines: Vec<Vec<T>>) -> Result<Vec<Vec<T>>, MatrixError> {
    Ok(MatrixGen::from_list(lines)?.inverse()?.to_list())
}

/// Invert independent matrices in parallel, results are in input order.
pub fn invert_all<T>(
    matrices: &[MatrixGen<T>],
    config: &InverseConfig,
) -> Vec<Result<MatrixGen<T>, MatrixError>>
where
    T: FieldElement + Send + Sync,
{
    log::debug!("Inverting {} matrices", matrices.len());
    matrices
        .par_iter()
        .map(|matrix| matrix.inverse_with(config))
        .collect()
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rings::fraction::Fraction;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn frac(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    fn fractions(lines: Vec<Vec<&str>>) -> MatrixGen<Fraction> {
        MatrixGen::from_list(
            lines
                .into_iter()
                .map(|line| line.into_iter().map(frac).collect())
                .collect(),
        )
        .unwrap()
    }

    fn integers(lines: &[Vec<i64>]) -> MatrixGen<Fraction> {
        MatrixGen::from_list(
            lines
                .iter()
                .map(|line| line.iter().map(|&x| Fraction::from(x)).collect())
                .collect(),
        )
        .unwrap()
    }

    // L * U with unit lower triangular L and nonzero diagonal U: invertible
    // and every leading minor is nonzero, so no row swap is ever needed.
    fn random_invertible(rng: &mut StdRng, n: usize) -> MatrixGen<Fraction> {
        let mut lower = MatrixGen::<Fraction>::identity(n);
        let mut upper = MatrixGen::<Fraction>::identity(n);
        for i in 0..n {
            for j in 0..n {
                if j < i {
                    lower.cells[i * n + j] = Fraction::from(rng.gen_range(-9i64..=9));
                } else if j > i {
                    upper.cells[i * n + j] = Fraction::from(rng.gen_range(-9i64..=9));
                } else {
                    let d = rng.gen_range(1i64..=5) * if rng.gen_bool(0.5) { 1 } else { -1 };
                    upper.cells[i * n + j] = Fraction::from(d);
                }
            }
        }
        (&lower * &upper).unwrap()
    }

    #[test]
    fn test_inverse_small() {
        init_logger();

        assert_eq!(
            integers(&[vec![2]]).inverse().unwrap(),
            fractions(vec![vec!["1/2"]])
        );

        let identity = MatrixGen::<Fraction>::identity(2);
        assert_eq!(identity.inverse().unwrap(), identity);

        assert_eq!(
            integers(&[vec![2, 0], vec![0, 2]]).inverse().unwrap(),
            fractions(vec![vec!["1/2", "0"], vec!["0", "1/2"]])
        );

        assert_eq!(
            integers(&[vec![2, 1], vec![1, 1]]).inverse().unwrap(),
            integers(&[vec![1, -1], vec![-1, 2]])
        );
    }

    #[test]
    fn test_inverse_3x3() {
        let m = integers(&[vec![2, -1, 0], vec![-1, 2, -1], vec![0, -1, 2]]);
        let expected = fractions(vec![
            vec!["3/4", "1/2", "1/4"],
            vec!["1/2", "1", "1/2"],
            vec!["1/4", "1/2", "3/4"],
        ]);
        assert_eq!(m.inverse().unwrap(), expected);
        assert_eq!(m.inverse().unwrap().inverse().unwrap(), m);
    }

    #[test]
    fn test_inverse_list() {
        let inverse = invert(vec![
            vec![frac("1/2"), frac("1/3")],
            vec![frac("1/4"), frac("1/5")],
        ])
        .unwrap();
        assert_eq!(
            inverse,
            vec![vec![frac("12"), frac("-20")], vec![frac("-15"), frac("30")]]
        );
    }

    #[test]
    fn test_inverse_identity_product() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for n in 1..=6 {
            for _ in 0..5 {
                let m = random_invertible(&mut rng, n);
                let inverse = m.inverse().unwrap();
                let identity = MatrixGen::<Fraction>::identity(n);

                assert_eq!((&m * &inverse).unwrap(), identity);
                assert_eq!((&inverse * &m).unwrap(), identity);
                assert_eq!(inverse.inverse().unwrap(), m);
            }
        }
    }

    #[test]
    fn test_inverse_row_scaling() {
        let mut rng = StdRng::seed_from_u64(42);
        let k = frac("-7/3");

        for n in 1..=4 {
            let m = random_invertible(&mut rng, n);
            let inverse = m.inverse().unwrap();

            for row in 0..n {
                let mut scaled = m.clone();
                for col in 0..n {
                    scaled.cells[row * n + col] = m.at(row, col) * k.clone();
                }

                let mut expected = inverse.clone();
                for r in 0..n {
                    expected.cells[r * n + row] = inverse.at(r, row) / k.clone();
                }

                assert_eq!(scaled.inverse().unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_inverse_singular() {
        init_logger();

        assert_eq!(
            integers(&[vec![0]]).inverse(),
            Err(MatrixError::Singular { pivot: 0 })
        );
        assert_eq!(
            integers(&[vec![1, 2, 3], vec![0, 0, 0], vec![4, 5, 6]]).inverse(),
            Err(MatrixError::Singular { pivot: 1 })
        );
        assert_eq!(
            integers(&[vec![1, 2, 3], vec![4, 5, 6], vec![4, 5, 6]]).inverse(),
            Err(MatrixError::Singular { pivot: 2 })
        );
        assert_eq!(
            integers(&[vec![1, 2], vec![2, 4]]).inverse(),
            Err(MatrixError::Singular { pivot: 1 })
        );

        // rank deficient even with row swaps
        let pivoting = InverseConfig::new().with_pivoting(Pivoting::FirstNonZero);
        assert_eq!(
            integers(&[vec![1, 2, 3], vec![2, 4, 6], vec![0, 0, 1]]).inverse_with(&pivoting),
            Err(MatrixError::Singular { pivot: 1 })
        );
    }

    #[test]
    fn test_inverse_shape() {
        assert_eq!(
            integers(&[vec![1, 2, 3], vec![4, 5, 6]]).inverse(),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
        assert_eq!(
            MatrixGen::<Fraction>::from_list(vec![]).unwrap().inverse(),
            Err(MatrixError::Empty)
        );
        assert_eq!(
            invert(vec![vec![frac("1"), frac("2")], vec![frac("3")]]),
            Err(MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                got: 1
            })
        );
        // a singular non square matrix is a shape error
        assert_eq!(
            integers(&[vec![0, 0, 0], vec![0, 0, 0]]).inverse(),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_inverse_pivoting() {
        init_logger();
        let swap = integers(&[vec![0, 1], vec![1, 0]]);

        assert_eq!(swap.inverse(), Err(MatrixError::Singular { pivot: 0 }));

        let pivoting = InverseConfig::new().with_pivoting(Pivoting::FirstNonZero);
        assert_eq!(swap.inverse_with(&pivoting).unwrap(), swap);

        let m = integers(&[vec![0, 2, 1], vec![0, 1, 1], vec![3, 0, 1]]);
        assert_eq!(m.inverse(), Err(MatrixError::Singular { pivot: 0 }));
        let inverse = m.inverse_with(&pivoting).unwrap();
        assert_eq!(
            (&m * &inverse).unwrap(),
            MatrixGen::<Fraction>::identity(3)
        );

        // same result as without pivoting when no swap is needed
        let m = integers(&[vec![2, 1], vec![1, 1]]);
        assert_eq!(m.inverse_with(&pivoting), m.inverse());
    }

    #[test]
    fn test_inverse_integer_entries() {
        // integer entries go through `Fraction`, `i64` has no `FieldElement` impl
        let lines = vec![vec![2i64, 1], vec![1, 1]];
        let m = integers(&lines);

        let inverse = invert(m.to_list()).unwrap();
        assert_eq!(
            inverse,
            vec![vec![frac("1"), frac("-1")], vec![frac("-1"), frac("2")]]
        );

        let inverse = MatrixGen::from_list(inverse).unwrap();
        assert_eq!((&m * &inverse).unwrap(), MatrixGen::<Fraction>::identity(2));
        assert_eq!((&inverse * &m).unwrap(), MatrixGen::<Fraction>::identity(2));
    }

    #[test]
    fn test_inverse_does_not_mutate_input() {
        let m = integers(&[vec![3, 1], vec![5, 2]]);
        let copy = m.clone();
        let _ = m.inverse().unwrap();
        assert_eq!(m, copy);
    }

    #[test]
    fn test_invert_all() {
        init_logger();
        let mut rng = StdRng::seed_from_u64(7);

        let mut matrices: Vec<_> = (1..=8)
            .map(|n| random_invertible(&mut rng, n % 4 + 1))
            .collect();
        matrices.push(integers(&[vec![1, 1], vec![1, 1]]));
        matrices.push(integers(&[vec![1, 2, 3]]));

        let results = invert_all(&matrices, &InverseConfig::default());
        assert_eq!(results.len(), matrices.len());
        for (matrix, result) in matrices.iter().zip(results) {
            assert_eq!(result, matrix.inverse());
        }
    }
}
