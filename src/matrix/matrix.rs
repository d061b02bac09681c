use crate::error::MatrixError;

pub trait Matrix<T>
where
    Self: Sized,
{
    /// Build a matrix from its rows. Every row must have the same length.
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self, MatrixError>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn identity(n: usize) -> Self;
    fn is_square(&self) -> bool;
    fn transpose(&self) -> Self;
    fn at(&self, row: usize, col: usize) -> T;
}
