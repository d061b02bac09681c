/// Row interchange strategy of the Gauss-Jordan inversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pivoting {
    /// Use the diagonal entry as pivot, a zero there makes the matrix
    /// singular even if a later row could have been swapped in
    /// (e.g. `[[0, 1], [1, 0]]`).
    #[default]
    Disabled,
    /// When the diagonal entry is zero, swap with the first row below
    /// having a nonzero entry in that column.
    FirstNonZero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InverseConfig {
    pub pivoting: Pivoting,
}

impl InverseConfig {
    pub fn new() -> Self {
        InverseConfig::default()
    }

    pub fn with_pivoting(mut self, pivoting: Pivoting) -> Self {
        self.pivoting = pivoting;
        self
    }
}
