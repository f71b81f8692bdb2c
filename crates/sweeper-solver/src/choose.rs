//! Binomial coefficients for set-comparison counting.

/// Largest `n` the table covers. A tile has at most eight neighbors, so no
/// set compared by the solver is larger.
pub const CHOOSE_LIMIT: usize = 8;

/// A precomputed table of binomial coefficients `C(n, k)` for
/// `0 <= k <= n <= CHOOSE_LIMIT`.
///
/// # Examples
///
/// ```
/// use sweeper_solver::ChooseTable;
///
/// let table = ChooseTable::new();
/// assert_eq!(table.get(8, 4), 70);
/// assert_eq!(table.get(3, 5), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChooseTable {
    table: [[i64; CHOOSE_LIMIT + 1]; CHOOSE_LIMIT + 1],
}

impl ChooseTable {
    /// Builds the table from Pascal's rule.
    #[must_use]
    pub const fn new() -> Self {
        let mut table = [[0; CHOOSE_LIMIT + 1]; CHOOSE_LIMIT + 1];
        let mut n = 0;
        while n <= CHOOSE_LIMIT {
            table[n][0] = 1;
            let mut k = 1;
            while k <= n {
                table[n][k] = table[n - 1][k - 1] + table[n - 1][k];
                k += 1;
            }
            n += 1;
        }
        Self { table }
    }

    /// Returns `C(n, k)`, or `0` if `k > n` or `n` exceeds the table.
    #[must_use]
    #[inline]
    pub const fn get(&self, n: usize, k: usize) -> i64 {
        if n > CHOOSE_LIMIT || k > n {
            0
        } else {
            self.table[n][k]
        }
    }
}

impl Default for ChooseTable {
    fn default() -> Self {
        Self::new()
    }
}
