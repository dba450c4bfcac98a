//! Co-occurrence accumulation into a dense symmetric matrix.
//!
//! Memory is the dominant cost of the whole pipeline: the matrix is
//! `(P+1) x (P+1)` cells of `u64`, i.e. O(P^2). That is fine for the
//! catalog sizes this tool targets and is guarded by
//! [`AnalysisConfig::max_products`](crate::AnalysisConfig); larger
//! catalogs need a sparse pair-keyed redesign instead of a bigger limit.

use tracing::debug;

use crate::basket::OrderBaskets;
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};

/// Symmetric `(P+1) x (P+1)` co-occurrence count matrix.
///
/// Indices are dense product ids; row and column `0` are unused and stay
/// zero. Cell `[i][j]` counts, across all orders, the unordered pairs
/// `(i, j)` formed from each basket's multiset; the diagonal `[i][i]`
/// holds the self-pair count used as product `i`'s popularity metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoMatrix {
    order: usize,
    cells: Vec<u64>,
}

impl CoMatrix {
    /// Zero-initialized matrix of the given order.
    #[must_use]
    pub fn zeroed(order: usize) -> Self {
        Self {
            order,
            cells: vec![0; (order + 1) * (order + 1)],
        }
    }

    /// The matrix order `P` (valid ids run `1..=P`).
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Count at `[i][j]`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.cells[i * (self.order + 1) + j]
    }

    /// Row `i` as a slice of `(P+1)` counts (index 0 unused).
    #[must_use]
    pub fn row(&self, i: usize) -> &[u64] {
        let width = self.order + 1;
        &self.cells[i * width..(i + 1) * width]
    }

    /// The diagonal: self-pair count per dense id (index 0 unused).
    #[must_use]
    pub fn diagonal(&self) -> Vec<u64> {
        (0..=self.order).map(|i| self.get(i, i)).collect()
    }

    fn bump(&mut self, i: usize, j: usize) {
        self.cells[i * (self.order + 1) + j] += 1;
    }
}

/// Accumulates every basket's unordered pairs-with-repetition into the
/// matrix.
///
/// For each sorted basket, every index pair `a <= b` contributes one
/// count to `[basket[a]][basket[b]]`, mirrored to keep the matrix
/// symmetric. A product appearing `k` times in a basket therefore adds
/// `k*(k+1)/2` to its diagonal cell and `k*m` to each cross cell with a
/// product appearing `m` times. Counts are `u64` by contract so large
/// datasets cannot overflow.
///
/// The result is invariant to the processing order of orders and of rows
/// within an order; it is a pure summation.
///
/// # Errors
///
/// [`Error::MatrixTooLarge`] when the distinct product count exceeds
/// `config.max_products`.
pub fn accumulate(baskets: &OrderBaskets, config: &AnalysisConfig) -> Result<CoMatrix> {
    let products = baskets.matrix_order();
    if products > config.max_products {
        return Err(Error::MatrixTooLarge {
            products,
            limit: config.max_products,
        });
    }

    let mut matrix = CoMatrix::zeroed(products);
    let mut pairs = 0u64;
    for (_, basket) in baskets.iter() {
        for a in 0..basket.len() {
            for b in a..basket.len() {
                let (i, j) = (basket[a], basket[b]);
                matrix.bump(i, j);
                if i != j {
                    matrix.bump(j, i);
                }
                pairs += 1;
            }
        }
    }
    debug!(products, pairs, "accumulated co-occurrence matrix");

    Ok(matrix)
}
