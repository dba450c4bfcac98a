//! Order grouping: normalized rows → per-order baskets of dense ids.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::normalize::NormalizedData;
use crate::table::Value;

/// Per-order baskets: each order's dense product ids, sorted ascending,
/// duplicates preserved (a product bought twice appears twice).
///
/// Iteration order is the first-appearance order of each order in the
/// input, so downstream results are deterministic for a given input.
#[derive(Debug, Clone)]
pub struct OrderBaskets {
    baskets: IndexMap<Value, Vec<usize>>,
    matrix_order: usize,
}

impl OrderBaskets {
    /// Number of distinct orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.baskets.len()
    }

    /// Returns `true` when no orders were grouped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baskets.is_empty()
    }

    /// The matrix order `P`: highest dense id across all baskets.
    #[must_use]
    pub fn matrix_order(&self) -> usize {
        self.matrix_order
    }

    /// Basket for one order, if present.
    #[must_use]
    pub fn get(&self, order_id: &Value) -> Option<&[usize]> {
        self.baskets.get(order_id).map(Vec::as_slice)
    }

    /// Baskets in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &[usize])> {
        self.baskets.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

/// Groups normalized rows by order and sorts each basket.
///
/// Recomputes the matrix order from the baskets; with at least one
/// surviving row it equals `max_product_id` from normalization.
///
/// # Errors
///
/// [`Error::EmptyDataset`] when no rows survived cleaning: the matrix
/// order would be undefined.
pub fn group_orders(data: &NormalizedData) -> Result<OrderBaskets> {
    if data.lines.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut baskets: IndexMap<Value, Vec<usize>> = IndexMap::new();
    for line in &data.lines {
        baskets
            .entry(line.order_id.clone())
            .or_default()
            .push(line.dense_id);
    }

    let mut matrix_order = 0;
    for basket in baskets.values_mut() {
        basket.sort_unstable();
        if let Some(&max) = basket.last() {
            matrix_order = matrix_order.max(max);
        }
    }
    debug_assert_eq!(matrix_order, data.max_product_id);
    debug!(orders = baskets.len(), matrix_order, "grouped orders");

    Ok(OrderBaskets {
        baskets,
        matrix_order,
    })
}
