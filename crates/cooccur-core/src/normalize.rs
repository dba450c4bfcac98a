//! Input normalization: row cleaning, product interning, dense-id join.
//!
//! This is the first pipeline stage. It validates the input schema,
//! drops unusable rows, and replaces opaque product identifiers with the
//! dense ids the co-occurrence matrix is indexed by.

use std::collections::HashMap;

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::table::{RecordTable, Value};

/// One entry of the [`ProductIndex`]: a distinct (product, title) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEntry {
    /// The opaque product identifier from the input.
    pub product_id: Value,
    /// The display title the pair was first seen with.
    pub title: String,
}

/// Bijection between distinct valid `(product_id, product_title)` pairs
/// and dense ids `1..=P`, assigned in first-occurrence order.
///
/// A product identifier appearing under several distinct titles gets one
/// dense id per distinct pair. Rows join back through
/// [`first_for_product`](Self::first_for_product), which always resolves
/// to the *first* entry for that identifier, the deterministic reading
/// of an otherwise order-dependent join.
#[derive(Debug, Clone, Default)]
pub struct ProductIndex {
    entries: Vec<ProductEntry>,
    pair_ids: HashMap<(Value, String), usize>,
    first_by_product: HashMap<Value, usize>,
}

impl ProductIndex {
    /// Number of distinct (product, title) pairs, i.e. `P`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no products were interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry for a dense id (`1..=P`).
    #[must_use]
    pub fn entry(&self, dense_id: usize) -> Option<&ProductEntry> {
        dense_id.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Title for a dense id, or `None` when the id is out of range.
    #[must_use]
    pub fn title(&self, dense_id: usize) -> Option<&str> {
        self.entry(dense_id).map(|e| e.title.as_str())
    }

    /// Dense id of the first entry interned for this product identifier.
    #[must_use]
    pub fn first_for_product(&self, product_id: &Value) -> Option<usize> {
        self.first_by_product.get(product_id).copied()
    }

    /// Entries in dense-id order (`1..=P`).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ProductEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (i + 1, e))
    }

    /// Interns a (product, title) pair and returns the dense id the row
    /// joins to: the first id recorded for this product identifier.
    fn intern(&mut self, product_id: Value, title: String) -> usize {
        let pair = (product_id.clone(), title.clone());
        if !self.pair_ids.contains_key(&pair) {
            self.entries.push(ProductEntry {
                product_id: product_id.clone(),
                title,
            });
            let dense = self.entries.len();
            self.pair_ids.insert(pair, dense);
            self.first_by_product.entry(product_id.clone()).or_insert(dense);
        }
        // The entry above guarantees the product is present.
        self.first_by_product[&product_id]
    }
}

/// One surviving input row with its product resolved to a dense id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    /// Opaque order identifier, used as the grouping key.
    pub order_id: Value,
    /// Dense product id (`1..=P`).
    pub dense_id: usize,
}

/// Output of the normalizer: cleaned rows, the product index, and `P`.
#[derive(Debug, Clone)]
pub struct NormalizedData {
    /// Surviving rows in input order.
    pub lines: Vec<NormalizedLine>,
    /// The product index built from the surviving rows.
    pub index: ProductIndex,
    /// Highest dense id assigned (`P`).
    pub max_product_id: usize,
}

/// Validates the schema and cleans the input table.
///
/// Row drops, in order of application:
/// 1. any cell of the row is null/missing, including cells of columns
///    the analysis does not use (whole-row drop, no imputation);
/// 2. the product identifier is the *numeric* value zero. The string
///    `"0"` passes, a long-standing quirk of the upstream exports this
///    pipeline consumes, kept on purpose.
///
/// The remaining rows intern their `(product_id, product_title)` pair
/// into the [`ProductIndex`] and join to a dense id.
///
/// # Errors
///
/// [`Error::Schema`](crate::Error::Schema) when required columns are
/// missing, with every missing name listed.
pub fn normalize(table: &RecordTable, config: &AnalysisConfig) -> Result<NormalizedData> {
    let columns = &config.columns;
    let indices = table.require_columns(&[
        columns.order_column(),
        columns.product_column(),
        columns.title_column(),
    ])?;
    let (order_idx, product_idx, title_idx) = (indices[0], indices[1], indices[2]);

    let mut index = ProductIndex::default();
    let mut lines = Vec::with_capacity(table.len());
    let mut dropped_null = 0usize;
    let mut dropped_zero = 0usize;

    for row in table.rows() {
        if row.iter().any(Value::is_null) {
            dropped_null += 1;
            continue;
        }
        let order_id = &row[order_idx];
        let product_id = &row[product_idx];
        let title = &row[title_idx];

        if product_id.is_numeric_zero() {
            dropped_zero += 1;
            continue;
        }

        let dense_id = index.intern(product_id.clone(), title.to_string());
        lines.push(NormalizedLine {
            order_id: order_id.clone(),
            dense_id,
        });
    }

    let max_product_id = index.len();
    debug!(
        rows_in = table.len(),
        rows_kept = lines.len(),
        dropped_null,
        dropped_zero,
        products = max_product_id,
        "normalized input table"
    );

    Ok(NormalizedData {
        lines,
        index,
        max_product_id,
    })
}
