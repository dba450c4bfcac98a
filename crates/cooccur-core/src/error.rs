//! Error types for cooccur-core.

use thiserror::Error;

/// Analysis error types.
///
/// Every failure of a pipeline run maps to exactly one variant; numeric
/// edge cases (zero totals, short partner lists) are handled by policy in
/// the extractor and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more required input columns are absent.
    #[error("missing required column(s): {}", missing.join(", "))]
    Schema {
        /// Names of every missing column, in required-column order.
        missing: Vec<String>,
    },

    /// A row pushed into a table does not match the table's column count.
    #[error("row has {found} cell(s), table has {expected} column(s)")]
    RowShape {
        /// Number of columns declared on the table.
        expected: usize,
        /// Number of cells in the offending row.
        found: usize,
    },

    /// No valid rows remain after cleaning.
    #[error("no valid rows remain after cleaning")]
    EmptyDataset,

    /// No distinct valid products survived normalization.
    #[error("no distinct valid products after normalization")]
    EmptyMatrix,

    /// The distinct product count exceeds the configured matrix ceiling.
    #[error("{products} distinct products exceed the configured limit of {limit} (the dense co-occurrence matrix needs O(P^2) memory); raise `max_products` to proceed")]
    MatrixTooLarge {
        /// Distinct valid products in the input.
        products: usize,
        /// Configured `max_products` ceiling.
        limit: usize,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
