//! Analysis configuration.
//!
//! Defaults reproduce the original export pipeline exactly: rank every
//! product, ten partners per row, dense matrix capped at 20,000 distinct
//! products. A TOML file and `COOCCUR_*` environment variables can
//! override any of it.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default number of ranked partners per report row.
pub const DEFAULT_PARTNER_LIMIT: usize = 10;

/// Default ceiling on distinct products before matrix allocation refuses.
///
/// The accumulator allocates a dense `(P+1) x (P+1)` matrix of `u64`, so
/// memory grows as O(P^2): 20,000 products is ~3.2 GB. Catalogs beyond
/// the low tens of thousands need a sparse redesign, not a larger limit.
pub const DEFAULT_MAX_PRODUCTS: usize = 20_000;

/// Logical name of the order identifier column.
pub const ORDER_ID_COLUMN: &str = "order_id";
/// Logical name of the product identifier column.
pub const PRODUCT_ID_COLUMN: &str = "product_id";
/// Logical name of the product title column.
pub const PRODUCT_TITLE_COLUMN: &str = "product_title";

/// Maps the three logical input columns onto the caller's column names.
///
/// Useful when the order export spells its headers differently (for
/// example `order_id = "Order Name"`). Unset fields fall back to the
/// logical names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnMapping {
    /// Input column holding the order identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Input column holding the product identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Input column holding the product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_title: Option<String>,
}

impl ColumnMapping {
    /// Resolved name of the order identifier column.
    #[must_use]
    pub fn order_column(&self) -> &str {
        self.order_id.as_deref().unwrap_or(ORDER_ID_COLUMN)
    }

    /// Resolved name of the product identifier column.
    #[must_use]
    pub fn product_column(&self) -> &str {
        self.product_id.as_deref().unwrap_or(PRODUCT_ID_COLUMN)
    }

    /// Resolved name of the product title column.
    #[must_use]
    pub fn title_column(&self) -> &str {
        self.product_title.as_deref().unwrap_or(PRODUCT_TITLE_COLUMN)
    }
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Rank only this many top products. `None` ranks all of them, which
    /// is the historical behavior of the pipeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_products: Option<usize>,
    /// Ranked partners emitted per report row.
    pub partner_limit: usize,
    /// Ceiling on distinct products before the matrix allocation fails
    /// with [`Error::MatrixTooLarge`](crate::Error::MatrixTooLarge).
    pub max_products: usize,
    /// Input column remapping.
    pub columns: ColumnMapping,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_products: None,
            partner_limit: DEFAULT_PARTNER_LIMIT,
            max_products: DEFAULT_MAX_PRODUCTS,
            columns: ColumnMapping::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration by merging, in increasing precedence:
    /// built-in defaults, the given TOML file (if any), and
    /// `COOCCUR_*` environment variables (`__` separates nesting, e.g.
    /// `COOCCUR_COLUMNS__ORDER_ID`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("COOCCUR_").split("__"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }
}
