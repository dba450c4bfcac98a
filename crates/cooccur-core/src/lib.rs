//! # cooccur Core
//!
//! Market-basket co-occurrence analytics: given a table of
//! (order, product) rows, determine for each frequently purchased
//! product which other products are most often bought in the same
//! order, with counts and percentages.
//!
//! The pipeline has four stages, run strictly forward:
//!
//! 1. **Normalize**: validate the schema, drop unusable rows, assign
//!    dense product ids.
//! 2. **Group**: collect each order's dense ids into a sorted basket.
//! 3. **Accumulate**: count every basket's unordered product pairs
//!    (self-pairs included) into a symmetric matrix.
//! 4. **Extract**: rank products by popularity and emit each one's top
//!    partners as a [`ComboReport`].
//!
//! ## Quick Start
//!
//! ```rust
//! use cooccur_core::{AnalysisConfig, RecordTable, Value};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut table = RecordTable::new(vec![
//!         "order_id".to_string(),
//!         "product_id".to_string(),
//!         "product_title".to_string(),
//!     ]);
//!     table.push_row(vec![
//!         Value::Int(1),
//!         Value::Str("A".to_string()),
//!         Value::Str("Widget".to_string()),
//!     ])?;
//!     table.push_row(vec![
//!         Value::Int(1),
//!         Value::Str("B".to_string()),
//!         Value::Str("Gadget".to_string()),
//!     ])?;
//!     table.push_row(vec![
//!         Value::Int(2),
//!         Value::Str("A".to_string()),
//!         Value::Str("Widget".to_string()),
//!     ])?;
//!
//!     let report = cooccur_core::run(&table, &AnalysisConfig::default())?;
//!     assert_eq!(report.rows[0].title, "Widget");
//!     assert_eq!(report.rows[0].total, 2);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod basket;
pub mod config;
pub mod error;
pub mod matrix;
#[cfg(test)]
mod matrix_tests;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod table;
#[cfg(test)]
mod table_tests;

pub use basket::{group_orders, OrderBaskets};
pub use config::{AnalysisConfig, ColumnMapping};
pub use error::{Error, Result};
pub use matrix::{accumulate, CoMatrix};
pub use normalize::{normalize, NormalizedData, NormalizedLine, ProductEntry, ProductIndex};
pub use pipeline::{run, run_full, AnalysisOutput};
pub use report::{extract_top_combinations, Combo, ComboReport, ComboRow};
pub use table::{RecordTable, Value};
