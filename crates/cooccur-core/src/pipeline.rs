//! The end-to-end analysis pipeline.
//!
//! Four stages, strictly forward, each fully materializing its output
//! before the next begins: normalize → group → accumulate → extract.
//! Single-threaded and batch by design; a run is a pure function of its
//! inputs, so re-running on identical input yields identical output.

use tracing::info;

use crate::basket::group_orders;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::matrix::{accumulate, CoMatrix};
use crate::normalize::{normalize, ProductIndex};
use crate::report::{extract_top_combinations, ComboReport};
use crate::table::RecordTable;

/// Everything a run produces, for callers that want more than the report.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    /// The combination report, rows in popularity rank order.
    pub report: ComboReport,
    /// The raw co-occurrence matrix the report was extracted from.
    pub matrix: CoMatrix,
    /// The product index mapping dense ids back to products.
    pub index: ProductIndex,
}

/// Runs the full pipeline and returns the report plus intermediates.
///
/// # Errors
///
/// Any of the stage errors: missing columns, an empty dataset after
/// cleaning, an empty matrix, or a catalog over the configured ceiling.
pub fn run_full(table: &RecordTable, config: &AnalysisConfig) -> Result<AnalysisOutput> {
    let data = normalize(table, config)?;
    let baskets = group_orders(&data)?;
    let matrix = accumulate(&baskets, config)?;
    let report = extract_top_combinations(&matrix, &data.index, config)?;
    info!(
        rows_in = table.len(),
        orders = baskets.len(),
        products = matrix.order(),
        report_rows = report.rows.len(),
        "analysis complete"
    );
    Ok(AnalysisOutput {
        report,
        matrix,
        index: data.index,
    })
}

/// Runs the full pipeline and returns just the combination report.
///
/// This is the core's public contract: tabular input in, tabular report
/// out, no ambient state on either side.
///
/// # Errors
///
/// See [`run_full`].
pub fn run(table: &RecordTable, config: &AnalysisConfig) -> Result<ComboReport> {
    run_full(table, config).map(|output| output.report)
}
