//! Top-combination extraction: the report handed to presentation layers.

use serde::Serialize;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::matrix::CoMatrix;
use crate::normalize::ProductIndex;

/// Title placeholder for a dense id with no index entry.
const UNKNOWN_TITLE: &str = "Unknown";

/// One ranked partner of a top product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combo {
    /// Pair label, `"<product_id>,<partner_id>"` in dense ids.
    pub pair: String,
    /// Partner's product title.
    pub title: String,
    /// Co-occurrence count with the top product.
    pub count: u64,
    /// Share of the top product's total (`100 * count / total`).
    /// Defined as `0` when the total is zero.
    pub percentage: f64,
}

/// One report row: a ranked product and its top partners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboRow {
    /// Dense product id.
    pub product_id: usize,
    /// Product title.
    pub title: String,
    /// Diagonal value: the product's total self-pair count.
    pub total: u64,
    /// Ranked partners, best first, at most `partner_limit` of them.
    pub combos: Vec<Combo>,
}

/// The combination report, rows in popularity rank order.
///
/// This is the pipeline's output contract. Rows are ragged (a product
/// with fewer partners than `partner_limit` has fewer combos) and the
/// tabular projection below pads the difference with empty cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ComboReport {
    /// Report rows, most popular product first.
    pub rows: Vec<ComboRow>,
}

impl ComboReport {
    /// Widest combo count across all rows.
    #[must_use]
    pub fn max_combo_count(&self) -> usize {
        self.rows.iter().map(|r| r.combos.len()).max().unwrap_or(0)
    }

    /// Tabular header: the three fixed columns plus four per combo slot.
    #[must_use]
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![
            "TOP_TEMP_PRODUCT_ID".to_string(),
            "TOP_PRODUCT_TITLE".to_string(),
            "TOTAL".to_string(),
        ];
        for i in 1..=self.max_combo_count() {
            header.push(format!("COMBO {i}"));
            header.push(format!("COMBO {i} PRODUCT_TITLE"));
            header.push(format!("COMBO {i} COUNT"));
            header.push(format!("COMBO {i} PERCENTAGE"));
        }
        header
    }

    /// Rows projected onto the tabular header, padded with empty cells
    /// where a row has fewer combos than the widest one.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let width = self.max_combo_count();
        self.rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    row.product_id.to_string(),
                    row.title.clone(),
                    row.total.to_string(),
                ];
                for combo in &row.combos {
                    cells.push(combo.pair.clone());
                    cells.push(combo.title.clone());
                    cells.push(combo.count.to_string());
                    cells.push(format!("{:.2}", combo.percentage));
                }
                cells.resize(3 + width * 4, String::new());
                cells
            })
            .collect()
    }
}

/// Ranks products by popularity and extracts each one's top partners.
///
/// Products rank descending by diagonal value; partners rank descending
/// by row count. Both orderings break ties by ascending dense id, so the
/// report is deterministic. Partner candidates are every other valid
/// dense id, which means zero-count partners can fill out a row when a
/// product co-occurs with fewer than `partner_limit` products, matching
/// how the report has always been built.
///
/// `config.top_products` truncates the ranking; the default (`None`)
/// ranks every product.
///
/// # Errors
///
/// [`Error::EmptyMatrix`] when the matrix order is zero: no valid
/// products survived normalization.
pub fn extract_top_combinations(
    matrix: &CoMatrix,
    index: &ProductIndex,
    config: &AnalysisConfig,
) -> Result<ComboReport> {
    let products = matrix.order();
    if products == 0 {
        return Err(Error::EmptyMatrix);
    }

    let diagonal = matrix.diagonal();
    let mut ranked: Vec<usize> = (1..=products).collect();
    ranked.sort_by(|&a, &b| diagonal[b].cmp(&diagonal[a]).then(a.cmp(&b)));
    let top_n = config.top_products.map_or(products, |n| n.min(products));
    ranked.truncate(top_n);

    let mut rows = Vec::with_capacity(ranked.len());
    for product_id in ranked {
        let row = matrix.row(product_id);
        let total = diagonal[product_id];

        let mut partners: Vec<usize> = (1..=products).filter(|&q| q != product_id).collect();
        partners.sort_by(|&a, &b| row[b].cmp(&row[a]).then(a.cmp(&b)));
        partners.truncate(config.partner_limit);

        let combos = partners
            .into_iter()
            .map(|partner| {
                let count = row[partner];
                Combo {
                    pair: format!("{product_id},{partner}"),
                    title: index
                        .title(partner)
                        .unwrap_or(UNKNOWN_TITLE)
                        .to_string(),
                    count,
                    percentage: percentage_of(count, total),
                }
            })
            .collect();

        rows.push(ComboRow {
            product_id,
            title: index
                .title(product_id)
                .unwrap_or(UNKNOWN_TITLE)
                .to_string(),
            total,
            combos,
        });
    }
    debug!(ranked = rows.len(), products, "extracted top combinations");

    Ok(ComboReport { rows })
}

// Reason: counts are far below 2^52 in practice, so the f64 conversion
// is exact for any realistic dataset.
#[allow(clippy::cast_precision_loss)]
fn percentage_of(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
