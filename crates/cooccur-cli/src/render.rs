//! Report and matrix rendering: terminal table, CSV, JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use cooccur_core::{CoMatrix, ComboReport};

use crate::Format;

/// Writes the report to stdout in the requested format.
pub fn write_report_stdout(report: &ComboReport, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Table => {
            println!("{}", "Top combinations".bold());
            println!("{}", render_table(report));
            println!("{} product(s) ranked", report.rows.len());
            Ok(())
        }
        Format::Csv => write_report_csv(report, std::io::stdout().lock()),
        Format::Json => write_report_json(report, std::io::stdout().lock()),
    }
}

/// Writes the report to a file in the requested format. The table
/// format writes the same rendered text a terminal would get, without
/// styling.
pub fn write_report_file(report: &ComboReport, path: &Path, format: Format) -> anyhow::Result<()> {
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        Format::Table => {
            writeln!(file, "{}", render_table(report))?;
            Ok(())
        }
        Format::Csv => write_report_csv(report, file),
        Format::Json => write_report_json(report, file),
    }
}

fn render_table(report: &ComboReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(report.header());
    for row in report.to_rows() {
        table.add_row(row);
    }
    table
}

fn write_report_csv<W: Write>(report: &ComboReport, writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(report.header())
        .context("writing report header")?;
    for row in report.to_rows() {
        csv_writer.write_record(&row).context("writing report row")?;
    }
    csv_writer.flush().context("flushing report")?;
    Ok(())
}

fn write_report_json<W: Write>(report: &ComboReport, mut writer: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("serializing report")?;
    writeln!(writer)?;
    Ok(())
}

/// Dumps the raw co-occurrence matrix as headerless CSV: `(P+1)` rows of
/// `(P+1)` counts, row and column 0 included (always zero).
pub fn write_matrix_csv(matrix: &CoMatrix, path: &Path) -> anyhow::Result<()> {
    let mut csv_writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for i in 0..=matrix.order() {
        let cells: Vec<String> = matrix.row(i).iter().map(u64::to_string).collect();
        csv_writer.write_record(&cells)?;
    }
    csv_writer.flush()?;
    Ok(())
}
