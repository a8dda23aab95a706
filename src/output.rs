//! Output formatting and persistence for runs-test reports.
//!
//! Supports a plain-text table report, JSON serialization, and CSV append.

use anyhow::Result;
use tracing::debug;

use crate::evaluate::{Decision, MIN_GROUP_SIZE};
use crate::stats::RunsTestReport;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RunsTestReport) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
///
/// The wall-clock `timestamp` is left out so identical input prints identical
/// JSON; it is kept in the CSV history written by [`append_record`].
pub fn to_json(report: &RunsTestReport) -> Result<String> {
    let mut value = serde_json::to_value(report)?;
    if let Some(fields) = value.as_object_mut() {
        fields.remove("timestamp");
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Builds a text table with left-aligned columns separated by `|`.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut lines = vec![format_row(headers, &widths)];
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Renders the human-readable report: data summary, test results, conclusion.
pub fn render_text(report: &RunsTestReport) -> String {
    let summary = vec![
        vec!["Observations".to_string(), report.n.to_string()],
        vec!["Sample mean".to_string(), format!("{:.4}", report.mean)],
        vec!["Above the mean".to_string(), report.n_above.to_string()],
        vec!["Below the mean".to_string(), report.n_below.to_string()],
        vec![
            "Ties with the mean".to_string(),
            format!("{} (policy: {})", report.ties, report.tie_policy),
        ],
    ];

    let results = vec![
        vec!["Observed runs".to_string(), report.runs.to_string()],
        vec!["Expected runs".to_string(), format!("{:.4}", report.expected_runs)],
        vec!["Runs variance".to_string(), format!("{:.4}", report.variance)],
        vec!["Runs std. dev.".to_string(), format!("{:.4}", report.std_dev())],
        vec!["Longest run".to_string(), report.longest_run.to_string()],
        vec!["Z statistic".to_string(), format!("{:.4}", report.z)],
        vec!["p-value (two-tailed)".to_string(), format!("{:.4}", report.p_value)],
        vec![
            "Critical value".to_string(),
            format!("±{:.3} (α = {})", report.critical_value, report.alpha),
        ],
    ];

    let mut out = String::new();
    if let Some(source) = &report.source {
        let column = report.column.as_deref().unwrap_or("?");
        out.push_str(&format!("Source: {source} (column '{column}')\n"));
    }
    out.push_str("\n=== Data summary ===\n");
    out.push_str(&render_table(&["Metric", "Value"], &summary));
    out.push_str("\n\n=== Runs test above/below the mean ===\n");
    out.push_str(&render_table(&["Result", "Value"], &results));
    out.push_str("\n\n=== Conclusion ===\n");
    out.push_str(&conclusion(report));
    out.push('\n');

    if !report.normal_approximation_valid {
        out.push_str(&format!(
            "Caveat: fewer than {MIN_GROUP_SIZE} observations on one side of the mean; \
             the normal approximation may be unreliable.\n"
        ));
    }
    out
}

fn conclusion(report: &RunsTestReport) -> String {
    let pct = format!("{:.0}", report.alpha * 100.0);
    match report.decision {
        Decision::Accept => format!(
            "|Z| = {:.4} <= {:.3}: the data are consistent with randomness at the {pct}% level",
            report.z.abs(),
            report.critical_value
        ),
        Decision::Reject => format!(
            "|Z| = {:.4} > {:.3}: randomness is rejected at the {pct}% level",
            report.z.abs(),
            report.critical_value
        ),
    }
}

/// Appends a [`RunsTestReport`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, report: &RunsTestReport) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(report)?;
    writer.flush()?;

    Ok(())
}
