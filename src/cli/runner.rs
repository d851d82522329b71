use std::io::Write;
use std::path::Path;

use super::command::Command;
use crate::export::{ExportReport, export_file};
use crate::record::Value;
use crate::source::{TableSummary, inspect_table, resolve_encoding};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Plain,
    Json,
}

pub fn run_with_format(cmd: Command, mode: OutputMode) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    run_with_writer(cmd, mode, &mut stdout.lock())
}

/// Run `cmd` and print its result to `out`.
pub fn run_with_writer<W: Write>(
    cmd: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Command::Export { dbf, out: dest, opts } => {
            let report = export_file(&dbf, &dest, &opts)?;
            writeln!(out, "{}", render_report(&report, &dest, mode)?)?;
            Ok(())
        }
        Command::Inspect { dbf, encoding, preview } => {
            let summary = inspect_table(&dbf, resolve_encoding(&encoding)?, preview)?;
            writeln!(out, "{}", render_summary(&summary, mode)?)?;
            Ok(())
        }
    }
}

fn render_report(report: &ExportReport, dest: &Path, mode: OutputMode) -> serde_json::Result<String> {
    Ok(match mode {
        OutputMode::Json => serde_json::json!({
            "columns": report.columns,
            "rows": report.rows,
            "skipped": report.skipped,
            "dest": dest.to_string_lossy(),
        })
        .to_string(),
        OutputMode::Plain => {
            format!("columns={} rows={} skipped={}", report.columns, report.rows, report.skipped)
        }
        OutputMode::Human => format!(
            "Exported {} rows with {} columns to {}",
            report.rows,
            report.columns,
            dest.display()
        ),
    })
}

fn render_summary(summary: &TableSummary, mode: OutputMode) -> serde_json::Result<String> {
    Ok(match mode {
        OutputMode::Json => serde_json::to_string_pretty(summary)?,
        OutputMode::Plain => {
            let names: Vec<&str> = summary.fields.iter().map(|f| f.name.as_str()).collect();
            let mut s = format!("records={} fields={}", summary.records, names.join(","));
            for row in &summary.preview {
                s.push('\n');
                s.push_str(&join_row(row, "\t"));
            }
            s
        }
        OutputMode::Human => {
            let width = summary.fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
            let mut s = format!("{}: {} records\n", summary.path.display(), summary.records);
            for f in &summary.fields {
                s.push_str(&format!("  {:<width$}  {:<10} {}\n", f.name, f.field_type, f.length));
            }
            match &summary.memo_file {
                Some(p) => s.push_str(&format!("memo: {}", p.display())),
                None => s.push_str("memo: none"),
            }
            for (i, row) in summary.preview.iter().enumerate() {
                s.push_str(&format!("\n  #{i}  {}", join_row(row, " | ")));
            }
            s
        }
    })
}

fn join_row(row: &[Value], sep: &str) -> String {
    row.iter().map(ToString::to_string).collect::<Vec<_>>().join(sep)
}
