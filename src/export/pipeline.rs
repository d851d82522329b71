use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::options::{ExportMode, ExportOptions, ExportReport};
use super::sinks::{CsvSink, RowSink};
use crate::errors::{ExportError, Result};
use crate::mapping::{ApiMapper, FullMapper, RowMapper};
use crate::source::{DbfSource, RecordSource, resolve_encoding};

/// Export a DBF table to a delimited file, choosing the column layout from `opts.mode`.
///
/// # Errors
/// Returns [`ExportError::SourceNotFound`] before touching the destination when `src` is
/// not a file, or any decode/write error raised while streaming.
pub fn export_file(src: impl AsRef<Path>, dst: impl AsRef<Path>, opts: &ExportOptions) -> Result<ExportReport> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    log::info!(
        "export: source={}, dest={}, mode={}, offset={}, limit={:?}",
        src.display(),
        dst.display(),
        opts.mode.as_str(),
        opts.window.offset,
        opts.window.limit
    );
    if !src.is_file() {
        return Err(ExportError::SourceNotFound(src.to_path_buf()));
    }
    let encoding = resolve_encoding(&opts.encoding)?;
    let mut source = DbfSource::open_with_encoding(src, encoding)?;
    let file = File::create(dst)?;
    let report = export_records(&mut source, file, opts)?;
    log::info!(
        "export: wrote {} rows x {} columns to {} (skipped {})",
        report.rows,
        report.columns,
        dst.display(),
        report.skipped
    );
    Ok(report)
}

/// Export every source field, in table order.
///
/// # Errors
/// See [`export_file`].
pub fn export_full_schema(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    opts: &ExportOptions,
) -> Result<ExportReport> {
    export_file(src, dst, &ExportOptions { mode: ExportMode::Full, ..opts.clone() })
}

/// Export the fixed product-import columns.
///
/// # Errors
/// See [`export_file`].
pub fn export_api_schema(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    opts: &ExportOptions,
) -> Result<ExportReport> {
    export_file(src, dst, &ExportOptions { mode: ExportMode::Api, ..opts.clone() })
}

/// Stream `source` through the mapper for `opts.mode` into `writer`.
///
/// The header is always written, even when the window selects no rows.
///
/// # Errors
/// Returns the first decode or write error; rows written before it stay in `writer`.
pub fn export_records<S, W>(source: &mut S, writer: W, opts: &ExportOptions) -> Result<ExportReport>
where
    S: RecordSource + ?Sized,
    W: Write,
{
    let mapper: Box<dyn RowMapper> = match opts.mode {
        ExportMode::Full => Box::new(FullMapper::new(source.field_names())),
        ExportMode::Api => Box::new(ApiMapper::new(opts.api_fields.clone())),
    };
    let mut sink: Box<dyn RowSink + '_> = Box::new(CsvSink::new(writer, opts.csv.delimiter, opts.csv.bom)?);

    let header = mapper.header();
    sink.write_row(&header)?;
    let mut report = ExportReport { columns: header.len(), ..ExportReport::default() };

    let progress_every = opts.progress_every.filter(|n| *n > 0);
    let mut records = opts.window.apply(source.records());
    for rec in records.by_ref() {
        let rec = rec?;
        sink.write_row(&mapper.map_record(&rec))?;
        report.rows += 1;
        if let Some(n) = progress_every
            && report.rows % n == 0
        {
            log::info!("export: {} rows written", report.rows);
        }
    }
    report.skipped = records.skipped();
    drop(records);
    sink.finish()?;
    Ok(report)
}
