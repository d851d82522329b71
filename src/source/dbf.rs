use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use dbase::encoding::EncodingRs;
use dbase::{ErrorKind, FieldIOError, FieldIterator, FieldType, FieldValue, ReadableRecord, ReaderBuilder};
use serde::Serialize;

use super::RecordSource;
use crate::errors::{ExportError, Result};
use crate::record::{FieldIndex, Record, Value};

type TableReader = dbase::Reader<BufReader<File>>;

const MEMO_EXTENSIONS: [&str; 4] = ["fpt", "FPT", "dbt", "DBT"];

/// Streaming reader over a `.dbf` table.
///
/// Text is decoded with the given code page. Memo fields are read from a sibling
/// `.fpt`/`.dbt` file when one exists and are null otherwise.
pub struct DbfSource {
    reader: TableReader,
    index: Arc<FieldIndex>,
    has_memo_file: bool,
}

impl DbfSource {
    /// Open `path` decoding text as windows-1252.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header is not a valid table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_encoding(path, encoding_rs::WINDOWS_1252)
    }

    /// Open `path` decoding text with `encoding`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or its header is not a valid table.
    pub fn open_with_encoding(
        path: impl AsRef<Path>,
        encoding: &'static encoding_rs::Encoding,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let builder = ReaderBuilder::new(BufReader::new(file)).with_encoding(EncodingRs::from(encoding));
        let memo = memo_sidecar(path);
        let builder = match &memo {
            Some(memo_path) => {
                log::debug!("dbf: memo sidecar {}", memo_path.display());
                builder.with_memo(BufReader::new(File::open(memo_path)?))
            }
            None => builder,
        };
        let reader = builder.build()?;
        let index = Arc::new(FieldIndex::new(reader.fields().iter().map(|f| f.name().to_string())));
        let source = Self { reader, index, has_memo_file: memo.is_some() };
        if !source.has_memo_file && source.has_memo_fields() {
            log::warn!(
                "dbf: {} declares memo fields but no memo file was found; they will be empty",
                path.display()
            );
        }
        log::debug!("dbf: opened {} ({} fields, {})", path.display(), source.index.len(), encoding.name());
        Ok(source)
    }

    fn has_memo_fields(&self) -> bool {
        self.reader.fields().iter().any(|f| matches!(f.field_type(), FieldType::Memo))
    }

    #[must_use]
    pub fn has_memo_file(&self) -> bool {
        self.has_memo_file
    }

    fn summary(&self) -> Vec<FieldSummary> {
        self.reader
            .fields()
            .iter()
            .map(|f| FieldSummary {
                name: f.name().to_string(),
                field_type: format!("{:?}", f.field_type()),
                length: f.length(),
            })
            .collect()
    }
}

impl RecordSource for DbfSource {
    fn field_names(&self) -> &[String] {
        self.index.names()
    }

    fn records(&mut self) -> Box<dyn Iterator<Item = Result<Record>> + '_> {
        let index = Arc::clone(&self.index);
        Box::new(
            self.reader
                .iter_records_as::<DbfRow>()
                .map(move |row| row.map(|r| Record::new(Arc::clone(&index), r.0)).map_err(ExportError::from)),
        )
    }
}

/// Raw row in table field order; memo fields without a memo file read as null.
struct DbfRow(Vec<Value>);

impl ReadableRecord for DbfRow {
    fn read_using<T, R>(field_iterator: &mut FieldIterator<T, R>) -> std::result::Result<Self, FieldIOError>
    where
        T: Read + Seek,
        R: Read + Seek,
    {
        let mut values = Vec::new();
        loop {
            match field_iterator.read_next_field() {
                Ok(field) => values.push(field_value_to_value(field.value)),
                Err(err) => match err.kind() {
                    ErrorKind::EndOfRecord => break,
                    ErrorKind::MissingMemoFile => values.push(Value::Null),
                    _ => return Err(err),
                },
            }
        }
        Ok(DbfRow(values))
    }
}

fn field_value_to_value(v: FieldValue) -> Value {
    match v {
        FieldValue::Character(s) => Value::from(s),
        FieldValue::Memo(s) => Value::Str(s),
        FieldValue::Numeric(n) => Value::from(n),
        FieldValue::Float(n) => Value::from(n.map(f64::from)),
        FieldValue::Integer(n) => Value::Num(f64::from(n)),
        FieldValue::Double(n) | FieldValue::Currency(n) => Value::Num(n),
        FieldValue::Logical(b) => Value::from(b),
        FieldValue::Date(d) => Value::from(d.and_then(|d| to_naive_date(&d)).map(|d| d.format("%Y-%m-%d").to_string())),
        FieldValue::DateTime(dt) => {
            Value::from(to_naive_datetime(&dt).map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()))
        }
    }
}

fn to_naive_datetime(dt: &dbase::DateTime) -> Option<NaiveDateTime> {
    let time = dt.time();
    to_naive_date(&dt.date())?.and_hms_opt(
        u32::try_from(time.hours()).ok()?,
        u32::try_from(time.minutes()).ok()?,
        u32::try_from(time.seconds()).ok()?,
    )
}

fn to_naive_date(d: &dbase::Date) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        i32::try_from(d.year()).ok()?,
        u32::try_from(d.month()).ok()?,
        u32::try_from(d.day()).ok()?,
    )
}

/// Memo file next to `path`: same stem with a `.fpt` or `.dbt` extension in either case.
#[must_use]
pub fn memo_sidecar(path: &Path) -> Option<PathBuf> {
    MEMO_EXTENSIONS.iter().map(|ext| path.with_extension(ext)).find(|p| p.is_file())
}

/// Look up a text encoding by WHATWG label (`latin1`, `windows-1252`, `cp850`, `utf-8`, ...).
///
/// # Errors
/// Returns [`ExportError::UnknownEncoding`] for labels `encoding_rs` does not know.
pub fn resolve_encoding(label: &str) -> Result<&'static encoding_rs::Encoding> {
    encoding_rs::Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ExportError::UnknownEncoding(label.to_string()))
}

#[derive(Serialize, Debug, Clone)]
pub struct FieldSummary {
    pub name: String,
    pub field_type: String,
    pub length: u8,
}

#[derive(Serialize, Debug, Clone)]
pub struct TableSummary {
    pub path: PathBuf,
    pub fields: Vec<FieldSummary>,
    pub records: usize,
    pub memo_file: Option<PathBuf>,
    /// First records of the table, values in field order.
    pub preview: Vec<Vec<Value>>,
}

/// Describe a table: its fields, how many records it holds and up to `preview` sample rows.
///
/// # Errors
/// Returns [`ExportError::SourceNotFound`] if `path` is not a file, or any decode error.
pub fn inspect_table(
    path: impl AsRef<Path>,
    encoding: &'static encoding_rs::Encoding,
    preview: usize,
) -> Result<TableSummary> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ExportError::SourceNotFound(path.to_path_buf()));
    }
    let mut source = DbfSource::open_with_encoding(path, encoding)?;
    let fields = source.summary();
    let mut records = 0;
    let mut rows = Vec::with_capacity(preview);
    for rec in source.records() {
        let rec = rec?;
        if rows.len() < preview {
            rows.push(rec.values().to_vec());
        }
        records += 1;
    }
    Ok(TableSummary { path: path.to_path_buf(), fields, records, memo_file: memo_sidecar(path), preview: rows })
}
