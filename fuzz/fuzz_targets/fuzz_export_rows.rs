#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stockdbf::export::{ExportMode, ExportOptions, Window, export_records};
use stockdbf::record::Value;
use stockdbf::source::MemorySource;

#[derive(Debug, Arbitrary)]
enum Cell {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

#[derive(Debug, Arbitrary)]
struct Input {
    full: bool,
    offset: i64,
    limit: i64,
    rows: Vec<Vec<Cell>>,
}

const FIELDS: [&str; 4] = ["STCODIGO", "STDESCRIP", "STPRECUNI2", "STBORRAR"];

fuzz_target!(|input: Input| {
    if input.rows.len() > 256 { return; }
    let mut src = MemorySource::new(FIELDS);
    let total = input.rows.len();
    for row in input.rows {
        src.push_row(
            row.into_iter()
                .take(FIELDS.len())
                .map(|c| match c {
                    Cell::Str(s) => Value::Str(s),
                    Cell::Num(n) => Value::Num(n),
                    Cell::Bool(b) => Value::Bool(b),
                    Cell::Null => Value::Null,
                })
                .collect(),
        );
    }
    let window = Window::from_signed(input.offset, input.limit);
    let mode = if input.full { ExportMode::Full } else { ExportMode::Api };
    let opts = ExportOptions { mode, window, progress_every: None, ..ExportOptions::default() };
    let mut out = Vec::new();
    let report = export_records(&mut src, &mut out, &opts).expect("in-memory export cannot fail");
    assert_eq!(report.rows, window.expected_rows(total));
    assert_eq!(report.columns, if input.full { FIELDS.len() } else { 14 });
});
