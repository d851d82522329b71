#![allow(dead_code)]

use dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use std::path::Path;

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const STOCK_FIELDS: [&str; 8] =
    ["STCODIGO", "STDESCRIP", "STDETALLE", "STPRECUNI2", "STPRECUNI1", "STNOMFAM", "STFAMILIA", "STBORRAR"];

#[derive(Debug, Clone, Default)]
pub struct StockRow {
    pub code: &'static str,
    pub name: &'static str,
    pub detail: &'static str,
    pub regular: Option<f64>,
    pub special: Option<f64>,
    pub family_name: &'static str,
    pub family: &'static str,
    pub deleted: &'static str,
}

fn name(s: &str) -> FieldName {
    FieldName::try_from(s).unwrap()
}

fn text(s: &str) -> FieldValue {
    if s.is_empty() { FieldValue::Character(None) } else { FieldValue::Character(Some(s.to_string())) }
}

/// Write a stock table with the usual field layout.
pub fn write_stock_dbf(path: &Path, rows: &[StockRow]) {
    let writer = TableWriterBuilder::new()
        .add_character_field(name("STCODIGO"), 15)
        .add_character_field(name("STDESCRIP"), 40)
        .add_character_field(name("STDETALLE"), 60)
        .add_numeric_field(name("STPRECUNI2"), 12, 2)
        .add_numeric_field(name("STPRECUNI1"), 12, 2)
        .add_character_field(name("STNOMFAM"), 30)
        .add_character_field(name("STFAMILIA"), 10)
        .add_character_field(name("STBORRAR"), 1)
        .build_with_file_dest(path)
        .unwrap();
    let records: Vec<Record> = rows
        .iter()
        .map(|r| {
            let mut rec = Record::default();
            rec.insert("STCODIGO".to_string(), text(r.code));
            rec.insert("STDESCRIP".to_string(), text(r.name));
            rec.insert("STDETALLE".to_string(), text(r.detail));
            rec.insert("STPRECUNI2".to_string(), FieldValue::Numeric(r.regular));
            rec.insert("STPRECUNI1".to_string(), FieldValue::Numeric(r.special));
            rec.insert("STNOMFAM".to_string(), text(r.family_name));
            rec.insert("STFAMILIA".to_string(), text(r.family));
            rec.insert("STBORRAR".to_string(), text(r.deleted));
            rec
        })
        .collect();
    writer.write_records(&records).unwrap();
}

/// Write a dBase III+ table (`CODE C(4)`, `NOTE M(10)`) whose memo field points at a
/// `.dbt` that is not there. `TableWriterBuilder` has no memo support, so the bytes are laid out by hand.
pub fn write_memo_dbf_without_sidecar(path: &Path, rows: &[(&str, &str)]) {
    const FIELDS: [(&str, u8, u8); 2] = [("CODE", b'C', 4), ("NOTE", b'M', 10)];
    let record_len: u16 = 1 + FIELDS.iter().map(|f| u16::from(f.2)).sum::<u16>();
    let header_len: u16 = 32 + 32 * FIELDS.len() as u16 + 1;

    let mut buf = vec![0x83, 124, 1, 1];
    buf.extend_from_slice(&(rows.len() as u32).to_le_bytes());
    buf.extend_from_slice(&header_len.to_le_bytes());
    buf.extend_from_slice(&record_len.to_le_bytes());
    buf.resize(32, 0);
    for (name, kind, len) in FIELDS {
        let mut desc = [0u8; 32];
        desc[..name.len()].copy_from_slice(name.as_bytes());
        desc[11] = kind;
        desc[16] = len;
        buf.extend_from_slice(&desc);
    }
    buf.push(0x0D);
    for (code, block) in rows {
        buf.push(b' ');
        buf.extend_from_slice(format!("{code:<4}").as_bytes());
        buf.extend_from_slice(format!("{block:>10}").as_bytes());
    }
    buf.push(0x1A);
    std::fs::write(path, buf).unwrap();
}

/// `n` plain active rows with codes `P000`, `P001`, ...
pub fn numbered_rows(n: usize) -> Vec<StockRow> {
    const CODES: [&str; 10] = ["P000", "P001", "P002", "P003", "P004", "P005", "P006", "P007", "P008", "P009"];
    CODES
        .iter()
        .take(n)
        .map(|code| StockRow { code: *code, name: "Item", regular: Some(10.0), ..StockRow::default() })
        .collect()
}

/// Parse an exported file: strips the BOM when present and returns header plus rows.
pub fn read_export(path: &Path, delimiter: u8) -> (Vec<String>, Vec<Vec<String>>) {
    let bytes = std::fs::read(path).unwrap();
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);
    let mut rdr = csv::ReaderBuilder::new().delimiter(delimiter).from_reader(body);
    let header = rdr.headers().unwrap().iter().map(str::to_string).collect();
    let rows = rdr.records().map(|r| r.unwrap().iter().map(str::to_string).collect()).collect();
    (header, rows)
}
