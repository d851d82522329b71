mod common;

use common::{numbered_rows, read_export, write_stock_dbf};
use std::process::Command as Process;
use stockdbf::cli::{Command, OutputMode, parse_window, run_with_writer};
use stockdbf::export::{ExportMode, ExportOptions};
use tempfile::tempdir;

#[test]
fn test_cli_export_json_report() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    let dst = dir.path().join("out.csv");
    write_stock_dbf(&src, &numbered_rows(4));

    let opts = ExportOptions { window: parse_window(Some(1), Some(0)), ..ExportOptions::default() };
    let mut out = Vec::new();
    run_with_writer(Command::Export { dbf: src, out: dst.clone(), opts }, OutputMode::Json, &mut out).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["columns"], 14);
    assert_eq!(v["rows"], 3);
    assert_eq!(v["skipped"], 1);
    assert_eq!(read_export(&dst, b',').1.len(), 3);
}

#[test]
fn test_cli_export_plain_full_mode() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    let dst = dir.path().join("out.csv");
    write_stock_dbf(&src, &numbered_rows(2));

    let opts = ExportOptions { mode: ExportMode::Full, ..ExportOptions::default() };
    let mut out = Vec::new();
    run_with_writer(Command::Export { dbf: src, out: dst, opts }, OutputMode::Plain, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().trim_end(), "columns=8 rows=2 skipped=0");
}

#[test]
fn test_cli_inspect_plain() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    write_stock_dbf(&src, &numbered_rows(3));
    let mut out = Vec::new();
    run_with_writer(Command::Inspect { dbf: src, encoding: "latin1".into(), preview: 0 }, OutputMode::Plain, &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("records=3 fields=STCODIGO,STDESCRIP,"));
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn test_cli_inspect_json_preview() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    write_stock_dbf(&src, &numbered_rows(5));
    let mut out = Vec::new();
    run_with_writer(Command::Inspect { dbf: src, encoding: "latin1".into(), preview: 2 }, OutputMode::Json, &mut out)
        .unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["records"], 5);
    let preview = v["preview"].as_array().unwrap();
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0][0], "P000");
    assert_eq!(preview[1][0], "P001");
    assert_eq!(preview[1][3], 10.0);
}

fn stockdbf() -> Process {
    let mut p = Process::new(env!("CARGO_BIN_EXE_stockdbf"));
    for var in ["STOCK_DBF_PATH", "STOCK_CSV_PATH", "STOCKDBF_CONFIG", "STOCKDBF_LOG_DIR", "STOCKDBF_LOG_LEVEL"] {
        p.env_remove(var);
    }
    p
}

#[test]
fn test_binary_export_and_errors() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    let dst = dir.path().join("out.csv");
    write_stock_dbf(&src, &numbered_rows(3));

    let ok = stockdbf()
        .current_dir(dir.path())
        .args(["export", "--dbf", src.to_str().unwrap(), "--out", dst.to_str().unwrap()])
        .args(["--delim", ";", "--limit", "2", "--offset", "-1", "--no-bom", "--output", "plain"])
        .output()
        .unwrap();
    assert!(ok.status.success(), "stderr: {}", String::from_utf8_lossy(&ok.stderr));
    assert_eq!(String::from_utf8_lossy(&ok.stdout).trim_end(), "columns=14 rows=2 skipped=0");
    let (header, rows) = read_export(&dst, b';');
    assert_eq!(header[0], "sku");
    assert_eq!(rows.len(), 2);

    let missing = stockdbf()
        .current_dir(dir.path())
        .args(["export", "--dbf", "nope.dbf", "--out", "x.csv"])
        .output()
        .unwrap();
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("error: source table not found"));
    assert!(!dir.path().join("x.csv").exists());

    let bad_delim = stockdbf()
        .current_dir(dir.path())
        .args(["export", "--dbf", src.to_str().unwrap(), "--delim", ";;"])
        .output()
        .unwrap();
    assert_eq!(bad_delim.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad_delim.stderr).contains("Invalid delimiter"));
}

#[test]
fn test_binary_reads_config_file() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("stock.dbf");
    let dst = dir.path().join("configured.csv");
    write_stock_dbf(&src, &numbered_rows(2));
    let cfg = dir.path().join("stockdbf.toml");
    std::fs::write(
        &cfg,
        format!("dbf_path = {:?}\ncsv_path = {:?}\nformat = \"dbf\"\n", src.to_str().unwrap(), dst.to_str().unwrap()),
    )
    .unwrap();

    let out = stockdbf()
        .current_dir(dir.path())
        .args(["--config", cfg.to_str().unwrap(), "export", "--output", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["columns"], 8);
    assert!(dst.exists());
}
