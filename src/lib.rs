//! Export xBase/DBF stock tables to delimited text.
//!
//! Two layouts are supported: the full table schema, and a fixed 14-column product
//! import layout built from the stock table's well-known fields.
//!
//! ```no_run
//! use stockdbf::export::{ExportOptions, export_api_schema};
//!
//! let report = export_api_schema("stock.DBF", "stock_export.csv", &ExportOptions::default())?;
//! println!("{} rows", report.rows);
//! # Ok::<(), stockdbf::errors::ExportError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod logger;
pub mod mapping;
pub mod normalize;
pub mod record;
pub mod source;

pub use errors::{ExportError, Result};
pub use export::{ExportMode, ExportOptions, ExportReport, export_api_schema, export_file, export_full_schema};
