use std::str::FromStr;

use serde::Serialize;

use super::window::Window;
use crate::errors::ExportError;
use crate::mapping::ApiFieldMap;

/// Column layout of the exported file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Fixed 14-column product-import layout.
    #[default]
    Api,
    /// Every source field verbatim, in table order.
    #[serde(rename = "dbf")]
    Full,
}

impl ExportMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExportMode::Api => "api",
            ExportMode::Full => "dbf",
        }
    }
}

impl FromStr for ExportMode {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Ok(ExportMode::Api),
            "dbf" | "full" => Ok(ExportMode::Full),
            other => Err(ExportError::Config(format!("unknown export format {other:?} (expected api|dbf)"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    /// Prefix the output with a UTF-8 byte order mark.
    pub bom: bool,
}
impl Default for CsvOptions {
    fn default() -> Self { Self { delimiter: b',', bom: true } }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub mode: ExportMode,
    pub csv: CsvOptions,
    pub window: Window,
    /// `encoding_rs` label used to decode text fields of the source table.
    pub encoding: String,
    pub api_fields: ApiFieldMap,
    /// Log a progress line every N written rows; `None` disables it.
    pub progress_every: Option<usize>,
}
impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            mode: ExportMode::Api,
            csv: CsvOptions::default(),
            window: Window::default(),
            encoding: "windows-1252".to_string(),
            api_fields: ApiFieldMap::default(),
            progress_every: Some(10_000),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub columns: usize,
    pub rows: usize,
    /// Records passed over because of the offset.
    pub skipped: usize,
}

impl ExportReport {
    /// `(columns, rows)`.
    #[must_use]
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }
}
