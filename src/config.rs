use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ExportError, Result};
use crate::export::{CsvOptions, ExportMode, ExportOptions};
use crate::logger::LogSettings;
use crate::mapping::ApiFieldMap;

pub const DEFAULT_DBF_PATH: &str = "stock.DBF";
pub const DEFAULT_CSV_PATH: &str = "stock_export.csv";
pub const DEFAULT_ENCODING: &str = "windows-1252";
const CONFIG_FILE: &str = "stockdbf.toml";

/// Settings gathered from config files and the environment; every key is optional.
///
/// ```toml
/// dbf_path = "data/STOCK.DBF"
/// csv_path = "out/stock.csv"
/// delimiter = ";"
/// encoding = "cp850"
/// format = "api"
/// bom = false
///
/// [api_fields]
/// sale_price = ["STOFERTA"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dbf_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub delimiter: Option<String>,
    pub encoding: Option<String>,
    pub format: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_retention: Option<u32>,
    pub bom: Option<bool>,
    pub api_fields: Option<ApiFieldMap>,
}

impl AppConfig {
    /// Keep values already set; fill the gaps from `other`.
    fn fill_from(&mut self, other: AppConfig) {
        self.dbf_path = self.dbf_path.take().or(other.dbf_path);
        self.csv_path = self.csv_path.take().or(other.csv_path);
        self.delimiter = self.delimiter.take().or(other.delimiter);
        self.encoding = self.encoding.take().or(other.encoding);
        self.format = self.format.take().or(other.format);
        self.log_dir = self.log_dir.take().or(other.log_dir);
        self.log_level = self.log_level.take().or(other.log_level);
        self.log_retention = self.log_retention.take().or(other.log_retention);
        self.bom = self.bom.take().or(other.bom);
        self.api_fields = self.api_fields.take().or(other.api_fields);
    }

    #[must_use]
    pub fn dbf_path(&self) -> PathBuf {
        self.dbf_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DBF_PATH))
    }

    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.csv_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH))
    }

    #[must_use]
    pub fn encoding(&self) -> &str {
        self.encoding.as_deref().unwrap_or(DEFAULT_ENCODING)
    }

    /// # Errors
    /// Returns an error for an unknown format or a delimiter that is not a single byte.
    pub fn export_options(&self) -> Result<ExportOptions> {
        let mode = match self.format.as_deref() {
            Some(f) => f.parse()?,
            None => ExportMode::default(),
        };
        let delimiter = match self.delimiter.as_deref() {
            Some(d) => parse_delimiter(d)?,
            None => b',',
        };
        Ok(ExportOptions {
            mode,
            csv: CsvOptions { delimiter, bom: self.bom.unwrap_or(true) },
            encoding: self.encoding().to_string(),
            api_fields: self.api_fields.clone().unwrap_or_default(),
            ..ExportOptions::default()
        })
    }

    #[must_use]
    pub fn log_settings(&self) -> LogSettings {
        LogSettings { dir: self.log_dir.clone(), level: self.log_level.clone(), retention: self.log_retention }
    }
}

/// Field delimiter from user input: one byte, or `\t` / `tab` for a tab.
///
/// # Errors
/// Returns [`ExportError::InvalidDelimiter`] for empty or multi-byte input.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" | "TAB" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] => Ok(*b),
            _ => Err(ExportError::InvalidDelimiter(s.to_string())),
        },
    }
}

/// Directories searched for `stockdbf.toml` when no file is named: the user config dir, then the working dir.
#[must_use]
pub fn search_dirs() -> Vec<PathBuf> {
    dirs_next::config_dir().into_iter().chain(std::env::current_dir().ok()).collect()
}

/// Config files to consult, highest priority first.
pub fn config_paths<F>(cli_cfg: Option<&Path>, lookup: &F, dirs: &[PathBuf]) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let mut paths = Vec::new();
    if let Some(p) = cli_cfg {
        paths.push(p.to_path_buf());
    }
    if let Some(p) = lookup("STOCKDBF_CONFIG") {
        paths.push(PathBuf::from(p));
    }
    paths.extend(dirs.iter().map(|d| d.join(CONFIG_FILE)));
    paths
}

/// Merge config sources. Precedence: environment > earlier files > later files > defaults.
///
/// Explicitly named files (`--config`, `STOCKDBF_CONFIG`) must exist; `stockdbf.toml` in each of
/// `dirs` is read when present.
///
/// # Errors
/// Returns [`ExportError::Config`] for a missing explicit file or a file that is not valid TOML.
pub fn load_config_with<F>(cli_cfg: Option<&Path>, lookup: F, dirs: &[PathBuf]) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let explicit: Vec<PathBuf> = cli_cfg
        .map(Path::to_path_buf)
        .into_iter()
        .chain(lookup("STOCKDBF_CONFIG").map(PathBuf::from))
        .collect();
    for p in &explicit {
        if !p.is_file() {
            return Err(ExportError::Config(format!("config file not found: {}", p.display())));
        }
    }

    let mut cfg = AppConfig {
        dbf_path: lookup("STOCK_DBF_PATH").map(PathBuf::from),
        csv_path: lookup("STOCK_CSV_PATH").map(PathBuf::from),
        ..AppConfig::default()
    };
    let env_log = LogSettings::from_lookup(&lookup);
    cfg.log_dir = env_log.dir;
    cfg.log_level = env_log.level;
    cfg.log_retention = env_log.retention;

    for p in config_paths(cli_cfg, &lookup, dirs) {
        if !p.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&p)?;
        let file_cfg: AppConfig = toml::from_str(&text)
            .map_err(|e| ExportError::Config(format!("{}: {e}", p.display())))?;
        log::debug!("config: loaded {}", p.display());
        cfg.fill_from(file_cfg);
    }
    Ok(cfg)
}

/// [`load_config_with`] over the process environment and the default [`search_dirs`].
///
/// # Errors
/// See [`load_config_with`].
pub fn load_config(cli_cfg: Option<&Path>) -> Result<AppConfig> {
    load_config_with(cli_cfg, |k| std::env::var(k).ok(), &search_dirs())
}
