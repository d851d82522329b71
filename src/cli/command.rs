use std::path::PathBuf;

use crate::export::ExportOptions;

pub enum Command {
    Export { dbf: PathBuf, out: PathBuf, opts: ExportOptions },
    Inspect { dbf: PathBuf, encoding: String, preview: usize },
}
