mod options;
mod pipeline;
mod sinks;
mod window;

pub use options::{CsvOptions, ExportMode, ExportOptions, ExportReport};
pub use pipeline::{export_api_schema, export_file, export_full_schema, export_records};
pub use sinks::{CsvSink, RowSink};
pub use window::Window;
