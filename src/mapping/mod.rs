mod api;
mod full;

use crate::record::Record;

pub use api::{API_HEADERS, ApiFieldMap, ApiMapper};
pub use full::FullMapper;

/// Turns a source record into one output row of a fixed width.
pub trait RowMapper {
    fn header(&self) -> Vec<String>;
    fn map_record(&self, rec: &Record) -> Vec<String>;
}
