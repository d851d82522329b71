mod dbf;
mod memory;

use crate::errors::Result;
use crate::record::Record;

pub use dbf::{DbfSource, FieldSummary, TableSummary, inspect_table, memo_sidecar, resolve_encoding};
pub use memory::MemorySource;

/// A table that yields its rows once, in file order.
///
/// `field_names` is fixed when the source is opened. `records` hands out a forward-only
/// iterator; rows already consumed are not produced again by a later call.
pub trait RecordSource {
    fn field_names(&self) -> &[String];
    fn records(&mut self) -> Box<dyn Iterator<Item = Result<Record>> + '_>;
}
