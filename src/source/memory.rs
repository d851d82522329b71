use std::collections::VecDeque;
use std::sync::Arc;

use super::RecordSource;
use crate::errors::Result;
use crate::record::{FieldIndex, Record, Value};

/// Rows already decoded by the caller.
#[derive(Debug, Default)]
pub struct MemorySource {
    index: Arc<FieldIndex>,
    rows: VecDeque<Vec<Value>>,
}

impl MemorySource {
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { index: Arc::new(FieldIndex::new(field_names)), rows: VecDeque::new() }
    }

    /// Append a row given positionally. Short rows read as missing trailing fields.
    pub fn push_row(&mut self, values: Vec<Value>) {
        self.rows.push_back(values);
    }

    /// Append a row given as name/value pairs; unnamed fields are null, unknown names ignored.
    pub fn push_pairs<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut values = vec![Value::Null; self.index.len()];
        for (name, value) in pairs {
            if let Some(i) = self.index.resolve(name) {
                values[i] = value;
            }
        }
        self.rows.push_back(values);
    }

    #[must_use]
    pub fn with_row(mut self, values: Vec<Value>) -> Self {
        self.push_row(values);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl RecordSource for MemorySource {
    fn field_names(&self) -> &[String] {
        self.index.names()
    }

    fn records(&mut self) -> Box<dyn Iterator<Item = Result<Record>> + '_> {
        let index = Arc::clone(&self.index);
        Box::new(
            std::iter::from_fn(move || self.rows.pop_front())
                .map(move |values| Ok(Record::new(Arc::clone(&index), values))),
        )
    }
}
