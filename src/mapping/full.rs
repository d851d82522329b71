use super::RowMapper;
use crate::normalize::normalize_value;
use crate::record::Record;

/// Every source field, in table order, normalized.
#[derive(Debug, Clone)]
pub struct FullMapper {
    header: Vec<String>,
}

impl FullMapper {
    #[must_use]
    pub fn new(field_names: &[String]) -> Self {
        Self { header: field_names.to_vec() }
    }
}

impl RowMapper for FullMapper {
    fn header(&self) -> Vec<String> {
        self.header.clone()
    }

    fn map_record(&self, rec: &Record) -> Vec<String> {
        (0..self.header.len()).map(|i| normalize_value(rec.values().get(i)).to_string()).collect()
    }
}
