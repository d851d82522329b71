use std::collections::HashMap;
use std::sync::Arc;

use super::types::Value;

/// Field names of a table plus a lookup that tolerates case and punctuation drift.
///
/// Lookups try the exact name first, then the lowercase name, then a normalized key
/// (lowercase with everything but ASCII letters and digits removed). When two fields
/// collide on a key the earlier one wins.
#[derive(Debug, Clone, Default)]
pub struct FieldIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl FieldIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut lookup = HashMap::with_capacity(names.len() * 3);
        for (i, name) in names.iter().enumerate() {
            lookup.entry(name.clone()).or_insert(i);
        }
        for (i, name) in names.iter().enumerate() {
            lookup.entry(name.to_lowercase()).or_insert(i);
        }
        for (i, name) in names.iter().enumerate() {
            lookup.entry(normalize_key(name)).or_insert(i);
        }
        Self { names, lookup }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `field` in the table, if any spelling of it matches.
    #[must_use]
    pub fn resolve(&self, field: &str) -> Option<usize> {
        self.lookup
            .get(field)
            .or_else(|| self.lookup.get(&field.to_lowercase()))
            .or_else(|| self.lookup.get(&normalize_key(field)))
            .copied()
    }
}

fn normalize_key(k: &str) -> String {
    k.trim().to_lowercase().chars().filter(char::is_ascii_alphanumeric).collect()
}

/// One decoded row, positionally aligned with its table's [`FieldIndex`].
#[derive(Debug, Clone)]
pub struct Record {
    index: Arc<FieldIndex>,
    values: Vec<Value>,
}

impl Record {
    #[must_use]
    pub fn new(index: Arc<FieldIndex>, values: Vec<Value>) -> Self {
        Self { index, values }
    }

    /// Value of `field`, `None` when the table has no such field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.index.resolve(field).and_then(|i| self.values.get(i))
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn field_names(&self) -> &[String] {
        self.index.names()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.index.names().iter().map(String::as_str).zip(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> Arc<FieldIndex> {
        Arc::new(FieldIndex::new(["STCODIGO", "St_Nom Fam", "precio"]))
    }

    #[test]
    fn resolve_exact_then_lowercase_then_normalized() {
        let idx = index();
        assert_eq!(idx.resolve("STCODIGO"), Some(0));
        assert_eq!(idx.resolve("stcodigo"), Some(0));
        assert_eq!(idx.resolve("STNOMFAM"), Some(1));
        assert_eq!(idx.resolve("PRECIO"), Some(2));
        assert_eq!(idx.resolve("missing"), None);
    }

    #[test]
    fn first_field_wins_on_collision() {
        let idx = FieldIndex::new(["code", "CODE"]);
        assert_eq!(idx.resolve("CODE"), Some(1));
        assert_eq!(idx.resolve("Code"), Some(0));
    }

    #[test]
    fn record_get_handles_short_rows() {
        let rec = Record::new(index(), vec![Value::from("A1")]);
        assert_eq!(rec.get("stcodigo"), Some(&Value::from("A1")));
        assert_eq!(rec.get("precio"), None);
        assert_eq!(rec.iter().count(), 1);
    }
}
