mod labelled;
mod number;
mod row;

pub use labelled::{extract, CountPattern, ExtractionPattern};
pub use number::normalize;
pub use row::{map_rows, Column, ColumnSpec};

use indexmap::IndexMap;

/// Value written for a field that a record does not carry.
pub const ABSENT_VALUE: &str = "0";

/// Ordered field name to cleaned value mapping for one scraped entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    fields: IndexMap<&'static str, String>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Values in `header` order, with [`ABSENT_VALUE`] for missing fields.
    pub fn values_for<'a>(&'a self, header: &'a [&'static str]) -> impl Iterator<Item = &'a str> {
        header
            .iter()
            .map(move |field| self.get(field).unwrap_or(ABSENT_VALUE))
    }

    /// Header fields this record does not carry.
    pub fn missing<'a>(&'a self, header: &'a [&'static str]) -> Vec<&'static str> {
        header
            .iter()
            .copied()
            .filter(|field| !self.contains(field))
            .collect()
    }
}
