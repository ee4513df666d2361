//! Plain tabular record set (no geometry).

use serde_json::Value;

/// One row of attribute values keyed by column name, in column order
pub type Attributes = serde_json::Map<String, Value>;

/// A tabular record set: ordered column names plus rows of attributes.
///
/// Rows are allowed to omit columns; a missing cell reads as absent rather
/// than `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Attributes>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, registering any columns not seen before
    pub fn push_row(&mut self, row: Attributes) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Attributes] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell values of one column, row by row
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }
}

impl FromIterator<Attributes> for Table {
    fn from_iter<T: IntoIterator<Item = Attributes>>(iter: T) -> Self {
        let mut table = Table::default();
        for row in iter {
            table.push_row(row);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_push_row_extends_columns() {
        let mut table = Table::new(["place_id"]);
        table.push_row(row(json!({"place_id": 1, "lat": 1.0})));
        table.push_row(row(json!({"place_id": 2, "name": "cafe"})));

        assert_eq!(table.columns(), &["place_id", "lat", "name"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_column_reads_missing_as_none() {
        let table: Table = vec![
            row(json!({"place_id": 1, "lat": 1.5})),
            row(json!({"place_id": 2})),
        ]
        .into_iter()
        .collect();

        let lats: Vec<Option<&Value>> = table.column("lat").collect();
        assert_eq!(lats, vec![Some(&json!(1.5)), None]);
    }
}
