//! Tabular records handed over by the workbook loader
//!
//! A [`Workbook`] is an ordered list of named [`Sheet`]s. Each sheet declares its
//! own columns and owns its rows as [`RawRecord`]s. Records are immutable once
//! built; absent cells are `None` and only become the "not available" text
//! through an explicit [`FieldAccessor`].

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder rendered for absent cells
pub const NOT_AVAILABLE: &str = "No disponible";

/// One named cell of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: Option<String>,
}

/// Ordered column name → cell value mapping for one spreadsheet row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<Field>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs, keeping their order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.push(name, value);
        }
        record
    }

    /// Append a cell. A repeated column name replaces the earlier value in place.
    pub fn push(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) {
        let name = name.into();
        let value = value.map(Into::into);
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Cell value, or `None` when the column is missing or the cell is absent
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_deref())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Present cell values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Serialized as a JSON object in column order; absent cells become `null`.
impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            map.serialize_entry(&field.name, &field.value)?;
        }
        map.end()
    }
}

/// Typed access to one column with a declared fallback
///
/// Makes the "missing → placeholder" policy explicit instead of repeating
/// ad hoc lookups with defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccessor {
    column: &'static str,
    default: &'static str,
}

impl FieldAccessor {
    pub const fn new(column: &'static str, default: &'static str) -> Self {
        Self { column, default }
    }

    /// Accessor falling back to [`NOT_AVAILABLE`]
    pub const fn or_placeholder(column: &'static str) -> Self {
        Self::new(column, NOT_AVAILABLE)
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Read the cell, or the declared default when missing
    pub fn read<'r>(&self, record: &'r RawRecord) -> &'r str {
        record.get(self.column).unwrap_or(self.default)
    }

    /// Read the cell without applying the default
    pub fn read_raw<'r>(&self, record: &'r RawRecord) -> Option<&'r str> {
        record.get(self.column)
    }
}

/// One named sheet with its own column schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            records: Vec::new(),
        }
    }

    /// Append a row given as cells aligned with `self.columns`.
    ///
    /// Missing trailing cells are treated as absent; extra cells are ignored.
    pub fn push_row(&mut self, cells: Vec<Option<String>>) {
        let mut cells = cells.into_iter();
        let record = RawRecord::from_pairs(
            self.columns
                .iter()
                .map(|column| (column.clone(), cells.next().flatten())),
        );
        self.records.push(record);
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered collection of sheets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}
