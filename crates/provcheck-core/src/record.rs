//! Key/value result files.
//!
//! A result file is a CSV document where each row carries a field name in the
//! first column and its value in the second. Anything after the second column
//! is ignored. Only three fields matter to the checks:
//!
//! | field                        | kind    |
//! |------------------------------|---------|
//! | `Total test cases`           | integer |
//! | `Passed`                     | integer |
//! | `Provisioned Device Number`  | text    |

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::errors::RecordError;

pub const TOTAL_TEST_CASES: &str = "Total test cases";
pub const PASSED: &str = "Passed";
pub const PROVISIONED_DEVICE_NUMBER: &str = "Provisioned Device Number";

const NUMERIC_FIELDS: [&str; 2] = [TOTAL_TEST_CASES, PASSED];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }
}

/// How values of the numeric fields are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coercion {
    /// `Total test cases` and `Passed` become integers; an occurrence that is
    /// not an integer is dropped and leaves any earlier value in place.
    #[default]
    Numeric,
    /// Every value is kept as trimmed text.
    Verbatim,
}

/// Parsed result file. Later rows override earlier rows with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl ResultRecord {
    pub fn from_path(path: &Path, coercion: Coercion) -> Result<Self, RecordError> {
        let reader = csv_reader()
            .from_path(path)
            .map_err(|source| RecordError::FileAccess {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_rows(reader, coercion).map_err(|source| RecordError::FileAccess {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_reader<R: Read>(reader: R, coercion: Coercion) -> Result<Self, csv::Error> {
        Self::from_rows(csv_reader().from_reader(reader), coercion)
    }

    fn from_rows<R: Read>(
        mut rows: csv::Reader<R>,
        coercion: Coercion,
    ) -> Result<Self, csv::Error> {
        let mut record = Self::default();
        for row in rows.records() {
            let row = row?;
            let (Some(key), Some(value)) = (row.get(0), row.get(1)) else {
                continue;
            };
            record.insert_row(key, value, coercion);
        }
        Ok(record)
    }

    fn insert_row(&mut self, key: &str, value: &str, coercion: Coercion) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let value = value.trim();

        let field = if coercion == Coercion::Numeric && NUMERIC_FIELDS.contains(&key) {
            match value.parse::<i64>() {
                Ok(n) => FieldValue::Int(n),
                Err(_) => {
                    tracing::debug!(key, value, "dropping non-integer value");
                    return;
                }
            }
        } else {
            FieldValue::Text(value.to_string())
        };
        self.fields.insert(key.to_string(), field);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(FieldValue::as_int)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    pub fn total_test_cases(&self) -> Option<i64> {
        self.int(TOTAL_TEST_CASES)
    }

    pub fn passed(&self) -> Option<i64> {
        self.int(PASSED)
    }

    pub fn device_number(&self) -> Option<&str> {
        self.text(PROVISIONED_DEVICE_NUMBER)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn csv_reader() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}
