use std::fmt;

use serde::Serialize;

use crate::config::ColumnConfig;
use crate::error::SanityError;
use crate::schema::require_columns;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which of the two input tables a check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableRole {
    Reference,
    Output,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "test"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// Header row plus string records, as read from a delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Normalize an identifier for set comparison.
///
/// Surrounding whitespace is ignored and integer identifiers compare by
/// value, so `"007"` and `"7"` are the same key.
pub fn normalize_id(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(n) => n.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

/// The authoritative table. Only the identifier column is retained.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    pub ids: Vec<String>,
}

impl ReferenceTable {
    pub fn from_raw(raw: RawTable, columns: &ColumnConfig) -> Result<Self, SanityError> {
        let positions = require_columns(TableRole::Reference, &raw.headers, &[columns.index.as_str()])?;
        let index_pos = positions[0];

        let ids = raw
            .records
            .into_iter()
            .map(|mut record| take_field(&mut record, index_pos))
            .collect();

        Ok(Self { ids })
    }
}

// ---------------------------------------------------------------------------
// Output table
// ---------------------------------------------------------------------------

/// One row of the table under validation.
///
/// `extra` holds the pass-through columns in header order, minus the
/// identifier and prediction columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub index: String,
    pub prediction: String,
    pub extra: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct OutputTable {
    headers: Vec<String>,
    index_pos: usize,
    prediction_pos: usize,
    pub rows: Vec<OutputRow>,
}

impl OutputTable {
    pub fn from_raw(raw: RawTable, columns: &ColumnConfig) -> Result<Self, SanityError> {
        let positions = require_columns(
            TableRole::Output,
            &raw.headers,
            &[columns.index.as_str(), columns.prediction.as_str()],
        )?;
        let (index_pos, prediction_pos) = (positions[0], positions[1]);

        let rows = raw
            .records
            .into_iter()
            .map(|record| {
                let mut index = String::new();
                let mut prediction = String::new();
                let mut extra = Vec::with_capacity(record.len().saturating_sub(2));
                for (pos, field) in record.into_iter().enumerate() {
                    if pos == index_pos {
                        index = field;
                    } else if pos == prediction_pos {
                        prediction = field;
                    } else {
                        extra.push(field);
                    }
                }
                OutputRow { index, prediction, extra }
            })
            .collect();

        Ok(Self {
            headers: raw.headers,
            index_pos,
            prediction_pos,
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.index.as_str())
    }

    /// Reassemble each row into header order for writing.
    pub fn records(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(move |row| {
            let mut extra = row.extra.iter();
            (0..self.headers.len())
                .map(|pos| {
                    if pos == self.index_pos {
                        row.index.as_str()
                    } else if pos == self.prediction_pos {
                        row.prediction.as_str()
                    } else {
                        extra.next().map(|s| s.as_str()).unwrap_or("")
                    }
                })
                .collect()
        })
    }
}

fn take_field(record: &mut [String], pos: usize) -> String {
    record.get_mut(pos).map(std::mem::take).unwrap_or_default()
}
