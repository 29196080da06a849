//! A minimal column-oriented table for batch workflows.
//!
//! [`Frame`] holds named, equal-length columns of JSON values. The
//! `*_in_frame` facade methods read input columns from a frame and return a
//! copy extended with a [`PREDICTIONS_COLUMN`], leaving the input frame
//! untouched.

use crate::error::{Error, Result};
use serde_json::Value;

/// Name of the column the `*_in_frame` methods append.
pub const PREDICTIONS_COLUMN: &str = "predictions";

/// An ordered collection of named, equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<(String, Vec<Value>)>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. The first column fixes the row count; later columns
    /// must match it, and names must be unique.
    pub fn push_column(&mut self, name: impl Into<String>, cells: Vec<Value>) -> Result<()> {
        let name = name.into();
        if self.columns.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::InvalidInput(format!(
                "Frame already has a column named '{}'",
                name
            )));
        }
        if let Some((first_name, first)) = self.columns.first() {
            if first.len() != cells.len() {
                return Err(Error::InvalidInput(format!(
                    "Column '{}' has {} rows but '{}' has {}",
                    name,
                    cells.len(),
                    first_name,
                    first.len()
                )));
            }
        }
        self.columns.push((name, cells));
        Ok(())
    }

    /// Append a column of strings.
    pub fn push_string_column(
        &mut self,
        name: impl Into<String>,
        cells: Vec<String>,
    ) -> Result<()> {
        self.push_column(name, cells.into_iter().map(Value::String).collect())
    }

    /// Cells of a column, by name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, cells)| cells.as_slice())
    }

    /// Cells of a column, or `Error::InvalidInput` when absent.
    pub fn require_column(&self, name: &str) -> Result<&[Value]> {
        self.column(name)
            .ok_or_else(|| Error::InvalidInput(format!("Frame has no column named '{}'", name)))
    }

    /// Cells of a column as `&str`, failing when the column is missing or
    /// any cell is not a string.
    pub fn string_column(&self, name: &str) -> Result<Vec<&str>> {
        self.require_column(name)?
            .iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.as_str().ok_or_else(|| {
                    Error::InvalidInput(format!(
                        "Column '{}' row {} is not a string",
                        name, row
                    ))
                })
            })
            .collect()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, cells)| cells.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// A copy of this frame with `cells` appended as the predictions column.
    pub(crate) fn with_predictions(&self, cells: Vec<Value>) -> Result<Frame> {
        let mut out = self.clone();
        out.push_column(PREDICTIONS_COLUMN, cells)?;
        Ok(out)
    }

    /// The frame rendered as a `{column: [stringified cells]}` map, the form
    /// the table question answering endpoint expects.
    pub fn string_table(&self) -> std::collections::HashMap<String, Vec<String>> {
        self.columns
            .iter()
            .map(|(name, cells)| {
                let rendered = cells
                    .iter()
                    .map(|cell| match cell {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                (name.clone(), rendered)
            })
            .collect()
    }
}
