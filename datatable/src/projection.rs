//! Derived table output: rows, cells and headers.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::render::{Render, flex_render};
use crate::sort::SortDirection;
use crate::{Record, Value};

/// Fallback identifier for a cell, built from its position.
///
/// Displays as `"{row}-{column}"`. The engine suffixes it with `'` when a
/// declared column id has the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionId {
    pub row: usize,
    pub column: usize,
}

impl PositionId {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

/// Suffix `candidate` with `'` until no declared column id equals it.
///
/// Fallback ids are digits and dashes, so two different candidates never
/// meet after suffixing.
pub(crate) fn unclaimed_id(mut candidate: String, declared: &HashSet<&str>) -> String {
    while declared.contains(candidate.as_str()) {
        candidate.push('\'');
    }
    candidate
}

/// One derived (row, column) cell.
///
/// `value` is always serializable. `cell` holds the optional render payload;
/// closures inside it are skipped by serialization and equality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Column id, or the position id when the column has none.
    pub id: String,
    /// The resolved value, after fallback substitution.
    pub value: Value,
    /// Render payload from the column's cell function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<Render>,
}

impl Cell {
    /// The text the rendering layer paints for this cell.
    pub fn display(&self) -> String {
        flex_render(self.cell.as_ref(), &self.value)
    }
}

/// One derived header cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    /// Column id, or the column index when the column has none. An index
    /// that equals a declared id gets a `'` suffix.
    pub id: String,
    /// Header payload; `None` renders as empty.
    pub header: Option<Render>,
    /// Active sort direction when the table is sorted by this column.
    pub sort_order: Option<SortDirection>,
}

impl HeaderCell {
    /// Whether the table is sorted by this column.
    pub fn is_sorted_by(&self) -> bool {
        self.sort_order.is_some()
    }

    /// The text the rendering layer paints for this header.
    pub fn display(&self) -> String {
        flex_render(self.header.as_ref(), &Value::Null)
    }
}

/// One derived row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    /// The untouched source record for this row.
    pub original: Arc<Record>,
    /// Position of `original` in the source data.
    pub index: usize,
    /// One cell per column, in column order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Find a cell by id.
    pub fn cell(&self, id: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Raw cell values, in column order.
    pub fn values(&self) -> Vec<Value> {
        self.cells.iter().map(|c| c.value.clone()).collect()
    }
}

/// The published table: rows and headers from the same derivation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProjection {
    pub row_groups: Vec<Row>,
    pub header_groups: Vec<HeaderCell>,
    /// Input revision this projection was derived from.
    pub revision: u64,
}

impl TableProjection {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_groups.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.row_groups.is_empty()
    }

    /// Find a header by column id.
    pub fn header(&self, id: &str) -> Option<&HeaderCell> {
        self.header_groups.iter().find(|h| h.id == id)
    }
}
