//! Table derivation engine.
//!
//! Builds a complete [`TableProjection`] from the source records, the working
//! order and the column definitions. Every call is a full rebuild; there is
//! no incremental patching.

use std::collections::HashSet;
use std::sync::Arc;

use crate::Record;
use crate::column::{ColumnDef, resolve_cell_with};
use crate::header::resolve_headers;
use crate::projection::{PositionId, Row, TableProjection, unclaimed_id};
use crate::sort::SortBy;

/// Inputs for one derivation.
#[derive(Debug, Clone, Copy)]
pub struct DeriveInput<'a> {
    /// Working order: `working[i]` is the source index shown at row `i`.
    pub working: &'a [usize],
    /// Source records, in caller order.
    pub original: &'a [Arc<Record>],
    pub columns: &'a [ColumnDef],
    pub sort: Option<&'a SortBy>,
    /// Substitute for null/absent values.
    pub fallback: Option<&'a str>,
    /// Revision stamped on the projection.
    pub revision: u64,
}

/// Derive rows and headers.
///
/// Row `i` is built from `original[working[i]]`, so `Row::original` is always
/// the unsorted source record. Working indices outside `original` are skipped.
/// Position ids never repeat a declared column id.
pub fn derive(input: DeriveInput<'_>) -> TableProjection {
    let declared: HashSet<&str> = input.columns.iter().filter_map(ColumnDef::id).collect();
    let mut row_groups = Vec::with_capacity(input.working.len());

    for (i, &source) in input.working.iter().enumerate() {
        let Some(original) = input.original.get(source) else {
            log::warn!(
                "Working index {} out of range ({} records), skipping row",
                source,
                input.original.len()
            );
            continue;
        };

        let cells = input
            .columns
            .iter()
            .enumerate()
            .map(|(j, column)| {
                let position = || unclaimed_id(PositionId::new(i, j).to_string(), &declared);
                resolve_cell_with(column, original, position, input.fallback)
            })
            .collect();

        row_groups.push(Row {
            original: Arc::clone(original),
            index: source,
            cells,
        });
    }

    let header_groups = resolve_headers(input.columns, input.sort);

    log::debug!(
        "Derived {} rows x {} columns (revision {})",
        row_groups.len(),
        input.columns.len(),
        input.revision
    );

    TableProjection {
        row_groups,
        header_groups,
        revision: input.revision,
    }
}
