//! Column resolver: one column definition against one record.

use crate::projection::{Cell, PositionId};
use crate::{Record, Value};

use super::{CellContext, ColumnDef};

/// Derive the cell for `column` on `record`.
///
/// Null or absent values are replaced by `fallback`. The id is the column id
/// when it has one, else `position`. Never fails: missing fields are normal.
pub fn resolve_cell(
    column: &ColumnDef,
    record: &Record,
    position: PositionId,
    fallback: Option<&str>,
) -> Cell {
    resolve_cell_with(column, record, || position.to_string(), fallback)
}

/// [`resolve_cell`] with the fallback id supplied by the caller.
pub(crate) fn resolve_cell_with(
    column: &ColumnDef,
    record: &Record,
    position: impl FnOnce() -> String,
    fallback: Option<&str>,
) -> Cell {
    let raw = column.accessor.read(record);
    let value = match fallback {
        Some(text) => raw.or(Value::from(text)),
        None => raw,
    };

    let id = match column.id() {
        Some(id) => id.to_string(),
        None => position(),
    };

    let cell = column.cell.as_ref().map(|render| {
        render(&CellContext {
            value: &value,
            record,
            id: &id,
        })
    });

    Cell { id, value, cell }
}
