//! Header resolver.

use std::collections::HashSet;

use crate::column::{ColumnDef, Header, HeaderContext};
use crate::projection::{HeaderCell, unclaimed_id};
use crate::render::Render;
use crate::sort::SortBy;

/// Derive one header cell per column, in column order.
///
/// Each header carries the sort state of its column. Header functions are
/// called with that state; labels are used as-is; columns without a header
/// get `None`. Columns without an id use their index, kept distinct from
/// every declared id.
pub fn resolve_headers(columns: &[ColumnDef], sort: Option<&SortBy>) -> Vec<HeaderCell> {
    let declared: HashSet<&str> = columns.iter().filter_map(ColumnDef::id).collect();

    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let id = column.id();
            let sort_order = match (sort, id) {
                (Some(sort), Some(id)) => sort.direction_for(id),
                _ => None,
            };

            let header = column.header().map(|header| match header {
                Header::Label(label) => Render::from(label.as_str()),
                Header::Render(f) => f(&HeaderContext {
                    is_sorted_by: sort_order.is_some(),
                    sort_order,
                    id,
                }),
            });

            HeaderCell {
                id: match id {
                    Some(id) => id.to_string(),
                    None => unclaimed_id(index.to_string(), &declared),
                },
                header,
                sort_order,
            }
        })
        .collect()
}
