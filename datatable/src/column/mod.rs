//! Column definitions and the per-cell resolver.

mod def;
mod resolve;

pub use def::{
    Accessor, AccessorFn, CellContext, CellFn, ColumnDef, ColumnDefBuilder, Header, HeaderContext,
    HeaderFn, validate_columns,
};
pub use resolve::resolve_cell;
pub(crate) use resolve::resolve_cell_with;
