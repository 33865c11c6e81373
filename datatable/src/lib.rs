//! Table data shaping.
//!
//! Derives renderable rows, header cells and sort order from a list of
//! records and a set of column definitions. The rendering layer reads the
//! published [`TableProjection`]; this crate never paints anything itself.

pub mod column;
pub mod engine;
pub mod error;
pub mod header;
pub mod projection;
pub mod record;
pub mod render;
pub mod sort;
pub mod source;
pub mod state;
pub mod table;
pub mod value;

pub use column::{ColumnDef, ColumnDefBuilder, resolve_cell, validate_columns};
pub use engine::{DeriveInput, derive};
pub use error::{ColumnDefError, SourceError};
pub use header::resolve_headers;
pub use projection::{Cell, HeaderCell, PositionId, Row, TableProjection};
pub use record::Record;
pub use render::{Deferred, Render, flex_render};
pub use sort::{SortBy, SortDirection, SortSpec, comparator, sort_order};
pub use source::{ColumnSource, FnSource};
pub use table::{Refresh, Table, TableId, TableOptions, TableStatus};
pub use value::Value;

pub mod prelude {
    pub use crate::column::{CellContext, ColumnDef, HeaderContext};
    pub use crate::projection::{Cell, HeaderCell, Row, TableProjection};
    pub use crate::record::Record;
    pub use crate::render::{Render, flex_render};
    pub use crate::sort::{SortBy, SortDirection, SortSpec};
    pub use crate::source::{ColumnSource, FnSource};
    pub use crate::table::{Refresh, Table, TableOptions, TableStatus};
    pub use crate::value::Value;
}
