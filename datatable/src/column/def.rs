//! Column definitions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ColumnDefError;
use crate::render::Render;
use crate::sort::SortDirection;
use crate::{Record, Value};

/// Reads a column's value from a record.
pub type AccessorFn = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// Produces a cell's render payload.
pub type CellFn = Arc<dyn Fn(&CellContext<'_>) -> Render + Send + Sync>;

/// Produces a header's render payload from the column's sort state.
pub type HeaderFn = Arc<dyn Fn(&HeaderContext<'_>) -> Render + Send + Sync>;

/// Arguments handed to a [`CellFn`].
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    /// The resolved value, after fallback substitution.
    pub value: &'a Value,
    /// The source record for this row.
    pub record: &'a Record,
    /// The cell id.
    pub id: &'a str,
}

/// Arguments handed to a [`HeaderFn`].
#[derive(Debug, Clone, Copy)]
pub struct HeaderContext<'a> {
    /// Whether the table is currently sorted by this column.
    pub is_sorted_by: bool,
    /// The active direction, when sorted by this column.
    pub sort_order: Option<SortDirection>,
    /// The column id, if it has one.
    pub id: Option<&'a str>,
}

/// How a column reads its value.
#[derive(Clone)]
pub enum Accessor {
    /// Read a field of the record by name.
    Key(String),
    /// Compute the value from the whole record.
    Fn(AccessorFn),
}

impl Accessor {
    /// Read the raw value from a record. Absent fields are `Null`.
    pub fn read(&self, record: &Record) -> Value {
        match self {
            Self::Key(key) => record.value(key),
            Self::Fn(f) => f(record),
        }
    }

    /// The accessor key, for key accessors.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Fn(_) => None,
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.debug_tuple("Key").field(key).finish(),
            Self::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// A column header.
#[derive(Clone)]
pub enum Header {
    /// Fixed header text.
    Label(String),
    /// Header computed from the column's sort state.
    Render(HeaderFn),
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.debug_tuple("Label").field(label).finish(),
            Self::Render(_) => f.write_str("Render(..)"),
        }
    }
}

/// Column configuration.
///
/// A column reads one value per record through its [`Accessor`], and may
/// override how the cell and header are rendered.
///
/// # Examples
///
/// ```
/// use datatable::{ColumnDef, Render, Value};
///
/// let columns = vec![
///     ColumnDef::key("firstName").with_header("First name"),
///     ColumnDef::builder()
///         .id("fullName")
///         .accessor_fn(|r| {
///             Value::from(format!("{} {}", r.value("firstName"), r.value("lastName")))
///         })
///         .cell(|cx| Render::from(cx.value.to_string().to_uppercase()))
///         .build()
///         .unwrap(),
/// ];
/// assert_eq!(columns[1].id(), Some("fullName"));
/// ```
#[derive(Clone)]
pub struct ColumnDef {
    /// Explicit id; used as key and as sort target.
    pub(crate) id: Option<String>,
    pub(crate) accessor: Accessor,
    pub(crate) cell: Option<CellFn>,
    pub(crate) header: Option<Header>,
}

impl ColumnDef {
    /// Column reading a record field by name.
    ///
    /// Not validated here: an empty key is only caught by
    /// [`validate_columns`] (and so by [`Table::refresh`](crate::Table::refresh)).
    /// Use [`builder`](Self::builder) to fail at construction.
    pub fn key(key: impl Into<String>) -> Self {
        Self::from_accessor(Accessor::Key(key.into()))
    }

    /// Column computing its value from the record.
    ///
    /// Give it an id with [`with_id`](Self::with_id) if it should be
    /// sortable.
    pub fn computed(f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Self {
        Self::from_accessor(Accessor::Fn(Arc::new(f)))
    }

    fn from_accessor(accessor: Accessor) -> Self {
        Self {
            id: None,
            accessor,
            cell: None,
            header: None,
        }
    }

    /// Start building a column with validation.
    pub fn builder() -> ColumnDefBuilder {
        ColumnDefBuilder::default()
    }

    /// Set the explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a fixed header label.
    pub fn with_header(mut self, label: impl Into<String>) -> Self {
        self.header = Some(Header::Label(label.into()));
        self
    }

    /// Set a header render function.
    pub fn with_header_fn(
        mut self,
        f: impl Fn(&HeaderContext<'_>) -> Render + Send + Sync + 'static,
    ) -> Self {
        self.header = Some(Header::Render(Arc::new(f)));
        self
    }

    /// Set a cell render function.
    pub fn with_cell(
        mut self,
        f: impl Fn(&CellContext<'_>) -> Render + Send + Sync + 'static,
    ) -> Self {
        self.cell = Some(Arc::new(f));
        self
    }

    /// The column id: the explicit id, else the accessor key.
    ///
    /// Computed columns without an explicit id have none, and so can't be
    /// sort targets.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or_else(|| self.accessor.key())
    }

    /// The accessor.
    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    /// The header, if any.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Whether a cell render function is set.
    pub fn has_cell(&self) -> bool {
        self.cell.is_some()
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("accessor", &self.accessor)
            .field("cell", &self.cell.as_ref().map(|_| ".."))
            .field("header", &self.header)
            .finish()
    }
}

/// Builder for [`ColumnDef`] that rejects malformed accessors.
#[derive(Default)]
pub struct ColumnDefBuilder {
    id: Option<String>,
    accessor_key: Option<String>,
    accessor_fn: Option<AccessorFn>,
    cell: Option<CellFn>,
    header: Option<Header>,
}

impl ColumnDefBuilder {
    /// Set the explicit id.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Read the value from this record field.
    pub fn accessor_key(mut self, key: impl Into<String>) -> Self {
        self.accessor_key = Some(key.into());
        self
    }

    /// Compute the value from the record.
    pub fn accessor_fn(mut self, f: impl Fn(&Record) -> Value + Send + Sync + 'static) -> Self {
        self.accessor_fn = Some(Arc::new(f));
        self
    }

    /// Set a fixed header label.
    pub fn header(mut self, label: impl Into<String>) -> Self {
        self.header = Some(Header::Label(label.into()));
        self
    }

    /// Set a header render function.
    pub fn header_fn(
        mut self,
        f: impl Fn(&HeaderContext<'_>) -> Render + Send + Sync + 'static,
    ) -> Self {
        self.header = Some(Header::Render(Arc::new(f)));
        self
    }

    /// Set a cell render function.
    pub fn cell(mut self, f: impl Fn(&CellContext<'_>) -> Render + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(f));
        self
    }

    /// Build the column.
    ///
    /// Fails unless exactly one of accessor key / accessor function is set.
    pub fn build(self) -> Result<ColumnDef, ColumnDefError> {
        let accessor = match (self.accessor_key, self.accessor_fn) {
            (Some(_), Some(_)) => {
                return Err(ColumnDefError::ConflictingAccessor { id: self.id });
            }
            (None, None) => return Err(ColumnDefError::MissingAccessor { id: self.id }),
            (Some(key), None) if key.is_empty() => {
                return Err(ColumnDefError::EmptyAccessorKey { id: self.id });
            }
            (Some(key), None) => Accessor::Key(key),
            (None, Some(f)) => Accessor::Fn(f),
        };

        Ok(ColumnDef {
            id: self.id,
            accessor,
            cell: self.cell,
            header: self.header,
        })
    }
}

/// Check a column set: no empty accessor keys, and no two columns sharing
/// an id.
///
/// Columns without an id skip the id check; they get positional ids when
/// derived.
pub fn validate_columns(columns: &[ColumnDef]) -> Result<(), ColumnDefError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        if column.accessor.key() == Some("") {
            return Err(ColumnDefError::EmptyAccessorKey {
                id: column.id.clone(),
            });
        }
        if let Some(id) = column.id()
            && let Some(first) = seen.insert(id, index)
        {
            return Err(ColumnDefError::DuplicateId {
                id: id.to_string(),
                first,
                second: index,
            });
        }
    }
    Ok(())
}
