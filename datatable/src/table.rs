//! Table instance: owns the inputs, runs derivation cycles and publishes the
//! projection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use tokio::sync::watch;

use crate::Record;
use crate::column::{ColumnDef, validate_columns};
use crate::engine::{DeriveInput, derive};
use crate::projection::TableProjection;
use crate::sort::{SortBy, SortSpec, sort_order, toggle};
use crate::source::ColumnSource;
use crate::state::State;

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Table configuration.
///
/// Deserializable so hosts can embed it in their own config files.
///
/// ```
/// use datatable::TableOptions;
///
/// let options = TableOptions::default().with_fallback("--");
/// assert_eq!(options.fallback.as_deref(), Some("--"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Shown in place of null or missing values. `None` leaves them empty.
    pub fallback: Option<String>,
}

impl TableOptions {
    /// Set the fallback text.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Lifecycle of the published projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStatus {
    /// Nothing derived yet.
    #[default]
    Empty,
    /// Inputs changed; waiting on column definitions.
    Pending,
    /// A projection is published for the current inputs.
    Ready,
}

/// Outcome of one [`Table::refresh`] cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Data or column definitions unavailable; previous output kept.
    NotReady,
    /// The current revision is already published.
    Unchanged,
    /// Inputs changed while waiting; the stale result was discarded.
    Superseded,
    /// A new projection was published for this revision.
    Published(u64),
}

/// Source records shared between the table and its rows.
pub type SharedData = Arc<Vec<Arc<Record>>>;

#[derive(Default)]
struct TableInner {
    /// Source records in caller order. `None` while loading.
    data: Option<SharedData>,
    sort: SortSpec,
    /// Working order from the last published cycle.
    working: Option<Arc<Vec<usize>>>,
    /// Column definitions from the last published cycle.
    columns: Option<Arc<Vec<ColumnDef>>>,
    /// Bumped on every input change.
    revision: u64,
    status: TableStatus,
}

impl TableInner {
    fn touch(&mut self) -> u64 {
        self.revision += 1;
        if self.data.is_some() {
            self.status = TableStatus::Pending;
        }
        self.revision
    }
}

/// A reactive table.
///
/// `Table` holds the source data, the sort spec and the column source, and
/// publishes a [`TableProjection`] derived from them. Input setters only
/// record the change; [`refresh`](Self::refresh) (or the [`run`](Self::run)
/// driver) performs the derivation.
///
/// # Example
///
/// ```
/// use datatable::{ColumnDef, Record, Refresh, SortBy, Table, TableOptions};
///
/// # futures::executor::block_on(async {
/// let table = Table::new(
///     vec![ColumnDef::key("firstName"), ColumnDef::key("lastName")],
///     TableOptions::default(),
/// );
/// table.set_data(Some(vec![
///     Record::new().set("firstName", "Reggie").set("lastName", "Watts"),
///     Record::new().set("firstName", "Kurt").set("lastName", "Jones"),
/// ]));
/// table.set_sort(Some(SortBy::asc("lastName")));
///
/// assert!(matches!(table.refresh().await, Refresh::Published(_)));
/// let projection = table.projection().unwrap();
/// assert_eq!(projection.row_groups[0].cells[0].value.to_string(), "Kurt");
/// # });
/// ```
#[derive(Clone)]
pub struct Table {
    id: TableId,
    source: Arc<dyn ColumnSource>,
    options: TableOptions,
    inner: Arc<RwLock<TableInner>>,
    /// Latest input revision, for drivers waiting on changes.
    revision: State<u64>,
    output: State<Option<Arc<TableProjection>>>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Create a table reading its columns from `source`.
    pub fn new(source: impl ColumnSource + 'static, options: TableOptions) -> Self {
        Self {
            id: TableId::new(),
            source: Arc::new(source),
            options,
            inner: Arc::new(RwLock::new(TableInner::default())),
            revision: State::new(0),
            output: State::new(None),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the source data. `None` marks the data as loading.
    pub fn set_data(&self, data: Option<Vec<Record>>) {
        let shared = data.map(|records| Arc::new(records.into_iter().map(Arc::new).collect()));
        self.set_shared_data(shared);
    }

    /// Replace the source data with an already shared list.
    ///
    /// Passing the list that is already installed is a no-op.
    pub fn set_shared_data(&self, data: Option<SharedData>) {
        if let Ok(mut guard) = self.inner.write() {
            let same = match (&guard.data, &data) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if same {
                return;
            }
            guard.data = data;
            let revision = guard.touch();
            self.revision.set(revision);
            log::debug!("{}: data changed (revision {})", self.id, revision);
        }
    }

    /// Get the source data.
    pub fn data(&self) -> Option<SharedData> {
        self.inner.read().ok().and_then(|g| g.data.clone())
    }

    /// Get the current sort spec.
    pub fn sort(&self) -> SortSpec {
        self.inner.read().ok().and_then(|g| g.sort.clone())
    }

    /// Set the sort spec. Setting the current spec again is a no-op.
    pub fn set_sort(&self, sort: SortSpec) {
        if let Ok(mut guard) = self.inner.write() {
            if guard.sort == sort {
                return;
            }
            guard.sort = sort;
            let revision = guard.touch();
            self.revision.set(revision);
            log::debug!("{}: sort changed to {:?} (revision {})", self.id, guard.sort, revision);
        }
    }

    /// Toggle sort for a column.
    ///
    /// If the column is already sorted, toggles the direction.
    /// If sorting a different column, sorts ascending.
    /// Returns the new sort state.
    pub fn toggle_sort(&self, id: &str) -> SortBy {
        let next = toggle(self.sort().as_ref(), id);
        self.set_sort(Some(next.clone()));
        next
    }

    /// Clear sort state.
    pub fn clear_sort(&self) {
        self.set_sort(None);
    }

    // -------------------------------------------------------------------------
    // Outputs
    // -------------------------------------------------------------------------

    /// Get the current status.
    pub fn status(&self) -> TableStatus {
        self.inner.read().map(|g| g.status).unwrap_or_default()
    }

    /// Get the latest input revision.
    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    /// Get the published projection.
    pub fn projection(&self) -> Option<Arc<TableProjection>> {
        self.output.get()
    }

    /// Subscribe to published projections.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<TableProjection>>> {
        self.output.subscribe()
    }

    /// Working order of the published projection: source indices in
    /// display order.
    pub fn working(&self) -> Option<Arc<Vec<usize>>> {
        self.inner.read().ok().and_then(|g| g.working.clone())
    }

    /// Column definitions of the published projection.
    pub fn columns(&self) -> Option<Arc<Vec<ColumnDef>>> {
        self.inner.read().ok().and_then(|g| g.columns.clone())
    }

    // -------------------------------------------------------------------------
    // Derivation
    // -------------------------------------------------------------------------

    /// Run one derivation cycle.
    ///
    /// Awaits the column source, sorts the working order, derives the
    /// projection and publishes it. Column sets with a repeated id are
    /// rejected like a failed source. If inputs change while the source is
    /// pending, the result is dropped and [`Refresh::Superseded`] returned;
    /// the next cycle picks up the latest inputs.
    pub async fn refresh(&self) -> Refresh {
        let published = self.output.with(|p| p.as_ref().map(|p| p.revision));

        let (revision, data, sort) = {
            let Ok(mut guard) = self.inner.write() else {
                return Refresh::NotReady;
            };
            if published == Some(guard.revision) {
                return Refresh::Unchanged;
            }
            let Some(data) = guard.data.clone() else {
                log::debug!("{}: no data yet, skipping", self.id);
                return Refresh::NotReady;
            };
            guard.status = TableStatus::Pending;
            (guard.revision, data, guard.sort.clone())
        };

        let columns = match self.source.columns().await {
            Ok(columns) if !columns.is_empty() => columns,
            Ok(_) => {
                log::debug!("{}: column source returned nothing, skipping", self.id);
                self.settle(revision);
                return Refresh::NotReady;
            }
            Err(e) => {
                log::warn!("{}: column source failed: {}", self.id, e);
                self.settle(revision);
                return Refresh::NotReady;
            }
        };
        if let Err(e) = validate_columns(&columns) {
            log::warn!("{}: rejected column definitions: {}", self.id, e);
            self.settle(revision);
            return Refresh::NotReady;
        }

        let Ok(mut guard) = self.inner.write() else {
            return Refresh::NotReady;
        };
        if guard.revision != revision {
            log::debug!(
                "{}: revision {} superseded by {}, discarding",
                self.id,
                revision,
                guard.revision
            );
            return Refresh::Superseded;
        }

        let working = sort_order(data.as_slice(), sort.as_ref(), &columns);
        let projection = derive(DeriveInput {
            working: &working,
            original: data.as_slice(),
            columns: &columns,
            sort: sort.as_ref(),
            fallback: self.options.fallback.as_deref(),
            revision,
        });

        guard.working = Some(Arc::new(working));
        guard.columns = Some(Arc::new(columns));
        guard.status = TableStatus::Ready;
        self.output.set(Some(Arc::new(projection)));

        Refresh::Published(revision)
    }

    /// Drive refreshes from input changes until the task is dropped.
    ///
    /// Changes that arrive while a cycle is awaiting columns collapse into
    /// one follow-up cycle on the latest inputs.
    pub async fn run(&self) {
        let mut changes = self.revision.subscribe();
        loop {
            self.refresh().await;
            if changes.changed().await.is_err() {
                break;
            }
        }
    }

    /// Leave `Pending` after a skipped cycle, unless inputs moved on.
    fn settle(&self, revision: u64) {
        if let Ok(mut guard) = self.inner.write()
            && guard.revision == revision
            && guard.status == TableStatus::Pending
        {
            guard.status = if self.output.with(Option::is_some) {
                TableStatus::Ready
            } else {
                TableStatus::Empty
            };
        }
    }
}
