//! Sort specification and the record comparator.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::column::{Accessor, ColumnDef};
use crate::{Record, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Apply this direction to a natural-order comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// The single active sort column.
///
/// Serializes as a one-entry map, e.g. `{"lastName": "asc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortBy {
    pub id: String,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn new(id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            id: id.into(),
            direction,
        }
    }

    /// Ascending sort on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self::new(id, SortDirection::Asc)
    }

    /// Descending sort on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self::new(id, SortDirection::Desc)
    }

    /// The direction for `id`, if this sort targets it.
    pub fn direction_for(&self, id: &str) -> Option<SortDirection> {
        (self.id == id).then_some(self.direction)
    }
}

impl Serialize for SortBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.id, &self.direction)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = HashMap::<String, SortDirection>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(D::Error::custom(format!(
                "expected exactly one sort column, got {}",
                map.len()
            )));
        }
        map.into_iter()
            .next()
            .map(|(id, direction)| SortBy { id, direction })
            .ok_or_else(|| D::Error::custom("empty sort map"))
    }
}

/// Sort state: `None` leaves rows in source order.
pub type SortSpec = Option<SortBy>;

/// Header-click sort cycling.
///
/// Sorting the same column again flips its direction; a different column
/// starts ascending.
pub fn toggle(current: Option<&SortBy>, id: &str) -> SortBy {
    match current {
        Some(sort) if sort.id == id => SortBy::new(id, sort.direction.reverse()),
        _ => SortBy::asc(id),
    }
}

/// Compare two raw sort keys. Nulls go last in either direction.
fn compare_keys(a: &Value, b: &Value, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.natural_cmp(b)),
    }
}

/// Find the accessor the sort targets.
fn target<'a>(sort: &SortBy, columns: &'a [ColumnDef]) -> Option<&'a Accessor> {
    columns
        .iter()
        .find(|c| c.id() == Some(sort.id.as_str()))
        .map(|c| c.accessor())
}

/// Build the record ordering for a sort spec.
///
/// Returns `None` when there's nothing to sort by: no sort is set, or it
/// names an id no column resolves to. Callers treat that as identity.
pub fn comparator<'a>(
    sort: Option<&SortBy>,
    columns: &'a [ColumnDef],
) -> Option<impl Fn(&Record, &Record) -> Ordering + use<'a>> {
    let sort = sort?;
    let accessor = target(sort, columns)?;
    let direction = sort.direction;
    Some(move |a: &Record, b: &Record| {
        compare_keys(&accessor.read(a), &accessor.read(b), direction)
    })
}

/// Compute the working order for `records`: a stable permutation of source
/// indices. The records themselves are left untouched.
pub fn sort_order<R: Borrow<Record>>(
    records: &[R],
    sort: Option<&SortBy>,
    columns: &[ColumnDef],
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();

    let Some(sort) = sort else {
        return order;
    };
    let Some(accessor) = target(sort, columns) else {
        log::debug!("Sort column '{}' not found, keeping source order", sort.id);
        return order;
    };

    // Read each key once; `sort_by` is stable so ties keep source order.
    let keys: Vec<Value> = records
        .iter()
        .map(|r| {
            let record: &Record = r.borrow();
            accessor.read(record)
        })
        .collect();
    order.sort_by(|&a, &b| compare_keys(&keys[a], &keys[b], sort.direction));
    order
}
