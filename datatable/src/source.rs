//! Column-definition sources.
//!
//! Column definitions may come from a deferred or remote call. The table
//! awaits its source at the start of every derivation cycle.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::column::ColumnDef;
use crate::error::SourceError;

/// Supplies the column definitions for a table.
///
/// An `Err` or an empty list means "not ready": the table skips the cycle
/// and keeps its previous output. Retrying is up to the source.
#[async_trait]
pub trait ColumnSource: Send + Sync {
    async fn columns(&self) -> Result<Vec<ColumnDef>, SourceError>;
}

#[async_trait]
impl ColumnSource for Vec<ColumnDef> {
    async fn columns(&self) -> Result<Vec<ColumnDef>, SourceError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl<S: ColumnSource + ?Sized> ColumnSource for Arc<S> {
    async fn columns(&self) -> Result<Vec<ColumnDef>, SourceError> {
        (**self).columns().await
    }
}

/// Adapts an async closure into a [`ColumnSource`].
///
/// # Example
///
/// ```
/// use datatable::{ColumnDef, FnSource, SourceError};
///
/// let source = FnSource::new(|| async { Ok::<_, SourceError>(vec![ColumnDef::key("name")]) });
/// ```
pub struct FnSource<F>(F);

impl<F> FnSource<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> ColumnSource for FnSource<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ColumnDef>, SourceError>> + Send,
{
    async fn columns(&self) -> Result<Vec<ColumnDef>, SourceError> {
        (self.0)().await
    }
}
