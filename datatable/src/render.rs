//! Render payloads for cells and headers.
//!
//! A payload is either a literal [`Value`] or a [`Deferred`] closure that the
//! rendering layer invokes when painting. Closures are never serialized and
//! never take part in structural equality, so a published projection can be
//! snapshotted and compared without touching them.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::Serializer;

use crate::Value;

/// A render closure held by reference.
#[derive(Clone)]
pub struct Deferred(Arc<dyn Fn() -> String + Send + Sync>);

impl Deferred {
    /// Wrap a render closure.
    pub fn new(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the closure.
    pub fn call(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

/// A cell or header render payload.
#[derive(Debug, Clone)]
pub enum Render {
    /// Literal content.
    Value(Value),
    /// Content produced on demand by the rendering layer.
    Deferred(Deferred),
}

impl Render {
    /// Build a deferred payload from a closure.
    pub fn deferred(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Deferred(Deferred::new(f))
    }

    /// Returns `true` if this payload is a closure.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Returns the literal value, if any.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Deferred(_) => None,
        }
    }

    /// Produce the display text for this payload.
    pub fn render(&self) -> String {
        match self {
            Self::Value(v) => v.to_string(),
            Self::Deferred(d) => d.call(),
        }
    }
}

// Deferred payloads are opaque: any two compare equal.
impl PartialEq for Render {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Deferred(_), Self::Deferred(_)) => true,
            _ => false,
        }
    }
}

impl Serialize for Render {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Deferred(_) => serializer.serialize_none(),
        }
    }
}

impl From<Value> for Render {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl From<&str> for Render {
    fn from(v: &str) -> Self {
        Self::Value(v.into())
    }
}

impl From<String> for Render {
    fn from(v: String) -> Self {
        Self::Value(v.into())
    }
}

impl From<Deferred> for Render {
    fn from(d: Deferred) -> Self {
        Self::Deferred(d)
    }
}

/// Resolve what the rendering layer should paint.
///
/// Uses the payload when present (invoking closures), otherwise the raw
/// value.
pub fn flex_render(render: Option<&Render>, value: &Value) -> String {
    match render {
        Some(r) => r.render(),
        None => value.to_string(),
    }
}
