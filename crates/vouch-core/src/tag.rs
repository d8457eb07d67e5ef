//! # Variant Tagging
//!
//! [`tag`] attaches a discriminant to a record that has already decoded.
//! It never fails and never inspects the record: the caller picks `kind`
//! according to which record shape it decoded.

use std::ops::Deref;

use serde::Serialize;

/// A record plus the `type` discriminant naming its union case.
///
/// Serializes as the record's own fields followed by `"type": kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tagged<R> {
    #[serde(flatten)]
    record: R,
    #[serde(rename = "type")]
    kind: String,
}

impl<R> Tagged<R> {
    /// The discriminant.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The untagged record.
    pub fn record(&self) -> &R {
        &self.record
    }

    /// Drop the tag, returning the record unchanged.
    pub fn into_record(self) -> R {
        self.record
    }

    /// Split into discriminant and record.
    pub fn into_parts(self) -> (String, R) {
        (self.kind, self.record)
    }
}

impl<R> Deref for Tagged<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

/// Attach discriminant `kind` to `record`.
pub fn tag<R>(kind: impl Into<String>, record: R) -> Tagged<R> {
    Tagged {
        record,
        kind: kind.into(),
    }
}
