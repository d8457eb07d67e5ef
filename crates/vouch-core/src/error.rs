//! # Error Types: Decode Failures and Configuration Defects
//!
//! Defines the error types produced by the validation algebra. Expected
//! validation failures are ordinary values ([`DecodeErrors`]) returned
//! through [`DecodeResult`]; only schema construction defects surface as
//! [`ConfigurationError`].
//!
//! ## Design
//!
//! - Every failure carries the path to the offending value, the name of the
//!   decoder that rejected it, the rendered input, and a message.
//! - Failures accumulate. A [`DecodeErrors`] is never empty, and its order is
//!   field declaration order, then validation step order within a field.
//! - `ConfigurationError` is raised when a schema is built, never per input.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::input::RawInput;

/// Outcome of decoding untyped input.
///
/// `Ok` carries the typed (possibly branded) value; `Err` carries every
/// failure found, in order.
pub type DecodeResult<T> = Result<T, DecodeErrors>;

/// One step in the path from the decoded root to a failing value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A record field name.
    Key(String),
    /// An array position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Classification of a single decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input is not of the expected primitive kind.
    ShapeMismatch,
    /// A required value was undefined (missing key or omitted input).
    MissingRequiredField,
    /// Input has the right kind but fails the brand's predicate.
    PredicateFailure,
    /// An exact record received a key it does not declare.
    UnexpectedKey,
    /// A predicate faulted, or a decoded record could not be assembled.
    InvalidInput,
}

impl ErrorKind {
    /// Stable snake_case identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ShapeMismatch => "shape_mismatch",
            Self::MissingRequiredField => "missing_required_field",
            Self::PredicateFailure => "predicate_failure",
            Self::UnexpectedKey => "unexpected_key",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decode failure with structured context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeError {
    path: Vec<PathSegment>,
    kind: ErrorKind,
    expected: String,
    actual: String,
    message: String,
    #[serde(skip)]
    annotated: bool,
}

impl DecodeError {
    fn new(
        kind: ErrorKind,
        expected: impl Into<String>,
        input: RawInput<'_>,
        message: String,
    ) -> Self {
        Self {
            path: Vec::new(),
            kind,
            expected: expected.into(),
            actual: input.to_json_string(),
            message,
            annotated: false,
        }
    }

    /// The input is not of kind `expected_kind`.
    ///
    /// Undefined input is classified as [`ErrorKind::MissingRequiredField`].
    pub fn shape_mismatch(
        expected: impl Into<String>,
        expected_kind: &str,
        input: Option<&Value>,
    ) -> Self {
        let raw = RawInput::new(input);
        let kind = if raw.is_undefined() {
            ErrorKind::MissingRequiredField
        } else {
            ErrorKind::ShapeMismatch
        };
        let message = format!("expected {expected_kind}, got {}", raw.kind());
        Self::new(kind, expected, raw, message)
    }

    /// The input has the right kind but the brand `name` rejects it.
    pub fn predicate_failure(name: &str, input: Option<&Value>) -> Self {
        let raw = RawInput::new(input);
        let message = format!("Invalid value for {name}: {raw}");
        Self::new(ErrorKind::PredicateFailure, name, raw, message)
    }

    /// An exact record named `record` received the undeclared `key`.
    pub fn unexpected_key(record: &str, key: &str, value: &Value) -> Self {
        let message = format!("unexpected key: {key}");
        Self::new(
            ErrorKind::UnexpectedKey,
            record,
            RawInput::new(Some(value)),
            message,
        )
        .with_prefix(key)
    }

    /// The input could not be judged, for a reason given in `detail`.
    pub fn invalid_input(
        expected: impl Into<String>,
        input: Option<&Value>,
        detail: impl fmt::Display,
    ) -> Self {
        let raw = RawInput::new(input);
        let message = format!("invalid input: {detail}");
        Self::new(ErrorKind::InvalidInput, expected, raw, message)
    }

    /// Path from the decoded root to the failing value.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// The path rendered as `/`-joined segments (empty at the root).
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Failure classification.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Diagnostic name of the decoder that rejected the input.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The rejected input as compact JSON, `undefined` when missing.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Human-readable message (default or annotated).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the message was supplied by a message annotator.
    pub fn is_annotated(&self) -> bool {
        self.annotated
    }

    /// Prepend `segment` to the path.
    pub fn with_prefix(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Replace the message text, leaving the path untouched.
    pub fn annotate(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self.annotated = true;
        self
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path_string(), self.message)
        }
    }
}

/// Non-empty, ordered collection of decode failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{}", render_lines(.errors))]
#[serde(transparent)]
pub struct DecodeErrors {
    errors: Vec<DecodeError>,
}

fn render_lines(errors: &[DecodeError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl DecodeErrors {
    /// Collection holding a single failure.
    pub fn single(error: DecodeError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Wrap accumulated failures; `None` when nothing failed.
    pub fn from_vec(errors: Vec<DecodeError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Returns the number of failures (always at least one).
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all failures.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }

    /// Iterate over failures in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecodeError> {
        self.errors.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<DecodeError> {
        self.errors
    }

    /// Prepend `segment` to every failure's path.
    pub fn with_prefix(self, segment: impl Into<PathSegment>) -> Self {
        let segment = segment.into();
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.with_prefix(segment.clone()))
                .collect(),
        }
    }

    /// Replace every failure's message with `message`.
    pub fn annotate(self, message: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|e| e.annotate(message))
                .collect(),
        }
    }
}

impl From<DecodeError> for DecodeErrors {
    fn from(error: DecodeError) -> Self {
        Self::single(error)
    }
}

impl IntoIterator for DecodeErrors {
    type Item = DecodeError;
    type IntoIter = std::vec::IntoIter<DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodeErrors {
    type Item = &'a DecodeError;
    type IntoIter = std::slice::Iter<'a, DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// A record schema was assembled incorrectly.
///
/// This is a programmer error detected when the schema is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Two specs (or one spec twice) declare the same field name.
    #[error("field '{field}' is declared by both '{left}' and '{right}'")]
    DuplicateField {
        /// The overlapping field name.
        field: String,
        /// Name of the spec that declared the field first.
        left: String,
        /// Name of the spec that declared it again.
        right: String,
    },
}

/// A decoded record did not hold a field in the requested form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordAccessError {
    /// The field is absent or was already taken.
    #[error("record '{record}' has no value for field '{field}'")]
    MissingField {
        /// Record spec name.
        record: String,
        /// Requested field.
        field: String,
    },

    /// The field decoded to a different type than requested.
    #[error("field '{field}' of record '{record}' is not a {expected}")]
    TypeMismatch {
        /// Record spec name.
        record: String,
        /// Requested field.
        field: String,
        /// Requested Rust type.
        expected: &'static str,
    },
}

/// Top-level error type for callers that mix decoding with parsing.
#[derive(Error, Debug)]
pub enum VouchError {
    /// Input failed validation.
    #[error("decode failed:\n{0}")]
    Decode(#[from] DecodeErrors),

    /// A schema was assembled incorrectly.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Input text was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
