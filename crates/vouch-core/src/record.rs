//! # Record Composition
//!
//! A [`RecordSpec`] is a named, ordered set of field decoders. Decoding a
//! record runs every field decoder against the matching input key and
//! accumulates all failures: the result is `Ok` only if every declared
//! field decodes.
//!
//! ## Flavors
//!
//! - [`RecordSpec::exact()`]: required fields; undeclared input keys are
//!   failures (`unexpected key: <key>`) and are never carried into the
//!   output.
//! - [`RecordSpec::open()`]: required fields; undeclared keys are ignored.
//! - [`RecordSpec::partial()`]: every field may be missing or `null`;
//!   undeclared keys are ignored.
//!
//! Specs combine with [`RecordSpec::merge()`]. Overlapping field names are
//! a [`ConfigurationError`] at merge time, never a per-input failure.
//!
//! ## Ordering
//!
//! Failures follow field declaration order. Unexpected-key failures come
//! after all field failures, in the input object's key order.

use std::any::{type_name, Any};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::decoder::Decoder;
use crate::error::{
    ConfigurationError, DecodeError, DecodeErrors, DecodeResult, RecordAccessError,
};

type AnyValue = Box<dyn Any + Send + Sync>;

/// Object-safe form of [`Decoder`] used to store heterogeneous fields.
trait ErasedDecoder: Send + Sync {
    fn name(&self) -> String;
    fn validate_any(&self, input: Option<&Value>) -> DecodeResult<AnyValue>;
}

impl<D> ErasedDecoder for D
where
    D: Decoder,
    D::Output: Send + Sync + 'static,
{
    fn name(&self) -> String {
        Decoder::name(self)
    }

    fn validate_any(&self, input: Option<&Value>) -> DecodeResult<AnyValue> {
        self.validate(input).map(|value| Box::new(value) as AnyValue)
    }
}

/// Whether a field must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Missing input is passed to the decoder as undefined.
    Required,
    /// Missing or `null` input leaves the field absent.
    Optional,
}

/// What to do with input keys the spec does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownKeys {
    /// Report each as an unexpected-key failure.
    Reject,
    /// Skip them silently.
    Ignore,
}

#[derive(Clone)]
struct FieldSpec {
    name: String,
    presence: Presence,
    decoder: Arc<dyn ErasedDecoder>,
}

/// Shape of a structured record: named field decoders plus an
/// unknown-key policy.
#[derive(Clone)]
pub struct RecordSpec {
    name: String,
    fields: Vec<FieldSpec>,
    presence: Presence,
    unknown_keys: UnknownKeys,
}

impl RecordSpec {
    fn with_policy(name: impl Into<String>, presence: Presence, unknown_keys: UnknownKeys) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            presence,
            unknown_keys,
        }
    }

    /// Required fields; undeclared keys are rejected.
    pub fn exact(name: impl Into<String>) -> Self {
        Self::with_policy(name, Presence::Required, UnknownKeys::Reject)
    }

    /// Required fields; undeclared keys are ignored.
    pub fn open(name: impl Into<String>) -> Self {
        Self::with_policy(name, Presence::Required, UnknownKeys::Ignore)
    }

    /// Optional fields; undeclared keys are ignored.
    pub fn partial(name: impl Into<String>) -> Self {
        Self::with_policy(name, Presence::Optional, UnknownKeys::Ignore)
    }

    /// Declare a field decoded by `decoder`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateField`] if `name` is already
    /// declared.
    pub fn field<D>(mut self, name: impl Into<String>, decoder: D) -> Result<Self, ConfigurationError>
    where
        D: Decoder + 'static,
        D::Output: Send + Sync + 'static,
    {
        let name = name.into();
        if self.declares(&name) {
            return Err(ConfigurationError::DuplicateField {
                field: name,
                left: self.name.clone(),
                right: self.name,
            });
        }
        self.fields.push(FieldSpec {
            name,
            presence: self.presence,
            decoder: Arc::new(decoder),
        });
        Ok(self)
    }

    /// Combine two specs into one decoded against the same input.
    ///
    /// Fields keep their order: all of `self`, then all of `other`. The
    /// result rejects unknown keys if either side does, where "unknown"
    /// means declared by neither.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateField`] for the first field
    /// name both specs declare.
    pub fn merge(&self, other: &RecordSpec, name: impl Into<String>) -> Result<Self, ConfigurationError> {
        if let Some(field) = other.fields.iter().find(|f| self.declares(&f.name)) {
            return Err(ConfigurationError::DuplicateField {
                field: field.name.clone(),
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }

        let unknown_keys = if self.unknown_keys == UnknownKeys::Reject
            || other.unknown_keys == UnknownKeys::Reject
        {
            UnknownKeys::Reject
        } else {
            UnknownKeys::Ignore
        };

        Ok(Self {
            name: name.into(),
            fields: self.fields.iter().chain(&other.fields).cloned().collect(),
            presence: Presence::Required,
            unknown_keys,
        })
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unknown-key policy.
    pub fn unknown_keys(&self) -> UnknownKeys {
        self.unknown_keys
    }

    /// Whether `field` is declared.
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.name == field)
    }

    /// Declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Presence of a declared field.
    pub fn presence_of(&self, field: &str) -> Option<Presence> {
        self.fields.iter().find(|f| f.name == field).map(|f| f.presence)
    }

    /// Decode `input` against this spec. See [`decode_record`].
    pub fn decode_record(&self, input: Option<&Value>) -> DecodeResult<Record> {
        decode_record(self, input)
    }
}

impl fmt::Debug for RecordSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSpec")
            .field("name", &self.name)
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|field| (field.name.as_str(), field.decoder.name(), field.presence))
                    .collect::<Vec<_>>(),
            )
            .field("unknown_keys", &self.unknown_keys)
            .finish()
    }
}

impl Decoder for RecordSpec {
    type Output = Record;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Record> {
        decode_record(self, input)
    }
}

/// Decode `input` as a record shaped by `spec`.
///
/// Non-object input fails immediately with a single root-level failure.
/// Otherwise every declared field is decoded (missing keys as undefined),
/// failures are prefixed with the field name, and all failures are
/// returned together.
pub fn decode_record(spec: &RecordSpec, input: Option<&Value>) -> DecodeResult<Record> {
    let Some(Value::Object(object)) = input else {
        return Err(DecodeError::shape_mismatch(spec.name.clone(), "object", input).into());
    };

    let mut fields = Vec::with_capacity(spec.fields.len());
    let mut errors = Vec::new();

    for field in &spec.fields {
        let value = object.get(&field.name);
        if field.presence == Presence::Optional && matches!(value, None | Some(Value::Null)) {
            tracing::trace!(record = %spec.name, field = %field.name, "optional field absent");
            fields.push((field.name.clone(), None));
            continue;
        }

        match field.decoder.validate_any(value) {
            Ok(decoded) => fields.push((field.name.clone(), Some(decoded))),
            Err(failed) => {
                tracing::trace!(
                    record = %spec.name,
                    field = %field.name,
                    errors = failed.len(),
                    "field rejected"
                );
                errors.extend(failed.with_prefix(field.name.as_str()));
            }
        }
    }

    if spec.unknown_keys == UnknownKeys::Reject {
        errors.extend(
            object
                .iter()
                .filter(|(key, _)| !spec.declares(key))
                .map(|(key, value)| DecodeError::unexpected_key(&spec.name, key, value)),
        );
    }

    match DecodeErrors::from_vec(errors) {
        Some(errors) => {
            tracing::debug!(record = %spec.name, errors = errors.len(), "record decode failed");
            Err(errors)
        }
        None => {
            tracing::debug!(record = %spec.name, fields = fields.len(), "record decoded");
            Ok(Record {
                name: spec.name.clone(),
                fields,
            })
        }
    }
}

/// Decoded fields of a record, in declaration order.
///
/// Values are stored type-erased; [`Record::take`] recovers them by type.
/// A field is absent only when an optional field was missing or `null`.
pub struct Record {
    name: String,
    fields: Vec<(String, Option<AnyValue>)>,
}

impl Record {
    /// Name of the spec this record was decoded with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared fields, present or absent.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the spec declared no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `field` holds a value that has not been taken.
    pub fn contains(&self, field: &str) -> bool {
        self.fields
            .iter()
            .any(|(name, value)| name == field && value.is_some())
    }

    /// Names of fields that hold a value.
    pub fn present_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| name.as_str())
    }

    fn slot(&mut self, field: &str) -> Option<&mut Option<AnyValue>> {
        self.fields
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Move the value of a present field out of the record.
    ///
    /// # Errors
    ///
    /// [`RecordAccessError::MissingField`] if the field is undeclared,
    /// absent, or already taken; [`RecordAccessError::TypeMismatch`] if it
    /// decoded to a type other than `T`.
    pub fn take<T: 'static>(&mut self, field: &str) -> Result<T, RecordAccessError> {
        self.take_optional(field)?
            .ok_or_else(|| RecordAccessError::MissingField {
                record: self.name.clone(),
                field: field.to_string(),
            })
    }

    /// Move the value of an optional field out of the record.
    ///
    /// Absent fields yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`RecordAccessError::MissingField`] if the field is undeclared;
    /// [`RecordAccessError::TypeMismatch`] if it decoded to a type other
    /// than `T`.
    pub fn take_optional<T: 'static>(&mut self, field: &str) -> Result<Option<T>, RecordAccessError> {
        let record = self.name.clone();
        let slot = self.slot(field).ok_or_else(|| RecordAccessError::MissingField {
            record: record.clone(),
            field: field.to_string(),
        })?;

        let Some(boxed) = slot.take() else {
            return Ok(None);
        };
        match boxed.downcast::<T>() {
            Ok(value) => Ok(Some(*value)),
            Err(original) => {
                *slot = Some(original);
                Err(RecordAccessError::TypeMismatch {
                    record,
                    field: field.to_string(),
                    expected: type_name::<T>(),
                })
            }
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("present", &self.present_fields().collect::<Vec<_>>())
            .finish()
    }
}

/// A typed struct assembled from a decoded [`Record`].
pub trait FromRecord: Sized {
    /// Move the fields out of `record`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordAccessError`] when the record was decoded with a
    /// spec that does not match this type.
    fn from_record(record: Record) -> Result<Self, RecordAccessError>;
}

/// Decoder producing a typed struct through its [`RecordSpec`].
pub struct RecordDecoder<R> {
    spec: RecordSpec,
    _record: PhantomData<fn() -> R>,
}

impl<R> RecordDecoder<R> {
    /// Decode `R` using `spec`.
    pub fn new(spec: RecordSpec) -> Self {
        Self {
            spec,
            _record: PhantomData,
        }
    }

    /// The underlying spec.
    pub fn spec(&self) -> &RecordSpec {
        &self.spec
    }
}

impl<R> Clone for RecordDecoder<R> {
    fn clone(&self) -> Self {
        Self::new(self.spec.clone())
    }
}

impl<R> fmt::Debug for RecordDecoder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordDecoder").field(&self.spec).finish()
    }
}

impl<R: FromRecord> Decoder for RecordDecoder<R> {
    type Output = R;

    fn name(&self) -> String {
        self.spec.name.clone()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<R> {
        let record = decode_record(&self.spec, input)?;
        R::from_record(record).map_err(|e| {
            tracing::warn!(record = %self.spec.name, error = %e, "record spec does not match target type");
            DecodeError::invalid_input(self.spec.name.clone(), input, e).into()
        })
    }
}
