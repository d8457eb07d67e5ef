//! # Decoders
//!
//! A [`Decoder`] turns untyped input into a typed value or an ordered list
//! of failures. Decoders are schema: they are built once, hold no mutable
//! state, and are `Send + Sync` so a single instance can serve concurrent
//! callers.
//!
//! This module defines the trait, the primitive decoders for the base
//! kinds (string, integer, unknown), the array decoder, and the
//! [`DecoderExt`] combinator methods.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{DecodeError, DecodeErrors, DecodeResult};
use crate::input::RawInput;
use crate::message::WithMessage;
use crate::optional::OptionalDecoder;

/// Validates untyped input into `Self::Output`.
pub trait Decoder: Send + Sync {
    /// The typed value produced on success.
    type Output;

    /// Diagnostic name, used as the "expected" side of failures.
    fn name(&self) -> String;

    /// Decode possibly-undefined input. `None` means undefined.
    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output>;

    /// Decode input that is present.
    fn decode(&self, input: &Value) -> DecodeResult<Self::Output> {
        self.validate(Some(input))
    }
}

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        (**self).validate(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        (**self).validate(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn name(&self) -> String {
        (**self).name()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        (**self).validate(input)
    }
}

/// Combinator methods available on every decoder.
pub trait DecoderExt: Decoder + Sized {
    /// Replace failure messages with `message(raw_input)`.
    fn with_message<F>(self, message: F) -> WithMessage<Self, F>
    where
        F: Fn(RawInput<'_>) -> String + Send + Sync,
    {
        crate::message::with_message(self, message)
    }

    /// Accept undefined and `null` as absent.
    fn optional(self) -> OptionalDecoder<Self> {
        crate::optional::optional(self)
    }

    /// Decode a JSON array whose elements all satisfy `self`.
    fn array(self) -> ArrayDecoder<Self> {
        array(self)
    }
}

impl<D: Decoder> DecoderExt for D {}

/// Why a value was not accepted as a [`BaseType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMismatch {
    /// The value is not of the base kind at all.
    Kind,
    /// The value is of the base kind but the Rust type cannot hold it.
    Range,
}

/// A primitive kind that brands can refine.
pub trait BaseType: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Kind name used in shape-mismatch messages.
    const KIND: &'static str;

    /// Extract a value of this kind.
    fn from_value(value: &Value) -> Result<Self, BaseMismatch>;

    /// The value as untyped input, for rendering in messages.
    fn to_value(&self) -> Value;
}

impl BaseType for String {
    const KIND: &'static str = "string";

    fn from_value(value: &Value) -> Result<Self, BaseMismatch> {
        value.as_str().map(str::to_owned).ok_or(BaseMismatch::Kind)
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Integers are finite JSON numbers with no fractional part: `3.0` is an
/// integer, `3.5` is not. Integral floats beyond the `i128` range are
/// integers that no base type can hold.
fn integer_of(value: &Value) -> Result<i128, BaseMismatch> {
    let Value::Number(n) = value else {
        return Err(BaseMismatch::Kind);
    };
    if let Some(i) = n.as_i64() {
        return Ok(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(i128::from(u));
    }
    let f = n.as_f64().ok_or(BaseMismatch::Kind)?;
    if !f.is_finite() || f.fract() != 0.0 {
        return Err(BaseMismatch::Kind);
    }
    // i128::MAX as f64 rounds up to 2^127, which is out of range.
    if f >= i128::MIN as f64 && f < i128::MAX as f64 {
        Ok(f as i128)
    } else {
        Err(BaseMismatch::Range)
    }
}

impl BaseType for i64 {
    const KIND: &'static str = "integer";

    fn from_value(value: &Value) -> Result<Self, BaseMismatch> {
        i64::try_from(integer_of(value)?).map_err(|_| BaseMismatch::Range)
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl BaseType for i128 {
    const KIND: &'static str = "integer";

    fn from_value(value: &Value) -> Result<Self, BaseMismatch> {
        integer_of(value)
    }

    fn to_value(&self) -> Value {
        if let Ok(i) = i64::try_from(*self) {
            Value::from(i)
        } else if let Ok(u) = u64::try_from(*self) {
            Value::from(u)
        } else {
            serde_json::Number::from_f64(*self as f64).map_or(Value::Null, Value::Number)
        }
    }
}

/// Run the base-shape check for `T`. Undefined is a kind mismatch.
pub(crate) fn base_value<T: BaseType>(input: Option<&Value>) -> Result<T, BaseMismatch> {
    input.ok_or(BaseMismatch::Kind).and_then(T::from_value)
}

/// Decoder for an unrefined base kind.
#[derive(Debug)]
pub struct BaseDecoder<T> {
    _kind: PhantomData<fn() -> T>,
}

impl<T> Clone for BaseDecoder<T> {
    fn clone(&self) -> Self {
        Self { _kind: PhantomData }
    }
}

impl<T> Copy for BaseDecoder<T> {}

impl<T: BaseType> Decoder for BaseDecoder<T> {
    type Output = T;

    fn name(&self) -> String {
        T::KIND.to_string()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<T> {
        base_value(input).map_err(|mismatch| {
            match mismatch {
                BaseMismatch::Kind => DecodeError::shape_mismatch(T::KIND, T::KIND, input),
                BaseMismatch::Range => {
                    DecodeError::invalid_input(T::KIND, input, format!("{} out of range", T::KIND))
                }
            }
            .into()
        })
    }
}

/// Decoder accepting any string.
pub fn string() -> BaseDecoder<String> {
    BaseDecoder { _kind: PhantomData }
}

/// Decoder accepting any integer that fits in `i64`.
pub fn int() -> BaseDecoder<i64> {
    BaseDecoder { _kind: PhantomData }
}

/// Decoder that accepts anything, including undefined.
///
/// Yields a clone of the raw input, `None` when undefined.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownDecoder;

impl Decoder for UnknownDecoder {
    type Output = Option<Value>;

    fn name(&self) -> String {
        "unknown".to_string()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        Ok(input.cloned())
    }
}

/// Decoder that accepts anything.
pub fn unknown() -> UnknownDecoder {
    UnknownDecoder
}

/// Decodes every element of a JSON array, accumulating failures.
#[derive(Debug, Clone)]
pub struct ArrayDecoder<D> {
    element: D,
}

impl<D: Decoder> Decoder for ArrayDecoder<D> {
    type Output = Vec<D::Output>;

    fn name(&self) -> String {
        format!("Array<{}>", self.element.name())
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        let Some(Value::Array(items)) = input else {
            return Err(DecodeError::shape_mismatch(self.name(), "array", input).into());
        };

        let mut values = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.validate(Some(item)) {
                Ok(value) => values.push(value),
                Err(failed) => errors.extend(failed.with_prefix(index)),
            }
        }

        match DecodeErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(values),
        }
    }
}

/// Decoder for arrays whose elements satisfy `element`.
pub fn array<D: Decoder>(element: D) -> ArrayDecoder<D> {
    ArrayDecoder { element }
}
