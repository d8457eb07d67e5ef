//! # Message Annotation
//!
//! [`with_message`] wraps a decoder so that every failure it reports
//! carries a caller-chosen message. The message function sees the original
//! raw input, not a partially decoded value, so it can echo back exactly
//! what was supplied. Paths are left untouched.

use serde_json::Value;

use crate::decoder::Decoder;
use crate::error::DecodeResult;
use crate::input::RawInput;

/// Decoder whose failures carry a custom message.
#[derive(Clone)]
pub struct WithMessage<D, F> {
    inner: D,
    message: F,
}

impl<D, F> Decoder for WithMessage<D, F>
where
    D: Decoder,
    F: Fn(RawInput<'_>) -> String + Send + Sync,
{
    type Output = D::Output;

    fn name(&self) -> String {
        self.inner.name()
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<D::Output> {
        self.inner
            .validate(input)
            .map_err(|errors| errors.annotate(&(self.message)(RawInput::new(input))))
    }
}

impl<D: std::fmt::Debug, F> std::fmt::Debug for WithMessage<D, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithMessage")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Replace the failure messages of `decoder` with `message(raw_input)`.
pub fn with_message<D, F>(decoder: D, message: F) -> WithMessage<D, F>
where
    D: Decoder,
    F: Fn(RawInput<'_>) -> String + Send + Sync,
{
    WithMessage {
        inner: decoder,
        message,
    }
}
