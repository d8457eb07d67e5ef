//! # Optional Values
//!
//! [`optional`] lets a decoder accept a missing value. Undefined and `null`
//! decode to `None` without invoking the inner decoder; anything else is
//! delegated and a success is wrapped in `Some`. Inner failures propagate
//! unchanged.

use serde_json::Value;

use crate::decoder::Decoder;
use crate::error::DecodeResult;

/// Decoder yielding `None` for undefined or `null` input.
#[derive(Debug, Clone)]
pub struct OptionalDecoder<D> {
    inner: D,
}

impl<D: Decoder> Decoder for OptionalDecoder<D> {
    type Output = Option<D::Output>;

    fn name(&self) -> String {
        format!("Option<{}>", self.inner.name())
    }

    fn validate(&self, input: Option<&Value>) -> DecodeResult<Self::Output> {
        match input {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.inner.decode(value).map(Some),
        }
    }
}

/// Make `decoder` accept undefined and `null` as absent.
pub fn optional<D: Decoder>(decoder: D) -> OptionalDecoder<D> {
    OptionalDecoder { inner: decoder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{int, string, DecoderExt};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting<'a>(&'a AtomicUsize);

    impl Decoder for Counting<'_> {
        type Output = ();

        fn name(&self) -> String {
            "Counting".to_string()
        }

        fn validate(&self, _input: Option<&Value>) -> DecodeResult<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn null_and_undefined_are_absent() {
        let decoder = optional(string());
        assert_eq!(decoder.validate(None).unwrap(), None);
        assert_eq!(decoder.decode(&Value::Null).unwrap(), None);
        // The inner decoder alone rejects null.
        assert!(string().decode(&Value::Null).is_err());
    }

    #[test]
    fn inner_not_invoked_when_absent() {
        let calls = AtomicUsize::new(0);
        let decoder = optional(Counting(&calls));
        decoder.validate(None).unwrap();
        decoder.decode(&Value::Null).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        decoder.decode(&json!(1)).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn present_values_are_wrapped() {
        assert_eq!(int().optional().decode(&json!(3)).unwrap(), Some(3));
    }

    #[test]
    fn inner_failure_propagates_unchanged() {
        let direct = int().decode(&json!("x")).unwrap_err();
        let wrapped = int().optional().decode(&json!("x")).unwrap_err();
        assert_eq!(direct, wrapped);
    }
}
