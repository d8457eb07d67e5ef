//! # Untyped Input
//!
//! Decoders receive `Option<&serde_json::Value>`. `None` is the undefined
//! state: a missing record key or an omitted argument. JSON `null` is
//! `Some(Value::Null)` and is a distinct, present value.

use std::fmt;

use serde_json::Value;

/// Name of the primitive kind of `input`, as used in shape messages.
pub fn kind_of(input: Option<&Value>) -> &'static str {
    match input {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Borrowed view of the raw input handed to a decoder.
///
/// Message annotators receive this so they can echo back exactly what the
/// caller supplied. `Display` renders strings verbatim, undefined as
/// `undefined`, and everything else as compact JSON.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInput<'a>(Option<&'a Value>);

impl<'a> RawInput<'a> {
    /// Wrap a possibly-undefined input.
    pub fn new(input: Option<&'a Value>) -> Self {
        Self(input)
    }

    /// The underlying value, `None` when undefined.
    pub fn value(&self) -> Option<&'a Value> {
        self.0
    }

    /// Primitive kind name (see [`kind_of`]).
    pub fn kind(&self) -> &'static str {
        kind_of(self.0)
    }

    /// True when the input was undefined.
    pub fn is_undefined(&self) -> bool {
        self.0.is_none()
    }

    /// True when the input was undefined or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self.0, None | Some(Value::Null))
    }

    /// Compact JSON with strings quoted, `undefined` when undefined.
    ///
    /// Unlike `Display`, `""` and `"42"` stay distinguishable from an
    /// empty value and a number.
    pub fn to_json_string(&self) -> String {
        match self.0 {
            None => "undefined".to_string(),
            Some(value) => value.to_string(),
        }
    }
}

impl fmt::Display for RawInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => f.write_str("undefined"),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds() {
        assert_eq!(kind_of(None), "undefined");
        assert_eq!(kind_of(Some(&Value::Null)), "null");
        assert_eq!(kind_of(Some(&json!(true))), "boolean");
        assert_eq!(kind_of(Some(&json!(1.5))), "number");
        assert_eq!(kind_of(Some(&json!("x"))), "string");
        assert_eq!(kind_of(Some(&json!([]))), "array");
        assert_eq!(kind_of(Some(&json!({}))), "object");
    }

    #[test]
    fn display_echoes_input() {
        assert_eq!(RawInput::new(None).to_string(), "undefined");
        assert_eq!(RawInput::new(Some(&json!("Helloworld"))).to_string(), "Helloworld");
        assert_eq!(
            RawInput::new(Some(&json!(-8640000000000001i64))).to_string(),
            "-8640000000000001"
        );
        assert_eq!(RawInput::new(Some(&Value::Null)).to_string(), "null");
        assert_eq!(RawInput::new(Some(&json!({"a": 1}))).to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn json_rendering_quotes_strings() {
        assert_eq!(RawInput::new(Some(&json!(""))).to_json_string(), r#""""#);
        assert_eq!(RawInput::new(Some(&json!("42"))).to_json_string(), r#""42""#);
        assert_eq!(RawInput::new(Some(&json!(42))).to_json_string(), "42");
        assert_eq!(RawInput::new(None).to_json_string(), "undefined");
    }

    #[test]
    fn nullish() {
        assert!(RawInput::new(None).is_nullish());
        assert!(RawInput::new(Some(&Value::Null)).is_nullish());
        assert!(!RawInput::new(Some(&json!(0))).is_nullish());
    }
}
