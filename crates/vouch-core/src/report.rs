//! # Reports
//!
//! Turns a [`DecodeResult`] into a flat list of human-readable lines, one
//! per failure, safe to show to an end user. A success yields the single
//! line [`NO_ERRORS`].

use serde_json::{json, Value};

use crate::error::{DecodeError, DecodeResult, ErrorKind};

/// The report for a successful decode.
pub const NO_ERRORS: &str = "No errors!";

/// One line per failure, or `["No errors!"]` on success.
pub fn report<T>(result: &DecodeResult<T>) -> Vec<String> {
    match result {
        Ok(_) => vec![NO_ERRORS.to_string()],
        Err(errors) => errors.iter().map(report_line).collect(),
    }
}

/// Render a single failure.
///
/// Annotated failures and unexpected keys use their message. Everything
/// else reads `Invalid value <input> supplied to <path>: <expected>`, with
/// the input as JSON so strings appear quoted.
pub fn report_line(error: &DecodeError) -> String {
    if error.is_annotated() || error.kind() == ErrorKind::UnexpectedKey {
        return error.message().to_string();
    }

    let target = if error.path().is_empty() {
        error.expected().to_string()
    } else {
        format!("{}: {}", error.path_string(), error.expected())
    };
    format!("Invalid value {} supplied to {target}", error.actual())
}

/// Structured form of [`report`]: an array of `{path, kind, message}`.
///
/// Success yields an empty array.
pub fn report_json<T>(result: &DecodeResult<T>) -> Value {
    match result {
        Ok(_) => Value::Array(Vec::new()),
        Err(errors) => Value::Array(
            errors
                .iter()
                .map(|e| {
                    json!({
                        "path": e.path(),
                        "kind": e.kind(),
                        "message": report_line(e),
                    })
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{int, string, DecoderExt};
    use crate::record::RecordSpec;
    use crate::Decoder;

    #[test]
    fn success_reports_no_errors() {
        assert_eq!(report(&int().decode(&json!(1))), vec!["No errors!"]);
    }

    #[test]
    fn default_line_names_input_and_path() {
        let spec = RecordSpec::exact("P").field("age", int()).unwrap();
        let lines = report(&spec.decode(&json!({"age": "old"})));
        assert_eq!(lines, vec![r#"Invalid value "old" supplied to age: integer"#]);
    }

    #[test]
    fn default_line_quotes_strings() {
        assert_eq!(
            report(&int().decode(&json!("42"))),
            vec![r#"Invalid value "42" supplied to integer"#]
        );
        assert_eq!(
            report(&int().decode(&json!(""))),
            vec![r#"Invalid value "" supplied to integer"#]
        );
    }

    #[test]
    fn root_line_names_decoder() {
        let lines = report(&string().decode(&json!(42)));
        assert_eq!(lines, vec!["Invalid value 42 supplied to string"]);
    }

    #[test]
    fn annotated_and_unexpected_use_message() {
        let spec = RecordSpec::exact("P")
            .field("age", int().with_message(|i| format!("age must be an integer, got {i}")))
            .unwrap();
        let lines = report(&spec.decode(&json!({"age": "old", "x": 1})));
        assert_eq!(
            lines,
            vec!["age must be an integer, got old", "unexpected key: x"]
        );
    }

    #[test]
    fn json_report_is_structured() {
        let value = report_json(&string().decode(&json!(1)));
        assert_eq!(
            value,
            json!([{"path": [], "kind": "shape_mismatch", "message": "Invalid value 1 supplied to string"}])
        );
        assert_eq!(report_json(&string().decode(&json!("a"))), json!([]));
    }
}
