//! # Document Loading
//!
//! Reads user documents from JSON or YAML into a `serde_json::Value`, the
//! input model every decoder works on. The format is chosen by file
//! extension: `.yaml` and `.yml` are YAML, everything else is JSON.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error while reading or parsing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{origin}': {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON.
    #[error("invalid JSON in '{origin}': {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The content is not valid YAML.
    #[error("invalid YAML in '{origin}': {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The YAML uses something JSON cannot represent.
    #[error("YAML-to-JSON conversion failed for '{origin}': {reason}")]
    Conversion { origin: String, reason: String },
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse `content` as `format`. `origin` names the source in errors.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|source| DocumentError::Json {
                origin: origin.to_string(),
                source,
            })
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|source| DocumentError::Yaml {
                    origin: origin.to_string(),
                    source,
                })?;
            yaml_to_json_value(&yaml).map_err(|reason| DocumentError::Conversion {
                origin: origin.to_string(),
                reason,
            })
        }
    }
}

/// Read and parse the document at `path`.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        origin: origin.clone(),
        source,
    })?;
    tracing::trace!(path = %origin, bytes = content.len(), "document read");
    parse_document(&content, DocumentFormat::from_path(path), &origin)
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped. Scalar map keys are stringified; other keys and
/// non-finite floats are rejected.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
