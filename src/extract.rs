//! Operation extraction from OpenAPI descriptions.
//!
//! Walks `paths` in document order and produces the normalized operation
//! list the synthesizer consumes:
//!
//! ```yaml
//! paths:
//!   /cases:
//!     get:
//!       operationId: listCases
//!       tags: [cases]
//!     post:
//!       operationId: createCase
//!       tags: [cases]
//! ```
//!
//! yields `listCases` (source order 0) then `createCase` (source order 1).
//! Document order depends on `serde_json`'s `preserve_order` feature.

use serde_json::{Map, Value};

use crate::error::ExtractError;
use crate::slug::slugify;
use crate::types::{json_type_name, HttpMethod, Operation, Overview, OPERATION_KEYS};

/// Extract every operation from an OpenAPI 2 or 3 description.
///
/// # Errors
///
/// Returns `ExtractError::NotAnApiDescription` when there is no `paths`
/// object, or `InvalidPathItem`/`InvalidField` when a field the sidebar
/// needs has the wrong JSON type.
pub fn extract_operations(description: &Value) -> Result<Vec<Operation>, ExtractError> {
    let paths = description
        .get("paths")
        .and_then(Value::as_object)
        .ok_or(ExtractError::NotAnApiDescription)?;

    let mut operations = Vec::new();
    for (path, item) in paths {
        let item = item.as_object().ok_or_else(|| ExtractError::InvalidPathItem {
            path: path.clone(),
            actual: json_type_name(item).to_string(),
        })?;

        if item.contains_key("$ref") {
            tracing::warn!(
                path = %path,
                "path item $ref is not followed, its operations are skipped"
            );
        }

        for (key, value) in item {
            if !OPERATION_KEYS.contains(&key.as_str()) {
                continue;
            }
            let pointer = format!("/paths/{}/{}", escape_pointer(path), key);
            let mut op = extract_operation(value, &pointer)?;
            op.method = HttpMethod::parse(key);
            op.path = Some(path.clone());
            op.source_order = Some(operations.len());
            operations.push(op);
        }
    }

    tracing::debug!(operations = operations.len(), "extracted operations");
    Ok(operations)
}

/// Root overview derived from `info.title`, if the description has one.
pub fn overview_from_description(description: &Value) -> Option<Overview> {
    let title = description
        .get("info")
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)?
        .trim();
    let id = slugify(title);
    if id.is_empty() {
        return None;
    }
    Some(Overview::new(id, title))
}

fn extract_operation(value: &Value, pointer: &str) -> Result<Operation, ExtractError> {
    let obj = value.as_object().ok_or_else(|| ExtractError::InvalidField {
        pointer: pointer.to_string(),
        expected: "object",
        actual: json_type_name(value).to_string(),
    })?;

    let operation_id = optional_str(obj, "operationId", pointer)?.unwrap_or_default();
    let summary = optional_str(obj, "summary", pointer)?
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let label = summary.unwrap_or_else(|| operation_id.clone());

    let tags: Vec<String> = match obj.get("tags") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                tag.as_str().map(String::from).ok_or_else(|| ExtractError::InvalidField {
                    pointer: format!("{}/tags/{}", pointer, i),
                    expected: "string",
                    actual: json_type_name(tag).to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(ExtractError::InvalidField {
                pointer: format!("{}/tags", pointer),
                expected: "array of strings",
                actual: json_type_name(other).to_string(),
            })
        }
    };

    let deprecated = match obj.get("deprecated") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(ExtractError::InvalidField {
                pointer: format!("{}/deprecated", pointer),
                expected: "boolean",
                actual: json_type_name(other).to_string(),
            })
        }
    };

    let extensions: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| k.starts_with("x-"))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Operation {
        operation_id,
        label,
        tags,
        deprecated,
        extensions,
        ..Operation::default()
    })
}

fn optional_str(
    obj: &Map<String, Value>,
    key: &str,
    pointer: &str,
) -> Result<Option<String>, ExtractError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ExtractError::InvalidField {
            pointer: format!("{}/{}", pointer, key),
            expected: "string",
            actual: json_type_name(other).to_string(),
        }),
    }
}

/// JSON Pointer escaping (RFC 6901): `~` -> `~0`, `/` -> `~1`.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
