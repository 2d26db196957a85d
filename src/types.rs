//! Core types for sidebar synthesis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category label for operations without a usable tag.
pub const UNTAGGED: &str = "UNTAGGED";

/// Default prefix joined onto every leaf target id.
pub const DEFAULT_DOC_PREFIX: &str = "openapi/";

/// Path item keys that hold operations, per OpenAPI 2 and 3.
pub const OPERATION_KEYS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTTP method of an operation.
///
/// Anything outside the documented set is kept verbatim as `Other` and
/// rendered with a neutral hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other(String),
}

impl HttpMethod {
    /// Parse a method name, case-insensitively. Never fails.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => HttpMethod::Get,
            "post" => HttpMethod::Post,
            "put" => HttpMethod::Put,
            "patch" => HttpMethod::Patch,
            "delete" => HttpMethod::Delete,
            _ => HttpMethod::Other(s.trim().to_string()),
        }
    }

    /// Lowercase name used in render hints, `None` for unknown methods.
    pub fn hint_name(&self) -> Option<&'static str> {
        match self {
            HttpMethod::Get => Some("get"),
            HttpMethod::Post => Some("post"),
            HttpMethod::Put => Some("put"),
            HttpMethod::Patch => Some("patch"),
            HttpMethod::Delete => Some("delete"),
            HttpMethod::Other(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.hint_name().is_some()
    }
}

impl Default for HttpMethod {
    fn default() -> Self {
        HttpMethod::Other(String::new())
    }
}

impl From<String> for HttpMethod {
    fn from(s: String) -> Self {
        HttpMethod::parse(&s)
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.to_string()
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Other(s) => f.write_str(s),
            known => f.write_str(known.hint_name().unwrap_or_default()),
        }
    }
}

/// One documented API action, in the normalized shape the synthesizer reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub operation_id: String,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub label: String,
    /// Declared tag set. The default strategy groups by the first element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
    /// Position in the source description. The input index stands in when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_order: Option<usize>,
    /// Request path, e.g. `/cases/{caseId}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Vendor extension fields (`x-*`) carried over from the description.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extensions: Map<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Operation {
    /// Create an operation with an id, method and label.
    pub fn new(
        operation_id: impl Into<String>,
        method: HttpMethod,
        label: impl Into<String>,
    ) -> Self {
        Self {
            operation_id: operation_id.into(),
            method,
            label: label.into(),
            ..Self::default()
        }
    }

    /// Add a tag to the declared tag set.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn source_order(mut self, order: usize) -> Self {
        self.source_order = Some(order);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extensions.insert(key.into(), value);
        self
    }
}

/// How the grouping tag is read from an operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TagStrategy {
    /// First element of the declared tag set.
    #[default]
    FirstTag,
    /// First literal segment of the request path (`/cases/{id}` -> `cases`).
    PathSegment,
    /// String value of a vendor extension field.
    Extension(String),
}

impl fmt::Display for TagStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagStrategy::FirstTag => f.write_str("first-tag"),
            TagStrategy::PathSegment => f.write_str("path-segment"),
            TagStrategy::Extension(key) => write!(f, "extension:{}", key),
        }
    }
}

impl FromStr for TagStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-tag" => Ok(TagStrategy::FirstTag),
            "path-segment" => Ok(TagStrategy::PathSegment),
            other => match other.strip_prefix("extension:") {
                Some(key) if !key.is_empty() => Ok(TagStrategy::Extension(key.to_string())),
                _ => Err(format!(
                    "unknown tag strategy \"{}\": expected first-tag, path-segment, or extension:<key>",
                    other
                )),
            },
        }
    }
}

impl Serialize for TagStrategy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagStrategy {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Root overview document shown above all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    /// Document id, joined onto the doc prefix.
    pub id: String,
    pub label: String,
}

impl Overview {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Grouping configuration passed explicitly into every synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupingRules {
    pub tag_strategy: TagStrategy,
    /// Category title for operations without a usable tag.
    pub untagged_label: String,
    /// Place the untagged category after every tagged one instead of at its
    /// first-appearance position.
    pub untagged_last: bool,
    /// Prefix for leaf target ids (e.g. `openapi/`).
    pub doc_prefix: String,
    pub overview: Option<Overview>,
}

impl Default for GroupingRules {
    fn default() -> Self {
        Self {
            tag_strategy: TagStrategy::FirstTag,
            untagged_label: UNTAGGED.to_string(),
            untagged_last: false,
            doc_prefix: DEFAULT_DOC_PREFIX.to_string(),
            overview: None,
        }
    }
}

impl GroupingRules {
    /// Rules with the default strategy, labels and prefix.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag_strategy(mut self, strategy: TagStrategy) -> Self {
        self.tag_strategy = strategy;
        self
    }

    pub fn untagged_label(mut self, label: impl Into<String>) -> Self {
        self.untagged_label = label.into();
        self
    }

    pub fn untagged_last(mut self, last: bool) -> Self {
        self.untagged_last = last;
        self
    }

    pub fn doc_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.doc_prefix = prefix.into();
        self
    }

    pub fn overview(mut self, overview: Option<Overview>) -> Self {
        self.overview = overview;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("GET"), HttpMethod::Get);
        assert_eq!(HttpMethod::parse("Patch"), HttpMethod::Patch);
        assert_eq!(HttpMethod::parse(" delete "), HttpMethod::Delete);
    }

    #[test]
    fn method_parse_keeps_unknown_text() {
        assert_eq!(HttpMethod::parse("head"), HttpMethod::Other("head".into()));
        assert!(!HttpMethod::parse("options").is_known());
        assert_eq!(HttpMethod::parse("head").hint_name(), None);
    }

    #[test]
    fn method_serde_uses_lowercase_names() {
        let method: HttpMethod = serde_json::from_value(json!("POST")).unwrap();
        assert_eq!(method, HttpMethod::Post);
        assert_eq!(serde_json::to_value(&method).unwrap(), json!("post"));
    }

    #[test]
    fn operation_deserializes_camel_case() {
        let op: Operation = serde_json::from_value(json!({
            "operationId": "listCases",
            "method": "get",
            "label": "listCases",
            "tags": ["cases"],
            "sourceOrder": 3
        }))
        .unwrap();
        assert_eq!(op.operation_id, "listCases");
        assert_eq!(op.method, HttpMethod::Get);
        assert_eq!(op.tags, vec!["cases".to_string()]);
        assert_eq!(op.source_order, Some(3));
        assert!(!op.deprecated);
    }

    #[test]
    fn operation_missing_fields_default() {
        let op: Operation = serde_json::from_value(json!({ "label": "ping" })).unwrap();
        assert_eq!(op.operation_id, "");
        assert_eq!(op.method, HttpMethod::Other(String::new()));
        assert!(op.tags.is_empty());
        assert_eq!(op.source_order, None);
    }

    #[test]
    fn tag_strategy_parse() {
        assert_eq!("first-tag".parse(), Ok(TagStrategy::FirstTag));
        assert_eq!("path-segment".parse(), Ok(TagStrategy::PathSegment));
        assert_eq!(
            "extension:x-group".parse(),
            Ok(TagStrategy::Extension("x-group".into()))
        );
        assert!("extension:".parse::<TagStrategy>().is_err());
        assert!("alphabetical".parse::<TagStrategy>().is_err());
    }

    #[test]
    fn tag_strategy_display_round_trips() {
        let strategy = TagStrategy::Extension("x-group".into());
        assert_eq!(strategy.to_string().parse(), Ok(strategy));
    }

    #[test]
    fn rules_defaults() {
        let rules = GroupingRules::new();
        assert_eq!(rules.tag_strategy, TagStrategy::FirstTag);
        assert_eq!(rules.untagged_label, UNTAGGED);
        assert_eq!(rules.doc_prefix, "openapi/");
        assert!(!rules.untagged_last);
        assert!(rules.overview.is_none());
    }

    #[test]
    fn rules_deserialize_partial() {
        let rules: GroupingRules = serde_json::from_value(json!({
            "tagStrategy": "path-segment",
            "untaggedLast": true
        }))
        .unwrap();
        assert_eq!(rules.tag_strategy, TagStrategy::PathSegment);
        assert!(rules.untagged_last);
        assert_eq!(rules.untagged_label, UNTAGGED);
    }
}
