//! Input loading from various sources.
//!
//! Handles API descriptions, normalized operation lists and grouping rules
//! from files, strings, and HTTP URLs. JSON and YAML are both accepted.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::LoadError;
use crate::types::{GroupingRules, Operation};

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load an API description from a file path.
///
/// `.yaml` and `.yml` files are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or
/// `LoadError::InvalidJson`/`InvalidYaml` if it doesn't parse.
pub fn load_description(path: &Path) -> Result<Value, LoadError> {
    let content = read_file(path)?;
    if is_yaml_path(path) {
        parse_yaml(&content)
    } else {
        parse_json(&content)
    }
}

/// Load an API description from a string.
///
/// Tries JSON first and falls back to YAML. When neither parses the JSON
/// error is reported for input that looks like JSON, the YAML error otherwise.
pub fn load_description_str(content: &str) -> Result<Value, LoadError> {
    match parse_json(content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            let trimmed = content.trim_start();
            if trimmed.starts_with('{') || trimmed.starts_with('[') {
                // YAML is a JSON superset; give it one chance before reporting JSON
                parse_yaml(content).map_err(|_| json_err)
            } else {
                parse_yaml(content)
            }
        }
    }
}

/// Load an API description from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default). The body may be JSON
/// or YAML.
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails or the server
/// answers with an error status.
#[cfg(feature = "remote")]
pub fn load_description_url(url: &str) -> Result<Value, LoadError> {
    let network = |source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network)?;

    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(network)?;

    tracing::debug!(url, bytes = body.len(), "fetched description");
    load_description_str(&body)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load an API description from a file path or URL.
pub fn load_description_auto(source: &str) -> Result<Value, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_description_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_description(Path::new(source))
    }
}

/// Load a normalized operation list (JSON or YAML array) from a file.
pub fn load_operations(path: &Path) -> Result<Vec<Operation>, LoadError> {
    let value = load_description(path)?;
    from_value(value)
}

/// Load a normalized operation list from a string.
pub fn load_operations_str(content: &str) -> Result<Vec<Operation>, LoadError> {
    let value = load_description_str(content)?;
    from_value(value)
}

/// Load a normalized operation list from a file path or URL.
pub fn load_operations_auto(source: &str) -> Result<Vec<Operation>, LoadError> {
    from_value(load_description_auto(source)?)
}

/// Load grouping rules from a JSON or YAML file. Missing fields take defaults.
pub fn load_rules(path: &Path) -> Result<GroupingRules, LoadError> {
    let value = load_description(path)?;
    from_value(value)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, LoadError> {
    serde_json::from_value(value).map_err(|e| LoadError::InvalidOperations {
        message: e.to_string(),
    })
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn parse_json(content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

fn parse_yaml(content: &str) -> Result<Value, LoadError> {
    serde_yaml::from_str(content).map_err(|source| LoadError::InvalidYaml { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    use crate::types::{HttpMethod, TagStrategy};

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn load_json_file() {
        let file = temp_file(".json", r#"{"paths": {}}"#);
        let value = load_description(file.path()).unwrap();
        assert!(value["paths"].is_object());
    }

    #[test]
    fn load_yaml_file_preserves_order() {
        let file = temp_file(
            ".yaml",
            "paths:\n  /zeta:\n    get:\n      operationId: z\n  /alpha:\n    get:\n      operationId: a\n",
        );
        let value = load_description(file.path()).unwrap();
        let keys: Vec<_> = value["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/zeta", "/alpha"]);
    }

    #[test]
    fn load_missing_file() {
        let result = load_description(Path::new("/nonexistent/api.yaml"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_invalid_json_file() {
        let file = temp_file(".json", "{ not json }");
        let result = load_description(file.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_str_falls_back_to_yaml() {
        let value = load_description_str("openapi: 3.0.0\npaths: {}\n").unwrap();
        assert_eq!(value["openapi"], "3.0.0");
    }

    #[test]
    fn load_str_reports_json_error_for_broken_json() {
        let result = load_description_str(r#"{"paths": "#);
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_operations_from_str() {
        let ops = load_operations_str(
            r#"[
                {"operationId": "listCases", "method": "GET", "label": "listCases", "tags": ["cases"]},
                {"operationId": "legacy", "method": "post", "label": "legacy", "deprecated": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].method, HttpMethod::Get);
        assert!(ops[1].deprecated);
    }

    #[test]
    fn load_operations_rejects_object() {
        let result = load_operations_str(r#"{"operationId": "x"}"#);
        assert!(matches!(result, Err(LoadError::InvalidOperations { .. })));
    }

    #[test]
    fn load_rules_file() {
        let file = temp_file(".yml", "tagStrategy: extension:x-group\nuntaggedLabel: Other\n");
        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.tag_strategy, TagStrategy::Extension("x-group".into()));
        assert_eq!(rules.untagged_label, "Other");
        assert_eq!(rules.doc_prefix, "openapi/");
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("https://example.com/openapi.yaml"));
        assert!(is_url("http://localhost:8080/v3/api-docs"));
        assert!(!is_url("static/files/api.yaml"));
    }

    #[test]
    fn load_auto_file() {
        let file = temp_file(".json", r#"{"paths": {}}"#);
        let value = load_description_auto(file.path().to_str().unwrap()).unwrap();
        assert!(value.get("paths").is_some());
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn load_url_yaml_body() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/openapi.yaml")
                .with_status(200)
                .with_header("content-type", "application/yaml")
                .with_body("paths:\n  /cases:\n    get:\n      operationId: listCases\n")
                .create();

            let url = format!("{}/openapi.yaml", server.url());
            let value = load_description_url(&url).unwrap();
            assert_eq!(value["paths"]["/cases"]["get"]["operationId"], "listCases");
            mock.assert();
        }

        #[test]
        fn load_url_error_status() {
            let mut server = mockito::Server::new();
            let _mock = server.mock("GET", "/missing").with_status(404).create();

            let url = format!("{}/missing", server.url());
            let result = load_description_url(&url);
            assert!(matches!(result, Err(LoadError::NetworkError { .. })));
        }

        #[test]
        fn load_auto_url() {
            let mut server = mockito::Server::new();
            let _mock = server
                .mock("GET", "/api.json")
                .with_status(200)
                .with_body(r#"{"paths": {}}"#)
                .create();

            let value = load_description_auto(&format!("{}/api.json", server.url())).unwrap();
            assert!(value["paths"].is_object());
        }
    }
}
