//! API Sidebar Synthesis
//!
//! Builds the navigation tree of an API reference site from the operations
//! of an OpenAPI description.
//!
//! Operations are grouped into categories by tag, in the order each tag is
//! first seen; items keep their declaration order. Every operation becomes
//! exactly one leaf with a globally unique document id.
//!
//! # Example
//!
//! ```
//! use api_sidebar::{synthesize, GroupingRules, HttpMethod, Operation};
//!
//! let operations = vec![
//!     Operation::new("resolve", HttpMethod::Get, "resolve").tag("Internal LLM"),
//!     Operation::new("createCase", HttpMethod::Post, "createCase").tag("cases"),
//!     Operation::new("resolve", HttpMethod::Get, "resolve"),
//! ];
//!
//! let tree = synthesize(&operations, &GroupingRules::new()).unwrap();
//!
//! let labels: Vec<_> = tree.categories().map(|c| c.label.as_str()).collect();
//! assert_eq!(labels, ["Internal LLM", "cases", "UNTAGGED"]);
//!
//! // The second "resolve" is suffixed in both id and label
//! let leaf = tree.find_leaf("openapi/resolve-1").unwrap();
//! assert_eq!(leaf.label, "resolve_1");
//! ```
//!
//! # Render Hints
//!
//! | Operation | Hint |
//! |-----------|------|
//! | `GET` | `api-method get` |
//! | deprecated `POST` | `menu__list-item--deprecated api-method post` |
//! | unknown method | `api-method` |
//!
//! # Collisions
//!
//! The first operation to claim an id keeps it. Later operations whose id or
//! label is taken get the smallest free numeric suffix, counted across the
//! whole sidebar rather than per category: `resolve`, `resolve_1`, ...

mod check;
mod emit;
mod error;
mod extract;
mod loader;
pub mod logging;
mod slug;
mod synthesize;
mod tree;
mod types;

pub use check::{check, CheckResult, Diagnostic, Severity};
pub use emit::{to_docusaurus, to_json, DEFAULT_SIDEBAR_ID};
pub use error::{ExtractError, LoadError, MalformedReason, SynthesizeError};
pub use extract::{extract_operations, overview_from_description};
pub use loader::{
    is_url, load_description, load_description_auto, load_description_str, load_operations,
    load_operations_auto, load_operations_str, load_rules,
};
pub use slug::{kebab_case, slugify};
pub use synthesize::{synthesize, synthesize_detailed, Adjustment, Synthesis};
pub use tree::{
    Category, DocLink, Leaf, NavigationNode, NavigationTree, RenderHint, API_METHOD_CLASS,
    DEPRECATED_CLASS,
};
pub use types::{
    GroupingRules, HttpMethod, Operation, Overview, TagStrategy, DEFAULT_DOC_PREFIX, UNTAGGED,
};

#[cfg(feature = "remote")]
pub use loader::load_description_url;
