//! Navigation tree produced by synthesis.
//!
//! Serialized shape, one object per node:
//!
//! ```json
//! { "kind": "root", "label": "DocuDevs API", "targetId": "openapi/docudevs-api" }
//! { "kind": "category", "label": "cases", "children": [ ... ] }
//! { "kind": "leaf", "label": "listCases", "targetId": "openapi/list-cases",
//!   "renderHint": "api-method get", "operation": { ... } }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{HttpMethod, Operation};

/// Extra class for deprecated operations.
pub const DEPRECATED_CLASS: &str = "menu__list-item--deprecated";

/// Base class for every operation leaf.
pub const API_METHOD_CLASS: &str = "api-method";

/// Presentation marker attached to a leaf: method plus deprecation state.
///
/// Serialized as its class string, e.g.
/// `"menu__list-item--deprecated api-method post"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RenderHint {
    pub method: HttpMethod,
    pub deprecated: bool,
}

impl RenderHint {
    pub fn new(method: HttpMethod, deprecated: bool) -> Self {
        Self { method, deprecated }
    }
}

impl fmt::Display for RenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deprecated {
            write!(f, "{} ", DEPRECATED_CLASS)?;
        }
        f.write_str(API_METHOD_CLASS)?;
        if let Some(name) = self.method.hint_name() {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}

impl From<RenderHint> for String {
    fn from(hint: RenderHint) -> Self {
        hint.to_string()
    }
}

impl From<String> for RenderHint {
    fn from(classes: String) -> Self {
        let mut deprecated = false;
        let mut method = HttpMethod::default();
        for class in classes.split_whitespace() {
            match class {
                DEPRECATED_CLASS => deprecated = true,
                API_METHOD_CLASS => {}
                other => method = HttpMethod::parse(other),
            }
        }
        RenderHint { method, deprecated }
    }
}

/// Link to a document with no operation behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocLink {
    pub label: String,
    pub target_id: String,
}

/// Named group of leaves sharing a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub children: Vec<NavigationNode>,
}

impl Category {
    /// Leaves directly under this category.
    pub fn leaves(&self) -> impl Iterator<Item = &Leaf> {
        self.children.iter().filter_map(|node| match node {
            NavigationNode::Leaf(leaf) => Some(leaf),
            _ => None,
        })
    }
}

/// Terminal node for exactly one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaf {
    /// Display label, suffixed (`_1`, `_2`, ...) when it collided.
    pub label: String,
    /// Globally unique document id (`openapi/list-cases`).
    pub target_id: String,
    pub render_hint: RenderHint,
    pub operation: Operation,
}

/// Uniform tree element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NavigationNode {
    Root(DocLink),
    Category(Category),
    Leaf(Leaf),
}

impl NavigationNode {
    pub fn label(&self) -> &str {
        match self {
            NavigationNode::Root(link) => &link.label,
            NavigationNode::Category(category) => &category.label,
            NavigationNode::Leaf(leaf) => &leaf.label,
        }
    }
}

/// Ordered sidebar: optional root overview, then categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationTree {
    pub nodes: Vec<NavigationNode>,
}

impl NavigationTree {
    pub fn root(&self) -> Option<&DocLink> {
        self.nodes.iter().find_map(|node| match node {
            NavigationNode::Root(link) => Some(link),
            _ => None,
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.nodes.iter().filter_map(|node| match node {
            NavigationNode::Category(category) => Some(category),
            _ => None,
        })
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories().find(|c| c.label == label)
    }

    /// All leaves in display order.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut leaves = Vec::new();
        collect_leaves(&self.nodes, &mut leaves);
        leaves
    }

    pub fn find_leaf(&self, target_id: &str) -> Option<&Leaf> {
        self.leaves().into_iter().find(|l| l.target_id == target_id)
    }
}

fn collect_leaves<'a>(nodes: &'a [NavigationNode], out: &mut Vec<&'a Leaf>) {
    for node in nodes {
        match node {
            NavigationNode::Leaf(leaf) => out.push(leaf),
            NavigationNode::Category(category) => collect_leaves(&category.children, out),
            NavigationNode::Root(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_hint_plain() {
        let hint = RenderHint::new(HttpMethod::Get, false);
        assert_eq!(hint.to_string(), "api-method get");
    }

    #[test]
    fn render_hint_deprecated() {
        let hint = RenderHint::new(HttpMethod::Post, true);
        assert_eq!(
            hint.to_string(),
            "menu__list-item--deprecated api-method post"
        );
    }

    #[test]
    fn render_hint_unknown_method_is_neutral() {
        let hint = RenderHint::new(HttpMethod::Other("head".into()), false);
        assert_eq!(hint.to_string(), "api-method");

        let hint = RenderHint::new(HttpMethod::Other("trace".into()), true);
        assert_eq!(hint.to_string(), "menu__list-item--deprecated api-method");
    }

    #[test]
    fn render_hint_parses_class_string() {
        let hint = RenderHint::from("menu__list-item--deprecated api-method delete".to_string());
        assert_eq!(hint, RenderHint::new(HttpMethod::Delete, true));
    }

    #[test]
    fn node_serializes_with_kind() {
        let node = NavigationNode::Root(DocLink {
            label: "DocuDevs API".into(),
            target_id: "openapi/docudevs-api".into(),
        });
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "kind": "root",
                "label": "DocuDevs API",
                "targetId": "openapi/docudevs-api"
            })
        );
    }

    #[test]
    fn leaf_serializes_target_and_hint() {
        let node = NavigationNode::Leaf(Leaf {
            label: "createCase".into(),
            target_id: "openapi/create-case".into(),
            render_hint: RenderHint::new(HttpMethod::Post, false),
            operation: Operation::new("createCase", HttpMethod::Post, "createCase"),
        });
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "leaf");
        assert_eq!(value["targetId"], "openapi/create-case");
        assert_eq!(value["renderHint"], "api-method post");
        assert_eq!(value["operation"]["operationId"], "createCase");
    }

    #[test]
    fn tree_serializes_as_array() {
        let tree = NavigationTree {
            nodes: vec![NavigationNode::Category(Category {
                label: "cases".into(),
                children: vec![],
            })],
        };
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!([{ "kind": "category", "label": "cases", "children": [] }])
        );
    }
}
