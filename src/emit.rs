//! Tree serialization for documentation renderers.

use crate::tree::{NavigationNode, NavigationTree};

/// Default sidebar id used in the Docusaurus module.
pub const DEFAULT_SIDEBAR_ID: &str = "apisidebar";

const INDENT: &str = "  ";

/// Serialize the tree in its generic node shape.
pub fn to_json(tree: &NavigationTree, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(tree)
    } else {
        serde_json::to_string(tree)
    }
}

/// Render the tree as a Docusaurus `SidebarsConfig` TypeScript module.
///
/// ```text
/// import type { SidebarsConfig } from "@docusaurus/plugin-content-docs";
///
/// const sidebar: SidebarsConfig = {
///   apisidebar: [
///     {
///       type: "doc",
///       id: "openapi/docudevs-api",
///     },
///     ...
///   ],
/// };
///
/// export default sidebar.apisidebar;
/// ```
pub fn to_docusaurus(tree: &NavigationTree, sidebar_id: &str) -> String {
    let mut out = String::new();
    out.push_str("import type { SidebarsConfig } from \"@docusaurus/plugin-content-docs\";\n\n");
    out.push_str("const sidebar: SidebarsConfig = {\n");
    out.push_str(&format!("{}{}: [\n", INDENT, object_key(sidebar_id)));
    for node in &tree.nodes {
        write_node(&mut out, node, 2);
    }
    out.push_str(&format!("{}],\n", INDENT));
    out.push_str("};\n\n");
    out.push_str(&format!("export default sidebar{};\n", member_access(sidebar_id)));
    out
}

fn write_node(out: &mut String, node: &NavigationNode, depth: usize) {
    let pad = INDENT.repeat(depth);
    let field = |out: &mut String, key: &str, value: &str| {
        out.push_str(&format!("{}{}{}: {},\n", pad, INDENT, key, quote(value)));
    };

    out.push_str(&format!("{}{{\n", pad));
    match node {
        NavigationNode::Root(link) => {
            field(out, "type", "doc");
            field(out, "id", &link.target_id);
        }
        NavigationNode::Category(category) => {
            field(out, "type", "category");
            field(out, "label", &category.label);
            out.push_str(&format!("{}{}items: [\n", pad, INDENT));
            for child in &category.children {
                write_node(out, child, depth + 2);
            }
            out.push_str(&format!("{}{}],\n", pad, INDENT));
        }
        NavigationNode::Leaf(leaf) => {
            field(out, "type", "doc");
            field(out, "id", &leaf.target_id);
            field(out, "label", &leaf.label);
            field(out, "className", &leaf.render_hint.to_string());
        }
    }
    out.push_str(&format!("{}}},\n", pad));
}

/// True when `s` can be written bare as a TypeScript property name.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn object_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn member_access(key: &str) -> String {
    if is_identifier(key) {
        format!(".{}", key)
    } else {
        format!("[{}]", quote(key))
    }
}

/// Double-quoted string literal; JSON escaping is valid TypeScript.
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
