//! Sidebar synthesis - groups operations by tag into a navigation tree.
//!
//! Synthesis is a pure function of `(operations, rules)`. Operations are
//! scanned in source order; each tag opens a category the first time it is
//! seen, and every operation becomes one leaf in its category. Leaf ids and
//! labels are made globally unique by suffixing later collisions
//! (`resolve`, `resolve_1`, `resolve_2`, ...).

use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{MalformedReason, SynthesizeError};
use crate::slug::kebab_case;
use crate::tree::{Category, DocLink, Leaf, NavigationNode, NavigationTree, RenderHint};
use crate::types::{json_type_name, GroupingRules, Operation, TagStrategy};

/// Slug used when an identifier has no alphanumeric characters.
const FALLBACK_SLUG: &str = "operation";

/// A normalization or rename applied to one operation during synthesis.
///
/// None of these are errors; they are recorded so callers can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    /// Method outside the known set; leaf gets the neutral render hint.
    UnknownMethod { position: usize, method: String },
    /// No usable tag; routed to the untagged category.
    Untagged { position: usize },
    /// Blank operationId replaced by the label.
    SubstitutedIdentifier { position: usize, label: String },
    /// Blank label replaced by the operationId.
    SubstitutedLabel { position: usize, operation_id: String },
    /// Identifier or label collided with an earlier leaf and was suffixed.
    Renamed {
        position: usize,
        original: String,
        assigned: String,
    },
}

impl Adjustment {
    /// Input position of the operation this applies to.
    pub fn position(&self) -> usize {
        match self {
            Adjustment::UnknownMethod { position, .. }
            | Adjustment::Untagged { position }
            | Adjustment::SubstitutedIdentifier { position, .. }
            | Adjustment::SubstitutedLabel { position, .. }
            | Adjustment::Renamed { position, .. } => *position,
        }
    }
}

/// Tree plus the adjustments made while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub tree: NavigationTree,
    pub adjustments: Vec<Adjustment>,
}

/// Build the navigation tree for a list of operations.
///
/// # Errors
///
/// Returns `SynthesizeError::MalformedOperation` when an operation has
/// neither an id nor a label, or when the tag strategy cannot be applied to
/// it. No tree is produced in that case.
pub fn synthesize(
    operations: &[Operation],
    rules: &GroupingRules,
) -> Result<NavigationTree, SynthesizeError> {
    synthesize_detailed(operations, rules).map(|synthesis| synthesis.tree)
}

/// Like [`synthesize`], also returning every normalization and rename applied.
pub fn synthesize_detailed(
    operations: &[Operation],
    rules: &GroupingRules,
) -> Result<Synthesis, SynthesizeError> {
    let mut adjustments = Vec::new();
    let mut names = NameRegistry::default();
    if let Some(overview) = &rules.overview {
        names.reserve_slug(&overview.id);
    }
    let mut groups: IndexMap<String, Vec<NavigationNode>> = IndexMap::new();

    for position in source_order(operations) {
        let op = &operations[position];
        let malformed = |reason| SynthesizeError::MalformedOperation { position, reason };

        let id = op.operation_id.trim();
        let label = op.label.trim();
        let (key, label) = match (id.is_empty(), label.is_empty()) {
            (true, true) => return Err(malformed(MalformedReason::MissingIdentity)),
            (true, false) => {
                adjustments.push(Adjustment::SubstitutedIdentifier {
                    position,
                    label: label.to_string(),
                });
                (label, label)
            }
            (false, true) => {
                adjustments.push(Adjustment::SubstitutedLabel {
                    position,
                    operation_id: id.to_string(),
                });
                (id, id)
            }
            (false, false) => (id, label),
        };

        let category = match extract_tag(op, &rules.tag_strategy).map_err(malformed)? {
            Some(tag) => tag,
            None => {
                adjustments.push(Adjustment::Untagged { position });
                rules.untagged_label.clone()
            }
        };

        if !op.method.is_known() {
            adjustments.push(Adjustment::UnknownMethod {
                position,
                method: op.method.to_string(),
            });
        }

        let (slug, assigned) = names.assign(key, label);
        if assigned != label {
            tracing::trace!(
                position,
                original = label,
                assigned = %assigned,
                "renamed colliding operation"
            );
            adjustments.push(Adjustment::Renamed {
                position,
                original: label.to_string(),
                assigned: assigned.clone(),
            });
        }

        groups
            .entry(category)
            .or_default()
            .push(NavigationNode::Leaf(Leaf {
                label: assigned,
                target_id: format!("{}{}", rules.doc_prefix, slug),
                render_hint: RenderHint::new(op.method.clone(), op.deprecated),
                operation: op.clone(),
            }));
    }

    if rules.untagged_last {
        if let Some(items) = groups.shift_remove(&rules.untagged_label) {
            groups.insert(rules.untagged_label.clone(), items);
        }
    }

    let mut nodes = Vec::with_capacity(groups.len() + 1);
    if let Some(overview) = &rules.overview {
        nodes.push(NavigationNode::Root(DocLink {
            label: overview.label.clone(),
            target_id: format!("{}{}", rules.doc_prefix, overview.id),
        }));
    }
    nodes.extend(
        groups
            .into_iter()
            .map(|(label, children)| NavigationNode::Category(Category { label, children })),
    );

    tracing::debug!(
        operations = operations.len(),
        nodes = nodes.len(),
        adjustments = adjustments.len(),
        "synthesized sidebar"
    );

    Ok(Synthesis {
        tree: NavigationTree { nodes },
        adjustments,
    })
}

/// Input indices sorted by effective source order. The sort is stable, so
/// equal orders keep their input sequence.
fn source_order(operations: &[Operation]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..operations.len()).collect();
    order.sort_by_key(|&i| operations[i].source_order.unwrap_or(i));
    order
}

/// Read the grouping tag. `Ok(None)` routes to the untagged category.
fn extract_tag(op: &Operation, strategy: &TagStrategy) -> Result<Option<String>, MalformedReason> {
    let unusable = |message: String| MalformedReason::UnusableTagStrategy {
        strategy: strategy.to_string(),
        message,
    };

    let tag = match strategy {
        TagStrategy::FirstTag => op.tags.first().cloned(),
        TagStrategy::PathSegment => {
            let path = op
                .path
                .as_deref()
                .ok_or_else(|| unusable("operation has no path".to_string()))?;
            path.split('/')
                .map(str::trim)
                .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
                .map(String::from)
        }
        TagStrategy::Extension(key) => match op.extensions.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(items)) => match items.first() {
                None => None,
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    return Err(unusable(format!(
                        "{} holds an array of {}, expected strings",
                        key,
                        json_type_name(other)
                    )))
                }
            },
            Some(other) => {
                return Err(unusable(format!(
                    "{} is {}, expected string or array of strings",
                    key,
                    json_type_name(other)
                )))
            }
        },
    };

    Ok(tag
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}

/// Hands out globally unique (slug, label) pairs in appearance order.
#[derive(Default)]
struct NameRegistry {
    slugs: HashSet<String>,
    labels: HashSet<String>,
}

impl NameRegistry {
    /// Claim a document slug that no leaf may take.
    fn reserve_slug(&mut self, slug: &str) {
        self.slugs.insert(slug.to_string());
    }

    /// The first claimant keeps its names. Later collisions on either the
    /// slug or the label take the smallest free suffix `n`, applied to both
    /// as `slug-n` and `label_n`.
    fn assign(&mut self, key: &str, label: &str) -> (String, String) {
        let mut base = kebab_case(key);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let (slug, name) = if !self.slugs.contains(&base) && !self.labels.contains(label) {
            (base, label.to_string())
        } else {
            (1..)
                .map(|n| (format!("{}-{}", base, n), format!("{}_{}", label, n)))
                .find(|(slug, name)| !self.slugs.contains(slug) && !self.labels.contains(name))
                .unwrap_or_default()
        };

        self.slugs.insert(slug.clone());
        self.labels.insert(name.clone());
        (slug, name)
    }
}
