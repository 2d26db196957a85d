//! Sidebar checking - reports what synthesis had to normalize or rename.
//!
//! Runs a full synthesis and turns its adjustments into diagnostics:
//! - E001 malformed operation (synthesis failed)
//! - W001 unknown HTTP method, rendered with the neutral hint
//! - W002 no usable tag, routed to the untagged category
//! - W003 identifier or label collided and was suffixed
//! - W004 blank operationId or label substituted from the other

use serde::Serialize;

use crate::synthesize::{synthesize_detailed, Adjustment};
use crate::types::{GroupingRules, Operation};

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic about one operation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    /// Index of the operation in the input sequence.
    pub position: usize,
    /// The operation's id (or label when the id is blank).
    pub operation: String,
    pub message: String,
}

/// Result of checking an operation list.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub operations: usize,
    pub categories: usize,
    pub leaves: usize,
    pub errors: usize,
    pub warnings: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Returns true if synthesis succeeded.
    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }

    /// Returns true if there were no errors, and no warnings under `strict`.
    pub fn passed(&self, strict: bool) -> bool {
        self.is_ok() && (!strict || self.warnings == 0)
    }
}

/// Check an operation list against the grouping rules.
pub fn check(operations: &[Operation], rules: &GroupingRules) -> CheckResult {
    let name_of = |position: usize| {
        operations
            .get(position)
            .map(|op| {
                if op.operation_id.trim().is_empty() {
                    op.label.trim().to_string()
                } else {
                    op.operation_id.trim().to_string()
                }
            })
            .unwrap_or_default()
    };

    let synthesis = match synthesize_detailed(operations, rules) {
        Ok(synthesis) => synthesis,
        Err(err) => {
            let position = err.position();
            return CheckResult {
                operations: operations.len(),
                categories: 0,
                leaves: 0,
                errors: 1,
                warnings: 0,
                diagnostics: vec![Diagnostic {
                    severity: Severity::Error,
                    code: "E001".to_string(),
                    position,
                    operation: name_of(position),
                    message: err.to_string(),
                }],
            };
        }
    };

    let mut diagnostics: Vec<Diagnostic> = synthesis
        .adjustments
        .iter()
        .map(|adjustment| {
            let (code, message) = describe(adjustment, rules);
            Diagnostic {
                severity: Severity::Warning,
                code: code.to_string(),
                position: adjustment.position(),
                operation: name_of(adjustment.position()),
                message,
            }
        })
        .collect();
    diagnostics.sort_by_key(|d| d.position);

    CheckResult {
        operations: operations.len(),
        categories: synthesis.tree.categories().count(),
        leaves: synthesis.tree.leaves().len(),
        errors: 0,
        warnings: diagnostics.len(),
        diagnostics,
    }
}

fn describe(adjustment: &Adjustment, rules: &GroupingRules) -> (&'static str, String) {
    match adjustment {
        Adjustment::UnknownMethod { method, .. } if method.is_empty() => {
            ("W001", "missing HTTP method".to_string())
        }
        Adjustment::UnknownMethod { method, .. } => {
            ("W001", format!("unknown HTTP method \"{}\"", method))
        }
        Adjustment::Untagged { .. } => (
            "W002",
            format!("no {} tag, placed in \"{}\"", rules.tag_strategy, rules.untagged_label),
        ),
        Adjustment::Renamed {
            original, assigned, ..
        } => ("W003", format!("\"{}\" collides, renamed to \"{}\"", original, assigned)),
        Adjustment::SubstitutedIdentifier { label, .. } => {
            ("W004", format!("blank operationId, using label \"{}\"", label))
        }
        Adjustment::SubstitutedLabel { operation_id, .. } => (
            "W004",
            format!("blank label, using operationId \"{}\"", operation_id),
        ),
    }
}
