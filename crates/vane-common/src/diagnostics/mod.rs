//! Constraint diagnostics: the closed set of reasons inference can mark a
//! node with, and a uniform renderer (spec.md §4.3, §7).
//!
//! Inference never aborts. A node that fails locally is replaced by a
//! *marked* node (see `vane_infer::marked`) naming one of these reasons;
//! the diagnostic itself is reported alongside for the user, independent of
//! whether compilation continues.

use crate::node_id::NodeId;
use crate::position::LineMap;
use crate::span::Span;
use std::collections::BTreeMap;

/// The closed set of diagnostic reasons inference can produce (spec.md §4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintReason {
    TypeMismatch,
    NotFunction,
    BranchMismatch,
    MissingField,
    AmbiguousRecord,
    NotRecord,
    OccursCycle,
    ArityMismatch,
    NotNumeric,
    NotBoolean,
    FreeVariable,
    DuplicateRecordField,
    NonExhaustiveMatch,
    AllErrorsOutsideResult,
    AllErrorsRequiresErr,
    ErrorRowPartialCoverage,
    InfectiousCallResultMismatch,
    InfectiousMatchResultMismatch,
    TypeExprUnknown,
    TypeExprArity,
    TypeExprUnsupported,
    TypeDeclDuplicate,
    TypeDeclInvalidMember,
    InternalError,
}

impl ConstraintReason {
    /// The short reason string rendered to the user, matching the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeMismatch => "type_mismatch",
            Self::NotFunction => "not_function",
            Self::BranchMismatch => "branch_mismatch",
            Self::MissingField => "missing_field",
            Self::AmbiguousRecord => "ambiguous_record",
            Self::NotRecord => "not_record",
            Self::OccursCycle => "occurs_cycle",
            Self::ArityMismatch => "arity_mismatch",
            Self::NotNumeric => "not_numeric",
            Self::NotBoolean => "not_boolean",
            Self::FreeVariable => "free_variable",
            Self::DuplicateRecordField => "duplicate_record_field",
            Self::NonExhaustiveMatch => "non_exhaustive_match",
            Self::AllErrorsOutsideResult => "all_errors_outside_result",
            Self::AllErrorsRequiresErr => "all_errors_requires_err",
            Self::ErrorRowPartialCoverage => "error_row_partial_coverage",
            Self::InfectiousCallResultMismatch => "infectious_call_result_mismatch",
            Self::InfectiousMatchResultMismatch => "infectious_match_result_mismatch",
            Self::TypeExprUnknown => "type_expr_unknown",
            Self::TypeExprArity => "type_expr_arity",
            Self::TypeExprUnsupported => "type_expr_unsupported",
            Self::TypeDeclDuplicate => "type_decl_duplicate",
            Self::TypeDeclInvalidMember => "type_decl_invalid_member",
            Self::InternalError => "internal_error",
        }
    }

    /// Whether this reason, when attached to a match, warrants the
    /// infectious-carrier non-exhaustiveness note (see `render`).
    ///
    /// Resolves spec.md §9's open question uniformly rather than narrowing
    /// to `Result`: any reason about exhaustiveness or partial row coverage
    /// qualifies, independent of which carrier type is involved.
    #[must_use]
    pub const fn wants_carrier_note(self) -> bool {
        matches!(
            self,
            Self::NonExhaustiveMatch | Self::ErrorRowPartialCoverage
        )
    }
}

/// A diagnostic produced at the inference boundary.
///
/// `details` holds reason-specific named values (e.g. `expected`/`actual`
/// type descriptions, a missing field name) rendered into the message.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ConstraintDiagnostic {
    pub origin: NodeId,
    pub span: Option<Span>,
    pub reason: ConstraintReason,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl ConstraintDiagnostic {
    #[must_use]
    pub fn new(origin: NodeId, reason: ConstraintReason) -> Self {
        Self {
            origin,
            span: None,
            reason,
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Render a diagnostic as a short reason line, an excerpt of the offending
/// source line when a span is available, and (uniformly, for any carrier
/// type) an explanatory note for exhaustiveness-related reasons.
#[must_use]
pub fn render(diagnostic: &ConstraintDiagnostic, file: &str, source: &str) -> String {
    let mut out = format!(
        "{file}: {} (at {})",
        diagnostic.reason.as_str(),
        diagnostic.origin
    );

    if !diagnostic.details.is_empty() {
        out.push_str(" {");
        for (i, (key, value)) in diagnostic.details.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{key}={value}"));
        }
        out.push('}');
    }

    if let Some(span) = diagnostic.span {
        let line_map = LineMap::build(source);
        let position = line_map.offset_to_position(span.start, source);
        let line_start = line_map.line_start(position.line as usize).unwrap_or(0);
        let line_end = line_map
            .line_start(position.line as usize + 1)
            .map_or(source.len() as u32, |s| s.saturating_sub(1));
        let excerpt = Span::new(line_start, line_end).slice_safe(source);
        out.push_str(&format!("\n  {} | {}", position.line + 1, excerpt));
    }

    if diagnostic.reason.wants_carrier_note() {
        out.push_str(
            "\n  note: this match does not cover every constructor of the carrier's \
             effect row; a value from an uncovered branch will raise a non-exhaustive \
             match error at runtime instead of failing to compile.",
        );
    }

    out
}

#[cfg(test)]
#[path = "../../tests/diagnostics.rs"]
mod tests;
