//! Completion candidate model.
//!
//! Candidates are produced by an external analyzer and consumed read-only
//! by the session; the core never re-sorts or re-scores them.

use serde::{Deserialize, Serialize};

/// Origin/shape of a candidate, as reported by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateKind {
    LocalVariable,
    LocalField,
    PredefinedField,
    LocalMethod,
    PredefinedMethod,
    LocalClass,
    PredefinedClass,
}

/// Coarse grouping a renderer can map straight to an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconGroup {
    Variable,
    Field,
    Method,
    Class,
}

impl CandidateKind {
    pub fn icon_group(self) -> IconGroup {
        match self {
            CandidateKind::LocalVariable => IconGroup::Variable,
            CandidateKind::LocalField | CandidateKind::PredefinedField => IconGroup::Field,
            CandidateKind::LocalMethod | CandidateKind::PredefinedMethod => IconGroup::Method,
            CandidateKind::LocalClass | CandidateKind::PredefinedClass => IconGroup::Class,
        }
    }

    pub fn is_callable(self) -> bool {
        matches!(
            self,
            CandidateKind::LocalMethod | CandidateKind::PredefinedMethod
        )
    }
}

/// One selectable completion entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCandidate {
    pub kind: CandidateKind,
    /// Shown in the popup list.
    pub display_label: String,
    /// Full text spliced into the buffer on commit. For callables this
    /// carries the trailing `(...)` shape.
    pub insertion_text: String,
}

impl CompletionCandidate {
    pub fn new(
        kind: CandidateKind,
        display_label: impl Into<String>,
        insertion_text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            display_label: display_label.into(),
            insertion_text: insertion_text.into(),
        }
    }

    /// Builds a callable candidate, appending `()` when the insertion text
    /// is a bare identifier so the commit path can park the caret inside
    /// the parameter list.
    pub fn callable(kind: CandidateKind, label: impl Into<String>) -> Self {
        let label = label.into();
        let insertion_text = if is_bare_identifier(&label) {
            format!("{label}()")
        } else {
            label.clone()
        };
        Self {
            kind,
            display_label: label,
            insertion_text,
        }
    }
}

fn is_bare_identifier(text: &str) -> bool {
    if text.is_empty() || text.contains('(') || text.chars().any(|ch| ch.is_whitespace()) {
        return false;
    }

    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || unicode_xid::UnicodeXID::is_xid_start(first)) {
        return false;
    }

    chars.all(|ch| ch == '_' || unicode_xid::UnicodeXID::is_xid_continue(ch))
}
