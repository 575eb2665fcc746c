//! Data model layer.

pub mod candidate;

pub use candidate::{CandidateKind, CompletionCandidate, IconGroup};
