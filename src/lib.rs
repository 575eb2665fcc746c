//! popcomp - interaction core for inline code-completion popups
//!
//! Module structure:
//! - models: candidate data (CompletionCandidate, CandidateKind)
//! - buffer: text-buffer port consumed from the host editor, plus a
//!   rope-backed reference implementation
//! - session: subword resolution, navigation state machine, commit protocol
//! - logging: tracing setup
//!
//! Rendering (popup layout, icons, scrollbars) and event wiring stay in the
//! host; navigation returns [`session::ScrollHint`] directives a
//! presentation layer translates into widget calls.

pub mod buffer;
pub mod logging;
pub mod models;
pub mod session;

pub use buffer::{BufferError, RopeBuffer, TextBuffer};
pub use models::{CandidateKind, CompletionCandidate, IconGroup};
pub use session::insert::{commit, CommitError, CommitOutcome};
pub use session::{CompletionSession, OpenError, ScrollHint};
