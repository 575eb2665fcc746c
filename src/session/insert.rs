//! Commit protocol: splices the highlighted candidate into the buffer.
//!
//! The subword is re-resolved against the live caret at commit time; the
//! buffer may have changed since the popup opened, so the anchor-time value
//! is never trusted. The delete+insert splice is pre-validated, and a
//! failed insert after a successful delete is rolled back best-effort so no
//! partial edit survives.

use tracing::{debug, warn};

use crate::buffer::{BufferError, TextBuffer};

use super::subword;
use super::CompletionSession;

#[derive(Debug)]
pub enum CommitError {
    /// The delete/insert transaction could not be applied (read-only
    /// buffer, stale offsets). Recoverable: the session is closed and the
    /// buffer left without a partial edit.
    BufferMutation(BufferError),
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitError::BufferMutation(e) => write!(f, "buffer mutation failed: {}", e),
        }
    }
}

impl std::error::Error for CommitError {}

impl From<BufferError> for CommitError {
    fn from(e: BufferError) -> Self {
        CommitError::BufferMutation(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// Final absolute caret offset, for the host to apply focus/visual
    /// caret placement.
    pub caret: usize,
    /// The visibly appended portion of the insertion text (the part not
    /// already typed as the live subword).
    pub inserted: String,
}

/// Commits the highlighted candidate. Closes the session on every exit
/// path; a failure leaves the buffer untouched.
pub fn commit(
    session: &mut CompletionSession,
    buffer: &mut dyn TextBuffer,
) -> Result<CommitOutcome, CommitError> {
    let result = apply(session, buffer);
    if let Err(err) = &result {
        warn!(error = %err, "completion commit failed");
    }
    session.close();
    result
}

fn apply(
    session: &CompletionSession,
    buffer: &mut dyn TextBuffer,
) -> Result<CommitOutcome, CommitError> {
    let live = subword::resolve_at_caret(buffer);
    let overlap = live.as_ref().map(|word| word.chars().count()).unwrap_or(0);

    let full = session.highlighted().insertion_text.clone();
    let suffix: String = full.chars().skip(overlap).collect();
    let insertion_position = session.insertion_position();

    debug!(
        subword = live.as_deref().unwrap_or(""),
        suffix = %suffix,
        insertion_position,
        "inserting completion"
    );

    let len = buffer.len_chars();
    if insertion_position > len {
        return Err(BufferError::OffsetOutOfBounds {
            offset: insertion_position,
            len,
        }
        .into());
    }
    // The live subword reaching left of the anchor column means the anchor
    // is stale beyond repair.
    let Some(splice_start) = insertion_position.checked_sub(overlap) else {
        return Err(BufferError::RangeOutOfBounds {
            start: 0,
            end: insertion_position,
            len,
        }
        .into());
    };

    // The caret must land inside the post-splice text. A candidate shorter
    // than the live subword yields an empty suffix whose caret arithmetic
    // overshoots the shrunken buffer; catch that before mutating anything.
    let caret = caret_after_insertion(insertion_position, &suffix);
    let post_len = len - overlap + full.chars().count();
    if caret > post_len {
        return Err(BufferError::OffsetOutOfBounds {
            offset: caret,
            len: post_len,
        }
        .into());
    }

    if overlap > 0 {
        buffer.delete_range(splice_start, overlap)?;
    }
    if let Err(err) = buffer.insert_text(splice_start, &full) {
        if overlap > 0 {
            if let Some(word) = live.as_ref() {
                // Best-effort rollback of the delete half of the splice.
                let _ = buffer.insert_text(splice_start, word);
            }
        }
        return Err(err.into());
    }

    if let Err(err) = buffer.set_caret(caret) {
        // Unreachable for a conforming buffer after the pre-validation
        // above; undo the splice so an error never leaves an edit behind.
        let _ = buffer.delete_range(splice_start, full.chars().count());
        if overlap > 0 {
            if let Some(word) = live.as_ref() {
                let _ = buffer.insert_text(splice_start, word);
            }
        }
        return Err(err.into());
    }

    Ok(CommitOutcome {
        caret,
        inserted: suffix,
    })
}

/// Caret placement from the visible suffix: inside the parameter list for a
/// freshly inserted call, otherwise at the end of the inserted text.
fn caret_after_insertion(insertion_position: usize, suffix: &str) -> usize {
    if suffix.ends_with(')') && suffix != "()" {
        if let Some(open_paren) = suffix.chars().position(|ch| ch == '(') {
            return insertion_position + open_paren + 1;
        }
    }
    insertion_position + suffix.chars().count()
}
