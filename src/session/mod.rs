//! Completion session: the state machine behind the popup.
//!
//! One session per completion interaction. Created on trigger, mutated by
//! navigation and re-query, discarded on commit or dismissal. Single-owner;
//! the host's event dispatch serializes all access, so there is no locking
//! here.

pub mod insert;
pub mod subword;

use compact_str::CompactString;
use tracing::debug;

use crate::models::CompletionCandidate;

pub type OpenResult<T> = std::result::Result<T, OpenError>;

#[derive(Debug)]
pub enum OpenError {
    /// An empty candidate list is never shown; the host must not open.
    EmptyCandidateSet,
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::EmptyCandidateSet => write!(f, "empty candidate set"),
        }
    }
}

impl std::error::Error for OpenError {}

/// Abstract scroll directive returned by navigation. The presentation
/// layer translates it into concrete widget calls; the core never touches
/// list geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollHint {
    /// Selection wrapped from the first item to the last.
    WrapToBottom,
    /// Selection wrapped from the last item to the first.
    WrapToTop,
    StepUp,
    StepDown,
}

impl ScrollHint {
    pub fn wraps(self) -> bool {
        matches!(self, ScrollHint::WrapToBottom | ScrollHint::WrapToTop)
    }

    /// Signed scroll amount in track units for a scrollbar spanning
    /// `track_range`. Steps move by the proportional
    /// `track_range / item_count` unit; wraps jump to a track extreme.
    pub fn delta_units(self, track_range: usize, item_count: usize) -> isize {
        let step = (track_range / item_count.max(1)) as isize;
        match self {
            ScrollHint::WrapToBottom => track_range as isize,
            ScrollHint::WrapToTop => -(track_range as isize),
            ScrollHint::StepUp => -step,
            ScrollHint::StepDown => step,
        }
    }
}

/// Mutable core state of the popup.
///
/// Candidate order is caller-supplied and significant (index 0 is the
/// default selection); the session never re-sorts it.
#[derive(Debug, Clone)]
pub struct CompletionSession {
    candidates: Vec<CompletionCandidate>,
    selected: usize,
    anchor_subword: CompactString,
    insertion_position: usize,
    visible: bool,
    refresh_pending: bool,
}

impl CompletionSession {
    /// Opens a session with `selected = 0`. A dot-qualified anchor subword
    /// keeps only the segment after the last `.` (`foo.bar` anchors `bar`).
    pub fn open(
        candidates: Vec<CompletionCandidate>,
        anchor_subword: &str,
        insertion_position: usize,
    ) -> OpenResult<Self> {
        if candidates.is_empty() {
            return Err(OpenError::EmptyCandidateSet);
        }
        let anchor = strip_qualifier(anchor_subword);
        debug!(
            candidates = candidates.len(),
            anchor, insertion_position, "completion session opened"
        );
        Ok(Self {
            candidates,
            selected: 0,
            anchor_subword: CompactString::from(anchor),
            insertion_position,
            visible: true,
            refresh_pending: true,
        })
    }

    /// Replaces the candidate list and anchor state in place; used when the
    /// user keeps typing and the set is re-queried. Resets the selection,
    /// keeps the session open.
    pub fn refresh(
        &mut self,
        candidates: Vec<CompletionCandidate>,
        anchor_subword: &str,
        insertion_position: usize,
    ) -> OpenResult<()> {
        if candidates.is_empty() {
            return Err(OpenError::EmptyCandidateSet);
        }
        self.candidates = candidates;
        self.selected = 0;
        self.anchor_subword = CompactString::from(strip_qualifier(anchor_subword));
        self.insertion_position = insertion_position;
        self.refresh_pending = true;
        Ok(())
    }

    /// Currently highlighted candidate.
    ///
    /// The selected index is in range for any open session; calling this on
    /// a closed session is a programming error and panics.
    pub fn highlighted(&self) -> &CompletionCandidate {
        debug_assert!(
            self.selected < self.candidates.len(),
            "selected index {} out of range {}",
            self.selected,
            self.candidates.len()
        );
        &self.candidates[self.selected]
    }

    /// Moves the highlight up, wrapping from the first item to the last.
    pub fn move_up(&mut self) -> ScrollHint {
        self.refresh_pending = true;
        if self.selected == 0 {
            self.selected = self.candidates.len().saturating_sub(1);
            ScrollHint::WrapToBottom
        } else {
            self.selected -= 1;
            ScrollHint::StepUp
        }
    }

    /// Moves the highlight down, wrapping from the last item to the first.
    pub fn move_down(&mut self) -> ScrollHint {
        self.refresh_pending = true;
        if self.selected + 1 >= self.candidates.len() {
            self.selected = 0;
            ScrollHint::WrapToTop
        } else {
            self.selected += 1;
            ScrollHint::StepDown
        }
    }

    /// Closes the session. The object is discarded afterward; there is no
    /// reopen. Never touches the buffer.
    pub fn close(&mut self) {
        self.visible = false;
        self.candidates.clear();
        self.selected = 0;
        self.refresh_pending = false;
    }

    /// Drains the coalesced repaint flag. Every state mutation sets it; the
    /// host calls this once per event-dispatch round and repaints from the
    /// live session state, so a late repaint always observes the latest
    /// state (last-write-wins, no queued refreshes).
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn candidates(&self) -> &[CompletionCandidate] {
        &self.candidates
    }

    pub fn anchor_subword(&self) -> &str {
        &self.anchor_subword
    }

    /// Absolute buffer offset just after the last char of the anchor
    /// subword.
    pub fn insertion_position(&self) -> usize {
        self.insertion_position
    }
}

fn strip_qualifier(subword: &str) -> &str {
    match subword.rfind('.') {
        Some(idx) => &subword[idx + 1..],
        None => subword,
    }
}
