//! Text-buffer port.
//!
//! The host editor owns the document; the core only needs line access,
//! caret queries, and the delete/insert/set-caret mutations used by the
//! commit protocol. All offsets are absolute char offsets into the buffer;
//! `line_start_offset(line) + column` is an absolute offset.

pub mod rope;

pub use rope::RopeBuffer;

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug)]
pub enum BufferError {
    OffsetOutOfBounds { offset: usize, len: usize },
    RangeOutOfBounds { start: usize, end: usize, len: usize },
    ReadOnly,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {} out of bounds (len {})", offset, len)
            }
            BufferError::RangeOutOfBounds { start, end, len } => {
                write!(f, "range {}..{} out of bounds (len {})", start, end, len)
            }
            BufferError::ReadOnly => write!(f, "buffer is read-only"),
        }
    }
}

impl std::error::Error for BufferError {}

pub trait TextBuffer {
    /// Text of `line` without the trailing newline, or `None` past the end.
    fn line_text(&self, line: usize) -> Option<String>;

    /// Absolute char offset of the first char of `line`.
    fn line_start_offset(&self, line: usize) -> Option<usize>;

    fn caret_line(&self) -> usize;

    /// Absolute char offset of the caret.
    fn caret_offset(&self) -> usize;

    fn len_chars(&self) -> usize;

    /// Removes `len` chars starting at `offset`.
    fn delete_range(&mut self, offset: usize, len: usize) -> Result<()>;

    /// Inserts `text` at `offset`. Does not move the caret.
    fn insert_text(&mut self, offset: usize, text: &str) -> Result<()>;

    fn set_caret(&mut self, offset: usize) -> Result<()>;
}
