//! Rope-backed reference implementation of the text-buffer port.

use ropey::Rope;

use super::{BufferError, Result, TextBuffer};

#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
    caret: usize,
    read_only: bool,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            caret: 0,
            read_only: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            caret: 0,
            read_only: false,
        }
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            Err(BufferError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for RopeBuffer {
    fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let text = self.rope.line(line).to_string();
        let text = text.strip_suffix('\n').unwrap_or(&text);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Some(text.to_string())
    }

    fn line_start_offset(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.line_to_char(line))
    }

    fn caret_line(&self) -> usize {
        self.rope.char_to_line(self.caret.min(self.rope.len_chars()))
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn delete_range(&mut self, offset: usize, len: usize) -> Result<()> {
        self.check_writable()?;
        let end = offset.saturating_add(len);
        if end > self.rope.len_chars() {
            return Err(BufferError::RangeOutOfBounds {
                start: offset,
                end,
                len: self.rope.len_chars(),
            });
        }
        self.rope.remove(offset..end);
        self.caret = self.caret.min(self.rope.len_chars());
        Ok(())
    }

    fn insert_text(&mut self, offset: usize, text: &str) -> Result<()> {
        self.check_writable()?;
        if offset > self.rope.len_chars() {
            return Err(BufferError::OffsetOutOfBounds {
                offset,
                len: self.rope.len_chars(),
            });
        }
        self.rope.insert(offset, text);
        Ok(())
    }

    fn set_caret(&mut self, offset: usize) -> Result<()> {
        if offset > self.rope.len_chars() {
            return Err(BufferError::OffsetOutOfBounds {
                offset,
                len: self.rope.len_chars(),
            });
        }
        self.caret = offset;
        Ok(())
    }
}
