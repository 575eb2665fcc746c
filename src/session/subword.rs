//! Subword resolution.
//!
//! A subword is the partial identifier immediately left of the caret, the
//! thing a committed candidate replaces. Resolution is a pure function over
//! one line of text; it never crosses a line boundary.

use compact_str::CompactString;
use tracing::trace;

use crate::buffer::TextBuffer;

/// Hard bound on the leftward scan. Stop with whatever was accumulated.
const SCAN_LIMIT: usize = 200;

/// Extracts the maximal run of identifier chars (letters, digits, `_`)
/// ending just left of `caret_column`. `None` means "no active subword":
/// caret at column 0 or past the line end, a bare `.` just typed, or a
/// digit-leading fragment.
pub fn resolve(line_text: &str, caret_column: usize) -> Option<CompactString> {
    let chars: Vec<char> = line_text.chars().collect();
    let x = caret_column.checked_sub(1)?;
    if x >= chars.len() {
        return None;
    }

    let seed = chars[x];

    // Lines whose trimmed content is a single char skip the walk entirely.
    if line_text.trim().chars().count() == 1 {
        return finish(seed.to_string().as_str(), false);
    }

    if seed == '.' {
        // The user just typed a qualifier dot; nothing to complete yet.
        return None;
    }

    let mut start = x;
    let mut scanned = 0usize;
    while start > 0 {
        let prev = chars[start - 1];
        if !(prev.is_alphanumeric() || prev == '_') {
            break;
        }
        start -= 1;
        scanned += 1;
        if scanned >= SCAN_LIMIT {
            trace!(limit = SCAN_LIMIT, "subword scan hit the length bound");
            break;
        }
    }

    let fragment: String = chars[start..=x].iter().collect();
    finish(&fragment, true)
}

fn finish(fragment: &str, reject_digit_leading: bool) -> Option<CompactString> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_suffix('.').unwrap_or(fragment);
    if fragment.is_empty() {
        return None;
    }
    if reject_digit_leading && fragment.chars().next().is_some_and(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(CompactString::from(fragment))
}

/// Resolves the live subword at the buffer's current caret. Used by the
/// commit path, which must not trust the anchor-time value.
pub fn resolve_at_caret(buffer: &dyn TextBuffer) -> Option<CompactString> {
    let line = buffer.caret_line();
    let line_text = buffer.line_text(line)?;
    let line_start = buffer.line_start_offset(line)?;
    let column = buffer.caret_offset().checked_sub(line_start)?;
    resolve(&line_text, column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;

    #[test]
    fn resolves_run_ending_at_caret() {
        assert_eq!(resolve("foo.ba", 6).as_deref(), Some("ba"));
        assert_eq!(resolve("a.b", 3).as_deref(), Some("b"));
        assert_eq!(resolve("let count_", 10).as_deref(), Some("count_"));
    }

    #[test]
    fn stops_at_non_identifier_chars() {
        assert_eq!(resolve("x + yz", 6).as_deref(), Some("yz"));
        assert_eq!(resolve("f(ab", 4).as_deref(), Some("ab"));
    }

    #[test]
    fn caret_out_of_range_yields_none() {
        assert_eq!(resolve("abc", 0), None);
        assert_eq!(resolve("abc", 4), None);
        assert_eq!(resolve("", 1), None);
    }

    #[test]
    fn bare_dot_yields_none() {
        assert_eq!(resolve(".", 1), None);
        assert_eq!(resolve("foo.", 4), None);
    }

    #[test]
    fn single_char_line_resolves_that_char() {
        assert_eq!(resolve("x", 1).as_deref(), Some("x"));
        assert_eq!(resolve("  x", 3).as_deref(), Some("x"));
    }

    #[test]
    fn digit_leading_fragment_rejected() {
        assert_eq!(resolve("9abc", 4), None);
        assert_eq!(resolve("x 12ab", 6), None);
    }

    #[test]
    fn scan_stops_at_length_bound() {
        let long = "a".repeat(400);
        let resolved = resolve(&long, 400).unwrap();
        // Seed plus at most SCAN_LIMIT scanned chars.
        assert_eq!(resolved.chars().count(), SCAN_LIMIT + 1);
    }

    #[test]
    fn whitespace_seed_trims_to_preceding_run() {
        assert_eq!(resolve("ab ", 3).as_deref(), Some("ab"));
    }

    #[test]
    fn resolve_at_caret_uses_caret_line_and_column() {
        let mut buffer = RopeBuffer::from_text("first\nfoo.ba");
        buffer.set_caret(12).unwrap();
        assert_eq!(resolve_at_caret(&buffer).as_deref(), Some("ba"));

        buffer.set_caret(6).unwrap();
        assert_eq!(resolve_at_caret(&buffer), None);
    }
}
