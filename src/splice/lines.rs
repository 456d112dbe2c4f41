use tracing::debug;

use super::range::{Bounds, LineRange};
use crate::error::SpliceResult;

/// Result of splicing a replacement into a line sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    pub content: String,
    pub lines_before: usize,
    pub lines_removed: usize,
    pub lines_inserted: usize,
    pub lines_after: usize,
}

/// Split text into lines, each keeping its `\n` terminator.
///
/// A trailing fragment without a terminator is a line of its own and the
/// empty string has no lines, so joining the result gives back `text`.
/// Only `\n` ends a line: `\r\n` stays inside one line and a lone `\r`
/// (classic Mac endings) does not break lines at all.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Count the lines `split_lines` would produce without allocating them
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    let newlines = text.bytes().filter(|&b| b == b'\n').count();
    if text.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Replace `range` of the lines in `source` with `replacement`.
///
/// The output is `lines[..start] + replacement + lines[end..]`; the
/// replacement goes in verbatim, no terminator is added or stripped.
pub fn splice_lines(
    source: &str,
    replacement: &str,
    range: LineRange,
    bounds: Bounds,
) -> SpliceResult<SpliceOutcome> {
    let lines = split_lines(source);
    let (head, tail) = range.resolve(lines.len(), bounds)?;

    let mut content = String::with_capacity(source.len() + replacement.len());
    for line in &lines[..head] {
        content.push_str(line);
    }
    content.push_str(replacement);
    for line in &lines[tail..] {
        content.push_str(line);
    }

    let outcome = SpliceOutcome {
        lines_before: lines.len(),
        lines_removed: tail.saturating_sub(head),
        lines_inserted: line_count(replacement),
        lines_after: line_count(&content),
        content,
    };

    debug!(
        "Spliced range {} (resolved {}..{}): {} -> {} lines",
        range, head, tail, outcome.lines_before, outcome.lines_after
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpliceError;

    #[test]
    fn test_split_lines_keeps_terminators() {
        assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n\n"), vec!["\n", "\n"]);
    }

    #[test]
    fn test_lone_carriage_return_is_not_a_line_break() {
        assert_eq!(split_lines("a\rb"), vec!["a\rb"]);
        assert_eq!(split_lines("a\rb\rc\n"), vec!["a\rb\rc\n"]);
        assert_eq!(line_count("a\rb"), 1);
    }

    #[test]
    fn test_line_count_matches_split() {
        for text in ["", "a", "a\n", "a\nb", "a\nb\n", "\n\n\n", "x\r\ny"] {
            assert_eq!(line_count(text), split_lines(text).len(), "{:?}", text);
        }
    }

    #[test]
    fn test_splice_replaces_middle_block() {
        let outcome =
            splice_lines("A\nB\nC\nD\n", "X\nY\n", LineRange::new(1, 3), Bounds::Strict).unwrap();
        assert_eq!(outcome.content, "A\nX\nY\nD\n");
        assert_eq!(outcome.lines_before, 4);
        assert_eq!(outcome.lines_removed, 2);
        assert_eq!(outcome.lines_inserted, 2);
        assert_eq!(outcome.lines_after, 4);
    }

    #[test]
    fn test_splice_insert_and_append() {
        let inserted =
            splice_lines("A\nB\n", "X\n", LineRange::new(1, 1), Bounds::Strict).unwrap();
        assert_eq!(inserted.content, "A\nX\nB\n");
        assert_eq!(inserted.lines_removed, 0);

        let appended =
            splice_lines("A\nB\n", "X\n", LineRange::new(2, 2), Bounds::Strict).unwrap();
        assert_eq!(appended.content, "A\nB\nX\n");
    }

    #[test]
    fn test_splice_empty_replacement_deletes() {
        let outcome = splice_lines("A\nB\nC\n", "", LineRange::new(0, 2), Bounds::Strict).unwrap();
        assert_eq!(outcome.content, "C\n");
        assert_eq!(outcome.lines_inserted, 0);
        assert_eq!(outcome.lines_after, 1);
    }

    #[test]
    fn test_replacement_is_inserted_verbatim() {
        // No newline is added after a replacement that lacks one
        let outcome = splice_lines("A\nB\nC\n", "X", LineRange::new(1, 2), Bounds::Strict).unwrap();
        assert_eq!(outcome.content, "A\nXC\n");
    }

    #[test]
    fn test_crlf_lines_survive() {
        let outcome =
            splice_lines("A\r\nB\r\nC\r\n", "X\r\n", LineRange::new(1, 2), Bounds::Strict)
                .unwrap();
        assert_eq!(outcome.content, "A\r\nX\r\nC\r\n");
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let err = splice_lines("A\nB\n", "X\n", LineRange::new(1, 3), Bounds::Strict).unwrap_err();
        assert!(matches!(err, SpliceError::InvalidRange { line_count: 2, .. }));

        let err = splice_lines("A\nB\n", "X\n", LineRange::new(2, 1), Bounds::Strict).unwrap_err();
        assert!(matches!(err, SpliceError::InvalidRange { .. }));
    }

    #[test]
    fn test_clamp_follows_slice_semantics() {
        let past_end =
            splice_lines("A\nB\n", "X\n", LineRange::new(1, 10), Bounds::Clamp).unwrap();
        assert_eq!(past_end.content, "A\nX\n");

        // Reversed range duplicates the lines between end and start
        let reversed =
            splice_lines("A\nB\nC\nD\n", "X\n", LineRange::new(3, 1), Bounds::Clamp).unwrap();
        assert_eq!(reversed.content, "A\nB\nC\nX\nB\nC\nD\n");
        assert_eq!(reversed.lines_removed, 0);
    }

    #[test]
    fn test_second_run_changes_a_different_block() {
        let range = LineRange::new(1, 3);
        let first = splice_lines("A\nB\nC\nD\n", "X\n", range, Bounds::Strict).unwrap();
        assert_eq!(first.content, "A\nX\nD\n");
        let second = splice_lines(&first.content, "X\n", range, Bounds::Strict).unwrap();
        assert_eq!(second.content, "A\nX\n");
    }
}
