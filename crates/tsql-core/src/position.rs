//! Offset to line/column conversion
//!
//! Tokens and errors only carry byte offsets; this index resolves them to
//! human positions at the boundary (CLI output, test failure messages).

/// Line start table for a source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    /// Build the index. Both LF and CRLF line endings are recognized; the
    /// line break is attributed to the line it terminates.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Number of lines in the source (an empty source has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Resolve a byte offset to a 1-based `(line, column)` pair. The column
    /// is measured in bytes. Offsets past the end clamp to the end.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new("SELECT 1");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_column(0), (1, 1));
        assert_eq!(index.line_column(7), (1, 8));
    }

    #[test]
    fn test_crlf_lines() {
        let index = LineIndex::new("SELECT 1\r\nGO\r\nPRINT 2");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_column(10), (2, 1));
        assert_eq!(index.line_column(14), (3, 1));
        assert_eq!(index.line_column(8), (1, 9));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("a\nb");
        assert_eq!(index.line_column(99), (2, 2));
    }

    proptest! {
        #[test]
        fn line_column_is_monotonic(source in "[a-z \n]{0,64}", a in 0usize..80, b in 0usize..80) {
            let index = LineIndex::new(&source);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(index.line_column(lo) <= index.line_column(hi));
        }
    }
}
