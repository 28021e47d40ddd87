//! Append-only log line history

/// Ordered sequence of log lines in arrival order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogHistory {
    lines: Vec<String>,
}

impl LogHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from a full text buffer, keeping every line (blank ones
    /// included). A trailing newline yields a trailing empty line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Split `chunk` into lines and append them.
    ///
    /// Returns every line of the chunk, in order. When `drop_blank` is set,
    /// empty and whitespace-only lines are returned but not stored. Otherwise
    /// the empty segment after a trailing newline is still not stored, so
    /// `"a\n"` followed by `"b\n"` leaves `["a", "b"]`.
    pub fn append_chunk(&mut self, chunk: &str, drop_blank: bool) -> Vec<String> {
        let new_lines: Vec<String> = chunk.split('\n').map(str::to_string).collect();

        let stored = if drop_blank {
            new_lines.as_slice()
        } else if chunk.ends_with('\n') {
            &new_lines[..new_lines.len() - 1]
        } else {
            new_lines.as_slice()
        };
        self.lines.extend(
            stored
                .iter()
                .filter(|line| !drop_blank || !line.trim().is_empty())
                .cloned(),
        );
        new_lines
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_keeps_blank_lines() {
        let history = LogHistory::from_text("a\n\nb\n");
        assert_eq!(history.lines(), &["a", "", "b", ""]);
    }

    #[test]
    fn test_from_empty_text() {
        // Splitting "" still yields one empty line
        assert_eq!(LogHistory::from_text("").len(), 1);
    }

    #[test]
    fn test_append_chunk_drops_blank_lines_from_storage_only() {
        let mut history = LogHistory::new();
        let new_lines = history.append_chunk("one\n   \ntwo\n", true);

        assert_eq!(new_lines, vec!["one", "   ", "two", ""]);
        assert_eq!(history.lines(), &["one", "two"]);
    }

    #[test]
    fn test_append_chunk_keeps_blank_lines_when_asked() {
        let mut history = LogHistory::new();
        history.append_chunk("one\n\ntwo", false);
        assert_eq!(history.lines(), &["one", "", "two"]);
    }

    #[test]
    fn test_kept_blank_lines_do_not_include_line_terminators() {
        let mut history = LogHistory::from_text("start");
        history.append_chunk("a\n", false);
        history.append_chunk("b\n", false);
        history.append_chunk("\n", false);
        history.append_chunk("c\n\n", false);
        assert_eq!(history.lines(), &["start", "a", "b", "", "c", ""]);
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut history = LogHistory::from_text("first");
        history.append_chunk("second\n", true);
        history.append_chunk("third\n", true);
        assert_eq!(history.lines(), &["first", "second", "third"]);
    }
}
