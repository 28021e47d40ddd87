//! Text joining for rendered log chunks

/// Join lines with `\n`, guaranteeing a trailing newline on non-empty output.
///
/// A single empty line joins to the empty string and stays empty, so a blank
/// chunk never produces a stray line break.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_adds_trailing_newline() {
        assert_eq!(join_lines(&["a", "b"]), "a\nb\n");
    }

    #[test]
    fn test_join_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(join_lines(&empty), "");
        assert_eq!(join_lines(&[""]), "");
    }

    #[test]
    fn test_join_keeps_existing_trailing_newline() {
        // A chunk ending in "\n" splits into a trailing empty line
        assert_eq!(join_lines(&["a", ""]), "a\n");
        assert_eq!(join_lines(&["", ""]), "\n");
    }
}
