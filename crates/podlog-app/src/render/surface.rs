//! Render surfaces: where filtered log text ends up

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use podlog_core::prelude::*;

/// A text display the engine can clear and append to
pub trait RenderSurface {
    /// Remove everything rendered so far
    fn clear(&mut self) -> Result<()>;

    /// Append a block of text after what is already shown
    fn append_text(&mut self, text: &str) -> Result<()>;
}

/// In-memory surface that records every operation
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    text: String,
    appends: Vec<String>,
    clears: usize,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Displayed text split back into lines
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    /// Every append since creation, including those wiped by a clear
    pub fn appends(&self) -> &[String] {
        &self.appends
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl RenderSurface for TextSurface {
    fn clear(&mut self) -> Result<()> {
        self.text.clear();
        self.clears += 1;
        Ok(())
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        self.text.push_str(text);
        self.appends.push(text.to_string());
        Ok(())
    }
}

/// Surface writing to a terminal (or any writer).
///
/// With `clear_screen` set, a clear wipes the terminal and homes the cursor;
/// otherwise clears are ignored, which suits piped output.
pub struct TerminalSurface<W: Write> {
    out: W,
    clear_screen: bool,
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout(clear_screen: bool) -> Self {
        Self::new(std::io::stdout(), clear_screen)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
                .and_then(|_| self.out.flush())
                .map_err(|e| Error::surface(format!("clear failed: {}", e)))?;
        }
        Ok(())
    }

    fn append_text(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| Error::surface(format!("write failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_surface_records_operations() {
        let mut surface = TextSurface::new();
        surface.append_text("a\n").unwrap();
        surface.clear().unwrap();
        surface.append_text("b\n").unwrap();

        assert_eq!(surface.text(), "b\n");
        assert_eq!(surface.appends(), &["a\n", "b\n"]);
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_terminal_surface_plain_ignores_clear() {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.append_text("one\n").unwrap();
        surface.clear().unwrap();
        surface.append_text("two\n").unwrap();
        assert_eq!(surface.into_inner(), b"one\ntwo\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_terminal_write_failure_is_surface_error() {
        let mut surface = TerminalSurface::new(ClosedPipe, true);
        let err = surface.append_text("x\n").unwrap_err();
        assert!(matches!(err, Error::Surface { .. }));
        assert!(err.is_fatal());

        assert!(matches!(surface.clear(), Err(Error::Surface { .. })));
    }

    #[test]
    fn test_terminal_surface_clear_emits_escape() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.clear().unwrap();
        let bytes = surface.into_inner();
        assert!(bytes.starts_with(b"\x1b["));
    }
}
