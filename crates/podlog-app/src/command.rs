//! Text commands typed into the panel's input line.
//!
//! ```text
//! mode <all|include|exclude|after|before>
//! pattern <regex>        (no argument clears the pattern)
//! filter <mode> [regex]
//! quit
//! ```

use podlog_core::prelude::*;
use podlog_core::{FilterMode, FilterSpec};

use crate::message::FilterEdit;

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Edit(FilterEdit),
    Quit,
}

/// Parse one input line.
///
/// Everything after the command word is taken verbatim as the pattern, so
/// patterns may contain spaces. Only the single separating space is removed.
pub fn parse_command(line: &str) -> Result<PanelCommand> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (word, rest) = match line.trim_start().split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };

    match word {
        "mode" => Ok(PanelCommand::Edit(FilterEdit::Mode(rest.parse()?))),
        "pattern" => Ok(PanelCommand::Edit(FilterEdit::Pattern(rest.to_string()))),
        "filter" => {
            let (mode, pattern) = rest.split_once(' ').unwrap_or((rest, ""));
            let mode: FilterMode = mode.parse()?;
            Ok(PanelCommand::Edit(FilterEdit::Spec(FilterSpec::new(
                mode, pattern,
            ))))
        }
        "quit" | "q" => Ok(PanelCommand::Quit),
        other => Err(Error::config(format!("unknown command '{}'", other))),
    }
}
