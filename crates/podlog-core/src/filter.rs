//! Regex line filtering for the log panel.
//!
//! A [`FilterSpec`] is what the user typed: a mode and raw pattern text. It is
//! compiled into a [`LineFilter`] once per edit and then applied either to the
//! whole history ([`FilterPass::Full`]) or to a freshly arrived chunk of lines
//! ([`FilterPass::Incremental`]).

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which lines of the log are shown relative to the pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every line, pattern ignored
    #[default]
    All,
    /// Lines the pattern matches
    Include,
    /// Lines the pattern does not match
    Exclude,
    /// Lines strictly after the first match
    After,
    /// Lines before the first match
    Before,
}

impl FilterMode {
    /// All modes in selector order
    pub const ALL: [FilterMode; 5] = [
        FilterMode::All,
        FilterMode::Include,
        FilterMode::Exclude,
        FilterMode::After,
        FilterMode::Before,
    ];

    /// Wire/config value of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Include => "include",
            FilterMode::Exclude => "exclude",
            FilterMode::After => "after",
            FilterMode::Before => "before",
        }
    }

    /// Human-readable label shown next to "Show log entries"
    pub fn label(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Include => "that match",
            FilterMode::Exclude => "that don't match",
            FilterMode::After => "after match",
            FilterMode::Before => "before match",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FilterMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::config(format!(
                    "unknown filter mode '{}' (expected all, include, exclude, after or before)",
                    s
                ))
            })
    }
}

/// Filter as edited by the user: mode plus raw pattern text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub mode: FilterMode,
    #[serde(default)]
    pub pattern: String,
}

impl FilterSpec {
    pub fn new(mode: FilterMode, pattern: impl Into<String>) -> Self {
        Self {
            mode,
            pattern: pattern.into(),
        }
    }

    /// True when the spec shows every line regardless of content
    pub fn is_passthrough(&self) -> bool {
        self.mode == FilterMode::All || self.pattern.is_empty()
    }
}

/// Whether a filter runs over the full history or only newly arrived lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPass {
    Full,
    Incremental,
}

/// A compiled [`FilterSpec`]
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    mode: FilterMode,
    /// `None` when the spec is a passthrough
    regex: Option<Regex>,
}

impl LineFilter {
    /// Compile a spec. An empty pattern or `all` mode never touches the regex engine.
    pub fn compile(spec: &FilterSpec) -> Result<Self> {
        if spec.is_passthrough() {
            return Ok(Self {
                mode: spec.mode,
                regex: None,
            });
        }

        let regex = Regex::new(&spec.pattern)
            .map_err(|e| Error::invalid_pattern(&spec.pattern, e.to_string()))?;

        Ok(Self {
            mode: spec.mode,
            regex: Some(regex),
        })
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Pattern source, if the filter actually matches anything
    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    /// Filter `lines`, returning the selected lines in their original order.
    ///
    /// `before` yields nothing on an incremental pass and `after` yields every
    /// new line: the boundary line can only be located in the full history.
    /// On a full pass with no matching line both modes return every line.
    pub fn apply<'a, S: AsRef<str>>(&self, lines: &'a [S], pass: FilterPass) -> Vec<&'a str> {
        let all = || lines.iter().map(as_str).collect::<Vec<_>>();

        let Some(regex) = &self.regex else {
            return all();
        };

        match self.mode {
            FilterMode::All => all(),
            FilterMode::Include => lines
                .iter()
                .map(as_str)
                .filter(|line| regex.is_match(line))
                .collect(),
            FilterMode::Exclude => lines
                .iter()
                .map(as_str)
                .filter(|line| !regex.is_match(line))
                .collect(),
            FilterMode::Before => match pass {
                FilterPass::Incremental => Vec::new(),
                FilterPass::Full => lines
                    .iter()
                    .map(as_str)
                    .take_while(|line| !regex.is_match(line))
                    .collect(),
            },
            FilterMode::After => match pass {
                FilterPass::Incremental => all(),
                FilterPass::Full => {
                    match lines.iter().position(|line| regex.is_match(as_str(line))) {
                        Some(i) => lines[i + 1..].iter().map(as_str).collect(),
                        None => all(),
                    }
                }
            },
        }
    }
}

fn as_str<S: AsRef<str>>(line: &S) -> &str {
    line.as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(mode: FilterMode, pattern: &str) -> LineFilter {
        LineFilter::compile(&FilterSpec::new(mode, pattern)).unwrap()
    }

    fn history() -> Vec<String> {
        ["x", "MATCH", "y", "z"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_mode_returns_lines_unchanged() {
        let lines = history();
        for pass in [FilterPass::Full, FilterPass::Incremental] {
            assert_eq!(
                filter(FilterMode::All, "MATCH").apply(&lines, pass),
                vec!["x", "MATCH", "y", "z"]
            );
        }
    }

    #[test]
    fn test_empty_pattern_is_passthrough_for_every_mode() {
        let lines = history();
        for mode in FilterMode::ALL {
            assert_eq!(filter(mode, "").apply(&lines, FilterPass::Full).len(), 4);
        }
    }

    #[test]
    fn test_include_scenario() {
        let lines = ["a", "bb", "ccc"];
        assert_eq!(
            filter(FilterMode::Include, "b").apply(&lines, FilterPass::Full),
            vec!["bb"]
        );
    }

    #[test]
    fn test_include_and_exclude_partition_history() {
        let lines = ["error: a", "info: b", "error: c", "debug", ""];
        let included = filter(FilterMode::Include, "^error").apply(&lines, FilterPass::Full);
        let excluded = filter(FilterMode::Exclude, "^error").apply(&lines, FilterPass::Full);

        assert_eq!(included.len() + excluded.len(), lines.len());
        for line in lines {
            assert!(included.contains(&line) ^ excluded.contains(&line));
        }
    }

    #[test]
    fn test_before_full_pass_stops_at_first_match() {
        let lines = history();
        assert_eq!(
            filter(FilterMode::Before, "MATCH").apply(&lines, FilterPass::Full),
            vec!["x"]
        );
    }

    #[test]
    fn test_before_full_pass_without_match_returns_everything() {
        let lines = history();
        assert_eq!(
            filter(FilterMode::Before, "nope").apply(&lines, FilterPass::Full),
            vec!["x", "MATCH", "y", "z"]
        );
    }

    #[test]
    fn test_before_match_on_first_line_is_empty() {
        let lines = history();
        assert!(filter(FilterMode::Before, "x")
            .apply(&lines, FilterPass::Full)
            .is_empty());
    }

    #[test]
    fn test_after_full_pass_skips_through_first_match() {
        let lines = history();
        assert_eq!(
            filter(FilterMode::After, "MATCH").apply(&lines, FilterPass::Full),
            vec!["y", "z"]
        );
    }

    #[test]
    fn test_after_uses_first_of_several_matches() {
        let lines = ["a", "M1", "b", "M2", "c"];
        assert_eq!(
            filter(FilterMode::After, "M").apply(&lines, FilterPass::Full),
            vec!["b", "M2", "c"]
        );
    }

    #[test]
    fn test_after_full_pass_without_match_returns_everything() {
        let lines = history();
        assert_eq!(
            filter(FilterMode::After, "nope").apply(&lines, FilterPass::Full),
            vec!["x", "MATCH", "y", "z"]
        );
    }

    #[test]
    fn test_incremental_before_is_always_empty() {
        let lines = history();
        for pattern in ["MATCH", "nope", "."] {
            assert!(filter(FilterMode::Before, pattern)
                .apply(&lines, FilterPass::Incremental)
                .is_empty());
        }
    }

    #[test]
    fn test_incremental_after_returns_new_lines_unfiltered() {
        let lines = history();
        for pattern in ["MATCH", "nope", "."] {
            assert_eq!(
                filter(FilterMode::After, pattern).apply(&lines, FilterPass::Incremental),
                vec!["x", "MATCH", "y", "z"]
            );
        }
    }

    #[test]
    fn test_incremental_include_filters_normally() {
        let lines = ["GET /a", "POST /b", "GET /c"];
        assert_eq!(
            filter(FilterMode::Include, "^GET").apply(&lines, FilterPass::Incremental),
            vec!["GET /a", "GET /c"]
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = LineFilter::compile(&FilterSpec::new(FilterMode::Include, "(unclosed")).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_invalid_pattern_ignored_in_all_mode() {
        assert!(LineFilter::compile(&FilterSpec::new(FilterMode::All, "(unclosed")).is_ok());
    }

    #[test]
    fn test_mode_parse_and_display() {
        for mode in FilterMode::ALL {
            assert_eq!(mode.to_string().parse::<FilterMode>().unwrap(), mode);
        }
        assert_eq!("Include".parse::<FilterMode>().unwrap(), FilterMode::Include);
        assert!("sideways".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&FilterMode::Exclude).unwrap();
        assert_eq!(json, "\"exclude\"");
        let spec: FilterSpec = serde_json::from_str(r#"{"mode":"after"}"#).unwrap();
        assert_eq!(spec, FilterSpec::new(FilterMode::After, ""));
    }
}
