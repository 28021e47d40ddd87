//! Configuration types for podlog

use podlog_core::FilterSpec;
use serde::{Deserialize, Serialize};

/// Lines rendered per step of a full render
pub const DEFAULT_CHUNK_LINES: usize = 1000;

/// Application settings (.podlog/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub render: RenderSettings,

    /// Filter applied when the panel opens
    #[serde(default)]
    pub filter: FilterSpec,

    #[serde(default)]
    pub producer: ProducerSettings,
}

/// Render engine settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderSettings {
    /// Lines appended per step of a full render
    #[serde(default = "default_chunk_lines")]
    pub chunk_lines: usize,

    /// Keep empty and whitespace-only lines out of the stored history.
    ///
    /// They are still shown when they arrive, so a later full render can
    /// differ from what was shown incrementally. Set to false to make both
    /// renders agree.
    #[serde(default = "default_true")]
    pub drop_blank_lines: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            chunk_lines: default_chunk_lines(),
            drop_blank_lines: true,
        }
    }
}

impl RenderSettings {
    /// Chunk size clamped to at least one line
    pub fn effective_chunk_lines(&self) -> usize {
        self.chunk_lines.max(1)
    }
}

/// Log producer settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProducerSettings {
    /// Show the producer's stderr in the panel alongside stdout
    #[serde(default = "default_true")]
    pub forward_stderr: bool,
}

impl Default for ProducerSettings {
    fn default() -> Self {
        Self {
            forward_stderr: true,
        }
    }
}

fn default_chunk_lines() -> usize {
    DEFAULT_CHUNK_LINES
}

fn default_true() -> bool {
    true
}
