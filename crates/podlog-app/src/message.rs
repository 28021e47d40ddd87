//! Messages delivered to the render surface

use podlog_core::{FilterMode, FilterSpec};
use serde::{Deserialize, Serialize};

/// Panel → surface protocol.
///
/// Serialised as `{"command":"content","text":"..."}`. Delivery is
/// fire-and-forget and must preserve send order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum SurfaceMessage {
    /// Newly received log text
    Content { text: String },
    /// The panel's whole text was replaced; start over from `text`
    Reset { text: String },
}

impl SurfaceMessage {
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content { text: text.into() }
    }

    pub fn reset(text: impl Into<String>) -> Self {
        Self::Reset { text: text.into() }
    }
}

/// A user edit of the filter controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEdit {
    /// Mode selector changed
    Mode(FilterMode),
    /// Pattern field changed (empty clears the filter)
    Pattern(String),
    /// Both controls replaced at once
    Spec(FilterSpec),
}

/// Everything the render surface can receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceInput {
    Message(SurfaceMessage),
    Edit(FilterEdit),
}

impl From<SurfaceMessage> for SurfaceInput {
    fn from(message: SurfaceMessage) -> Self {
        SurfaceInput::Message(message)
    }
}

impl From<FilterEdit> for SurfaceInput {
    fn from(edit: FilterEdit) -> Self {
        SurfaceInput::Edit(edit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_wire_format() {
        let json = serde_json::to_string(&SurfaceMessage::content("a\nb")).unwrap();
        assert_eq!(json, r#"{"command":"content","text":"a\nb"}"#);
    }

    #[test]
    fn test_content_parses_from_wire() {
        let message: SurfaceMessage =
            serde_json::from_str(r#"{"command":"content","text":"hello"}"#).unwrap();
        assert_eq!(message, SurfaceMessage::content("hello"));
    }

    #[test]
    fn test_reset_wire_format() {
        let json = serde_json::to_string(&SurfaceMessage::reset("x")).unwrap();
        assert_eq!(json, r#"{"command":"reset","text":"x"}"#);
    }

    #[test]
    fn test_unknown_command_rejected() {
        let result = serde_json::from_str::<SurfaceMessage>(r#"{"command":"reload"}"#);
        assert!(result.is_err());
    }
}
