//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Filter Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid filter pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Surface/Panel Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Render surface error: {message}")]
    Surface { message: String },

    #[error("Panel has been disposed: {resource}")]
    PanelDisposed { resource: String },

    // ─────────────────────────────────────────────────────────────
    // Producer Process Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Program not found: '{program}'. Ensure it is in your PATH.")]
    ProgramNotFound { program: String },

    #[error("Failed to spawn log producer: {reason}")]
    ProcessSpawn { reason: String },

    #[error("Log producer error: {message}")]
    Process { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Channel/Communication Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn surface(message: impl Into<String>) -> Self {
        Self::Surface {
            message: message.into(),
        }
    }

    pub fn panel_disposed(resource: impl Into<String>) -> Self {
        Self::PanelDisposed {
            resource: resource.into(),
        }
    }

    pub fn program_not_found(program: impl Into<String>) -> Self {
        Self::ProgramNotFound {
            program: program.into(),
        }
    }

    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Errors after which the render loop or the session cannot go on
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::ProgramNotFound { .. } | Error::ProcessSpawn { .. } | Error::Surface { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::invalid_pattern("(", "unclosed group");
        assert_eq!(
            err.to_string(),
            "Invalid filter pattern '(': unclosed group"
        );

        let err = Error::program_not_found("kubectl");
        assert!(err.to_string().contains("kubectl"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_pattern_is_not_fatal() {
        assert!(!Error::invalid_pattern("[", "unclosed class").is_fatal());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::program_not_found("kubectl").is_fatal());
        assert!(Error::ProcessSpawn {
            reason: "permission denied".to_string()
        }
        .is_fatal());
        assert!(Error::surface("broken pipe").is_fatal());
        assert!(!Error::process("terminated").is_fatal());
        assert!(!Error::ChannelClosed.is_fatal());
    }

    #[test]
    fn test_context_preserves_variant() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.context("reading config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
