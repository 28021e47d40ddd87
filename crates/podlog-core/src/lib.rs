//! # podlog-core - Core Domain Types
//!
//! Foundation crate for podlog. Provides the line filter, the append-only
//! log history, text joining, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Filtering (`filter`)
//! - [`FilterMode`] - One of `all`, `include`, `exclude`, `after`, `before`
//! - [`FilterSpec`] - Mode plus raw pattern text, as edited by the user
//! - [`LineFilter`] - A compiled [`FilterSpec`]
//! - [`FilterPass`] - Whether a filter runs over the full history or new lines only
//!
//! ### History (`history`)
//! - [`LogHistory`] - Ordered, append-only sequence of log lines
//!
//! ### Text (`text`)
//! - [`join_lines()`] - Join lines for display with a guaranteed trailing newline
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum, with `is_fatal` for errors that end the session
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use podlog_core::prelude::*;
//! ```

pub mod error;
pub mod filter;
pub mod history;
pub mod logging;
pub mod prelude;
pub mod text;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use filter::{FilterMode, FilterPass, FilterSpec, LineFilter};
pub use history::LogHistory;
pub use text::join_lines;
