//! Render engine: filtered, chunked, preemptible rendering of the log history.
//!
//! All engine state lives on one cooperative context. Work is queued as
//! [`task::Task`]s and executed one per [`RenderEngine::step`]; the async
//! [`drive`] loop yields to the runtime between steps. A full render is split
//! into chunk tasks that each carry the [`RenderToken`] minted when the render
//! started. Starting another full render mints a new token, and the stale
//! chunks stop as soon as they run.

mod driver;
mod engine;
mod surface;
mod task;

pub use driver::drive;
pub use engine::RenderEngine;
pub use surface::{RenderSurface, TerminalSurface, TextSurface};
pub use task::{RenderToken, TokenSource};
