//! podlog-app - Log panel, render engine and orchestration
//!
//! The panel side ([`LogsPanel`]) owns the authoritative log text and the
//! producer handle. The surface side ([`RenderEngine`]) mirrors the history,
//! filters it and renders it in preemptible chunks. The two only talk through
//! [`SurfaceMessage`]s, in send order.

pub mod command;
pub mod config;
pub mod manager;
pub mod markup;
pub mod message;
pub mod panel;
pub mod render;
pub mod runner;

// Re-export primary types
pub use config::Settings;
pub use manager::{ManagedPanel, PanelKey, PanelRegistry};
pub use message::{FilterEdit, SurfaceInput, SurfaceMessage};
pub use panel::{ChannelHost, LogsPanel, PanelHost, VIEW_TYPE};
pub use render::{RenderEngine, RenderSurface, RenderToken, TerminalSurface, TextSurface};
pub use runner::{run, RunOptions};
