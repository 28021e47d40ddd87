//! Async loop running a [`RenderEngine`] on one tokio task

use tokio::sync::mpsc;

use podlog_core::prelude::*;

use super::engine::RenderEngine;
use super::surface::RenderSurface;
use crate::message::SurfaceInput;

/// Drive `engine` until the input channel closes and all queued work is done.
///
/// Inputs that have already arrived are queued before the next step, and the
/// task yields to the runtime after every step so chunked renders never
/// monopolise the worker. A failed step is logged and skipped unless the
/// error is fatal, which ends the loop. Returns the engine for inspection.
pub async fn drive<S: RenderSurface>(
    mut engine: RenderEngine<S>,
    mut rx: mpsc::UnboundedReceiver<SurfaceInput>,
) -> Result<RenderEngine<S>> {
    loop {
        while let Ok(input) = rx.try_recv() {
            engine.accept(input);
        }

        if engine.has_pending() {
            if let Err(e) = engine.step() {
                if e.is_fatal() {
                    error!("Render surface failed: {}", e);
                    return Err(e);
                }
                warn!("Render step failed: {}", e);
            }
            tokio::task::yield_now().await;
            continue;
        }

        match rx.recv().await {
            Some(input) => engine.accept(input),
            None => break,
        }
    }

    debug!(
        "Render driver finished with {} history lines",
        engine.history().len()
    );
    Ok(engine)
}
