//! Wires a producer process, a log panel and a terminal render surface together

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

use tokio::sync::mpsc;

use podlog_core::prelude::*;
use podlog_process::{LogProcess, ProducerEvent};

use crate::command::{parse_command, PanelCommand};
use crate::config::Settings;
use crate::manager::PanelRegistry;
use crate::message::SurfaceInput;
use crate::panel::{ChannelHost, LogsPanel, VIEW_TYPE};
use crate::render::{self, RenderEngine, TerminalSurface};

/// Everything needed for one panel session
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Label shown in the panel title, e.g. `pod/web-1`
    pub resource: String,
    /// Producer program and its arguments
    pub program: String,
    pub args: Vec<String>,
    pub settings: Settings,
    /// Write the panel document here on exit
    pub export_html: Option<PathBuf>,
}

/// Run one panel until the producer finishes, the user quits, or Ctrl+C.
pub async fn run(options: RunOptions) -> Result<()> {
    let RunOptions {
        resource,
        program,
        args,
        settings,
        export_html,
    } = options;

    let (surface_tx, surface_rx) = mpsc::unbounded_channel::<SurfaceInput>();

    let mut registry = PanelRegistry::new();
    let host_tx = surface_tx.clone();
    let panel = registry.create_or_show(
        VIEW_TYPE,
        String::new(),
        resource.clone(),
        move |content, resource| LogsPanel::new(ChannelHost::new(host_tx), content, resource),
    );

    // The surface starts from whatever the panel holds
    let surface = TerminalSurface::stdout(std::io::stdout().is_terminal());
    let engine = RenderEngine::new(
        panel.content(),
        settings.filter.clone(),
        &settings.render,
        surface,
    )?;
    let driver = tokio::spawn(render::drive(engine, surface_rx));

    let (event_tx, mut event_rx) = mpsc::channel::<ProducerEvent>(256);
    let process = LogProcess::spawn(
        &program,
        &args,
        settings.producer.forward_stderr,
        event_tx,
    )?;
    panel.set_append_content_process(Box::new(process));

    let mut stdin_lines = spawn_stdin_reader();
    let mut stdin_open = true;
    let mut producer_done = false;

    // With an interactive stdin the panel stays open after the producer ends,
    // so the finished log can still be filtered
    loop {
        tokio::select! {
            event = event_rx.recv(), if !producer_done => match event {
                Some(ProducerEvent::Stdout(line)) | Some(ProducerEvent::Stderr(line)) => {
                    panel.append_content(&format!("{}\n", line));
                }
                Some(ProducerEvent::Exited { code }) => {
                    info!("Log producer for {} exited with code {:?}", resource, code);
                }
                // Readers and wait task are done: nothing more will arrive
                None => {
                    producer_done = true;
                    if !stdin_open {
                        break;
                    }
                }
            },
            line = stdin_lines.recv(), if stdin_open => match line {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => match parse_command(&line) {
                    Ok(PanelCommand::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    Ok(PanelCommand::Edit(edit)) => {
                        if surface_tx.send(edit.into()).is_err() {
                            warn!("Render surface closed, ignoring filter edit");
                        }
                    }
                    Err(e) => warn!("Ignoring input '{}': {}", line, e),
                },
                None => {
                    stdin_open = false;
                    if producer_done {
                        break;
                    }
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }

    if let Some(path) = export_html {
        panel.refresh_document();
        std::fs::write(&path, panel.host().markup())
            .with_context(|| format!("Failed to export panel to {}", path.display()))?;
        info!("Exported panel document to {}", path.display());
    }

    // Terminates the producer and closes the panel's side of the channel
    registry.dispose_all();
    drop(surface_tx);

    let engine = driver
        .await
        .map_err(|e| Error::process(format!("render task failed: {}", e)))??;
    info!(
        "Panel for {} closed with {} history lines",
        resource,
        engine.history().len()
    );

    Ok(())
}

/// Read stdin lines on a plain thread.
///
/// The thread is detached so a pending blocking read never holds up runtime
/// shutdown. The channel closes at EOF or on a read error.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
        debug!("stdin reader finished");
    });
    rx
}
