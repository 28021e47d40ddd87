//! Log producer child process

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};

use crate::handle::ProducerHandle;
use podlog_core::prelude::*;

/// Events emitted by a running [`LogProcess`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerEvent {
    /// A line of standard output, without its line terminator
    Stdout(String),
    /// A line of standard error, without its line terminator
    Stderr(String),
    /// The process exited; `code` is `None` when killed by a signal
    Exited { code: Option<i32> },
}

/// A child process producing log output.
///
/// The `Child` is moved into a dedicated wait task. `LogProcess` keeps a kill
/// channel and an exit flag for synchronous checks; the exit itself is
/// reported as [`ProducerEvent::Exited`].
pub struct LogProcess {
    pid: Option<u32>,
    /// Consumed on first terminate (or on drop)
    kill_tx: Option<oneshot::Sender<()>>,
    exited: Arc<AtomicBool>,
}

impl LogProcess {
    /// Spawn `program` with `args`, streaming its output to `event_tx`.
    ///
    /// The program is resolved on `PATH` first so a missing binary surfaces as
    /// [`Error::ProgramNotFound`] rather than a generic spawn failure. When
    /// `forward_stderr` is false, standard error is discarded.
    pub fn spawn(
        program: &str,
        args: &[String],
        forward_stderr: bool,
        event_tx: mpsc::Sender<ProducerEvent>,
    ) -> Result<Self> {
        let resolved = which::which(program).map_err(|e| {
            debug!("Failed to resolve {}: {}", program, e);
            Error::program_not_found(program)
        })?;

        info!("Spawning log producer: {} {}", program, args.join(" "));

        let mut child = Command::new(&resolved)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(if forward_stderr {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::ProcessSpawn {
                reason: e.to_string(),
            })?;

        info!("Log producer started with PID: {:?}", child.id());

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(Self::line_reader(stdout, event_tx.clone(), ProducerEvent::Stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(Self::line_reader(stderr, event_tx.clone(), ProducerEvent::Stderr));
        }

        Ok(Self::watch(child, event_tx))
    }

    /// Hand `child` to the wait task and build the handle around it
    fn watch(child: Child, event_tx: mpsc::Sender<ProducerEvent>) -> Self {
        let pid = child.id();
        let exited = Arc::new(AtomicBool::new(false));
        let (kill_tx, kill_rx) = oneshot::channel::<()>();

        tokio::spawn(Self::wait_for_exit(
            child,
            kill_rx,
            event_tx,
            Arc::clone(&exited),
        ));

        Self {
            pid,
            kill_tx: Some(kill_tx),
            exited,
        }
    }

    /// Background task: owns `child`, waits for it to exit, emits `ProducerEvent::Exited`.
    ///
    /// Ends either when the producer exits on its own or when `kill_rx` fires,
    /// in which case the child is killed and then reaped.
    async fn wait_for_exit(
        mut child: Child,
        kill_rx: oneshot::Receiver<()>,
        event_tx: mpsc::Sender<ProducerEvent>,
        exited: Arc<AtomicBool>,
    ) {
        let code: Option<i32> = tokio::select! {
            result = child.wait() => {
                match result {
                    Ok(status) => {
                        info!("Log producer exited with status: {:?}", status);
                        status.code()
                    }
                    Err(e) => {
                        error!("Error waiting for log producer: {}", e);
                        None
                    }
                }
            }
            _ = kill_rx => {
                info!("Terminate requested, killing log producer");
                if let Err(e) = child.kill().await {
                    // The process may have exited between the signal and the kill
                    debug!("Failed to kill log producer: {}", e);
                }
                match child.wait().await {
                    Ok(status) => {
                        info!("Log producer killed, exit status: {:?}", status);
                        status.code()
                    }
                    Err(e) => {
                        error!("Error waiting after kill: {}", e);
                        None
                    }
                }
            }
        };

        // Flag first so has_exited() is true before anyone sees the event
        exited.store(true, Ordering::Release);

        debug!("Sending ProducerEvent::Exited {{ code: {:?} }}", code);
        let _ = event_tx.send(ProducerEvent::Exited { code }).await;
    }

    /// Read lines from one of the child's pipes and forward them as events
    async fn line_reader<R>(
        pipe: R,
        tx: mpsc::Sender<ProducerEvent>,
        wrap: fn(String) -> ProducerEvent,
    ) where
        R: AsyncRead + Unpin,
    {
        let mut reader = BufReader::new(pipe).lines();

        loop {
            match reader.next_line().await {
                Ok(Some(line)) => {
                    trace!("producer: {}", line);
                    if tx.send(wrap(line)).await.is_err() {
                        debug!("producer channel closed");
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read producer output: {}", e);
                    break;
                }
            }
        }

        debug!("producer reader finished");
    }
}

impl ProducerHandle for LogProcess {
    fn terminate(&mut self) -> Result<()> {
        if self.has_exited() {
            debug!("Log producer already exited, nothing to terminate");
            return Ok(());
        }

        match self.kill_tx.take() {
            Some(tx) => tx
                .send(())
                .map_err(|_| Error::process("wait task already finished")),
            // Already signalled by an earlier terminate
            None => Ok(()),
        }
    }

    fn has_exited(&self) -> bool {
        self.exited.load(Ordering::Acquire)
    }

    fn id(&self) -> Option<u32> {
        self.pid
    }
}

impl Drop for LogProcess {
    fn drop(&mut self) {
        if !self.has_exited() {
            if let Some(tx) = self.kill_tx.take() {
                warn!("LogProcess dropped while producer may still be running");
                let _ = tx.send(());
            }
        }
        // kill_on_drop(true) on the Child covers the case where the wait
        // task never got to handle the signal
        debug!("LogProcess dropped");
    }
}
