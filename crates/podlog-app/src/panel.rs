//! The log panel controller
//!
//! [`LogsPanel`] owns the authoritative log text and at most one producer
//! handle. It never renders anything itself: new text is forwarded to the
//! render surface through its [`PanelHost`].

use tokio::sync::mpsc;

use podlog_core::prelude::*;
use podlog_process::ProducerHandle;

use crate::manager::ManagedPanel;
use crate::markup;
use crate::message::{SurfaceInput, SurfaceMessage};

/// View type tag used as part of the registry key
pub const VIEW_TYPE: &str = "podlogLogs";

/// What a panel needs from the surface hosting it
pub trait PanelHost {
    fn set_title(&mut self, title: &str);

    /// Replace the hosted document
    fn set_markup(&mut self, markup: String);

    /// Bring the panel to the front
    fn reveal(&mut self);

    /// Deliver a message to the render surface, in send order
    fn post_message(&mut self, message: SurfaceMessage) -> Result<()>;

    /// Release the surface. Messages posted afterwards fail.
    fn dispose(&mut self);
}

/// Host that forwards messages to a render engine over a channel.
///
/// Dropping the sender on dispose closes the channel, which lets the engine's
/// driver loop finish.
#[derive(Debug)]
pub struct ChannelHost {
    tx: Option<mpsc::UnboundedSender<SurfaceInput>>,
    title: String,
    markup: String,
    reveals: usize,
}

impl ChannelHost {
    pub fn new(tx: mpsc::UnboundedSender<SurfaceInput>) -> Self {
        Self {
            tx: Some(tx),
            title: String::new(),
            markup: String::new(),
            reveals: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Last document set by the panel
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn reveal_count(&self) -> usize {
        self.reveals
    }

    pub fn is_disposed(&self) -> bool {
        self.tx.is_none()
    }
}

impl PanelHost for ChannelHost {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    fn reveal(&mut self) {
        self.reveals += 1;
    }

    fn post_message(&mut self, message: SurfaceMessage) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| Error::panel_disposed(&self.title))?;
        tx.send(SurfaceInput::Message(message))
            .map_err(|_| Error::ChannelClosed)
    }

    fn dispose(&mut self) {
        self.tx = None;
    }
}

/// Panel controller for one resource's logs
pub struct LogsPanel<H: PanelHost> {
    resource: String,
    /// Everything received so far
    content: String,
    host: H,
    producer: Option<Box<dyn ProducerHandle>>,
    disposed: bool,
}

impl<H: PanelHost> LogsPanel<H> {
    /// Create a panel and render its initial document.
    ///
    /// The render surface is expected to start from [`content`](Self::content);
    /// nothing is posted to it here.
    pub fn new(host: H, content: String, resource: String) -> Self {
        let mut panel = Self {
            resource,
            content,
            host,
            producer: None,
            disposed: false,
        };
        panel.refresh_document();
        panel
    }

    /// Recompute the title and hosted document from the current content
    pub fn refresh_document(&mut self) {
        self.host.set_title(&markup::panel_title(&self.resource));
        self.host
            .set_markup(markup::render_document(&self.resource, &self.content));
    }

    /// Append newly received text and forward it to the surface as an
    /// incremental update.
    pub fn append_content(&mut self, chunk: &str) {
        self.content.push_str(chunk);
        if let Err(e) = self.host.post_message(SurfaceMessage::content(chunk)) {
            warn!("Dropping log update for {}: {}", self.resource, e);
        }
    }

    /// Register the producer feeding this panel, terminating any previous one
    pub fn set_append_content_process(&mut self, handle: Box<dyn ProducerHandle>) {
        self.delete_append_content_process();
        debug!(
            "Producer {:?} attached to {}",
            handle.id(),
            self.resource
        );
        self.producer = Some(handle);
    }

    /// Terminate and forget the current producer, if any
    pub fn delete_append_content_process(&mut self) {
        if let Some(mut handle) = self.producer.take() {
            // Best effort: the producer may already be gone
            if let Err(e) = handle.terminate() {
                debug!("Ignoring producer terminate failure: {}", e);
            }
        }
    }

    pub fn has_producer(&self) -> bool {
        self.producer.is_some()
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<H: PanelHost> ManagedPanel for LogsPanel<H> {
    fn set_info(&mut self, content: String, resource: String) {
        self.content = content;
        self.resource = resource;
    }

    /// Recompute the document and restart the surface from the full content
    fn update(&mut self) {
        self.refresh_document();
        if let Err(e) = self.host.post_message(SurfaceMessage::reset(&self.content)) {
            warn!("Surface for {} missed a reset: {}", self.resource, e);
        }
    }

    fn reveal(&mut self) {
        self.host.reveal();
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        // The producer goes first so it can never outlive the panel
        self.delete_append_content_process();
        self.host.dispose();
        self.disposed = true;
        info!("Disposed log panel for {}", self.resource);
    }
}
