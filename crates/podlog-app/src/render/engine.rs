//! The render engine state machine

use std::collections::VecDeque;

use podlog_core::prelude::*;
use podlog_core::{join_lines, FilterMode, FilterPass, FilterSpec, LineFilter, LogHistory};

use super::surface::RenderSurface;
use super::task::{ChunkJob, RenderToken, Task, TokenSource};
use crate::config::RenderSettings;
use crate::message::{FilterEdit, SurfaceInput, SurfaceMessage};

/// Mirrors the log history, filters it, and renders into a [`RenderSurface`].
///
/// Nothing happens until [`step`](Self::step) is called: every input is queued
/// and processed in FIFO order, one task per step.
pub struct RenderEngine<S> {
    history: LogHistory,
    /// Filter controls as last edited, valid or not
    inputs: FilterSpec,
    /// Last successfully compiled filter
    active: LineFilter,
    filter_error: Option<String>,
    tokens: TokenSource,
    current: Option<RenderToken>,
    queue: VecDeque<Task>,
    chunk_lines: usize,
    drop_blank_lines: bool,
    surface: S,
}

impl<S: RenderSurface> RenderEngine<S> {
    /// Create an engine over the panel's initial text and schedule the first
    /// full render.
    ///
    /// Every line of `initial` is kept, blank ones included.
    pub fn new(
        initial: &str,
        filter: FilterSpec,
        settings: &RenderSettings,
        surface: S,
    ) -> Result<Self> {
        let active = LineFilter::compile(&filter)?;

        let mut engine = Self {
            history: LogHistory::from_text(initial),
            inputs: filter,
            active,
            filter_error: None,
            tokens: TokenSource::new(),
            current: None,
            queue: VecDeque::new(),
            chunk_lines: settings.effective_chunk_lines(),
            drop_blank_lines: settings.drop_blank_lines,
            surface,
        };
        engine.schedule_full_render();
        Ok(engine)
    }

    // ─────────────────────────────────────────────────────────
    // Inputs
    // ─────────────────────────────────────────────────────────

    /// Queue a message from the panel
    pub fn post(&mut self, message: SurfaceMessage) {
        self.queue.push_back(Task::Message(message));
    }

    /// Route any surface input. Invalid filter edits are recorded in
    /// [`filter_error`](Self::filter_error) and otherwise ignored.
    pub fn accept(&mut self, input: SurfaceInput) {
        match input {
            SurfaceInput::Message(message) => self.post(message),
            SurfaceInput::Edit(edit) => {
                let _ = self.apply_edit(edit);
            }
        }
    }

    pub fn apply_edit(&mut self, edit: FilterEdit) -> Result<()> {
        match edit {
            FilterEdit::Mode(mode) => self.set_mode(mode),
            FilterEdit::Pattern(pattern) => self.set_pattern(pattern),
            FilterEdit::Spec(spec) => self.set_filter(spec),
        }
    }

    /// Replace the filter and schedule a full render on the next tick.
    ///
    /// An invalid pattern leaves the active filter and the current render
    /// untouched and schedules nothing.
    pub fn set_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.inputs = spec;

        match LineFilter::compile(&self.inputs) {
            Ok(filter) => {
                debug!(
                    "Filter set: mode={} pattern={:?}",
                    self.inputs.mode, self.inputs.pattern
                );
                self.active = filter;
                self.filter_error = None;
                self.schedule_full_render();
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring filter update: {}", e);
                self.filter_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_mode(&mut self, mode: FilterMode) -> Result<()> {
        let spec = FilterSpec::new(mode, self.inputs.pattern.clone());
        self.set_filter(spec)
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> Result<()> {
        let spec = FilterSpec::new(self.inputs.mode, pattern);
        self.set_filter(spec)
    }

    /// Queue a full re-filter and re-render
    pub fn schedule_full_render(&mut self) {
        self.queue.push_back(Task::RenderAll);
    }

    // ─────────────────────────────────────────────────────────
    // Execution
    // ─────────────────────────────────────────────────────────

    /// Run one queued task. Returns `false` if the queue was empty.
    pub fn step(&mut self) -> Result<bool> {
        let Some(task) = self.queue.pop_front() else {
            return Ok(false);
        };

        match task {
            Task::Message(SurfaceMessage::Content { text }) => self.render_new_content(&text)?,
            Task::Message(SurfaceMessage::Reset { text }) => self.reset(&text)?,
            Task::RenderAll => self.start_full_render()?,
            Task::RenderChunk(job) => self.render_chunk(job)?,
        }
        Ok(true)
    }

    /// Run queued tasks until none remain. Returns the number of steps taken.
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut steps = 0;
        while self.step()? {
            steps += 1;
        }
        Ok(steps)
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Incremental render: store the new lines and append only their filtered
    /// subset. Not chunked and not preemptible.
    fn render_new_content(&mut self, text: &str) -> Result<()> {
        let new_lines = self.history.append_chunk(text, self.drop_blank_lines);
        let shown = self.active.apply(&new_lines, FilterPass::Incremental);
        trace!(
            "Incremental render: {} new lines, {} shown",
            new_lines.len(),
            shown.len()
        );

        let content = join_lines(&shown);
        if !content.is_empty() {
            self.surface.append_text(&content)?;
        }
        Ok(())
    }

    /// Replace the history with `text` and render it from scratch.
    ///
    /// Like the initial text, every line is kept.
    fn reset(&mut self, text: &str) -> Result<()> {
        debug!(
            "History reset: {} lines replaced",
            self.history.len()
        );
        self.history = LogHistory::from_text(text);
        self.start_full_render()
    }

    /// Supersede any in-flight render, clear the surface, and emit the first
    /// chunk of the freshly filtered history.
    fn start_full_render(&mut self) -> Result<()> {
        let token = self.tokens.mint();
        self.current = Some(token);

        self.surface.clear()?;

        let lines: Vec<String> = self
            .active
            .apply(self.history.lines(), FilterPass::Full)
            .into_iter()
            .map(str::to_string)
            .collect();

        debug!(
            "Full render {:?}: {} of {} lines",
            token,
            lines.len(),
            self.history.len()
        );

        if lines.is_empty() {
            return Ok(());
        }

        self.render_chunk(ChunkJob {
            token,
            lines,
            next: 0,
        })
    }

    /// Emit one chunk and reschedule the rest, unless the render is stale
    fn render_chunk(&mut self, mut job: ChunkJob) -> Result<()> {
        if self.current != Some(job.token) {
            trace!("Render {:?} superseded, stopping", job.token);
            return Ok(());
        }
        if job.next >= job.lines.len() {
            return Ok(());
        }

        let end = job.lines.len().min(job.next + self.chunk_lines);
        let text = join_lines(&job.lines[job.next..end]);
        if !text.is_empty() {
            self.surface.append_text(&text)?;
        }
        job.next = end;

        if job.next < job.lines.len() {
            self.queue.push_back(Task::RenderChunk(job));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────

    pub fn history(&self) -> &LogHistory {
        &self.history
    }

    /// Filter controls as last edited
    pub fn filter_spec(&self) -> &FilterSpec {
        &self.inputs
    }

    /// Filter actually in use
    pub fn active_filter(&self) -> &LineFilter {
        &self.active
    }

    /// Why the last filter edit was rejected, if it was
    pub fn filter_error(&self) -> Option<&str> {
        self.filter_error.as_deref()
    }

    pub fn current_token(&self) -> Option<RenderToken> {
        self.current
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
