//! Scheduled engine work and render freshness tokens

use crate::message::SurfaceMessage;

/// Identifies one full render. Minted fresh for every full render, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderToken(u64);

impl RenderToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Strictly increasing token counter
#[derive(Debug, Default)]
pub struct TokenSource {
    last: u64,
}

impl TokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self) -> RenderToken {
        self.last += 1;
        RenderToken(self.last)
    }
}

/// One unit of engine work
#[derive(Debug)]
pub(crate) enum Task {
    /// Process a message from the panel
    Message(SurfaceMessage),
    /// Start a full re-filter and re-render of the history
    RenderAll,
    /// Emit the next chunk of an in-progress full render
    RenderChunk(ChunkJob),
}

/// Remaining work of a full render
#[derive(Debug)]
pub(crate) struct ChunkJob {
    pub token: RenderToken,
    /// Filtered lines captured when the render started
    pub lines: Vec<String>,
    /// Index of the first line not yet emitted
    pub next: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_never_reused() {
        let mut source = TokenSource::new();
        let a = source.mint();
        let b = source.mint();
        let c = source.mint();
        assert!(a < b && b < c);
        assert_ne!(a, c);
    }
}
