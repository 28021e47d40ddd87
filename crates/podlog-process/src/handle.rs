//! The producer handle contract

use podlog_core::prelude::*;

/// Opaque handle to a running log producer.
///
/// `terminate` must be safe to call after the producer has already exited.
/// Callers treat it as best-effort cleanup and do not rely on its result
/// beyond logging.
#[cfg_attr(any(test, feature = "test-helpers"), mockall::automock)]
pub trait ProducerHandle: Send {
    /// Ask the producer to stop
    fn terminate(&mut self) -> Result<()>;

    /// Whether the producer is known to have exited
    fn has_exited(&self) -> bool;

    /// OS process id, if there is one
    fn id(&self) -> Option<u32> {
        None
    }
}
