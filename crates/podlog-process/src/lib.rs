//! podlog-process - Log producer process management
//!
//! A log producer is any external program whose output becomes panel content,
//! typically `kubectl logs -f <pod>`. This crate defines the [`ProducerHandle`]
//! contract the panel relies on and [`LogProcess`], the tokio-backed
//! implementation used by the binary.

pub mod handle;
pub mod process;

pub use handle::ProducerHandle;
pub use process::{LogProcess, ProducerEvent};

#[cfg(any(test, feature = "test-helpers"))]
pub use handle::MockProducerHandle;
