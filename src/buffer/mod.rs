//! Thread-local reuse of the driver's scratch buffer.
//!
//! The streaming driver reads the source through a large scratch buffer.
//! Allocating and zeroing it for every stream would dominate short runs, so
//! returned buffers are parked per-thread and handed back out.

mod pool;

pub(crate) use pool::Buffer;
