//! Thread-local buffer pool for the scratch buffer.

use std::cell::RefCell;

/// Maximum number of buffers to keep per thread.
///
/// Scratch buffers are tens of megabytes; one parked buffer per thread is
/// enough to make back-to-back streams allocation-free.
const MAX_POOL_SIZE: usize = 1;

/// A reusable scratch buffer.
///
/// Taken at the top of a stream and returned to the pool on drop, on every
/// exit path including errors.
pub(crate) struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer of `len` bytes from the thread-local pool, or
    /// allocates one.
    pub fn take(len: usize) -> Self {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            while let Some(mut data) = pool.pop() {
                if data.capacity() >= len {
                    data.resize(len, 0);
                    return Self { data };
                }
                // Too small for this request; let it go.
            }
            Self {
                data: vec![0u8; len],
            }
        })
    }

    /// The full buffer as a writable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        THREAD_BUFFER_POOL.with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOL_SIZE {
                pool.push(std::mem::take(&mut self.data));
            }
        });
    }
}

// Thread-local buffer pool
thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
