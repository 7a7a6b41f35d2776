//! Append-only byte sink backed by reusable fixed-size blocks.
//!
//! A [`PooledBuffer`] grows by checking blocks out of a [`BlockPool`] and
//! returns them when dropped. The pool is shared between buffers and is safe
//! for concurrent checkout and return; a single buffer is not.
//!
//! Writers can either drive the region protocol directly:
//!
//! ```
//! use tinypdf::writer::PooledBuffer;
//!
//! let mut buf = PooledBuffer::new();
//! let region = buf.request(5);
//! let n = region.len().min(5);
//! region[..n].copy_from_slice(&b"hello"[..n]);
//! buf.commit(n);
//! assert_eq!(buf.len(), 5);
//! ```
//!
//! or use it as a plain [`std::io::Write`] target, e.g. behind a deflate
//! encoder.

use lazy_static::lazy_static;
use log::trace;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default block size (8 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 8 * 1024;

/// Number of idle blocks the shared pool keeps around.
const DEFAULT_MAX_RETAINED: usize = 64;

lazy_static! {
    /// Process-wide pool used by [`PooledBuffer::new`].
    static ref SHARED_POOL: Arc<BlockPool> =
        Arc::new(BlockPool::new(DEFAULT_BLOCK_SIZE, DEFAULT_MAX_RETAINED));
}

/// Thread-safe free list of equally sized byte blocks.
#[derive(Debug)]
pub struct BlockPool {
    block_size: usize,
    max_retained: usize,
    free: Mutex<Vec<Box<[u8]>>>,
}

impl BlockPool {
    /// Create a pool handing out `block_size` byte blocks and keeping at most
    /// `max_retained` idle blocks.
    pub fn new(block_size: usize, max_retained: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            max_retained,
            free: Mutex::new(Vec::new()),
        }
    }

    /// The process-wide shared pool (8 KiB blocks).
    pub fn shared() -> Arc<BlockPool> {
        Arc::clone(&SHARED_POOL)
    }

    /// Size of each block handed out by this pool.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of idle blocks currently held.
    pub fn available(&self) -> usize {
        self.free_list().len()
    }

    /// Check out a block, reusing an idle one when possible.
    pub fn rent(&self) -> Box<[u8]> {
        match self.free_list().pop() {
            Some(block) => block,
            None => vec![0u8; self.block_size].into_boxed_slice(),
        }
    }

    /// Return a block. Blocks of a foreign size, or beyond the retention
    /// limit, are dropped.
    pub fn give_back(&self, block: Box<[u8]>) {
        if block.len() != self.block_size {
            return;
        }
        let mut free = self.free_list();
        if free.len() < self.max_retained {
            free.push(block);
        }
    }

    // A panic while holding the lock cannot leave a block half-returned, so a
    // poisoned list is still usable.
    fn free_list(&self) -> MutexGuard<'_, Vec<Box<[u8]>>> {
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Growable byte sink made of pooled blocks.
///
/// Every block except the last is completely filled, so committed bytes are
/// the concatenation of all blocks truncated to the buffer length.
#[derive(Debug)]
pub struct PooledBuffer {
    pool: Arc<BlockPool>,
    blocks: Vec<Box<[u8]>>,
    /// Committed bytes in the last block
    tail_len: usize,
    /// Total committed bytes
    len: usize,
}

impl PooledBuffer {
    /// Create an empty buffer drawing from the shared pool.
    pub fn new() -> Self {
        Self::with_pool(BlockPool::shared())
    }

    /// Create an empty buffer drawing from `pool`.
    pub fn with_pool(pool: Arc<BlockPool>) -> Self {
        Self {
            pool,
            blocks: Vec::new(),
            tail_len: 0,
            len: 0,
        }
    }

    /// Total committed length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Writable region at the end of the buffer.
    ///
    /// The region is the free tail of the current block and may be shorter
    /// than `size_hint`; callers loop. A new block is started only when the
    /// current one is full, so the region is never empty.
    pub fn request(&mut self, size_hint: usize) -> &mut [u8] {
        if self.blocks.is_empty() || self.tail_len == self.pool.block_size() {
            self.blocks.push(self.pool.rent());
            self.tail_len = 0;
        }
        let tail_len = self.tail_len;
        let block_size = self.pool.block_size();
        if block_size - tail_len < size_hint {
            trace!("pooled buffer: short region {} < {}", block_size - tail_len, size_hint);
        }
        match self.blocks.last_mut() {
            Some(block) => &mut block[tail_len..],
            None => &mut [],
        }
    }

    /// Mark `count` bytes of the last requested region as written.
    ///
    /// Counts beyond the free tail of the current block are clamped; a
    /// commit before any `request` is ignored.
    pub fn commit(&mut self, count: usize) {
        if self.blocks.is_empty() {
            return;
        }
        let free = self.pool.block_size() - self.tail_len;
        debug_assert!(count <= free, "commit past end of requested region");
        let count = count.min(free);
        self.tail_len += count;
        self.len += count;
    }

    /// Copy all committed bytes, in block order, to `sink`.
    pub fn copy_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        let mut remaining = self.len;
        for block in &self.blocks {
            let take = remaining.min(block.len());
            sink.write_all(&block[..take])?;
            remaining -= take;
        }
        Ok(())
    }

    /// Committed bytes as one contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Iterate the committed bytes block by block.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let last = self.blocks.len().saturating_sub(1);
        self.blocks.iter().enumerate().map(move |(i, block)| {
            if i == last {
                &block[..self.tail_len]
            } else {
                &block[..]
            }
        })
    }
}

impl Default for PooledBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for PooledBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut written = 0;
        while written < buf.len() {
            let rest = &buf[written..];
            let region = self.request(rest.len());
            let n = region.len().min(rest.len());
            region[..n].copy_from_slice(&rest[..n]);
            self.commit(n);
            written += n;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        for block in self.blocks.drain(..) {
            self.pool.give_back(block);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> Arc<BlockPool> {
        Arc::new(BlockPool::new(4, 16))
    }

    #[test]
    fn test_empty_buffer() {
        let buf = PooledBuffer::with_pool(small_pool());
        assert!(buf.is_empty());
        assert_eq!(buf.to_vec(), Vec::<u8>::new());
    }

    #[test]
    fn test_write_spans_blocks() {
        let mut buf = PooledBuffer::with_pool(small_pool());
        buf.write_all(b"hello pooled world").unwrap();
        assert_eq!(buf.len(), 18);
        assert_eq!(buf.to_vec(), b"hello pooled world");

        let mut out = Vec::new();
        buf.copy_to(&mut out).unwrap();
        assert_eq!(out, b"hello pooled world");
    }

    #[test]
    fn test_request_may_return_short_region() {
        let mut buf = PooledBuffer::with_pool(small_pool());
        buf.write_all(b"abc").unwrap();
        let region = buf.request(10);
        assert_eq!(region.len(), 1);
        region[0] = b'd';
        buf.commit(1);
        // current block full: next request starts a fresh one
        assert_eq!(buf.request(10).len(), 4);
        assert_eq!(buf.to_vec(), b"abcd");
    }

    #[test]
    fn test_commit_without_request_ignored() {
        let mut buf = PooledBuffer::with_pool(small_pool());
        buf.commit(3);
        assert!(buf.is_empty());
        assert_eq!(buf.chunks().count(), 0);

        buf.write_all(b"ok").unwrap();
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.to_vec(), b"ok");
    }

    #[test]
    fn test_blocks_returned_on_drop() {
        let pool = small_pool();
        {
            let mut buf = PooledBuffer::with_pool(Arc::clone(&pool));
            buf.write_all(b"0123456789").unwrap();
            assert_eq!(pool.available(), 0);
        }
        assert_eq!(pool.available(), 3);

        // reused blocks still produce clean output
        let mut buf = PooledBuffer::with_pool(Arc::clone(&pool));
        buf.write_all(b"xy").unwrap();
        assert_eq!(buf.to_vec(), b"xy");
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_retention_limit() {
        let pool = Arc::new(BlockPool::new(2, 1));
        {
            let mut buf = PooledBuffer::with_pool(Arc::clone(&pool));
            buf.write_all(b"abcdef").unwrap();
        }
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_foreign_block_rejected() {
        let pool = small_pool();
        pool.give_back(vec![0u8; 9].into_boxed_slice());
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_behind_deflate_encoder() {
        use flate2::read::ZlibDecoder;
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Read;

        let data = b"BT /F1 12.00 Tf 50.00 700.00 Td (repeat) Tj ET\n".repeat(50);
        let mut buf = PooledBuffer::with_pool(small_pool());
        {
            let mut encoder = ZlibEncoder::new(&mut buf, Compression::default());
            encoder.write_all(&data).unwrap();
            encoder.finish().unwrap();
        }
        assert!(buf.len() < data.len());

        let mut decoded = Vec::new();
        ZlibDecoder::new(&buf.to_vec()[..])
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_shared_pool_concurrent_use() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    let mut buf = PooledBuffer::new();
                    let payload = vec![i as u8; DEFAULT_BLOCK_SIZE * 2 + 17];
                    buf.write_all(&payload).unwrap();
                    assert_eq!(buf.to_vec(), payload);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(BlockPool::shared().block_size(), DEFAULT_BLOCK_SIZE);
    }
}
