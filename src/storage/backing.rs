//! Random-access byte stores that a pager can sit on.
//!
//! - **FileStore**: a file on disk, accessed with positional reads and writes
//! - **MemoryStore**: an ephemeral growable buffer, selected by [`IN_MEMORY_NAME`]

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt::Debug;
use std::io;

/// Reserved store name that selects an in-memory store instead of a file.
pub const IN_MEMORY_NAME: &str = ":memory:";

pub trait BackingStore: Send + Debug {
    /// Read into `buf` starting at `offset`. Returns fewer bytes than
    /// `buf.len()` only when the end of the store is reached.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;

    /// Write `buf` starting at `offset`, returning the number of bytes written.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize>;

    /// Resize the store. Growth is zero-filled, shrinking discards the tail.
    fn truncate(&mut self, size: u64) -> io::Result<()>;

    /// Current length of the store in bytes.
    fn size(&self) -> io::Result<u64>;

    /// Release the underlying resource. Closing twice is not an error.
    fn close(&mut self) -> io::Result<()>;

    /// Diagnostic name of the store.
    fn name(&self) -> &str;

    /// Close the store and delete it from persistent storage.
    fn remove(&mut self) -> io::Result<()> {
        self.close()
    }
}

pub(crate) fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "backing store is closed")
}
