//! Thread-safe handle around a [`Pager`].
//!
//! The pager itself has no interior locking. `SharedPager` serialises every
//! call behind one mutex so a pager can be used from several threads.

use crate::storage::error::PagerResult;
use crate::storage::page::PageId;
use crate::storage::pager::Pager;
use crate::storage::stats::Stats;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct SharedPager {
    inner: Arc<Mutex<Pager>>,
}

impl SharedPager {
    pub fn new(pager: Pager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pager)),
        }
    }

    /// Run `f` with exclusive access to the pager, for compound operations
    /// that must not interleave with other callers.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pager) -> R) -> R {
        let mut pager = self.inner.lock();
        f(&mut pager)
    }

    pub fn alloc(&self, n: u64) -> PagerResult<PageId> {
        self.inner.lock().alloc(n)
    }

    pub fn free(&self, n: u64) -> PagerResult<()> {
        self.inner.lock().free(n)
    }

    pub fn read(&self, id: PageId) -> PagerResult<Vec<u8>> {
        self.inner.lock().read(id)
    }

    pub fn write(&self, id: PageId, data: &[u8]) -> PagerResult<()> {
        self.inner.lock().write(id, data)
    }

    pub fn read_at(&self, dst: &mut [u8], offset: u64) -> PagerResult<()> {
        self.inner.lock().read_at(dst, offset)
    }

    pub fn write_at(&self, src: &[u8], offset: u64) -> PagerResult<()> {
        self.inner.lock().write_at(src, offset)
    }

    pub fn count(&self) -> u64 {
        self.inner.lock().count()
    }

    pub fn stats(&self) -> Stats {
        self.inner.lock().stats()
    }

    pub fn close(&self) -> PagerResult<()> {
        self.inner.lock().close()
    }
}
