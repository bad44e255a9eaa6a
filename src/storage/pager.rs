use crate::config::PagerConfig;
use crate::storage::backing::{BackingStore, FileStore, MemoryStore, IN_MEMORY_NAME};
use crate::storage::error::{PagerError, PagerResult};
use crate::storage::page::PageId;
use crate::storage::stats::Stats;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Paged I/O over a random-access backing store.
///
/// Page ids are dense and zero-based; page `id` lives at byte offset
/// `id * page_size`. The page count is always derived from the store size,
/// so trailing bytes that do not fill a whole page are never addressable by id.
pub struct Pager {
    store: Option<Box<dyn BackingStore>>,
    // Closed store kept only so `remove` can still delete it.
    released: Option<Box<dyn BackingStore>>,
    name: String,
    page_size: usize,
    store_size: u64,
    count: u64,
    read_only: bool,
    stats: Stats,
}

impl Pager {
    /// Open the named store. [`IN_MEMORY_NAME`] selects a fresh in-memory
    /// store, anything else is treated as a file path.
    pub fn open(path: impl AsRef<Path>, config: &PagerConfig) -> PagerResult<Self> {
        config.validate()?;
        let path = path.as_ref();

        let store: Box<dyn BackingStore> = if path == Path::new(IN_MEMORY_NAME) {
            Box::new(MemoryStore::new())
        } else {
            Box::new(FileStore::open(path, config.read_only, config.create_mode)?)
        };

        Self::attach(store, config)
    }

    pub fn in_memory(config: &PagerConfig) -> PagerResult<Self> {
        Self::open(IN_MEMORY_NAME, config)
    }

    /// Bind a pager to an already opened store.
    pub fn attach(store: Box<dyn BackingStore>, config: &PagerConfig) -> PagerResult<Self> {
        config.validate()?;
        let store_size = store.size()?;
        let name = store.name().to_string();

        let mut pager = Self {
            store: Some(store),
            released: None,
            name,
            page_size: config.page_size,
            store_size,
            count: 0,
            read_only: config.read_only,
            stats: Stats::default(),
        };
        pager.compute_count();

        debug!(
            "pager: opened '{}' (page_size={}, size={}, count={}, read_only={})",
            pager.name, pager.page_size, pager.store_size, pager.count, pager.read_only
        );
        Ok(pager)
    }

    /// Allocate `n` sequential pages at the end of the store and return the id
    /// of the first one.
    pub fn alloc(&mut self, n: u64) -> PagerResult<PageId> {
        let page_size = self.page_size as u64;
        let store_size = self.store_size;
        let next_id = PageId(self.count);

        let store = self.writable_store()?;
        let target_size = n
            .checked_mul(page_size)
            .and_then(|grow| store_size.checked_add(grow))
            .ok_or(PagerError::SizeOverflow { pages: n })?;
        store.truncate(target_size)?;

        self.store_size = target_size;
        self.compute_count();
        self.stats.allocs += 1;

        debug!("pager: alloc {} page(s) starting at {}", n, next_id);
        Ok(next_id)
    }

    /// Release `n` pages from the end of the store. Requests larger than the
    /// page count free everything.
    pub fn free(&mut self, n: u64) -> PagerResult<()> {
        let n = n.min(self.count);
        let target_size = self.store_size - n * self.page_size as u64;

        self.writable_store()?.truncate(target_size)?;

        self.store_size = target_size;
        self.compute_count();

        debug!("pager: freed {} page(s), {} left", n, self.count);
        Ok(())
    }

    /// Read one full page.
    pub fn read(&mut self, id: PageId) -> PagerResult<Vec<u8>> {
        let store = self.store.as_deref().ok_or(PagerError::Closed)?;
        self.check_page(id)?;

        let mut buf = vec![0u8; self.page_size];
        let n = store.read_at(&mut buf, self.page_offset(id))?;
        if n < self.page_size {
            return Err(PagerError::ShortIo {
                expected: self.page_size,
                actual: n,
            });
        }

        self.stats.reads += 1;
        Ok(buf)
    }

    /// Write `data` at the start of page `id`. Bytes of the page past
    /// `data.len()` keep their previous contents.
    pub fn write(&mut self, id: PageId, data: &[u8]) -> PagerResult<()> {
        let page_size = self.page_size;
        self.writable_store()?;
        self.check_page(id)?;
        if data.len() > page_size {
            return Err(PagerError::OversizedWrite {
                len: data.len(),
                page_size,
            });
        }

        let offset = self.page_offset(id);
        let n = self.writable_store()?.write_at(data, offset)?;
        if n < data.len() {
            return Err(PagerError::ShortIo {
                expected: data.len(),
                actual: n,
            });
        }

        self.stats.writes += 1;
        Ok(())
    }

    /// Read `dst.len()` bytes starting at byte `offset`, ignoring page boundaries.
    pub fn read_at(&mut self, dst: &mut [u8], offset: u64) -> PagerResult<()> {
        let store = self.store.as_deref().ok_or(PagerError::Closed)?;
        self.check_range(offset, dst.len())?;

        let n = store.read_at(dst, offset)?;
        if n < dst.len() {
            return Err(PagerError::ShortIo {
                expected: dst.len(),
                actual: n,
            });
        }

        self.stats.reads += 1;
        Ok(())
    }

    /// Write `src` starting at byte `offset`, ignoring page boundaries. The
    /// range must lie within the current store size.
    pub fn write_at(&mut self, src: &[u8], offset: u64) -> PagerResult<()> {
        self.writable_store()?;
        self.check_range(offset, src.len())?;

        let n = self.writable_store()?.write_at(src, offset)?;
        if n < src.len() {
            return Err(PagerError::ShortIo {
                expected: src.len(),
                actual: n,
            });
        }

        self.stats.writes += 1;
        Ok(())
    }

    /// Encode `value` with bincode and store it in page `id`.
    pub fn marshal<T: Serialize>(&mut self, id: PageId, value: &T) -> PagerResult<()> {
        let data = bincode::serialize(value)?;
        self.write(id, &data)
    }

    /// Decode the leading bytes of page `id` with bincode.
    pub fn unmarshal<T: DeserializeOwned>(&mut self, id: PageId) -> PagerResult<T> {
        let data = self.read(id)?;
        Ok(bincode::deserialize(&data)?)
    }

    /// Release the backing store. Closing an already closed pager is a no-op.
    pub fn close(&mut self) -> PagerResult<()> {
        match self.store.take() {
            Some(mut store) => {
                debug!("pager: closing '{}'", self.name);
                let closed = store.close();
                self.released = Some(store);
                closed?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Close the pager and delete its backing store. Works on an already
    /// closed pager too. Failures are logged and otherwise ignored.
    pub fn remove(mut self) {
        if let Some(mut store) = self.store.take().or_else(|| self.released.take()) {
            debug!("pager: removing '{}'", self.name);
            if let Err(e) = store.remove() {
                warn!("pager: failed to remove '{}': {}", self.name, e);
            }
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of whole pages in the store.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn store_size(&self) -> u64 {
        self.store_size
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn writable_store(&mut self) -> PagerResult<&mut Box<dyn BackingStore>> {
        match self.store.as_mut() {
            None => Err(PagerError::Closed),
            Some(_) if self.read_only => Err(PagerError::ReadOnly),
            Some(store) => Ok(store),
        }
    }

    fn check_page(&self, id: PageId) -> PagerResult<()> {
        if id.0 >= self.count {
            return Err(PagerError::PageOutOfRange {
                page_id: id.0,
                count: self.count,
            });
        }
        Ok(())
    }

    fn check_range(&self, offset: u64, len: usize) -> PagerResult<()> {
        let in_bounds = offset
            .checked_add(len as u64)
            .map_or(false, |end| end <= self.store_size);
        if !in_bounds {
            return Err(PagerError::RangeOutOfBounds {
                offset,
                len,
                store_size: self.store_size,
            });
        }
        Ok(())
    }

    // Only valid for ids that passed `check_page`.
    fn page_offset(&self, id: PageId) -> u64 {
        id.0 * self.page_size as u64
    }

    fn compute_count(&mut self) {
        self.count = self.store_size / self.page_size as u64;
    }
}

impl fmt::Display for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_closed() {
            return write!(f, "Pager{{closed=true}}");
        }
        write!(
            f,
            "Pager{{file='{}', readOnly={}, pageSize={}, count={}}}",
            self.name, self.read_only, self.page_size, self.count
        )
    }
}

impl fmt::Debug for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("name", &self.name)
            .field("page_size", &self.page_size)
            .field("store_size", &self.store_size)
            .field("count", &self.count)
            .field("read_only", &self.read_only)
            .field("closed", &self.is_closed())
            .field("stats", &self.stats)
            .finish()
    }
}
