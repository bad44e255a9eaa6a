use super::{closed_error, BackingStore, IN_MEMORY_NAME};
use std::io;

/// Ephemeral backing store held in a growable buffer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Vec<u8>,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `data`.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            closed: false,
        }
    }

    /// Resize the buffer, reporting allocation failure as an I/O error.
    fn resize(&mut self, size: usize) -> io::Result<()> {
        if size > self.data.len() {
            self.data
                .try_reserve(size - self.data.len())
                .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))?;
        }
        self.data.resize(size, 0);
        Ok(())
    }

    fn check_open(&self) -> io::Result<()> {
        if self.closed {
            Err(closed_error())
        } else {
            Ok(())
        }
    }
}

fn to_index(offset: u64) -> io::Result<usize> {
    usize::try_from(offset)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset exceeds address space"))
}

impl BackingStore for MemoryStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.check_open()?;
        let start = to_index(offset)?;
        if start >= self.data.len() {
            return Ok(0);
        }
        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        Ok(n)
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        self.check_open()?;
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "write overflows buffer"))?;
        if end > self.data.len() {
            self.resize(end)?;
        }
        self.data[start..end].copy_from_slice(buf);
        Ok(buf.len())
    }

    fn truncate(&mut self, size: u64) -> io::Result<()> {
        self.check_open()?;
        let size = to_index(size)?;
        self.resize(size)
    }

    fn size(&self) -> io::Result<u64> {
        self.check_open()?;
        Ok(self.data.len() as u64)
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        self.data = Vec::new();
        Ok(())
    }

    fn name(&self) -> &str {
        IN_MEMORY_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_and_shrink() {
        let mut store = MemoryStore::new();
        assert_eq!(store.size().unwrap(), 0);

        store.truncate(16).unwrap();
        assert_eq!(store.size().unwrap(), 16);

        let mut buf = [0xffu8; 16];
        assert_eq!(store.read_at(&mut buf, 0).unwrap(), 16);
        assert!(buf.iter().all(|&b| b == 0));

        store.write_at(&[7, 7], 14).unwrap();
        store.truncate(15).unwrap();
        let mut buf = [0u8; 1];
        assert_eq!(store.read_at(&mut buf, 14).unwrap(), 1);
        assert_eq!(buf[0], 7);
        assert_eq!(store.read_at(&mut buf, 15).unwrap(), 0);
    }

    #[test]
    fn test_shrink_then_grow_zeroes_tail() {
        let mut store = MemoryStore::from_bytes(vec![9u8; 8]);
        store.truncate(4).unwrap();
        store.truncate(8).unwrap();

        let mut buf = [0u8; 8];
        store.read_at(&mut buf, 0).unwrap();
        assert_eq!(buf, [9, 9, 9, 9, 0, 0, 0, 0]);
    }

    #[test]
    fn test_partial_read_at_end() {
        let store = MemoryStore::from_bytes(vec![1, 2, 3]);
        let mut buf = [0u8; 4];
        assert_eq!(store.read_at(&mut buf, 1).unwrap(), 2);
        assert_eq!(&buf[..2], &[2, 3]);
    }

    #[test]
    fn test_unallocatable_growth_is_error() {
        let mut store = MemoryStore::from_bytes(vec![1, 2, 3]);
        let err = store.truncate(1 << 63).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::OutOfMemory);
        assert_eq!(store.size().unwrap(), 3);
    }

    #[test]
    fn test_closed_store_rejects_io() {
        let mut store = MemoryStore::from_bytes(vec![0; 4]);
        store.close().unwrap();
        store.close().unwrap();

        let mut buf = [0u8; 1];
        assert!(store.read_at(&mut buf, 0).is_err());
        assert!(store.write_at(&buf, 0).is_err());
        assert!(store.truncate(0).is_err());
        assert!(store.size().is_err());
        assert_eq!(store.name(), IN_MEMORY_NAME);
    }
}
