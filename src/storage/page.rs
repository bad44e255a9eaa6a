use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl PageId {
    /// Byte offset of this page in a store with the given page size, or
    /// `None` if it does not fit in a `u64`.
    pub fn offset(self, page_size: usize) -> Option<u64> {
        self.0.checked_mul(page_size as u64)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
