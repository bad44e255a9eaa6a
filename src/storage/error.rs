//! Pager error types.

use thiserror::Error;

/// Errors that can occur in the pager.
#[derive(Error, Debug)]
pub enum PagerError {
    #[error("Pager is closed")]
    Closed,

    #[error("Pager is read-only")]
    ReadOnly,

    #[error("Invalid page id={page_id} (count={count})")]
    PageOutOfRange { page_id: u64, count: u64 },

    #[error("Invalid store range: offset={offset}, len={len} (store size={store_size})")]
    RangeOutOfBounds {
        offset: u64,
        len: usize,
        store_size: u64,
    },

    #[error("Data is larger than a page: {len} bytes (page size={page_size})")]
    OversizedWrite { len: usize, page_size: usize },

    #[error("Unexpected end of data: expected {expected} bytes, transferred {actual}")]
    ShortIo { expected: usize, actual: usize },

    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Store size overflow while allocating {pages} pages")]
    SizeOverflow { pages: u64 },

    #[error("Codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PagerError {
    /// True for both page-id and byte-range bound violations.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            PagerError::PageOutOfRange { .. } | PagerError::RangeOutOfBounds { .. }
        )
    }
}

/// Result type for pager operations.
pub type PagerResult<T> = Result<T, PagerError>;
