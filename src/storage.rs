//! Storage layer implementation for pagerdb.
//!
//! This module provides page-granular access to a random-access byte store.
//! Key components:
//!
//! - **Pager**: Maps page ids to byte offsets, grows and shrinks the store in
//!   whole pages, and enforces page-size bounds on reads and writes
//! - **BackingStore**: The capability a pager needs from its store, with a
//!   file variant and an in-memory variant
//! - **SharedPager**: A mutex-guarded handle for callers that share a pager
//!   across threads
//!
//! The pager imposes no header or layout of its own; page contents are opaque
//! bytes owned by the layer above.

pub mod backing;
pub mod error;
pub mod page;
pub mod pager;
pub mod shared;
pub mod stats;

pub use backing::{BackingStore, FileStore, MemoryStore, IN_MEMORY_NAME};
pub use error::{PagerError, PagerResult};
pub use page::{PageId, DEFAULT_PAGE_SIZE};
pub use pager::Pager;
pub use shared::SharedPager;
pub use stats::Stats;
