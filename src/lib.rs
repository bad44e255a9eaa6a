pub mod config;
pub mod storage;

pub use config::PagerConfig;
pub use storage::{Pager, PagerError, PagerResult, PageId, SharedPager, Stats};
