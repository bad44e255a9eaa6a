//! Pager configuration.
//!
//! Defaults can be overridden from the environment:
//! - PAGERDB_PAGE_SIZE=N        -> page size in bytes (default 4096)
//! - PAGERDB_READ_ONLY=[0|1]    -> open stores read-only (default 0)
//! - PAGERDB_CREATE_MODE=OCTAL  -> permission bits for newly created files (default 644)
//!
//! Unparsable values are ignored.

use crate::storage::{PagerError, PagerResult, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CREATE_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Size of one page in bytes. Fixed for the lifetime of a pager.
    pub page_size: usize,

    /// Reject every mutating operation.
    pub read_only: bool,

    /// Permission bits used when a missing file has to be created.
    pub create_mode: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            read_only: false,
            create_mode: DEFAULT_CREATE_MODE,
        }
    }
}

impl PagerConfig {
    pub fn new(page_size: usize) -> Self {
        Self::default().with_page_size(page_size)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("PAGERDB_PAGE_SIZE") {
            if let Ok(n) = v.trim().parse::<usize>() {
                cfg.page_size = n;
            }
        }

        if let Ok(v) = std::env::var("PAGERDB_READ_ONLY") {
            cfg.read_only = parse_flag(&v);
        }

        if let Ok(v) = std::env::var("PAGERDB_CREATE_MODE") {
            if let Ok(mode) = u32::from_str_radix(v.trim().trim_start_matches("0o"), 8) {
                cfg.create_mode = mode;
            }
        }

        cfg
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_create_mode(mut self, create_mode: u32) -> Self {
        self.create_mode = create_mode;
        self
    }

    pub fn validate(&self) -> PagerResult<()> {
        if self.page_size == 0 {
            return Err(PagerError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

fn parse_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}
