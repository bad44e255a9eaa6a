use serde::{Deserialize, Serialize};
use std::fmt;

/// I/O statistics collected by a single pager since it was opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub allocs: u64,
    pub reads: u64,
    pub writes: u64,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats{{writes={}, allocs={}, reads={}}}",
            self.writes, self.allocs, self.reads
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let stats = Stats {
            allocs: 1,
            reads: 2,
            writes: 3,
        };
        assert_eq!(stats.to_string(), "Stats{writes=3, allocs=1, reads=2}");
        assert_eq!(Stats::default().to_string(), "Stats{writes=0, allocs=0, reads=0}");
    }
}
