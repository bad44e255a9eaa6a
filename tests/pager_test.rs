use anyhow::Result;
use pagerdb::config::PagerConfig;
use pagerdb::storage::{PageId, Pager, PagerError, IN_MEMORY_NAME};
use tempfile::tempdir;

#[test]
fn test_in_memory_scenario() -> Result<()> {
    let mut pager = Pager::open(IN_MEMORY_NAME, &PagerConfig::new(4096))?;

    assert_eq!(pager.alloc(2)?, PageId(0));
    assert_eq!(pager.count(), 2);

    pager.write(PageId(0), &[1, 2, 3])?;
    assert!(matches!(
        pager.write(PageId(1), &vec![0u8; 4097]),
        Err(PagerError::OversizedWrite { .. })
    ));
    assert_eq!(&pager.read(PageId(0))?[..3], &[1, 2, 3]);

    pager.free(5)?;
    assert_eq!(pager.count(), 0);
    assert!(pager.read(PageId(0)).unwrap_err().is_out_of_range());

    Ok(())
}

#[test]
fn test_persistence_across_reopen() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("pages.db");
    let config = PagerConfig::new(512);

    {
        let mut pager = Pager::open(&file_path, &config)?;
        assert_eq!(pager.count(), 0);
        let first = pager.alloc(3)?;
        for i in 0..3 {
            pager.write(PageId(first.0 + i), &[i as u8 + 1; 10])?;
        }
        pager.write_at(b"header", 0)?;
        pager.close()?;
    }

    {
        let mut pager = Pager::open(&file_path, &config)?;
        assert_eq!(pager.count(), 3);
        assert_eq!(pager.store_size(), 3 * 512);

        let page = pager.read(PageId(0))?;
        assert_eq!(&page[..6], b"header");
        assert_eq!(&page[6..10], &[1; 4]);
        assert!(page[10..].iter().all(|&b| b == 0));
        assert_eq!(&pager.read(PageId(2))?[..10], &[3; 10]);

        pager.free(1)?;
        pager.close()?;
    }

    assert_eq!(std::fs::metadata(&file_path)?.len(), 2 * 512);
    Ok(())
}

#[test]
fn test_page_size_reinterprets_existing_file() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("pages.db");

    {
        let mut pager = Pager::open(&file_path, &PagerConfig::new(100))?;
        pager.alloc(3)?;
        pager.close()?;
    }

    let pager = Pager::open(&file_path, &PagerConfig::new(128))?;
    assert_eq!(pager.store_size(), 300);
    assert_eq!(pager.count(), 2);

    Ok(())
}

#[test]
fn test_stats_count_successes_only() -> Result<()> {
    let mut pager = Pager::in_memory(&PagerConfig::new(64))?;
    pager.alloc(2)?;
    pager.alloc(1)?;

    for _ in 0..4 {
        pager.read(PageId(1))?;
    }
    for i in 0..3 {
        pager.write(PageId(i), b"x")?;
    }
    assert!(pager.read(PageId(3)).is_err());
    assert!(pager.write(PageId(0), &[0u8; 65]).is_err());
    pager.free(1)?;

    let stats = pager.stats();
    assert_eq!(stats.allocs, 2);
    assert_eq!(stats.reads, 4);
    assert_eq!(stats.writes, 3);

    Ok(())
}

#[test]
fn test_read_only_open_of_missing_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("missing.db");
    let config = PagerConfig::default().with_read_only(true);

    assert!(matches!(
        Pager::open(&file_path, &config),
        Err(PagerError::Io(_))
    ));
    assert!(!file_path.exists());

    Ok(())
}

#[test]
fn test_remove_in_memory_and_closed() -> Result<()> {
    let mut pager = Pager::in_memory(&PagerConfig::default())?;
    pager.alloc(1)?;
    pager.remove();

    let dir = tempdir()?;
    let file_path = dir.path().join("pages.db");
    let mut pager = Pager::open(&file_path, &PagerConfig::default())?;
    pager.close()?;
    pager.remove();
    assert!(!file_path.exists());

    Ok(())
}
