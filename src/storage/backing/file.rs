use super::{closed_error, BackingStore};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Backing store over a file on disk.
#[derive(Debug)]
pub struct FileStore {
    file: Option<File>,
    path: PathBuf,
    name: String,
}

impl FileStore {
    /// Open the file at `path`. In read-write mode a missing file is created
    /// with `create_mode` permission bits (unix only); in read-only mode it
    /// must already exist.
    pub fn open(path: impl AsRef<Path>, read_only: bool, create_mode: u32) -> io::Result<Self> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.read(true);
        if !read_only {
            options.write(true).create(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(create_mode);
        }
        #[cfg(not(unix))]
        let _ = create_mode;

        let file = options.open(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to open file {}: {}", path.display(), e),
            )
        })?;

        Ok(Self {
            file: Some(file),
            path: path.to_path_buf(),
            name: path.display().to_string(),
        })
    }

    fn file(&self) -> io::Result<&File> {
        self.file.as_ref().ok_or_else(closed_error)
    }
}

#[cfg(unix)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(unix)]
fn positional_write(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.write_at(buf, offset)
}

#[cfg(windows)]
fn positional_read(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(windows)]
fn positional_write(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_write(buf, offset)
}

impl BackingStore for FileStore {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let file = self.file()?;
        let mut done = 0;
        while done < buf.len() {
            match positional_read(file, &mut buf[done..], offset + done as u64) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(done)
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<usize> {
        let file = self.file()?;
        let mut done = 0;
        while done < buf.len() {
            match positional_write(file, &buf[done..], offset + done as u64) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(done)
    }

    fn truncate(&mut self, size: u64) -> io::Result<()> {
        self.file()?.set_len(size)
    }

    fn size(&self) -> io::Result<u64> {
        Ok(self.file()?.metadata()?.len())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn remove(&mut self) -> io::Result<()> {
        let closed = self.close();
        fs::remove_file(&self.path)?;
        closed
    }
}
