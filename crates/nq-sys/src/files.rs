// Fixed-size file handle table in the engine's stdio style: ten slots, slot
// zero reserved, first free slot wins.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use thiserror::Error;

pub const MAX_HANDLES: usize = 10;

#[derive(Debug, Error)]
pub enum SysError {
    #[error("out of file handles")]
    OutOfHandles,
    #[error("invalid file handle {0}")]
    InvalidHandle(usize),
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHandle(usize);

impl FileHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct FileTable {
    handles: [Option<File>; MAX_HANDLES],
}

impl FileTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Slot 0 is never handed out, matching the original table.
    fn find_handle(&self) -> Result<usize, SysError> {
        (1..MAX_HANDLES)
            .find(|&i| self.handles[i].is_none())
            .ok_or(SysError::OutOfHandles)
    }

    /// Open for reading, returning the handle and the file length in bytes.
    pub fn open_read(&mut self, path: impl AsRef<Path>) -> Result<(FileHandle, u64), SysError> {
        let slot = self.find_handle()?;
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SysError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let len = file.metadata()?.len();
        self.handles[slot] = Some(file);
        Ok((FileHandle(slot), len))
    }

    /// Open for writing, creating or truncating the file.
    pub fn open_write(&mut self, path: impl AsRef<Path>) -> Result<FileHandle, SysError> {
        let slot = self.find_handle()?;
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SysError::Open {
            path: path.display().to_string(),
            source,
        })?;
        self.handles[slot] = Some(file);
        Ok(FileHandle(slot))
    }

    pub fn close(&mut self, handle: FileHandle) -> Result<(), SysError> {
        self.handles
            .get_mut(handle.0)
            .and_then(Option::take)
            .map(drop)
            .ok_or(SysError::InvalidHandle(handle.0))
    }

    pub fn seek(&mut self, handle: FileHandle, position: u64) -> Result<(), SysError> {
        self.file_mut(handle)?.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    pub fn read(&mut self, handle: FileHandle, dest: &mut [u8]) -> Result<usize, SysError> {
        Ok(self.file_mut(handle)?.read(dest)?)
    }

    pub fn write(&mut self, handle: FileHandle, data: &[u8]) -> Result<usize, SysError> {
        Ok(self.file_mut(handle)?.write(data)?)
    }

    pub fn open_count(&self) -> usize {
        self.handles.iter().filter(|slot| slot.is_some()).count()
    }

    fn file_mut(&mut self, handle: FileHandle) -> Result<&mut File, SysError> {
        self.handles
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(SysError::InvalidHandle(handle.0))
    }
}

/// Existence probe, the original's `Sys_FileTime` 1 / -1 check.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    File::open(path).is_ok()
}

/// Create a directory, ignoring the already-exists case.
pub fn make_dir(path: impl AsRef<Path>) -> Result<(), SysError> {
    let path = path.as_ref();
    match fs::create_dir(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "created directory");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(SysError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("nq-sys-test-{}-{}", process::id(), nanos));
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn open_read_reports_length() {
        let dir = temp_dir();
        let path = dir.join("data.bin");
        fs::write(&path, b"quake").unwrap();

        let mut table = FileTable::new();
        let (handle, len) = table.open_read(&path).unwrap();
        assert_eq!(len, 5);
        assert!(handle.index() >= 1);

        let mut buf = [0u8; 5];
        assert_eq!(table.read(handle, &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"quake");
        table.close(handle).unwrap();

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn seek_repositions_reads() {
        let dir = temp_dir();
        let path = dir.join("data.bin");
        fs::write(&path, b"0123456789").unwrap();

        let mut table = FileTable::new();
        let (handle, _) = table.open_read(&path).unwrap();
        table.seek(handle, 7).unwrap();
        let mut buf = [0u8; 3];
        table.read(handle, &mut buf).unwrap();
        assert_eq!(&buf, b"789");
        table.close(handle).unwrap();

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn write_then_read_back() {
        let dir = temp_dir();
        let path = dir.join("out.bin");

        let mut table = FileTable::new();
        let handle = table.open_write(&path).unwrap();
        assert_eq!(table.write(handle, b"saved").unwrap(), 5);
        table.close(handle).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"saved");
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn closing_frees_the_slot() {
        let dir = temp_dir();
        let path = dir.join("data.bin");
        fs::write(&path, b"x").unwrap();

        let mut table = FileTable::new();
        let (first, _) = table.open_read(&path).unwrap();
        let index = first.index();
        table.close(first).unwrap();
        let (second, _) = table.open_read(&path).unwrap();
        assert_eq!(second.index(), index);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn runs_out_of_handles() {
        let dir = temp_dir();
        let path = dir.join("data.bin");
        fs::write(&path, b"x").unwrap();

        let mut table = FileTable::new();
        for _ in 1..MAX_HANDLES {
            table.open_read(&path).unwrap();
        }
        assert_eq!(table.open_count(), MAX_HANDLES - 1);
        assert!(matches!(
            table.open_read(&path),
            Err(SysError::OutOfHandles)
        ));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn rejects_stale_handles() {
        let dir = temp_dir();
        let path = dir.join("data.bin");
        fs::write(&path, b"x").unwrap();

        let mut table = FileTable::new();
        let (handle, _) = table.open_read(&path).unwrap();
        table.close(handle).unwrap();
        assert!(matches!(
            table.read(handle, &mut [0u8; 1]),
            Err(SysError::InvalidHandle(_))
        ));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let mut table = FileTable::new();
        let err = table.open_read("/nonexistent/nq-test").unwrap_err();
        assert!(matches!(err, SysError::Open { .. }));
        assert_eq!(table.open_count(), 0);
    }

    #[test]
    fn file_exists_probe() {
        let dir = temp_dir();
        let path = dir.join("probe.bin");
        assert!(!file_exists(&path));
        fs::write(&path, b"x").unwrap();
        assert!(file_exists(&path));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn make_dir_ignores_existing() {
        let dir = temp_dir();
        let sub = dir.join("created");
        make_dir(&sub).unwrap();
        make_dir(&sub).unwrap();
        assert!(sub.is_dir());
        fs::remove_dir_all(dir).ok();
    }
}
