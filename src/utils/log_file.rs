use crate::utils::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, Default)]
struct Sink {
    path: Option<PathBuf>,
    file: Option<File>,
}

/// Shared, swappable log file target for a `fmt` layer.
///
/// With no file attached, writes are accepted and dropped. The file is
/// always opened in append mode, so truncation moves the next write to
/// offset zero.
#[derive(Debug, Clone, Default)]
pub struct LogFile {
    inner: Arc<Mutex<Sink>>,
}

impl LogFile {
    pub fn open(path: &Path, clear: bool) -> Result<Self> {
        let log_file = Self::default();
        log_file.switch(Some(path), clear)?;
        Ok(log_file)
    }

    /// Points the sink at `path` (or detaches it with `None`).
    ///
    /// Re-selecting the current path keeps the open handle and only
    /// truncates when `clear` is set, unless the file was removed or
    /// rotated away, in which case it is reopened.
    pub fn switch(&self, path: Option<&Path>, clear: bool) -> Result<()> {
        let mut sink = self.lock();

        match path {
            Some(path) if sink.path.as_deref() == Some(path) && path.exists() => {
                if clear {
                    if let Some(file) = sink.file.as_ref() {
                        file.set_len(0)?;
                    }
                }
            }
            Some(path) => {
                let file = open_log_file(path, clear)?;
                sink.path = Some(path.to_path_buf());
                sink.file = Some(file);
            }
            None => {
                sink.path = None;
                sink.file = None;
            }
        }

        Ok(())
    }

    /// Empties the active log file. No-op when no file is attached.
    pub fn truncate(&self) -> Result<()> {
        let mut sink = self.lock();
        if let Some(file) = sink.file.as_mut() {
            file.flush()?;
            file.set_len(0)?;
        }
        Ok(())
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.lock().path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Sink> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn open_log_file(path: &Path, clear: bool) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    if clear {
        file.set_len(0)?;
    }
    Ok(file)
}

pub struct LogFileWriter<'a> {
    sink: MutexGuard<'a, Sink>,
}

impl Write for LogFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.sink.file.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.sink.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter { sink: self.lock() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_line(log_file: &LogFile, line: &str) {
        let mut writer = log_file.make_writer();
        writeln!(writer, "{}", line).unwrap();
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/app.log");

        let log_file = LogFile::open(&path, false).unwrap();
        write_line(&log_file, "hello");

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert_eq!(log_file.path(), Some(path));
    }

    #[test]
    fn test_open_appends_unless_cleared() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "old\n").unwrap();

        let log_file = LogFile::open(&path, false).unwrap();
        write_line(&log_file, "new");
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");

        let cleared = LogFile::open(&path, true).unwrap();
        write_line(&cleared, "fresh");
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_truncate_restarts_at_offset_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let log_file = LogFile::open(&path, false).unwrap();
        write_line(&log_file, "a long first line");
        log_file.truncate().unwrap();
        write_line(&log_file, "b");

        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    }

    #[test]
    fn test_detached_sink_drops_writes() {
        let log_file = LogFile::default();
        write_line(&log_file, "nowhere");
        assert!(log_file.path().is_none());
        assert!(log_file.truncate().is_ok());
    }

    #[test]
    fn test_switch_reopens_removed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rotated.log");

        let log_file = LogFile::open(&path, false).unwrap();
        write_line(&log_file, "before rotation");
        fs::remove_file(&path).unwrap();

        log_file.switch(Some(&path), false).unwrap();
        write_line(&log_file, "after rotation");

        assert_eq!(fs::read_to_string(&path).unwrap(), "after rotation\n");
    }

    #[test]
    fn test_switch_same_path_keeps_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let log_file = LogFile::open(&path, false).unwrap();
        write_line(&log_file, "kept");
        log_file.switch(Some(&path), false).unwrap();
        write_line(&log_file, "appended");

        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\nappended\n");
    }

    #[test]
    fn test_switch_moves_to_new_file() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");

        let log_file = LogFile::open(&first, false).unwrap();
        write_line(&log_file, "one");
        log_file.switch(Some(&second), false).unwrap();
        write_line(&log_file, "two");

        assert_eq!(fs::read_to_string(&first).unwrap(), "one\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "two\n");
    }
}
