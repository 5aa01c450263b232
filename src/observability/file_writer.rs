//! Size-rotated log files.
//!
//! Both the span exporter and the `fmt` layer write through a [`RotatingFile`].
//! Before each write the file size is checked; once it passes the limit the file
//! is renamed to `<name>.<timestamp>` and a fresh one is started. Only the newest
//! few backups are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe append-only file with size-based rotation.
///
/// `&RotatingFile` implements [`Write`], so an `Arc<RotatingFile>` can be handed
/// to `tracing_subscriber::fmt` as its writer.
pub struct RotatingFile {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    /// Opened lazily on first write.
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    /// File rotated at the default size, keeping the default number of backups.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path of the live file; backups are written next to it
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// # Parameters
    ///
    /// * `file_path` - Path of the live file
    /// * `max_bytes` - Size at which the live file is moved aside
    /// * `max_backups` - Backups kept; older ones are deleted
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            handle: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Appends `line` followed by a newline.
    ///
    /// # Parameters
    ///
    /// * `line` - One record, without its trailing newline
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the line is written, rotating first if it would not fit
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be rotated, opened or written, or if another
    /// writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.append(&bytes)
    }

    fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut handle = self
            .handle
            .lock()
            .map_err(|e| io::Error::other(format!("log file lock poisoned: {e}")))?;

        self.rotate_if_full(&mut handle)?;

        if handle.is_none() {
            *handle = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let Some(file) = handle.as_mut() else {
            return Err(io::Error::other("log file unavailable"));
        };
        file.write_all(bytes)?;
        file.flush()
    }

    fn rotate_if_full(&self, handle: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };
        if metadata.len() < self.max_bytes {
            return Ok(());
        }

        *handle = None;
        let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S%.9f");
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{stamp}"));
        fs::rename(&self.file_path, PathBuf::from(backup))?;

        self.remove_old_backups()
    }

    /// Deletes all but the newest `max_backups` rotated files. Timestamps sort
    /// lexicographically, so the names alone give the order.
    fn remove_old_backups(&self) -> io::Result<()> {
        let (Some(dir), Some(name)) = (
            self.file_path.parent(),
            self.file_path.file_name().and_then(|n| n.to_str()),
        ) else {
            return Ok(());
        };
        let prefix = format!("{name}.");

        let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();
        backups.sort_unstable_by(|a, b| b.cmp(a));

        for old in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old);
        }
        Ok(())
    }
}

impl Write for &RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::new(dir.path().join("spans.jsonl"));
        file.write_line("{\"a\":1}").unwrap();
        file.write_line("{\"a\":2}").unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"a\":2}\n");
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let file = RotatingFile::with_limits(dir.path().join("userdeck.log"), 8, 2);

        for i in 0..6 {
            file.write_line(&format!("line-{i}-padding")).unwrap();
        }

        let backups = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("userdeck.log."))
            .count();
        assert_eq!(backups, 2);
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "line-5-padding\n");
    }
}
