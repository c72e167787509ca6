//! Append-only JSON Lines file.

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only JSONL file, one serialized record per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Every line is flushed as it is
/// written; the file is never truncated. Flushes on `Drop`.
pub struct JsonlFile {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlFile {
    /// Open `path` for appending, creating it and its parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `record` and append it as one line.
    pub fn append<T: Serialize>(&self, record: &T) -> io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("JSONL writer lock poisoned"))?;
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

impl Drop for JsonlFile {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
