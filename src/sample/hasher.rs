// Streaming sample hasher
// Seeks through a file window by window and feeds only the planned bytes into one digest

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::error::SampleError;
use super::planner::{SamplePlan, Window};
use super::registry::{to_hex, HashRegistry};

// Default read buffer; windows larger than this are read in several passes
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// An opened file plus its length
///
/// The handle is released when the target is dropped, on success and on every error path.
#[derive(Debug)]
pub struct FileTarget {
    file: File,
    len: u64,
    path: PathBuf,
}

impl FileTarget {
    pub fn open(path: &Path) -> Result<Self, SampleError> {
        let file = File::open(path).map_err(|e| SampleError::unreadable(path, "opening", e))?;
        let len = file
            .metadata()
            .map_err(|e| SampleError::unreadable(path, "reading metadata", e))?
            .len();

        Ok(Self {
            file,
            len,
            path: path.to_path_buf(),
        })
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Cumulative digest after one window was consumed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowDigest {
    #[serde(flatten)]
    pub window: Window,
    pub digest: String,
}

/// Result of hashing the sampled windows of one file
#[derive(Debug, Clone)]
pub struct SampleDigest {
    pub path: PathBuf,
    pub algorithm: String,
    /// Hex digest of all windows, in file order
    pub digest: String,
    /// Running digest after each window; empty unless requested
    pub windows: Vec<WindowDigest>,
    pub bytes_read: u64,
    pub plan: SamplePlan,
}

/// Hashes the windows of a [`SamplePlan`]
pub struct SampleHasher {
    buffer_size: usize,
    record_windows: bool,
}

impl SampleHasher {
    /// Create a new SampleHasher with default buffer size (1MB)
    pub fn new() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            record_windows: false,
        }
    }

    /// Create a new SampleHasher with custom buffer size
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
            record_windows: false,
        }
    }

    /// Record the running digest after every window
    pub fn with_window_digests(mut self, record: bool) -> Self {
        self.record_windows = record;
        self
    }

    /// Open `path` and hash the windows of `plan`
    pub fn hash_file(
        &self,
        path: &Path,
        plan: &SamplePlan,
        algorithm: &str,
    ) -> Result<SampleDigest, SampleError> {
        // Algorithm errors must surface before the file is touched
        HashRegistry::lookup(algorithm)?;
        let mut target = FileTarget::open(path)?;
        self.hash_target(&mut target, plan, algorithm)
    }

    /// Hash the windows of `plan` from an already opened target
    pub fn hash_target(
        &self,
        target: &mut FileTarget,
        plan: &SamplePlan,
        algorithm: &str,
    ) -> Result<SampleDigest, SampleError> {
        self.hash_reader(&mut target.file, &target.path, plan, algorithm)
    }

    /// Hash the windows of `plan` from any seekable source
    ///
    /// Windows are consumed in plan order. Between windows the reader only ever seeks
    /// forward, relative to where the previous window ended. A window cut short by the
    /// end of the source contributes the bytes that exist.
    pub fn hash_reader<R: Read + Seek>(
        &self,
        reader: &mut R,
        path: &Path,
        plan: &SamplePlan,
        algorithm: &str,
    ) -> Result<SampleDigest, SampleError> {
        let entry = HashRegistry::lookup(algorithm)?;
        let mut hasher = entry.new_hasher();

        let mut position = reader
            .stream_position()
            .map_err(|e| SampleError::unreadable(path, "seeking", e))?;
        let chunk = (plan.width().min(self.buffer_size as u64)) as usize;
        let mut buffer = vec![0u8; chunk];
        let mut windows = Vec::new();
        let mut bytes_read = 0u64;

        for window in plan.windows() {
            if window.start != position {
                let target = if window.start > position {
                    SeekFrom::Current((window.start - position) as i64)
                } else {
                    SeekFrom::Start(window.start)
                };
                reader
                    .seek(target)
                    .map_err(|e| SampleError::unreadable(path, "seeking", e))?;
                position = window.start;
            }

            let mut remaining = window.len();
            while remaining > 0 {
                let to_read = remaining.min(buffer.len() as u64) as usize;
                let n = match reader.read(&mut buffer[..to_read]) {
                    Ok(0) => break,
                    Ok(n) => n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(SampleError::unreadable(path, "reading", e)),
                };
                hasher.update(&buffer[..n]);
                remaining -= n as u64;
                position += n as u64;
            }

            let consumed = window.len() - remaining;
            bytes_read += consumed;
            tracing::trace!(start = window.start, consumed, "hashed window");

            if self.record_windows {
                windows.push(WindowDigest {
                    window: Window {
                        start: window.start,
                        end: window.start + consumed,
                    },
                    digest: to_hex(&hasher.snapshot()),
                });
            }
        }

        Ok(SampleDigest {
            path: path.to_path_buf(),
            algorithm: entry.name.to_string(),
            digest: to_hex(&hasher.finalize()),
            windows,
            bytes_read,
            plan: plan.clone(),
        })
    }
}

impl Default for SampleHasher {
    fn default() -> Self {
        Self::new()
    }
}
