//! The durable reply cursor.
//!
//! A single integer cell with atomic get, set and increment. Increment is the
//! serialization point between overlapping invocations: two pollers never see
//! the same post-increment value.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StoreError;

/// Integer cell holding the lowest unconsumed update id.
#[async_trait]
pub trait OffsetStore: Send + Sync {
    /// Current value, or [`StoreError::Miss`] when nothing was stored yet.
    async fn get(&self) -> Result<i64, StoreError>;

    /// Current value, or `default` on a miss.
    async fn get_or(&self, default: i64) -> Result<i64, StoreError> {
        match self.get().await {
            Err(StoreError::Miss) => Ok(default),
            other => other,
        }
    }

    async fn set(&self, value: i64) -> Result<(), StoreError>;

    /// Add `delta` and return the new value. A missing value counts as zero.
    async fn increment(&self, delta: i64) -> Result<i64, StoreError>;
}

// ── In-memory ──────────────────────────────────────────────────────

/// Process-local [`OffsetStore`].
#[derive(Debug, Default)]
pub struct MemoryOffsetStore {
    value: Mutex<Option<i64>>,
}

impl MemoryOffsetStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: i64) -> Self {
        Self {
            value: Mutex::new(Some(value)),
        }
    }
}

#[async_trait]
impl OffsetStore for MemoryOffsetStore {
    async fn get(&self) -> Result<i64, StoreError> {
        (*self.value.lock().await).ok_or(StoreError::Miss)
    }

    async fn set(&self, value: i64) -> Result<(), StoreError> {
        *self.value.lock().await = Some(value);
        Ok(())
    }

    async fn increment(&self, delta: i64) -> Result<i64, StoreError> {
        let mut value = self.value.lock().await;
        let next = value.unwrap_or(0) + delta;
        *value = Some(next);
        Ok(next)
    }
}

// ── File-backed ────────────────────────────────────────────────────

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(50);

/// [`OffsetStore`] in a plain text file, shared between processes.
///
/// Writes replace the file atomically. Mutations hold a sibling `.lock` file
/// created exclusively and stamped with the owner's pid; a lock whose owner
/// is gone is removed.
#[derive(Debug, Clone)]
pub struct FileOffsetStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl FileOffsetStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_name = path.file_name().unwrap_or_default().to_os_string();
        lock_name.push(".lock");
        let lock_path = path.with_file_name(lock_name);
        Self {
            path,
            lock_path,
            lock_timeout: LOCK_WAIT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read(&self) -> Result<i64, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(StoreError::Miss),
            Err(e) => return Err(self.io_error(e)),
        };
        content
            .trim()
            .parse()
            .map_err(|_| StoreError::Corrupt {
                path: self.path.clone(),
                content,
            })
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    fn write(&self, value: i64) -> Result<(), StoreError> {
        let dir = self.dir();
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        writeln!(tmp, "{value}").map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    async fn lock(&self) -> Result<LockGuard, StoreError> {
        let started = Instant::now();
        loop {
            match try_acquire(&self.lock_path) {
                Ok(guard) => return Ok(guard),
                Err(LockState::Stale(dead_pid)) => self.clear_stale(dead_pid)?,
                Err(state) => {
                    if started.elapsed() >= self.lock_timeout {
                        return Err(StoreError::Locked {
                            path: self.lock_path.clone(),
                            holder: state.to_string(),
                        });
                    }
                    tokio::time::sleep(LOCK_RETRY_DELAY).await;
                }
            }
        }
    }
}

impl FileOffsetStore {
    /// Remove a lock left behind by `dead_pid`.
    ///
    /// The lock is renamed aside first so only one contender can claim it.
    /// If the claimed file no longer names `dead_pid`, another contender
    /// already replaced the stale lock and it is linked back in place.
    fn clear_stale(&self, dead_pid: i32) -> Result<(), StoreError> {
        let aside = tempfile::Builder::new()
            .prefix(".offset-lock-")
            .tempfile_in(self.dir())
            .map_err(|e| self.io_error(e))?;
        if std::fs::rename(&self.lock_path, aside.path()).is_err() {
            return Ok(());
        }

        let claimed = std::fs::read_to_string(aside.path())
            .ok()
            .and_then(|content| content.trim().parse::<i32>().ok());
        if claimed == Some(dead_pid) {
            tracing::debug!(path = %self.lock_path.display(), dead_pid, "removed stale offset lock");
        } else {
            tracing::debug!(path = %self.lock_path.display(), "offset lock changed hands, restoring");
            let _ = std::fs::hard_link(aside.path(), &self.lock_path);
        }
        Ok(())
    }
}

#[async_trait]
impl OffsetStore for FileOffsetStore {
    async fn get(&self) -> Result<i64, StoreError> {
        self.read()
    }

    async fn set(&self, value: i64) -> Result<(), StoreError> {
        let _guard = self.lock().await?;
        self.write(value)?;
        tracing::debug!(offset = value, "stored reply offset");
        Ok(())
    }

    async fn increment(&self, delta: i64) -> Result<i64, StoreError> {
        let _guard = self.lock().await?;
        let next = match self.read() {
            Ok(current) => current + delta,
            Err(StoreError::Miss) => delta,
            Err(e) => return Err(e),
        };
        self.write(next)?;
        tracing::debug!(offset = next, "advanced reply offset");
        Ok(next)
    }
}

struct LockGuard {
    path: PathBuf,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(i32),
    Stale(i32),
    Unknown,
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeldBy(pid) => write!(f, "pid {pid}"),
            Self::Stale(pid) => write!(f, "stale pid {pid}"),
            Self::Unknown => write!(f, "unknown holder"),
        }
    }
}

fn try_acquire(lock_path: &Path) -> Result<LockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(LockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<i32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(pid) => Err(LockState::Stale(pid)),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: i32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}
