use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::WorldState;
use crate::write_set::WriteSet;

/// Flush/sync strategy for committed write sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// `fsync` after every commit (safest, highest latency).
    EveryWrite,
    /// Flush to the OS and rely on page-cache buffering.
    #[default]
    OsDefault,
}

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Append target of the log.
trait LogSink: Write + Send + Sync {
    /// Cut the log back to `len` bytes.
    fn truncate(&mut self, len: u64) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
}

impl LogSink for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_all()
    }
}

struct LogState {
    entries: HashMap<String, Vec<u8>>,
    sink: Box<dyn LogSink>,
    /// End of the last fully committed frame.
    offset: u64,
    /// Set when a failed append could not be rolled back.
    damaged: bool,
}

/// World state persisted as an append-only log of committed write sets.
///
/// On-disk frame format:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized WriteSet)]
/// ```
///
/// The log is replayed into memory on open. Frames that fail the CRC check
/// are skipped; a torn tail (partial frame from a crash) is cut off so that
/// later commits stay reachable. A failed append is rolled back to the end
/// of the previous frame before the error is returned.
pub struct FileWorldState {
    path: PathBuf,
    sync_mode: SyncMode,
    inner: RwLock<LogState>,
}

impl FileWorldState {
    /// Open (or create) the log at `path` and replay it.
    pub fn open(path: &Path, sync_mode: SyncMode) -> StoreResult<Self> {
        Self::open_with(path, sync_mode, |file| Box::new(file) as Box<dyn LogSink>)
    }

    fn open_with(
        path: &Path,
        sync_mode: SyncMode,
        sink: impl FnOnce(File) -> Box<dyn LogSink>,
    ) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        let (entries, valid_len, frames) = replay(&data);

        if valid_len < data.len() as u64 {
            warn!(
                path = %path.display(),
                valid_len,
                file_len = data.len(),
                "torn log tail; truncating"
            );
            file.set_len(valid_len)?;
        }

        debug!(path = %path.display(), frames, keys = entries.len(), "world state replayed");

        Ok(Self {
            path: path.to_path_buf(),
            sync_mode,
            inner: RwLock::new(LogState {
                entries,
                sink: sink(file),
                offset: valid_len,
                damaged: false,
            }),
        })
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current end of the log in bytes.
    pub fn offset(&self) -> u64 {
        self.inner.read().expect("lock poisoned").offset
    }
}

/// Replay every intact frame. Returns the resulting state, the byte length
/// of the well-formed prefix, and the number of frames applied.
fn replay(data: &[u8]) -> (HashMap<String, Vec<u8>>, u64, usize) {
    let mut entries = HashMap::new();
    let mut offset = 0usize;
    let mut frames = 0usize;

    while offset + HEADER_SIZE <= data.len() {
        let header = &data[offset..offset + HEADER_SIZE];
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let expected_crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        let end = offset + HEADER_SIZE + length;
        if length == 0 || end > data.len() {
            warn!(offset, length, "invalid frame length; stopping replay");
            break;
        }

        let payload = &data[offset + HEADER_SIZE..end];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            warn!(
                offset,
                expected = expected_crc,
                actual = actual_crc,
                "CRC mismatch; skipping frame"
            );
            offset = end;
            continue;
        }

        match bincode::deserialize::<WriteSet>(payload) {
            Ok(writes) => {
                for (key, value) in writes.iter() {
                    entries.insert(key.to_string(), value.to_vec());
                }
                frames += 1;
            }
            Err(e) => warn!(offset, error = %e, "undecodable frame; skipping"),
        }
        offset = end;
    }

    (entries, offset as u64, frames)
}

fn append(sink: &mut dyn LogSink, frame: &[u8], sync_mode: SyncMode) -> io::Result<()> {
    sink.write_all(frame)?;
    sink.flush()?;
    if sync_mode == SyncMode::EveryWrite {
        sink.sync()?;
    }
    Ok(())
}

impl WorldState for FileWorldState {
    fn get_state(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state.entries.get(key).cloned())
    }

    fn apply(&self, writes: &WriteSet) -> StoreResult<()> {
        if writes.is_empty() {
            return Ok(());
        }
        let payload =
            bincode::serialize(writes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        frame.extend_from_slice(&payload);

        let mut state = self.inner.write().expect("lock poisoned");
        if state.damaged {
            return Err(StoreError::Io(io::Error::other(format!(
                "log {} has an unrecovered partial frame; reopen to repair",
                self.path.display()
            ))));
        }

        let frame_offset = state.offset;
        if let Err(e) = append(&mut *state.sink, &frame, self.sync_mode) {
            warn!(offset = frame_offset, error = %e, "append failed; rolling back");
            if let Err(rollback) = state.sink.truncate(frame_offset) {
                warn!(offset = frame_offset, error = %rollback, "rollback failed");
                state.damaged = true;
            }
            return Err(e.into());
        }

        state.offset += frame.len() as u64;
        for (key, value) in writes.iter() {
            state.entries.insert(key.to_string(), value.to_vec());
        }

        debug!(offset = frame_offset, keys = writes.len(), "write set committed");
        Ok(())
    }

    fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").entries.len()
    }
}

impl std::fmt::Debug for FileWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWorldState")
            .field("path", &self.path)
            .field("key_count", &self.len())
            .finish()
    }
}
