//! File-backed value store
//!
//! Keeps values in memory and persists them as a checksummed snapshot.
//!
//! ## File Format
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┬──────────────────────┐
//! │Magic (4) │Version(2)│ Len (4)  │ CRC (4)  │ bincode(entries)     │
//! └──────────┴──────────┴──────────┴──────────┴──────────────────────┘
//! ```
//! All integers little-endian. The snapshot is written to a temp file and
//! renamed over the old one, so a crash mid-write leaves the previous
//! snapshot intact.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::config::FlushStrategy;
use crate::error::{CcError, Result};

use super::store::{MemoryStore, ValueStore};

/// Magic bytes at the start of every snapshot
pub const MAGIC: &[u8; 4] = b"BSCV";

/// Snapshot format version
pub const FORMAT_VERSION: u16 = 1;

/// Magic + version + length + CRC
pub const HEADER_SIZE: usize = 14;

/// Value store persisted to a single snapshot file
pub struct FileStore {
    /// Snapshot location
    path: PathBuf,

    /// Live entries
    memory: MemoryStore,

    /// When to write the snapshot
    strategy: FlushStrategy,

    /// Writes since the last flush
    pending: AtomicUsize,

    /// Serializes snapshot writes
    flush_lock: Mutex<()>,
}

impl FileStore {
    /// Open a snapshot, or start empty if the file doesn't exist yet
    pub fn open(path: &Path, strategy: FlushStrategy) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let bytes = fs::read(path)?;
            let entries = decode_snapshot(&bytes)?;
            tracing::debug!("Loaded {} values from {}", entries.len(), path.display());
            entries
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            memory: MemoryStore::from_map(entries),
            strategy,
            pending: AtomicUsize::new(0),
            flush_lock: Mutex::new(()),
        })
    }

    /// Write the snapshot now, regardless of strategy
    pub fn flush(&self) -> Result<()> {
        let _guard = self.flush_lock.lock();

        let bytes = encode_snapshot(&self.memory.snapshot())?;
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            writer.write_all(&bytes)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        self.pending.store(0, Ordering::SeqCst);
        Ok(())
    }

    /// Flush outstanding writes and close the store
    pub fn close(self) -> Result<()> {
        if self.pending.load(Ordering::SeqCst) > 0 {
            self.flush()?;
        }
        Ok(())
    }

    /// Get the snapshot path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes not yet on disk
    pub fn pending_writes(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    fn after_write(&self) -> Result<()> {
        let pending = self.pending.fetch_add(1, Ordering::SeqCst) + 1;
        let due = match self.strategy {
            FlushStrategy::EveryWrite => true,
            FlushStrategy::EveryNWrites { count } => pending >= count,
            FlushStrategy::Manual => false,
        };
        if due {
            self.flush()?;
        }
        Ok(())
    }
}

impl ValueStore for FileStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.memory.get(key)
    }

    fn set(&self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        self.memory.set(key, value)?;
        self.after_write()
    }

    fn remove(&self, key: &[u8]) -> Result<bool> {
        let removed = self.memory.remove(key)?;
        if removed {
            self.after_write()?;
        }
        Ok(removed)
    }

    fn entry_count(&self) -> usize {
        self.memory.entry_count()
    }
}

// =============================================================================
// Snapshot Encoding
// =============================================================================

fn encode_snapshot(entries: &BTreeMap<Vec<u8>, Vec<u8>>) -> Result<Vec<u8>> {
    let data = bincode::serialize(entries)?;
    let crc = crc32fast::hash(&data);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + data.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&(data.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&data);
    Ok(bytes)
}

fn decode_snapshot(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>> {
    if bytes.len() < HEADER_SIZE {
        return Err(CcError::StoreCorruption(format!(
            "snapshot header truncated: {} bytes",
            bytes.len()
        )));
    }
    if &bytes[0..4] != MAGIC {
        return Err(CcError::StoreCorruption("bad magic".to_string()));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FORMAT_VERSION {
        return Err(CcError::StoreCorruption(format!(
            "unsupported snapshot version {}",
            version
        )));
    }

    let len = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]) as usize;
    let crc = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

    let data = &bytes[HEADER_SIZE..];
    if data.len() != len {
        return Err(CcError::StoreCorruption(format!(
            "snapshot length mismatch: header says {}, found {}",
            len,
            data.len()
        )));
    }
    if crc32fast::hash(data) != crc {
        return Err(CcError::StoreCorruption("CRC mismatch".to_string()));
    }

    Ok(bincode::deserialize(data)?)
}
