use sha2::{Digest, Sha256};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use super::error::{ProgressionError, ProgressionResult};
use super::record::ProgressionRecord;
use crate::core::constants::SAVE_VERSION_MAGIC;
use crate::utils::persistence::{save_path, PROGRESSION_FILE};

/// Backing storage for a player's progression record.
///
/// Read once before an encounter, written once after it.
pub trait ProgressionStore {
    /// Returns `None` when no record has been saved yet.
    fn load(&self) -> ProgressionResult<Option<ProgressionRecord>>;

    fn save(&mut self, record: &ProgressionRecord) -> ProgressionResult<()>;
}

/// Process-local store for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<ProgressionRecord>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProgressionRecord) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ProgressionStore for MemoryStore {
    fn load(&self) -> ProgressionResult<Option<ProgressionRecord>> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &ProgressionRecord) -> ProgressionResult<()> {
        self.record = Some(record.clone());
        self.saves += 1;
        Ok(())
    }
}

/// Stores the record on disk with checksum verification.
///
/// File format:
/// - Version magic (8 bytes)
/// - Data length (4 bytes)
/// - Bincode-serialized record (variable length)
/// - SHA256 checksum over the three fields above (32 bytes)
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config directory.
    pub fn default_location() -> ProgressionResult<Self> {
        Ok(Self::new(save_path(PROGRESSION_FILE)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

fn checksum(version: &[u8], length: &[u8], data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(version);
    hasher.update(length);
    hasher.update(data);
    hasher.finalize().into()
}

impl ProgressionStore for FileStore {
    fn load(&self) -> ProgressionResult<Option<ProgressionRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut reader = Cursor::new(bytes);

        let mut version_bytes = [0u8; 8];
        reader.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != SAVE_VERSION_MAGIC {
            return Err(ProgressionError::VersionMismatch {
                expected: SAVE_VERSION_MAGIC,
                found: version,
            });
        }

        let mut length_bytes = [0u8; 4];
        reader.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes) as usize;

        // Header claims more data than the file holds.
        let remaining = reader.get_ref().len() - reader.position() as usize;
        if data_len.saturating_add(32) > remaining {
            return Err(ProgressionError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("save declares {data_len} data bytes but only {remaining} remain"),
            )));
        }

        let mut data = vec![0u8; data_len];
        reader.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        reader.read_exact(&mut stored_checksum)?;

        if stored_checksum != checksum(&version_bytes, &length_bytes, &data) {
            return Err(ProgressionError::ChecksumMismatch);
        }

        Ok(Some(bincode::deserialize(&data)?))
    }

    fn save(&mut self, record: &ProgressionRecord) -> ProgressionResult<()> {
        let data = bincode::serialize(record)?;
        let version_bytes = SAVE_VERSION_MAGIC.to_le_bytes();
        let length_bytes = (data.len() as u32).to_le_bytes();
        let digest = checksum(&version_bytes, &length_bytes, &data);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.path)?;
        file.write_all(&version_bytes)?;
        file.write_all(&length_bytes)?;
        file.write_all(&data)?;
        file.write_all(&digest)?;
        Ok(())
    }
}
