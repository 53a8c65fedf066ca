//! Ledger persistence layer
//!
//! Provides save/load functionality for the ProtoCoin ledger. A snapshot file
//! carries the serialized ledger together with its SHA-256 digest, so one
//! rename publishes both. Loads refuse snapshots whose digest, supply
//! accounting or event log does not check out.

use crate::crypto::{sha256_hex, verify_sha256_hex};
use crate::token::{BalanceIndexer, ProtoCoin};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Checksum mismatch for {0}")]
    ChecksumMismatch(PathBuf),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub ledger_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".protocoin_data"),
            ledger_file: "ledger.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// On-disk snapshot: the ledger JSON exactly as hashed, plus its digest
#[derive(Serialize, Deserialize)]
struct Snapshot<'a> {
    sha256: String,
    #[serde(borrow)]
    ledger: &'a RawValue,
}

/// Ledger storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Get the ledger file path
    fn ledger_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    fn temp_path(&self) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.tmp", self.config.ledger_file))
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.ledger_file, index))
    }

    /// Save the ledger to disk
    pub fn save(&self, ledger: &ProtoCoin) -> Result<(), StorageError> {
        let path = self.ledger_path();

        // Create backup if enabled
        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        let data = encode_snapshot(ledger)?;

        // Write to a temporary file first, then publish with one rename
        let temp_path = self.temp_path();
        fs::write(&temp_path, &data)?;
        fs::rename(&temp_path, &path)?;

        log::debug!("ledger saved to {:?}", path);
        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<ProtoCoin, StorageError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        decode_snapshot(&fs::read_to_string(&path)?, &path)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                let next = self.backup_path(i + 1);
                fs::rename(&current, &next)?;
            }
        }

        Ok(())
    }

    /// Read a backup; index 0 is the snapshot replaced by the latest save
    pub fn restore_backup(&self, backup_index: usize) -> Result<ProtoCoin, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        decode_snapshot(&fs::read_to_string(&backup_path)?, &backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|i| self.backup_path(*i).exists())
            .collect()
    }
}

fn encode_snapshot(ledger: &ProtoCoin) -> Result<String, StorageError> {
    let body = RawValue::from_string(serde_json::to_string_pretty(ledger)?)?;
    let snapshot = Snapshot {
        sha256: sha256_hex(body.get().as_bytes()),
        ledger: &*body,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

fn decode_snapshot(data: &str, path: &Path) -> Result<ProtoCoin, StorageError> {
    let snapshot: Snapshot = serde_json::from_str(data)?;
    let body = snapshot.ledger.get();

    if !verify_sha256_hex(body.as_bytes(), &snapshot.sha256) {
        return Err(StorageError::ChecksumMismatch(path.to_path_buf()));
    }

    parse_ledger(body)
}

/// Deserialize a ledger and check it against its own event log
fn parse_ledger(data: &str) -> Result<ProtoCoin, StorageError> {
    let ledger: ProtoCoin = serde_json::from_str(data)?;

    if !ledger.is_conserved() {
        return Err(StorageError::InvalidData(
            "Balances do not add up to total supply".to_string(),
        ));
    }

    let mut indexer = BalanceIndexer::new();
    if !indexer.apply_all(ledger.events()) {
        return Err(StorageError::InvalidData(
            "Event log overdraws an account".to_string(),
        ));
    }

    let replays = indexer.total_supply() == ledger.total_supply()
        && indexer.holder_count() == ledger.holder_count()
        && ledger
            .holders()
            .into_iter()
            .all(|(account, balance)| indexer.balance_of(account) == *balance);
    if !replays {
        return Err(StorageError::InvalidData(
            "Event log does not replay to the stored balances".to_string(),
        ));
    }

    Ok(ledger)
}

/// Save ledger to a specific file path
pub fn save_to_file(ledger: &ProtoCoin, path: &Path) -> Result<(), StorageError> {
    let data = serde_json::to_string_pretty(ledger)?;
    fs::write(path, data)?;
    Ok(())
}

/// Load ledger from a specific file path
pub fn load_from_file(path: &Path) -> Result<ProtoCoin, StorageError> {
    parse_ledger(&fs::read_to_string(path)?)
}
