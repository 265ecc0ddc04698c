//! Key file management with atomic writes and backup support.
//!
//! This module is the I/O boundary around the pure core: reading a
//! profile's key file, splicing one binding, and persisting the result
//! safely. Key properties:
//!
//! - **Atomic writes**: temp-file-then-rename, never a half-written file
//! - **Automatic backups**: every write creates a timestamped backup first
//! - **Rebase-on-write**: the file is re-read immediately before splicing,
//!   so an external rewrite between sessions is built upon rather than
//!   clobbered (last-writer-wins, no file-level conflict detection)
//!
//! # Example
//!
//! ```no_run
//! use dow_hotkey_editor::config::ConfigManager;
//!
//! let manager = ConfigManager::new("my_profile.lua".into())?;
//! manager.update_binding("bindings", "attack_move", "Control+Shift+A")?;
//! # Ok::<(), dow_hotkey_editor::config::ConfigError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::core::parser::{self, BindingSet};
use crate::core::writer::{self, WriteError};

pub mod presets;
pub mod transaction;

pub use presets::PresetStore;
pub use transaction::ConfigTransaction;

/// Errors that can occur at the file boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key file does not exist.
    #[error("Key file not found: {0}")]
    NotFound(PathBuf),

    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),

    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// The binding to rewrite was not found; the file is unmodified.
    #[error(transparent)]
    Target(#[from] WriteError),

    /// Refused to modify one of the game's protected stock files.
    #[error("File is protected: {0}")]
    Protected(PathBuf),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manages one profile key file with safe read/modify/write operations.
///
/// All writes go through [`ConfigTransaction`]: backup first, then an
/// atomic whole-file replace. A failed write leaves the original intact.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the key file (e.g. a preset copy of keydefaults.lua).
    config_path: PathBuf,
    backup_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the given key file.
    ///
    /// Validates that the file exists and creates a `backups/` directory
    /// next to it if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist, or
    /// `ConfigError::BackupDirNotWritable` if the backup directory cannot
    /// be created or written to.
    pub fn new(config_path: PathBuf) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::NotFound(config_path));
        }

        let backup_dir = config_path
            .parent()
            .ok_or_else(|| {
                ConfigError::BackupDirNotWritable(PathBuf::from(
                    "key file has no parent directory",
                ))
            })?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        Ok(Self {
            config_path,
            backup_dir,
        })
    }

    /// Path of the managed key file.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the current file content.
    pub fn read(&self) -> Result<String, ConfigError> {
        Ok(fs::read_to_string(&self.config_path)?)
    }

    /// Reads and parses the file's binding tables.
    pub fn load_bindings(&self) -> Result<BindingSet, ConfigError> {
        Ok(parser::parse(&self.read()?))
    }

    /// Rewrites one binding value in place and persists atomically.
    ///
    /// The file is re-read immediately before splicing, so concurrent
    /// external edits are rebased onto. A backup of the pre-write content
    /// is created first; on any failure the original file is untouched.
    pub fn update_binding(
        &self,
        table: &str,
        action: &str,
        new_value: &str,
    ) -> Result<(), ConfigError> {
        let text = self.read()?;
        let updated = writer::update_binding(&text, table, action, new_value)?;

        let tx = ConfigTransaction::begin(self)?;
        tx.commit(&updated)
    }

    /// Sets the profile's display label and persists atomically.
    pub fn set_display_label(&self, label: &str) -> Result<(), ConfigError> {
        let text = self.read()?;
        let updated = writer::set_display_label(&text, label);

        let tx = ConfigTransaction::begin(self)?;
        tx.commit(&updated)
    }

    /// Copies the current content into the backup directory.
    ///
    /// Backup names carry a `YYYY-MM-DD_HHMMSS` timestamp so repeated
    /// writes never overwrite each other.
    pub(crate) fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;

        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");

        let original_name = self
            .config_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ConfigError::BackupFailed("key file name is not valid UTF-8".to_string())
            })?;

        let backup_path = self
            .backup_dir
            .join(format!("{original_name}.{timestamp}"));

        fs::write(&backup_path, &content)?;

        Ok(backup_path)
    }
}

#[cfg(test)]
mod tests;
