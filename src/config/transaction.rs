// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key file transactions with automatic backups
//!
//! A transaction brackets one whole-file replace: `begin` snapshots the
//! current content into a timestamped backup, `commit` writes the new
//! content atomically (temp file + rename), and `rollback` restores the
//! snapshot. A write either fully succeeds or leaves the original file
//! byte-identical; the file is never observable in a half-written state.

use atomic_write_file::AtomicWriteFile;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::config::{ConfigError, ConfigManager};

/// One atomic write against a managed key file.
///
/// # Lifecycle
///
/// 1. `begin()` creates the timestamped backup immediately
/// 2. caller prepares the new content in memory
/// 3. `commit()` writes atomically, or `rollback()` restores
///
/// Committing consumes the transaction, so a double-commit cannot
/// compile.
///
/// # Example
///
/// ```no_run
/// use dow_hotkey_editor::config::{ConfigManager, ConfigTransaction};
///
/// let manager = ConfigManager::new("my_profile.lua".into())?;
/// let tx = ConfigTransaction::begin(&manager)?;
///
/// let new_content = "bindings = { attack = \"Control+A\" }\n";
/// tx.commit(new_content)?;
/// # Ok::<(), dow_hotkey_editor::config::ConfigError>(())
/// ```
pub struct ConfigTransaction<'a> {
    manager: &'a ConfigManager,
    backup_path: Option<PathBuf>,
}

impl<'a> ConfigTransaction<'a> {
    /// Begins a transaction by snapshotting the current content.
    ///
    /// The backup exists before any modification is attempted, so a
    /// rollback point is always available.
    ///
    /// # Errors
    ///
    /// Fails if the key file cannot be read or the backup cannot be
    /// written; in either case nothing has changed.
    pub fn begin(manager: &'a ConfigManager) -> Result<Self, ConfigError> {
        let backup_path = manager.create_timestamped_backup()?;

        Ok(Self {
            manager,
            backup_path: Some(backup_path),
        })
    }

    /// Writes `new_content` to the key file atomically.
    ///
    /// The content lands in a temp file that is renamed over the original;
    /// a crash or error mid-write leaves the original untouched and the
    /// backup from `begin()` in place.
    pub fn commit(self, new_content: &str) -> Result<(), ConfigError> {
        write_atomic(self.manager.path(), new_content)
    }

    /// Restores the content snapshotted at `begin()`.
    ///
    /// Borrows immutably so a rollback can be retried if it fails.
    pub fn rollback(&self) -> Result<(), ConfigError> {
        let Some(backup_path) = &self.backup_path else {
            return Err(ConfigError::BackupFailed(
                "no backup available for rollback".to_string(),
            ));
        };

        let backup_content = fs::read_to_string(backup_path)?;
        write_atomic(self.manager.path(), &backup_content)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("failed to open for atomic write: {e}")))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("failed to write content: {e}")))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("failed to commit atomic write: {e}")))?;

    Ok(())
}
