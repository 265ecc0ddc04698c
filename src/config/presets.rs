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

//! Preset profile enumeration and lifecycle
//!
//! A profile directory holds the game's stock key files plus any number of
//! user presets, all `.lua` files side by side. The stock files are
//! protected: they can be copied from but never edited or deleted. A new
//! preset is a byte copy of an existing file with its display label set to
//! the preset's name.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConfigError;
use crate::core::{parser, writer};

/// The game's base key file, the canonical copy source.
pub const BASE_FILE: &str = "keydefaults.lua";

/// Stock files that ship with the game. Editing or deleting these would
/// desync the game's own defaults.
const PROTECTED_FILES: &[&str] = &[
    "keydefaults.lua",
    "playercfg.lua",
    "keydefaults_grid.lua",
    "keydefaults_grid_azerty.lua",
    "keydefaults_grid_qwertz.lua",
    "keydefaults_modern.lua",
];

/// Whether a file name is one of the game's protected stock files.
pub fn is_protected(file_name: &str) -> bool {
    PROTECTED_FILES
        .iter()
        .any(|p| p.eq_ignore_ascii_case(file_name))
}

/// One selectable preset file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Preset {
    pub path: PathBuf,
    pub file_name: String,
    pub protected: bool,
}

/// Enumerates and manages the preset files of one profile directory.
#[derive(Debug)]
pub struct PresetStore {
    profile_dir: PathBuf,
}

impl PresetStore {
    /// Opens a profile directory.
    ///
    /// The directory must contain `playercfg.lua`, the marker
    /// distinguishing an actual game profile from an arbitrary folder.
    pub fn new(profile_dir: PathBuf) -> Result<Self, ConfigError> {
        if !profile_dir.is_dir() {
            return Err(ConfigError::NotFound(profile_dir));
        }
        let marker = profile_dir.join("playercfg.lua");
        if !marker.exists() {
            return Err(ConfigError::NotFound(marker));
        }
        Ok(Self { profile_dir })
    }

    /// Lists presets: every non-empty `.lua` file except `playercfg.lua`,
    /// sorted by file name case-insensitively.
    pub fn list(&self) -> Result<Vec<Preset>, ConfigError> {
        let mut presets = Vec::new();

        for entry in fs::read_dir(&self.profile_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.to_lowercase().ends_with(".lua")
                || file_name.eq_ignore_ascii_case("playercfg.lua")
            {
                continue;
            }
            // A truncated (deleted) preset lingers as an empty file; hide it
            if is_preset_empty(&path) {
                continue;
            }

            presets.push(Preset {
                protected: is_protected(file_name),
                file_name: file_name.to_string(),
                path,
            });
        }

        presets.sort_by(|a, b| {
            a.file_name
                .to_lowercase()
                .cmp(&b.file_name.to_lowercase())
        });
        Ok(presets)
    }

    /// Creates a preset as a copy of an existing key file.
    ///
    /// The desired name is sanitized to letters, digits, `_` and `-`; a
    /// clash with an existing non-empty or protected file gets a numeric
    /// suffix instead of overwriting. The new file's display label is set
    /// to its own stem.
    pub fn create_from(
        &self,
        base: &Path,
        desired_name: &str,
    ) -> Result<PathBuf, ConfigError> {
        if !base.exists() {
            return Err(ConfigError::NotFound(base.to_path_buf()));
        }

        let safe: String = desired_name
            .trim()
            .chars()
            .map(|ch| {
                if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();

        let mut target = self.profile_dir.join(format!("{safe}.lua"));

        if target.exists() {
            let reusable = !is_protected(&format!("{safe}.lua")) && is_preset_empty(&target);
            if !reusable {
                target = self.unique_path(&safe);
            }
        }

        fs::copy(base, &target)?;

        let stem = target
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&safe)
            .to_string();
        let text = fs::read_to_string(&target)?;
        fs::write(&target, writer::set_display_label(&text, &stem))?;

        Ok(target)
    }

    /// Deletes a preset by truncating it to zero bytes.
    ///
    /// The game re-creates missing stock files on launch, so an empty file
    /// is the stable way to make a preset disappear from every list.
    /// Protected files are refused.
    pub fn delete(&self, path: &Path) -> Result<(), ConfigError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if is_protected(file_name) {
            return Err(ConfigError::Protected(path.to_path_buf()));
        }
        if !path.exists() {
            return Ok(());
        }
        fs::write(path, "")?;
        Ok(())
    }

    fn unique_path(&self, stem: &str) -> PathBuf {
        let mut i = 2;
        let mut path = self.profile_dir.join(format!("{stem}.lua"));
        while path.exists() {
            path = self.profile_dir.join(format!("{stem}_{i}.lua"));
            i += 1;
        }
        path
    }
}

/// Whether a key file holds no bindings at all (blank or tables-free).
fn is_preset_empty(path: &Path) -> bool {
    match fs::read_to_string(path) {
        Ok(text) => {
            if text.trim().is_empty() {
                return true;
            }
            parser::parse(&text)
                .tables()
                .all(|table| table.is_empty())
        }
        Err(_) => false,
    }
}
