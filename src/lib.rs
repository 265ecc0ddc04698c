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

//! Dawn of War Hotkey Editor
//!
//! Edits the keybinding tables in Dawn of War `keydefaults.lua` profile
//! files: capture a physical key combination, write it back into the exact
//! byte position of the source file, and cross-reference every binding for
//! conflicts.
//!
//! # Features
//!
//! - **Key capture:** an explicit per-slot state machine turns raw
//!   key-down/key-up events into committed binding strings, with dual
//!   primary/secondary slot coordination
//! - **Surgical writes:** one quoted value changes; every other byte of
//!   the file survives untouched
//! - **Conflict detection:** tolerant normalization ("ctrl+a" equals
//!   "Ctrl+A" equals "lctrl+a") across all tables in a file
//! - **Safe persistence:** timestamped backups and atomic whole-file
//!   writes, never a partially written config
//!
//! # Architecture
//!
//! - **`core`:** pure business logic (tokenization, codec, capture,
//!   parsing, writing, conflict detection); no I/O
//! - **`config`:** file boundary (reading, backups, atomic updates,
//!   preset profiles)
//!
//! The capture machinery is host-agnostic: a GUI front-end maps its
//! toolkit's key events onto [`core::keys::Key`] and implements
//! [`core::keys::KeyboardState`]; nothing in this crate links a window
//! system.
//!
//! # Examples
//!
//! ## Parsing and checking a key file
//!
//! ```no_run
//! use dow_hotkey_editor::core::{conflict::ConflictDetector, parser};
//!
//! let text = std::fs::read_to_string("keydefaults.lua")?;
//! let bindings = parser::parse(&text);
//!
//! let detector = ConflictDetector::from_bindings(&bindings);
//! for conflict in detector.find_conflicts() {
//!     println!("{} is bound {} times", conflict.combo, conflict.owners.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Rewriting one binding in place
//!
//! ```no_run
//! use dow_hotkey_editor::config::ConfigManager;
//!
//! let manager = ConfigManager::new("my_profile.lua".into())?;
//! manager.update_binding("bindings", "attack_move", "Control+Shift+A")?;
//! # Ok::<(), dow_hotkey_editor::config::ConfigError>(())
//! ```

pub mod config;
pub mod core;

// Re-export commonly used types for convenience
pub use core::{BindingRow, Combo, Modifier, ModifierSet};
