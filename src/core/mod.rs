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

//! src/core/mod.rs
//!
//! Core business logic module
//!
//! This module contains the fundamental data structures and algorithms for
//! hotkey editing:
//! - Physical key tokenization (`keys`)
//! - Combo string composition and parsing (`codec`)
//! - The interactive capture state machine (`capture`)
//! - The tolerant binding table parser (`parser`)
//! - The surgical in-place table writer (`writer`)
//! - Conflict detection with free-form combo normalization (`conflict`)
//!
//! All business logic is isolated from UI and I/O concerns to enable
//! comprehensive unit testing without a window system or real files.

pub mod capture;
pub mod codec;
pub mod conflict;
pub mod keys;
pub mod parser;
pub mod types;
pub mod writer;

pub use capture::{CaptureResult, CaptureSession, CaptureSlot, CaptureState, SessionEvent, SlotId};
pub use conflict::{Conflict, ConflictDetector};
pub use keys::{Key, KeyboardState};
pub use parser::{BindingSet, BindingTable};
pub use types::*;
pub use writer::WriteError;

#[cfg(test)]
mod tests;
