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

//! src/core/capture.rs
//!
//! Interactive key-capture state machine
//!
//! A capture session turns a serial stream of key-down/key-up events into a
//! committed binding string. Each session owns two independent slots
//! (primary and secondary); the host UI routes events to whichever slot is
//! active and renders each slot's `preview_text`.
//!
//! The per-slot machine has three states, derived from its fields rather
//! than mutated ad hoc:
//!
//! - **Idle**: nothing held, nothing chosen, nothing committed
//! - **ModifierHeld**: one or more modifiers down, no base chosen yet
//! - **Committed**: a base key was chosen at least once this session;
//!   the slot is locked and modifier releases no longer alter it
//!
//! The machine never accumulates individual modifier key codes. It polls
//! the host's `KeyboardState` snapshot, so a chord like Ctrl+Shift+K reads
//! the true held set at the moment K goes down.

use crate::core::codec;
use crate::core::keys::{self, Key, KeyboardState};
use crate::core::types::{is_modifier_token, ModifierSet};

/// Placeholder shown while nothing presentable has been captured.
pub const PREVIEW_PLACEHOLDER: &str = "…";

/// Observable state of one capture slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CaptureState {
    /// No modifiers held, no base chosen, nothing committed
    Idle,
    /// Modifiers currently held, base not yet chosen
    ModifierHeld,
    /// A base key has been chosen; the slot is locked
    Committed,
}

/// One half of a capture session: the in-progress state for a single
/// binding value.
#[derive(Clone, Debug, Default)]
pub struct CaptureSlot {
    mods: ModifierSet,
    base: Option<String>,
    base_chosen: bool,
    mod_only_hold: bool,
    committed: Option<String>,
}

impl CaptureSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current named state, derived from the slot fields.
    pub fn state(&self) -> CaptureState {
        if self.base_chosen {
            CaptureState::Committed
        } else if self.mod_only_hold {
            CaptureState::ModifierHeld
        } else {
            CaptureState::Idle
        }
    }

    /// Clears everything and returns to Idle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Preloads an existing binding for display and editing.
    ///
    /// The committed value keeps `s` verbatim; the parsed form only seeds
    /// the modifier set and base so later transitions behave as if the
    /// binding had just been captured.
    pub fn set_initial(&mut self, s: &str) {
        let (mods, base) = codec::parse(s);
        self.mods = mods;
        self.base_chosen = base.is_some();
        self.base = base;
        self.mod_only_hold = false;
        self.committed = Some(s.to_string());
    }

    /// Feeds a key-down event into the slot.
    ///
    /// Unrepresentable keys cause no transition. A modifier key marks the
    /// modifier-hold phase (unless a base is already locked in); any other
    /// representable key snapshots the held modifier set, becomes the base
    /// and commits the composed binding.
    pub fn on_key_down(&mut self, key: Key, state: &impl KeyboardState) {
        let Some(token) = keys::token_for_event(key, state) else {
            return;
        };

        if is_modifier_token(&token) {
            if !self.base_chosen {
                self.mods = state.held_modifiers();
                self.mod_only_hold = true;
            }
        } else {
            self.mods = state.held_modifiers();
            self.base = Some(token);
            self.base_chosen = true;
            self.mod_only_hold = false;
            self.committed = Some(codec::compose(&self.mods, self.base.as_deref()));
        }
    }

    /// Feeds a key-up event into the slot.
    ///
    /// Once a base is chosen the slot is locked: releases do not revert or
    /// alter the committed value. Before that, the held modifier set is
    /// re-read from the keyboard snapshot; when it empties the
    /// modifier-hold phase ends.
    pub fn on_key_up(&mut self, state: &impl KeyboardState) {
        if self.base_chosen {
            return;
        }
        self.mods = state.held_modifiers();
        if self.mods.is_empty() {
            self.mod_only_hold = false;
        }
    }

    /// The binding the slot would produce right now, if any.
    ///
    /// With a base present this is the composed combo. With no base but
    /// exactly one held modifier it is that modifier's name (pure-modifier
    /// binding). Otherwise there is nothing presentable yet.
    pub fn live_binding(&self) -> Option<String> {
        if self.base.is_some() {
            return Some(codec::compose(&self.mods, self.base.as_deref()));
        }
        self.mods.solo().map(|m| m.token().to_string())
    }

    /// Text for the preview label.
    ///
    /// While modifiers are held mid-chord with nothing committed yet, the
    /// placeholder is shown instead of a transient single-modifier label;
    /// that keeps the preview from flickering through "Control" on the way
    /// to "Control+K".
    pub fn preview_text(&self) -> String {
        if self.mod_only_hold && self.committed.is_none() {
            return PREVIEW_PLACEHOLDER.to_string();
        }
        self.committed
            .clone()
            .or_else(|| self.live_binding())
            .unwrap_or_else(|| PREVIEW_PLACEHOLDER.to_string())
    }

    /// The last fully-formed binding committed this session, if any.
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Value the slot contributes on confirm: committed, else live.
    pub fn result(&self) -> Option<String> {
        self.committed.clone().or_else(|| self.live_binding())
    }
}

/// Which slot of a session an event or query targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotId {
    Primary,
    Secondary,
}

/// Outcome of routing one event into a session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionEvent {
    /// The event was delivered to the active slot
    Handled,
    /// The event targeted a non-editable secondary slot; nothing changed
    Rejected,
    /// Escape was pressed: the session is aborted, nothing was committed
    Cancelled,
}

/// Final result of a confirmed capture session.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CaptureResult {
    /// The user explicitly cleared the binding. Distinct from "nothing
    /// captured": the caller should remove the stored binding.
    Cleared,
    /// Whatever each slot produced; `primary` is `None` when nothing was
    /// captured at all.
    Captured {
        primary: Option<String>,
        secondary: Option<String>,
    },
}

/// A two-slot capture session.
///
/// Created fresh per capture dialog invocation and dropped when the dialog
/// closes. The secondary slot only becomes editable once a primary binding
/// exists (live or committed) or a secondary was preloaded from a prior
/// session.
///
/// # Example
///
/// ```ignore
/// let mut session = CaptureSession::new(Some("Control+F5"), None, true);
/// assert_eq!(session.preview(SlotId::Primary), "Control+F5");
///
/// session.on_key_down(Key::Q, &keyboard);        // routed to primary
/// match session.finish() {
///     CaptureResult::Captured { primary, .. } => { /* persist */ }
///     CaptureResult::Cleared => { /* remove binding */ }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct CaptureSession {
    primary: CaptureSlot,
    secondary: CaptureSlot,
    active: SlotId,
    allows_secondary: bool,
    explicit_empty: bool,
}

impl CaptureSession {
    /// Starts a session, preloading existing bindings where present.
    ///
    /// Empty initial strings are treated as "nothing to preload"; the slot
    /// starts Idle with the placeholder preview.
    pub fn new(
        initial_primary: Option<&str>,
        initial_secondary: Option<&str>,
        allows_secondary: bool,
    ) -> Self {
        let mut primary = CaptureSlot::new();
        if let Some(s) = initial_primary.filter(|s| !s.trim().is_empty()) {
            primary.set_initial(s);
        }

        let mut secondary = CaptureSlot::new();
        if let Some(s) = initial_secondary.filter(|s| !s.trim().is_empty()) {
            secondary.set_initial(s);
        }

        Self {
            primary,
            secondary,
            active: SlotId::Primary,
            allows_secondary,
            explicit_empty: false,
        }
    }

    /// Whether the secondary slot may receive events.
    ///
    /// A secondary cannot be set before a primary exists: the binding must
    /// permit a secondary AND the primary must have a live or committed
    /// value, unless a secondary was already committed in a prior session.
    pub fn secondary_editable(&self) -> bool {
        self.allows_secondary
            && (self.primary.live_binding().is_some()
                || self.primary.committed().is_some()
                || self.secondary.committed().is_some())
    }

    /// Selects the slot that receives subsequent events.
    ///
    /// Returns false (leaving the selection unchanged) when the secondary
    /// slot is not currently editable.
    pub fn activate(&mut self, slot: SlotId) -> bool {
        if slot == SlotId::Secondary && !self.secondary_editable() {
            return false;
        }
        self.active = slot;
        true
    }

    pub fn active(&self) -> SlotId {
        self.active
    }

    /// Routes a key-down event to the active slot.
    ///
    /// Escape aborts the whole session before any commit; the caller
    /// should drop the session without persisting anything.
    pub fn on_key_down(&mut self, key: Key, state: &impl KeyboardState) -> SessionEvent {
        if key == Key::Escape {
            return SessionEvent::Cancelled;
        }
        if self.active == SlotId::Secondary && !self.secondary_editable() {
            return SessionEvent::Rejected;
        }
        self.active_slot_mut().on_key_down(key, state);
        SessionEvent::Handled
    }

    /// Routes a key-up event to the active slot.
    pub fn on_key_up(&mut self, state: &impl KeyboardState) -> SessionEvent {
        if self.active == SlotId::Secondary && !self.secondary_editable() {
            return SessionEvent::Rejected;
        }
        self.active_slot_mut().on_key_up(state);
        SessionEvent::Handled
    }

    /// Clears the binding under edit.
    ///
    /// Clearing while the primary is active is an intentional "no binding"
    /// request: both slots reset and the session records explicit-empty.
    /// Clearing while the secondary is active only resets the secondary.
    pub fn clear_active(&mut self) {
        match self.active {
            SlotId::Primary => {
                self.primary.reset();
                self.secondary.reset();
                self.explicit_empty = true;
            }
            SlotId::Secondary => {
                self.secondary.reset();
            }
        }
    }

    /// True once the user has explicitly cleared the primary binding.
    pub fn explicit_empty(&self) -> bool {
        self.explicit_empty
    }

    pub fn slot(&self, slot: SlotId) -> &CaptureSlot {
        match slot {
            SlotId::Primary => &self.primary,
            SlotId::Secondary => &self.secondary,
        }
    }

    /// Preview text for one slot.
    pub fn preview(&self, slot: SlotId) -> String {
        self.slot(slot).preview_text()
    }

    /// Confirms the session and yields its final result.
    ///
    /// An explicit clear overrides any live or committed state. Otherwise
    /// each slot contributes `committed ?? live`; the secondary value is
    /// only honored when the binding supports a secondary slot.
    pub fn finish(self) -> CaptureResult {
        if self.explicit_empty {
            return CaptureResult::Cleared;
        }
        let secondary = if self.allows_secondary {
            self.secondary.result()
        } else {
            None
        };
        CaptureResult::Captured {
            primary: self.primary.result(),
            secondary,
        }
    }

    fn active_slot_mut(&mut self) -> &mut CaptureSlot {
        match self.active {
            SlotId::Primary => &mut self.primary,
            SlotId::Secondary => &mut self.secondary,
        }
    }
}
