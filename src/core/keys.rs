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

//! src/core/keys.rs
//!
//! Physical key identifiers and tokenization
//!
//! The host UI maps its toolkit's key events onto the crate-owned `Key`
//! enum; `token_for` turns a key into the canonical display token used in
//! binding strings, or `None` when the key has no representation. Keys the
//! format cannot express are simply ignored by the capture machinery, never
//! reported as errors.
//!
//! The `System` variant models the platform indirection for Alt-chorded key
//! events: it must be resolved to the physical Alt key actually held before
//! tokenization, which requires a snapshot of keyboard state.

use crate::core::types::{Modifier, ModifierSet};

/// Snapshot of physical keyboard state, provided by the host UI.
///
/// The capture state machine never accumulates individual modifier key
/// codes; it polls this snapshot whenever it needs the held modifier set.
pub trait KeyboardState {
    /// Modifiers currently held down.
    fn held_modifiers(&self) -> ModifierSet;

    /// Whether a specific physical key is currently down.
    ///
    /// Only consulted for `Key::System` resolution (left vs right Alt).
    fn is_key_down(&self, key: Key) -> bool;
}

/// A physical key identifier.
///
/// Variant order matters: letters, digits, numpad digits and function keys
/// are declared contiguously so `token_for` can use range arithmetic, the
/// same way the original scan-code ranges worked.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    /// Top-row digits
    D0, D1, D2, D3, D4, D5, D6, D7, D8, D9,
    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
    Space, Tab, Enter, Backspace, Escape,
    Up, Down, Left, Right,
    Home, End, PageUp, PageDown,
    Insert, Delete,
    CapsLock, NumLock, ScrollLock,
    PrintScreen, Pause,
    Apostrophe, Comma, Minus, Period, Slash,
    Semicolon, Equal, LBracket, Backslash, RBracket, Grave,
    NumpadMultiply, NumpadPlus, NumpadMinus,
    NumpadPeriod, NumpadSlash, NumpadSeparator,
    LShift, RShift, LControl, RControl, LAlt, RAlt,
    /// Platform indirection for Alt-chorded key events. Must be resolved
    /// via `resolve_system_key` before tokenization.
    System,
}

/// Maps a physical key to its canonical display token.
///
/// Returns `None` for keys the binding format cannot represent, including
/// an unresolved `Key::System`. Left/right modifier variants collapse to
/// the single tokens "Shift"/"Control"/"Alt".
pub fn token_for(key: Key) -> Option<String> {
    if (Key::A..=Key::Z).contains(&key) {
        return Some(((b'A' + (key as u8 - Key::A as u8)) as char).to_string());
    }
    if (Key::D0..=Key::D9).contains(&key) {
        return Some(((b'0' + (key as u8 - Key::D0 as u8)) as char).to_string());
    }
    if (Key::Numpad0..=Key::Numpad9).contains(&key) {
        return Some(format!("Numpad{}", key as u8 - Key::Numpad0 as u8));
    }
    if (Key::F1..=Key::F24).contains(&key) {
        return Some(format!("F{}", 1 + key as u8 - Key::F1 as u8));
    }

    let name = match key {
        Key::LShift | Key::RShift => Modifier::Shift.token(),
        Key::LControl | Key::RControl => Modifier::Control.token(),
        Key::LAlt | Key::RAlt => Modifier::Alt.token(),
        Key::Space => "Space",
        Key::Tab => "Tab",
        Key::Enter => "Enter",
        Key::Backspace => "Backspace",
        Key::Escape => "Escape",
        Key::Up => "Up",
        Key::Down => "Down",
        Key::Left => "Left",
        Key::Right => "Right",
        Key::Home => "Home",
        Key::End => "End",
        Key::PageUp => "PageUp",
        Key::PageDown => "PageDown",
        Key::Insert => "Insert",
        Key::Delete => "Delete",
        Key::CapsLock => "CapsLock",
        Key::NumLock => "NumLock",
        Key::ScrollLock => "ScrollLock",
        Key::PrintScreen => "PrintScreen",
        Key::Pause => "Pause",
        Key::Apostrophe => "Apostrophe",
        Key::Comma => "Comma",
        Key::Minus => "Minus",
        Key::Period => "Period",
        Key::Slash => "Slash",
        Key::Semicolon => "Semicolon",
        Key::Equal => "Equal",
        Key::LBracket => "LBracket",
        Key::Backslash => "Backslash",
        Key::RBracket => "RBracket",
        Key::Grave => "Grave",
        Key::NumpadMultiply => "NumpadMultiply",
        Key::NumpadPlus => "NumpadPlus",
        Key::NumpadMinus => "NumpadMinus",
        Key::NumpadPeriod => "NumpadPeriod",
        Key::NumpadSlash => "NumpadSlash",
        Key::NumpadSeparator => "NumpadSeparator",
        _ => return None,
    };

    Some(name.to_string())
}

/// Resolves the `System` indirection against the current keyboard state.
///
/// Alt-chorded key events arrive as `Key::System`; the underlying physical
/// key is whichever Alt key is held, preferring the left one. When neither
/// Alt is down the event is unattributable and resolution fails.
pub fn resolve_system_key(key: Key, state: &impl KeyboardState) -> Option<Key> {
    if key != Key::System {
        return Some(key);
    }
    if state.is_key_down(Key::LAlt) {
        Some(Key::LAlt)
    } else if state.is_key_down(Key::RAlt) {
        Some(Key::RAlt)
    } else {
        None
    }
}

/// Resolves and tokenizes a key event in one step.
pub fn token_for_event(key: Key, state: &impl KeyboardState) -> Option<String> {
    resolve_system_key(key, state).and_then(token_for)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Held(Vec<Key>);

    impl KeyboardState for Held {
        fn held_modifiers(&self) -> ModifierSet {
            ModifierSet::new()
        }
        fn is_key_down(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(token_for(Key::A).as_deref(), Some("A"));
        assert_eq!(token_for(Key::Z).as_deref(), Some("Z"));
        assert_eq!(token_for(Key::D0).as_deref(), Some("0"));
        assert_eq!(token_for(Key::D9).as_deref(), Some("9"));
    }

    #[test]
    fn test_numpad_and_function_keys() {
        assert_eq!(token_for(Key::Numpad0).as_deref(), Some("Numpad0"));
        assert_eq!(token_for(Key::Numpad7).as_deref(), Some("Numpad7"));
        assert_eq!(token_for(Key::F1).as_deref(), Some("F1"));
        assert_eq!(token_for(Key::F12).as_deref(), Some("F12"));
        assert_eq!(token_for(Key::F24).as_deref(), Some("F24"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(token_for(Key::Enter).as_deref(), Some("Enter"));
        assert_eq!(token_for(Key::LBracket).as_deref(), Some("LBracket"));
        assert_eq!(token_for(Key::NumpadSeparator).as_deref(), Some("NumpadSeparator"));
        assert_eq!(token_for(Key::Grave).as_deref(), Some("Grave"));
    }

    #[test]
    fn test_modifier_variants_collapse() {
        assert_eq!(token_for(Key::LShift).as_deref(), Some("Shift"));
        assert_eq!(token_for(Key::RShift).as_deref(), Some("Shift"));
        assert_eq!(token_for(Key::LControl).as_deref(), Some("Control"));
        assert_eq!(token_for(Key::RAlt).as_deref(), Some("Alt"));
    }

    #[test]
    fn test_system_key_resolution() {
        // Left Alt held: System resolves to LAlt and tokenizes as Alt
        let state = Held(vec![Key::LAlt]);
        assert_eq!(resolve_system_key(Key::System, &state), Some(Key::LAlt));
        assert_eq!(token_for_event(Key::System, &state).as_deref(), Some("Alt"));

        // Right Alt held
        let state = Held(vec![Key::RAlt]);
        assert_eq!(resolve_system_key(Key::System, &state), Some(Key::RAlt));

        // Both held: left wins
        let state = Held(vec![Key::LAlt, Key::RAlt]);
        assert_eq!(resolve_system_key(Key::System, &state), Some(Key::LAlt));

        // Neither held: tokenization fails
        let state = Held(vec![]);
        assert_eq!(token_for_event(Key::System, &state), None);
    }

    #[test]
    fn test_unresolved_system_key_has_no_token() {
        assert_eq!(token_for(Key::System), None);
    }

    #[test]
    fn test_non_system_key_passes_through() {
        let state = Held(vec![]);
        assert_eq!(resolve_system_key(Key::Q, &state), Some(Key::Q));
    }
}
