//! src/core/types.rs
//!
//! Core type definitions for hotkey editing
//!
//! This module defines the fundamental types used throughout the application:
//! - `Modifier`: the three keyboard modifiers the game format knows about
//! - `ModifierSet`: a deduplicated, canonically ordered set of modifiers
//! - `Combo`: a modifier set plus an optional base key token
//! - `BindingRow`: one annotated table/action/binding row for display
//!
//! All types implement serialization for persistence and are normalized on
//! construction so that equality and hashing are order-independent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyboard modifier keys.
///
/// The game's binding format only distinguishes Control, Alt and Shift.
/// Variants are declared in canonical display order (Control, Alt, Shift);
/// `ModifierSet` relies on the derived `Ord` for that ordering.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Control key (either side)
    Control,
    /// Alt key (either side)
    Alt,
    /// Shift key (either side)
    Shift,
}

impl Modifier {
    /// Canonical token used in binding strings ("Control", "Alt", "Shift").
    pub fn token(self) -> &'static str {
        match self {
            Modifier::Control => "Control",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
        }
    }

    /// Case-insensitive lookup from a combo-string part.
    ///
    /// Only the canonical names match here. Free-form aliases like "ctrl"
    /// or "lshift" belong to conflict normalization, not to the codec.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("control") {
            Some(Modifier::Control)
        } else if token.eq_ignore_ascii_case("alt") {
            Some(Modifier::Alt)
        } else if token.eq_ignore_ascii_case("shift") {
            Some(Modifier::Shift)
        } else {
            None
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Returns true if `token` names a modifier, case-insensitively.
pub fn is_modifier_token(token: &str) -> bool {
    Modifier::from_token(token).is_some()
}

/// A set of modifier keys, stored deduplicated in canonical order.
///
/// Canonical order is always Control, then Alt, then Shift, regardless of
/// press order or input order. Because the backing list is normalized on
/// every mutation, equality and hashing are order-independent.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ModifierSet {
    mods: Vec<Modifier>,
}

impl ModifierSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a normalized set from arbitrary input order.
    pub fn from_mods(mut mods: Vec<Modifier>) -> Self {
        mods.sort();
        mods.dedup();
        Self { mods }
    }

    /// Inserts a modifier, keeping canonical order.
    pub fn insert(&mut self, modifier: Modifier) {
        if !self.mods.contains(&modifier) {
            self.mods.push(modifier);
            self.mods.sort();
        }
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.mods.contains(&modifier)
    }

    /// Case-insensitive membership test by token name.
    pub fn contains_token(&self, token: &str) -> bool {
        Modifier::from_token(token).is_some_and(|m| self.contains(m))
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn clear(&mut self) {
        self.mods.clear();
    }

    /// Iterates in canonical order (Control, Alt, Shift).
    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.mods.iter().copied()
    }

    /// The single member, if the set holds exactly one modifier.
    ///
    /// Used for pure-modifier bindings ("Shift" alone is a valid binding).
    pub fn solo(&self) -> Option<Modifier> {
        match self.mods.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self::from_mods(iter.into_iter().collect())
    }
}

/// A key combination: a modifier set plus an optional base token.
///
/// A combo with no base but exactly one modifier is a pure-modifier binding
/// and is valid. A combo with no base and zero or two-plus modifiers has no
/// canonical string form; the codec's callers never produce one.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Combo {
    /// Modifiers in canonical order
    pub mods: ModifierSet,
    /// Base key token (e.g. "K", "F5", "NumpadPlus"); never a modifier name
    pub base: Option<String>,
}

impl Combo {
    pub fn new(mods: ModifierSet, base: Option<String>) -> Self {
        Self { mods, base }
    }

    /// Parses a combo string; see `codec::parse` for the tie-break rules.
    pub fn parse(s: &str) -> Self {
        let (mods, base) = crate::core::codec::parse(s);
        Self { mods, base }
    }

    /// True for a combo of exactly one modifier and no base key.
    pub fn is_pure_modifier(&self) -> bool {
        self.base.is_none() && self.mods.len() == 1
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::core::codec::compose(&self.mods, self.base.as_deref()))
    }
}

/// One annotated binding row as shown to the user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BindingRow {
    /// Table the action lives in (original casing)
    pub table: String,
    /// Action name (original casing)
    pub action: String,
    /// Raw binding string, possibly comma-separated alternatives
    pub binding: String,
    /// True if any alternative collides with another action's binding
    pub is_conflict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_display() {
        assert_eq!(format!("{}", Modifier::Control), "Control");
        assert_eq!(format!("{}", Modifier::Shift), "Shift");
    }

    #[test]
    fn test_modifier_from_token_case_insensitive() {
        assert_eq!(Modifier::from_token("CONTROL"), Some(Modifier::Control));
        assert_eq!(Modifier::from_token("shift"), Some(Modifier::Shift));
        assert_eq!(Modifier::from_token("Alt"), Some(Modifier::Alt));
        assert_eq!(Modifier::from_token("ctrl"), None); // alias, not canonical
        assert_eq!(Modifier::from_token("K"), None);
    }

    #[test]
    fn test_modifier_set_normalization() {
        // Input order never matters
        let a = ModifierSet::from_mods(vec![Modifier::Shift, Modifier::Control]);
        let b = ModifierSet::from_mods(vec![Modifier::Control, Modifier::Shift]);
        assert_eq!(a, b);

        // Duplicates collapse
        let c = ModifierSet::from_mods(vec![Modifier::Alt, Modifier::Alt]);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_modifier_set_canonical_iteration() {
        let mut set = ModifierSet::new();
        set.insert(Modifier::Shift);
        set.insert(Modifier::Control);
        set.insert(Modifier::Alt);

        let order: Vec<Modifier> = set.iter().collect();
        assert_eq!(order, vec![Modifier::Control, Modifier::Alt, Modifier::Shift]);
    }

    #[test]
    fn test_modifier_set_solo() {
        let mut set = ModifierSet::new();
        assert_eq!(set.solo(), None);

        set.insert(Modifier::Shift);
        assert_eq!(set.solo(), Some(Modifier::Shift));

        set.insert(Modifier::Control);
        assert_eq!(set.solo(), None);
    }

    #[test]
    fn test_combo_display() {
        let combo = Combo::new(
            ModifierSet::from_mods(vec![Modifier::Shift, Modifier::Control]),
            Some("K".to_string()),
        );
        assert_eq!(format!("{}", combo), "Control+Shift+K");
    }

    #[test]
    fn test_pure_modifier_combo() {
        let combo = Combo::parse("Shift");
        assert!(combo.is_pure_modifier());

        let combo = Combo::parse("Control+Shift");
        assert!(!combo.is_pure_modifier());

        let combo = Combo::parse("Shift+A");
        assert!(!combo.is_pure_modifier());
    }
}
