//! Combo string composition and parsing
//!
//! A combo string is the display/storage form of a key combination:
//! modifiers in canonical order (Control, Alt, Shift) followed by the base
//! token, joined with `+`. Parsing is the tolerant inverse: it accepts any
//! modifier order, stray whitespace and empty parts, because the files this
//! editor touches are hand-edited in the wild.

use crate::core::types::{Modifier, ModifierSet};

/// Composes a canonical combo string from a modifier set and optional base.
///
/// Modifiers always render in Control, Alt, Shift order no matter how they
/// were captured. Without a base the result is the ordered modifier list
/// alone; callers only do that for pure-modifier bindings, where exactly
/// one modifier is present.
pub fn compose(mods: &ModifierSet, base: Option<&str>) -> String {
    let mut parts: Vec<&str> = mods.iter().map(Modifier::token).collect();
    if let Some(base) = base {
        parts.push(base);
    }
    parts.join("+")
}

/// Parses a combo string into its modifier set and optional base token.
///
/// Splits on `+`, trims each part and drops empty ones. Modifier parts
/// match {Control, Alt, Shift} case-insensitively and accumulate into the
/// set; of the non-modifier parts, the last one wins as the base, silently
/// overwriting any earlier candidate. That tie-break is the stated contract
/// for malformed multi-base strings like "A+B". Empty or whitespace-only
/// input yields an empty set and no base.
pub fn parse(s: &str) -> (ModifierSet, Option<String>) {
    let mut mods = ModifierSet::new();
    let mut base = None;

    for part in s.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match Modifier::from_token(part) {
            Some(modifier) => mods.insert(modifier),
            None => base = Some(part.to_string()),
        }
    }

    (mods, base)
}
