//! Keybinding conflict detection across tables
//!
//! Two actions conflict when any of their alternative combos normalize to
//! the same string. Normalization here is deliberately more tolerant than
//! the capture codec: the files accept free-form spelling ("ctrl+a",
//! "LShift+Q", "spacebar"), so every token is folded into one canonical
//! form before comparison.
//!
//! Conflicts are detected globally, across all tables in a file, not
//! per-table. Whether a collision between, say, the main bindings and the
//! camera bindings should really count is a product question; the detector
//! reports it and leaves the judgement to the user.

use std::collections::{HashMap, HashSet};

use crate::core::parser::BindingSet;
use crate::core::types::BindingRow;

/// Canonical modifier order in normalized combos.
const MOD_ORDER: [&str; 3] = ["Ctrl", "Alt", "Shift"];

/// One (table, action) owner of a combo.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingRef {
    pub table: String,
    pub action: String,
}

/// A combo bound by two or more actions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Conflict {
    /// Normalized combo string shared by the owners
    pub combo: String,
    /// All (table, action) pairs binding this combo (always 2 or more)
    pub owners: Vec<BindingRef>,
}

/// Indexes normalized combos to the actions binding them.
///
/// Grounded on a HashMap multimap: adding a binding splits it into
/// alternatives, normalizes each, and records the owner under the
/// normalized key. A key with 2+ owners is a conflict.
pub struct ConflictDetector {
    used: HashMap<String, Vec<BindingRef>>,
}

impl ConflictDetector {
    /// Creates an empty detector.
    pub fn new() -> Self {
        Self {
            used: HashMap::new(),
        }
    }

    /// Builds a detector over every binding in a parsed file.
    pub fn from_bindings(set: &BindingSet) -> Self {
        let mut detector = Self::new();
        for table in set.tables() {
            for (action, binding) in table.entries() {
                detector.add_binding(table.name(), action, binding);
            }
        }
        detector
    }

    /// Records one action's binding string (possibly several alternatives).
    pub fn add_binding(&mut self, table: &str, action: &str, binding: &str) {
        for alternative in split_alternatives(binding) {
            let combo = normalize_combo(alternative);
            if combo.is_empty() {
                continue;
            }
            self.used.entry(combo).or_default().push(BindingRef {
                table: table.to_string(),
                action: action.to_string(),
            });
        }
    }

    /// All combos bound by 2 or more actions.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        self.used
            .iter()
            .filter(|(_, owners)| owners.len() > 1)
            .map(|(combo, owners)| Conflict {
                combo: combo.clone(),
                owners: owners.clone(),
            })
            .collect()
    }

    /// Whether this action is part of any conflict group.
    ///
    /// True if any of the action's own alternatives lives in a group of
    /// size 2 or more, even when its other alternatives are unique.
    pub fn is_conflicted(&self, table: &str, action: &str) -> bool {
        self.conflicted_pairs().contains(&pair_key(table, action))
    }

    /// Annotated display rows for a whole file, sorted by table then
    /// action, case-insensitively.
    pub fn annotate(&self, set: &BindingSet) -> Vec<BindingRow> {
        let conflicted = self.conflicted_pairs();

        let mut rows: Vec<BindingRow> = set
            .tables()
            .flat_map(|table| {
                let conflicted = &conflicted;
                table.entries().map(move |(action, binding)| BindingRow {
                    table: table.name().to_string(),
                    action: action.to_string(),
                    binding: binding.to_string(),
                    is_conflict: conflicted.contains(&pair_key(table.name(), action)),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            let ta = a.table.to_lowercase();
            let tb = b.table.to_lowercase();
            ta.cmp(&tb)
                .then_with(|| a.action.to_lowercase().cmp(&b.action.to_lowercase()))
        });
        rows
    }

    /// Case-insensitive identity set of every conflicted (table, action).
    fn conflicted_pairs(&self) -> HashSet<(String, String)> {
        self.used
            .values()
            .filter(|owners| owners.len() > 1)
            .flat_map(|owners| owners.iter())
            .map(|r| pair_key(&r.table, &r.action))
            .collect()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_key(table: &str, action: &str) -> (String, String) {
    (table.to_lowercase(), action.to_lowercase())
}

/// Splits a binding string into its comma-separated alternative combos.
pub fn split_alternatives(binding: &str) -> impl Iterator<Item = &str> {
    binding.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Folds one combo token into canonical form.
///
/// Single characters uppercase. Modifier spellings (including left/right
/// variants) collapse to Ctrl/Alt/Shift. A handful of named keys have
/// fixed renames; `f<digits>` uppercases whole; anything else gets its
/// first character uppercased and the rest lowercased.
pub fn normalize_token(token: &str) -> String {
    let t = token.trim();
    if t.is_empty() {
        return String::new();
    }
    if t.chars().count() == 1 {
        return t.to_uppercase();
    }

    let low = t.to_lowercase();
    match low.as_str() {
        "control" | "ctrl" | "lctrl" | "rctrl" => return "Ctrl".to_string(),
        "alt" | "lalt" | "ralt" => return "Alt".to_string(),
        "shift" | "lshift" | "rshift" => return "Shift".to_string(),
        "escape" => return "Esc".to_string(),
        "pagedown" => return "PgDn".to_string(),
        "pageup" => return "PgUp".to_string(),
        "return" => return "Enter".to_string(),
        "spacebar" => return "Space".to_string(),
        _ => {}
    }

    if low.starts_with('f') && t.len() > 1 && t[1..].chars().all(|c| c.is_ascii_digit()) {
        return t.to_uppercase();
    }

    let mut chars = low.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes a whole combo: tokens folded, modifiers reordered to
/// canonical [Ctrl, Alt, Shift], base token(s) appended last.
///
/// Multiple non-modifier tokens are kept and joined with `+`; the format
/// does not disallow them, though normal inputs have at most one. A combo
/// with no base tokens at all is returned as its normalized tokens in
/// their original order.
pub fn normalize_combo(combo: &str) -> String {
    let tokens: Vec<String> = combo
        .split('+')
        .map(normalize_token)
        .filter(|t| !t.is_empty())
        .collect();

    let base: Vec<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !MOD_ORDER.contains(t))
        .collect();

    if base.is_empty() {
        return tokens.join("+");
    }

    let mut parts: Vec<&str> = MOD_ORDER
        .iter()
        .copied()
        .filter(|m| tokens.iter().any(|t| t == m))
        .collect();
    parts.extend(base);
    parts.join("+")
}
