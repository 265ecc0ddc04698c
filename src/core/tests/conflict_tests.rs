//! Conflict detection tests
//!
//! Normalization equivalences (case, aliases, modifier order), alternative
//! splitting, and global cross-table grouping.

use crate::core::conflict::{normalize_combo, normalize_token, ConflictDetector};
use crate::core::parser::parse;

#[test]
fn test_normalize_token_single_char_uppercases() {
    assert_eq!(normalize_token("a"), "A");
    assert_eq!(normalize_token("A"), "A");
    assert_eq!(normalize_token("5"), "5");
}

#[test]
fn test_normalize_token_modifier_aliases() {
    assert_eq!(normalize_token("control"), "Ctrl");
    assert_eq!(normalize_token("CTRL"), "Ctrl");
    assert_eq!(normalize_token("lctrl"), "Ctrl");
    assert_eq!(normalize_token("rctrl"), "Ctrl");
    assert_eq!(normalize_token("LAlt"), "Alt");
    assert_eq!(normalize_token("rshift"), "Shift");
}

#[test]
fn test_normalize_token_named_renames() {
    assert_eq!(normalize_token("escape"), "Esc");
    assert_eq!(normalize_token("PageDown"), "PgDn");
    assert_eq!(normalize_token("pageup"), "PgUp");
    assert_eq!(normalize_token("RETURN"), "Enter");
    assert_eq!(normalize_token("spacebar"), "Space");
}

#[test]
fn test_normalize_token_function_keys() {
    assert_eq!(normalize_token("f5"), "F5");
    assert_eq!(normalize_token("F13"), "F13");
    // "f" followed by non-digits is not a function key
    assert_eq!(normalize_token("forward"), "Forward");
}

#[test]
fn test_normalize_token_default_capitalization() {
    assert_eq!(normalize_token("home"), "Home");
    assert_eq!(normalize_token("NUMLOCK"), "Numlock");
    assert_eq!(normalize_token("numpad3"), "Numpad3");
}

#[test]
fn test_normalize_combo_reorders_modifiers() {
    assert_eq!(normalize_combo("shift+ctrl+a"), "Ctrl+Shift+A");
    assert_eq!(normalize_combo("alt+Control+F5"), "Ctrl+Alt+F5");
}

#[test]
fn test_normalize_combo_pure_modifiers_keep_token_order() {
    // With no base token the combo is left in its own order
    assert_eq!(normalize_combo("shift"), "Shift");
    assert_eq!(normalize_combo("shift+ctrl"), "Shift+Ctrl");
}

#[test]
fn test_normalize_combo_multiple_base_tokens_join() {
    assert_eq!(normalize_combo("ctrl+a+b"), "Ctrl+A+B");
}

#[test]
fn test_case_and_alias_insensitive_conflict() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "attack", "Ctrl+A");
    detector.add_binding("bindings", "retreat", "ctrl+a");

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].combo, "Ctrl+A");
    assert_eq!(conflicts[0].owners.len(), 2);

    assert!(detector.is_conflicted("bindings", "attack"));
    assert!(detector.is_conflicted("BINDINGS", "Retreat"));
}

#[test]
fn test_control_spelling_variants_collide() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "a1", "Control+Q");
    detector.add_binding("bindings", "a2", "lctrl+q");

    assert_eq!(detector.find_conflicts().len(), 1);
}

#[test]
fn test_unique_bindings_have_no_conflicts() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "attack", "A");
    detector.add_binding("bindings", "stop", "S");
    detector.add_binding("camera", "pan", "Ctrl+A");

    assert!(detector.find_conflicts().is_empty());
    assert!(!detector.is_conflicted("bindings", "attack"));
}

#[test]
fn test_alternative_combo_flags_action_even_when_other_is_unique() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "attack", "Ctrl+A,F5");
    detector.add_binding("bindings", "retreat", "Ctrl+A");

    // F5 alone is unique, but Ctrl+A collides: the action is in conflict
    assert!(detector.is_conflicted("bindings", "attack"));
    assert!(detector.is_conflicted("bindings", "retreat"));

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].combo, "Ctrl+A");
}

#[test]
fn test_conflicts_are_global_across_tables() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "attack", "Shift+Q");
    detector.add_binding("camera_bindings", "pan_up", "shift+q");

    let conflicts = detector.find_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert!(detector.is_conflicted("bindings", "attack"));
    assert!(detector.is_conflicted("camera_bindings", "pan_up"));
}

#[test]
fn test_empty_alternatives_are_skipped() {
    let mut detector = ConflictDetector::new();
    detector.add_binding("bindings", "a1", ", ,");
    detector.add_binding("bindings", "a2", "");

    assert!(detector.find_conflicts().is_empty());
}

#[test]
fn test_annotate_builds_sorted_flagged_rows() {
    let set = parse(
        "Zulu = { strike = \"Ctrl+A\" }\nalpha = { attack = \"ctrl+a\", stop = \"S\" }",
    );
    let detector = ConflictDetector::from_bindings(&set);
    let rows = detector.annotate(&set);

    // Sorted case-insensitively by table then action
    let order: Vec<(&str, &str)> = rows.iter().map(|r| (r.table.as_str(), r.action.as_str())).collect();
    assert_eq!(
        order,
        vec![("alpha", "attack"), ("alpha", "stop"), ("Zulu", "strike")]
    );

    assert!(rows[0].is_conflict);
    assert!(!rows[1].is_conflict);
    assert!(rows[2].is_conflict);
}

#[test]
fn test_from_bindings_indexes_whole_file() {
    let set = parse("a = { x = \"Q\" }\nb = { y = \"q\" }");
    let detector = ConflictDetector::from_bindings(&set);

    assert_eq!(detector.find_conflicts().len(), 1);
}
