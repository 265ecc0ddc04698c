//! Combo codec tests
//!
//! Composition ordering, tolerant parsing, the last-non-modifier-wins
//! tie-break, and the compose/parse round-trip law.

use crate::core::codec::{compose, parse};
use crate::core::types::{Modifier, ModifierSet};

#[test]
fn test_compose_orders_modifiers_canonically() {
    let mods = ModifierSet::from_mods(vec![Modifier::Shift, Modifier::Control]);
    assert_eq!(compose(&mods, Some("A")), "Control+Shift+A");

    let mods = ModifierSet::from_mods(vec![Modifier::Shift, Modifier::Alt, Modifier::Control]);
    assert_eq!(compose(&mods, Some("F5")), "Control+Alt+Shift+F5");
}

#[test]
fn test_compose_base_only() {
    assert_eq!(compose(&ModifierSet::new(), Some("Enter")), "Enter");
}

#[test]
fn test_compose_pure_modifier() {
    let mods = ModifierSet::from_mods(vec![Modifier::Shift]);
    assert_eq!(compose(&mods, None), "Shift");
}

#[test]
fn test_parse_modifiers_and_base() {
    let (mods, base) = parse("Control+Shift+A");
    assert!(mods.contains(Modifier::Control));
    assert!(mods.contains(Modifier::Shift));
    assert!(!mods.contains(Modifier::Alt));
    assert_eq!(base.as_deref(), Some("A"));
}

#[test]
fn test_parse_is_case_insensitive_for_modifiers() {
    let (mods, base) = parse("CONTROL+shift+q");
    assert_eq!(mods.len(), 2);
    // Base keeps its original spelling; only modifiers are canonical
    assert_eq!(base.as_deref(), Some("q"));
}

#[test]
fn test_parse_pure_modifier() {
    let (mods, base) = parse("Shift");
    assert_eq!(mods.solo(), Some(Modifier::Shift));
    assert_eq!(base, None);
}

#[test]
fn test_parse_last_non_modifier_wins() {
    // Documented tie-break for malformed multi-base strings
    let (mods, base) = parse("A+B");
    assert!(mods.is_empty());
    assert_eq!(base.as_deref(), Some("B"));

    let (mods, base) = parse("Control+A+Enter");
    assert_eq!(mods.solo(), Some(Modifier::Control));
    assert_eq!(base.as_deref(), Some("Enter"));
}

#[test]
fn test_parse_tolerates_whitespace_and_empty_parts() {
    let (mods, base) = parse(" Control +  F5 ");
    assert_eq!(mods.solo(), Some(Modifier::Control));
    assert_eq!(base.as_deref(), Some("F5"));

    let (mods, base) = parse("Control++A");
    assert_eq!(mods.solo(), Some(Modifier::Control));
    assert_eq!(base.as_deref(), Some("A"));
}

#[test]
fn test_parse_empty_input() {
    let (mods, base) = parse("");
    assert!(mods.is_empty());
    assert_eq!(base, None);

    let (mods, base) = parse("   ");
    assert!(mods.is_empty());
    assert_eq!(base, None);
}

#[test]
fn test_round_trip_through_canonical_forms() {
    let bases = ["A", "Z", "0", "F1", "F24", "Numpad7", "Enter", "LBracket"];
    let mod_sets = [
        vec![],
        vec![Modifier::Control],
        vec![Modifier::Alt],
        vec![Modifier::Shift],
        vec![Modifier::Control, Modifier::Shift],
        vec![Modifier::Control, Modifier::Alt, Modifier::Shift],
    ];

    for base in bases {
        for mods in &mod_sets {
            let set = ModifierSet::from_mods(mods.clone());
            let composed = compose(&set, Some(base));
            let (parsed_mods, parsed_base) = parse(&composed);
            assert_eq!(parsed_mods, set, "mods round-trip for {composed}");
            assert_eq!(parsed_base.as_deref(), Some(base), "base round-trip for {composed}");
        }
    }
}
