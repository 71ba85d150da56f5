//! Selection-set bookkeeping for bulk actions.
//!
//! The invariant is `selection ⊆ eligible`: an id may stay checked only while
//! its row still qualifies for the pending bulk action. Views call
//! `reconcile` from an effect keyed on the eligible set, so the "N selected"
//! counter always agrees with the rendered checkboxes.

use std::collections::HashSet;

/// Drop selected ids that are no longer eligible. Returns true when the
/// selection changed, so the caller knows to write the signal back.
pub fn reconcile(selection: &mut HashSet<String>, eligible: &HashSet<String>) -> bool {
    let before = selection.len();
    selection.retain(|id| eligible.contains(id));
    selection.len() != before
}

pub fn toggle(selection: &mut HashSet<String>, id: &str, checked: bool) {
    if checked {
        selection.insert(id.to_string());
    } else {
        selection.remove(id);
    }
}

/// Header-checkbox semantics: if everything eligible is already selected the
/// click clears the selection, otherwise it selects exactly the eligible set
/// (never ineligible rows, even though the checkbox is visually global).
pub fn toggle_all(selection: &mut HashSet<String>, eligible: &HashSet<String>) {
    if !eligible.is_empty() && eligible.is_subset(selection) {
        selection.clear();
    } else {
        *selection = eligible.clone();
    }
}

pub fn all_selected(selection: &HashSet<String>, eligible: &HashSet<String>) -> bool {
    !eligible.is_empty() && eligible.is_subset(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_enforces_subset() {
        let mut selection = set(&["a", "b", "c"]);
        let eligible = set(&["b", "c", "d"]);
        assert!(reconcile(&mut selection, &eligible));
        assert_eq!(selection, set(&["b", "c"]));
        assert!(selection.is_subset(&eligible));

        // Already a subset: no change reported.
        assert!(!reconcile(&mut selection, &eligible));
    }

    #[test]
    fn test_subset_invariant_over_filter_sequence() {
        let mut selection = set(&["a", "b", "c", "d"]);
        for eligible in [
            set(&["a", "b", "c", "d"]),
            set(&["a", "c"]),
            set(&["c"]),
            set(&[]),
            set(&["a", "b"]),
        ] {
            reconcile(&mut selection, &eligible);
            assert!(selection.is_subset(&eligible));
        }
    }

    #[test]
    fn test_toggle_all_selects_exactly_eligible() {
        let mut selection = set(&["x"]);
        let eligible = set(&["a", "b"]);
        // "x" is stale here, but toggle_all replaces wholesale.
        toggle_all(&mut selection, &eligible);
        assert_eq!(selection, eligible);
    }

    #[test]
    fn test_toggle_all_idempotence() {
        let eligible = set(&["a", "b", "c"]);
        let mut selection = HashSet::new();

        toggle_all(&mut selection, &eligible);
        assert_eq!(selection, eligible);

        // Everything selected: the second invocation clears.
        toggle_all(&mut selection, &eligible);
        assert!(selection.is_empty());

        // And the third selects exactly the eligible set again.
        toggle_all(&mut selection, &eligible);
        assert_eq!(selection, eligible);
    }

    #[test]
    fn test_toggle_all_with_empty_eligible_clears() {
        let mut selection = set(&["a"]);
        toggle_all(&mut selection, &HashSet::new());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_single() {
        let mut selection = HashSet::new();
        toggle(&mut selection, "a", true);
        toggle(&mut selection, "b", true);
        toggle(&mut selection, "a", false);
        assert_eq!(selection, set(&["b"]));
    }
}
