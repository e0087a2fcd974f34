//! Load order resolution.
//!
//! Mods are stable-sorted by score, then every `place_before` /
//! `place_after` rule is applied in stored order as a single relocation on
//! the evolving list. Later rules can undo earlier ones; there is no
//! fixed-point iteration and no cycle detection.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::scorer::score;
use super::types::{Mod, Rule, RuleType, UnsatisfiedPlacement};

/// Resolve `ids` into a load order.
///
/// Ids without an entry in `mods` are left out of the result. Repeated ids
/// keep their first occurrence. The output is always a permutation of the
/// remaining ids.
pub fn resolve<S: AsRef<str>>(rules: &[Rule], ids: &[S], mods: &HashMap<String, Mod>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut scored: Vec<(i64, &str)> = Vec::with_capacity(ids.len());

    for id in ids.iter().map(AsRef::as_ref) {
        if !seen.insert(id) {
            debug!("Ignoring repeated mod id {}", id);
            continue;
        }
        match mods.get(id) {
            Some(m) => scored.push((score(m, rules), id)),
            None => debug!("No metadata for mod {}, leaving it out of the load order", id),
        }
    }

    // sort_by is stable: equal scores keep input order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut order: Vec<&str> = scored.into_iter().map(|(_, id)| id).collect();
    apply_placements(rules, &mut order);

    order.into_iter().map(str::to_string).collect()
}

/// Apply placement rules, in stored order, to `order` in place.
pub fn apply_placements(rules: &[Rule], order: &mut Vec<&str>) {
    for rule in rules {
        if let Some((mod_id, target)) = rule.pair(RuleType::PlaceBefore) {
            place_before(order, mod_id, target);
        } else if let Some((mod_id, target)) = rule.pair(RuleType::PlaceAfter) {
            place_after(order, mod_id, target);
        }
    }
}

fn position(order: &[&str], id: &str) -> Option<usize> {
    order.iter().position(|entry| *entry == id)
}

fn place_before(order: &mut Vec<&str>, mod_id: &str, target: &str) {
    let (Some(from), Some(to)) = (position(order, mod_id), position(order, target)) else {
        return;
    };
    if from <= to {
        return;
    }

    let moved = order.remove(from);
    if let Some(to) = position(order, target) {
        order.insert(to, moved);
        debug!("Moved {} before {} (index {} -> {})", mod_id, target, from, to);
    }
}

fn place_after(order: &mut Vec<&str>, mod_id: &str, target: &str) {
    let (Some(from), Some(to)) = (position(order, mod_id), position(order, target)) else {
        return;
    };
    if from >= to {
        return;
    }

    let moved = order.remove(from);
    if let Some(to) = position(order, target) {
        order.insert(to + 1, moved);
        debug!("Moved {} after {} (index {} -> {})", mod_id, target, from, to + 1);
    }
}

/// Placement rules that do not hold in `order`.
///
/// Rules naming an id outside `order`, and rules placing a mod relative to
/// itself, are not reported.
pub fn unsatisfied_placements<S: AsRef<str>>(
    rules: &[Rule],
    order: &[S],
) -> Vec<UnsatisfiedPlacement> {
    let index: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_ref(), i))
        .collect();

    rules
        .iter()
        .filter(|r| matches!(r.rule_type, RuleType::PlaceBefore | RuleType::PlaceAfter))
        .filter_map(|rule| {
            let target = rule.target().filter(|t| *t != rule.mod_id)?;
            let from = *index.get(rule.mod_id.as_str())?;
            let to = *index.get(target)?;

            let holds = match rule.rule_type {
                RuleType::PlaceBefore => from < to,
                _ => from > to,
            };
            (!holds).then(|| UnsatisfiedPlacement {
                rule_type: rule.rule_type,
                mod_id: rule.mod_id.clone(),
                target_mod_id: target.to_string(),
                notes: rule.notes.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(entries: &[(&str, &str)]) -> HashMap<String, Mod> {
        entries
            .iter()
            .map(|(id, title)| (id.to_string(), Mod::new(*id, *title)))
            .collect()
    }

    fn plain(ids: &[&str]) -> HashMap<String, Mod> {
        ids.iter()
            .map(|id| (id.to_string(), Mod::new(*id, "Quiet Nights")))
            .collect()
    }

    #[test]
    fn test_ties_keep_input_order() {
        let order = resolve(&[], &["X", "Y", "Z"], &plain(&["X", "Y", "Z"]));
        assert_eq!(order, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_sorted_by_category_weight() {
        let metadata = mods(&[
            ("deco", "Garden Decoration"),
            ("fw", "Event Framework"),
            ("gp", "Quiet Nights"),
        ]);
        let order = resolve(&[], &["deco", "gp", "fw"], &metadata);
        assert_eq!(order, vec!["fw", "gp", "deco"]);
    }

    #[test]
    fn test_missing_metadata_dropped() {
        let order = resolve(&[], &["X", "ghost", "Y"], &plain(&["X", "Y"]));
        assert_eq!(order, vec!["X", "Y"]);
    }

    #[test]
    fn test_repeated_ids_kept_once() {
        let order = resolve(&[], &["X", "Y", "X"], &plain(&["X", "Y"]));
        assert_eq!(order, vec!["X", "Y"]);
    }

    #[test]
    fn test_place_before_moves_mod_directly_before_target() {
        let rules = vec![Rule::new(RuleType::PlaceBefore, "C", "A")];
        let order = resolve(&rules, &["A", "B", "C"], &plain(&["A", "B", "C"]));
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_place_before_already_satisfied_is_noop() {
        let rules = vec![Rule::new(RuleType::PlaceBefore, "A", "C")];
        let order = resolve(&rules, &["A", "B", "C"], &plain(&["A", "B", "C"]));
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_place_after_moves_mod_directly_after_target() {
        let rules = vec![Rule::new(RuleType::PlaceAfter, "A", "C")];
        let order = resolve(&rules, &["A", "B", "C", "D"], &plain(&["A", "B", "C", "D"]));
        assert_eq!(order, vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_rule_with_absent_id_is_noop() {
        let rules = vec![
            Rule::new(RuleType::PlaceBefore, "C", "ghost"),
            Rule::new(RuleType::PlaceAfter, "ghost", "A"),
        ];
        let order = resolve(&rules, &["A", "B", "C"], &plain(&["A", "B", "C"]));
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_later_rule_wins_on_contradiction() {
        let rules = vec![
            Rule::new(RuleType::PlaceBefore, "C", "A"),
            Rule::new(RuleType::PlaceAfter, "C", "B"),
        ];
        let order = resolve(&rules, &["A", "B", "C"], &plain(&["A", "B", "C"]));
        assert_eq!(order, vec!["A", "B", "C"]);

        let violations = unsatisfied_placements(&rules, &order);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_type, RuleType::PlaceBefore);
        assert_eq!(violations[0].mod_id, "C");
    }

    #[test]
    fn test_placement_overrides_score() {
        let metadata = mods(&[("fw", "Event Framework"), ("deco", "Garden Decoration")]);
        let rules = vec![Rule::new(RuleType::PlaceBefore, "deco", "fw")];
        let order = resolve(&rules, &["fw", "deco"], &metadata);
        assert_eq!(order, vec!["deco", "fw"]);
    }

    #[test]
    fn test_inert_placement_ignored() {
        let mut rule = Rule::new(RuleType::PlaceBefore, "C", "A");
        rule.target_mod_id = None;
        let order = resolve(&[rule], &["A", "B", "C"], &plain(&["A", "B", "C"]));
        assert_eq!(order, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_output_uses_input_ids_not_record_ids() {
        let mut metadata = HashMap::new();
        metadata.insert("a".to_string(), Mod::new("x", "Quiet Nights"));
        metadata.insert("b".to_string(), Mod::new("x", "Quiet Nights"));

        let order = resolve(&[], &["a", "b"], &metadata);
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_self_placement_is_never_unsatisfied() {
        let rules = vec![
            Rule::new(RuleType::PlaceBefore, "A", "A"),
            Rule::new(RuleType::PlaceAfter, "B", "B"),
        ];
        let order = resolve(&rules, &["A", "B"], &plain(&["A", "B"]));
        assert_eq!(order, vec!["A", "B"]);
        assert!(unsatisfied_placements(&rules, &order).is_empty());
    }

    #[test]
    fn test_unsatisfied_placements_skip_absent_ids() {
        let rules = vec![Rule::new(RuleType::PlaceBefore, "C", "ghost")];
        assert!(unsatisfied_placements(&rules, &["A", "C"]).is_empty());
    }
}
