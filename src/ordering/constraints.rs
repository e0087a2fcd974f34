//! Conflict and dependency diagnostics for a candidate mod set.
//!
//! Neither check touches the load order; results are for display only and
//! keep the rule store's order.

use std::collections::HashSet;

use super::types::{Rule, RuleFinding, RuleType};

fn id_set<S: AsRef<str>>(ids: &[S]) -> HashSet<&str> {
    ids.iter().map(AsRef::as_ref).collect()
}

fn finding(rule: &Rule, mod_id: &str, target: &str) -> RuleFinding {
    RuleFinding {
        mod_id: mod_id.to_string(),
        target_mod_id: target.to_string(),
        notes: rule.notes.clone(),
    }
}

/// Every `conflicts_with` rule whose two sides are both in `ids`.
///
/// Rules are not symmetric: `conflicts_with(a, b)` and `conflicts_with(b, a)`
/// are reported as two entries.
pub fn check_conflicts<S: AsRef<str>>(rules: &[Rule], ids: &[S]) -> Vec<RuleFinding> {
    let present = id_set(ids);

    rules
        .iter()
        .filter_map(|rule| {
            let (mod_id, target) = rule.pair(RuleType::ConflictsWith)?;
            (present.contains(mod_id) && present.contains(target))
                .then(|| finding(rule, mod_id, target))
        })
        .collect()
}

/// Every `requires` rule whose subject is in `ids` but whose target is not.
pub fn check_dependencies<S: AsRef<str>>(rules: &[Rule], ids: &[S]) -> Vec<RuleFinding> {
    let present = id_set(ids);

    rules
        .iter()
        .filter_map(|rule| {
            let (mod_id, target) = rule.pair(RuleType::Requires)?;
            (present.contains(mod_id) && !present.contains(target))
                .then(|| finding(rule, mod_id, target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_conflict_reported() {
        let rules = vec![Rule::new(RuleType::ConflictsWith, "X", "Y").with_notes("both patch loot")];
        let found = check_conflicts(&rules, &["X", "Y", "Z"]);

        assert_eq!(
            found,
            vec![RuleFinding {
                mod_id: "X".to_string(),
                target_mod_id: "Y".to_string(),
                notes: "both patch loot".to_string(),
            }]
        );
    }

    #[test]
    fn test_conflict_needs_both_sides_present() {
        let rules = vec![Rule::new(RuleType::ConflictsWith, "X", "W")];
        assert!(check_conflicts(&rules, &["X", "Y"]).is_empty());
    }

    #[test]
    fn test_reverse_conflict_is_separate_entry() {
        let rules = vec![
            Rule::new(RuleType::ConflictsWith, "Y", "X"),
            Rule::new(RuleType::ConflictsWith, "X", "Y"),
        ];
        let found = check_conflicts(&rules, &["X", "Y"]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].mod_id, "Y");
        assert_eq!(found[1].mod_id, "X");
    }

    #[test]
    fn test_missing_dependency_reported() {
        let rules = vec![Rule::new(RuleType::Requires, "X", "W").with_notes("needs W")];
        let found = check_dependencies(&rules, &["X", "Y", "Z"]);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].mod_id, "X");
        assert_eq!(found[0].target_mod_id, "W");
        assert_eq!(found[0].notes, "needs W");
    }

    #[test]
    fn test_satisfied_dependency_not_reported() {
        let rules = vec![Rule::new(RuleType::Requires, "X", "Y")];
        assert!(check_dependencies(&rules, &["X", "Y"]).is_empty());
    }

    #[test]
    fn test_padded_target_matches_exactly() {
        let rules = vec![Rule::new(RuleType::Requires, "X", " W")];
        let found = check_dependencies(&rules, &["X", "W"]);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target_mod_id, " W");
    }

    #[test]
    fn test_dependency_of_absent_mod_not_reported() {
        let rules = vec![Rule::new(RuleType::Requires, "Q", "W")];
        assert!(check_dependencies(&rules, &["X", "Y"]).is_empty());
    }

    #[test]
    fn test_inert_rules_skipped() {
        let mut conflict = Rule::new(RuleType::ConflictsWith, "X", "Y");
        conflict.target_mod_id = None;
        let mut requires = Rule::new(RuleType::Requires, "X", "W");
        requires.target_mod_id = None;

        let rules = vec![conflict, requires];
        assert!(check_conflicts(&rules, &["X", "Y"]).is_empty());
        assert!(check_dependencies(&rules, &["X", "Y"]).is_empty());
    }

    #[test]
    fn test_findings_keep_rule_order_without_dedup() {
        let rules = vec![
            Rule::new(RuleType::Requires, "B", "W").with_notes("first"),
            Rule::new(RuleType::Requires, "A", "W").with_notes("second"),
            Rule::new(RuleType::Requires, "B", "W").with_notes("third"),
        ];
        let notes: Vec<String> = check_dependencies(&rules, &["A", "B"])
            .into_iter()
            .map(|f| f.notes)
            .collect();
        assert_eq!(notes, vec!["first", "second", "third"]);
    }
}
