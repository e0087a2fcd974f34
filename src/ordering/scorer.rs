//! Priority scoring: category weight + popularity, or an explicit override.

use super::categorizer::categorize;
use super::types::{Mod, Rule, RuleType, ScoreBreakdown};

/// Popularity bonus from subscription count.
pub fn popularity_bonus(subscriptions: u64) -> i64 {
    if subscriptions > 10_000 {
        5
    } else if subscriptions > 5_000 {
        3
    } else {
        0
    }
}

/// First priority rule for the mod, in stored order.
pub fn priority_override(rules: &[Rule], mod_id: &str) -> Option<i64> {
    rules
        .iter()
        .find(|r| r.rule_type == RuleType::Priority && r.mod_id == mod_id)
        .map(|r| r.priority)
}

/// Score a mod. Higher loads earlier.
pub fn score(m: &Mod, rules: &[Rule]) -> i64 {
    if let Some(priority) = priority_override(rules, &m.id) {
        return priority;
    }
    categorize(m).weight() + popularity_bonus(m.subscriptions)
}

/// Same result as [`score`], with every component spelled out.
pub fn explain(m: &Mod, rules: &[Rule]) -> ScoreBreakdown {
    let category = categorize(m);
    let category_weight = category.weight();
    let popularity_bonus = popularity_bonus(m.subscriptions);
    let override_priority = priority_override(rules, &m.id);

    ScoreBreakdown {
        mod_id: m.id.clone(),
        category,
        category_weight,
        popularity_bonus,
        override_priority,
        score: override_priority.unwrap_or(category_weight + popularity_bonus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::types::Category;

    #[test]
    fn test_popularity_thresholds() {
        assert_eq!(popularity_bonus(0), 0);
        assert_eq!(popularity_bonus(5_000), 0);
        assert_eq!(popularity_bonus(5_001), 3);
        assert_eq!(popularity_bonus(10_000), 3);
        assert_eq!(popularity_bonus(10_001), 5);
    }

    #[test]
    fn test_score_is_weight_plus_bonus() {
        let m = Mod::new("1", "Quiet Nights").with_subscriptions(20_000);
        assert_eq!(score(&m, &[]), Category::Gameplay.weight() + 5);
    }

    #[test]
    fn test_priority_rule_overrides_everything() {
        let m = Mod::new("2850232250", "ModControlPanel").with_subscriptions(1_000_000);
        let rules = vec![Rule::priority("2850232250", -4)];
        assert_eq!(score(&m, &rules), -4);
    }

    #[test]
    fn test_first_priority_rule_wins() {
        let m = Mod::new("q", "Quiet Nights");
        let rules = vec![
            Rule::new(RuleType::PlaceBefore, "q", "x"),
            Rule::priority("q", 999),
            Rule::priority("q", 1),
        ];
        assert_eq!(score(&m, &rules), 999);
    }

    #[test]
    fn test_priority_rule_for_other_mod_ignored() {
        let m = Mod::new("q", "Quiet Nights");
        let rules = vec![Rule::priority("other", 999)];
        assert_eq!(score(&m, &rules), 70);
    }

    #[test]
    fn test_explain_matches_score() {
        let m = Mod::new("q", "Better HUD").with_subscriptions(6_000);
        let rules = vec![Rule::priority("q", 999)];

        let plain = explain(&m, &[]);
        assert_eq!(plain.category, Category::UI);
        assert_eq!(plain.category_weight, 30);
        assert_eq!(plain.popularity_bonus, 3);
        assert_eq!(plain.override_priority, None);
        assert_eq!(plain.score, score(&m, &[]));

        let overridden = explain(&m, &rules);
        assert_eq!(overridden.override_priority, Some(999));
        assert_eq!(overridden.score, score(&m, &rules));
    }
}
