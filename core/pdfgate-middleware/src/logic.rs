//! Conditional-logic evaluation against entry values.

use pdfgate_types::{ConditionalLogic, Entry, LogicType, Operator, Rule};

/// Decides whether a rule set matches an entry.
///
/// Only the rules are evaluated here; the `show`/`hide` action is applied
/// by the caller.
pub trait ConditionalLogicEvaluator: Send + Sync {
    fn matches(&self, logic: &ConditionalLogic, entry: &Entry) -> bool;
}

/// Built-in evaluator for single-value fields.
///
/// Text comparisons are case-insensitive. `>` and `<` compare numerically
/// and never match when either side isn't a number. A missing field
/// compares as the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator;

impl RuleEvaluator {
    fn rule_matches(rule: &Rule, entry: &Entry) -> bool {
        let actual = entry.field_value(&rule.field_id).trim().to_lowercase();
        let expected = rule.value.trim().to_lowercase();

        match rule.operator {
            Operator::Is => actual == expected,
            Operator::IsNot => actual != expected,
            Operator::Contains => !expected.is_empty() && actual.contains(&expected),
            Operator::StartsWith => !expected.is_empty() && actual.starts_with(&expected),
            Operator::EndsWith => !expected.is_empty() && actual.ends_with(&expected),
            Operator::GreaterThan => compare(&actual, &expected, |a, b| a > b),
            Operator::LessThan => compare(&actual, &expected, |a, b| a < b),
        }
    }
}

fn compare(actual: &str, expected: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (actual.parse::<f64>(), expected.parse::<f64>()) {
        (Ok(a), Ok(b)) => op(a, b),
        _ => false,
    }
}

impl ConditionalLogicEvaluator for RuleEvaluator {
    fn matches(&self, logic: &ConditionalLogic, entry: &Entry) -> bool {
        if logic.rules.is_empty() {
            return true;
        }
        match logic.logic_type {
            LogicType::All => logic.rules.iter().all(|r| Self::rule_matches(r, entry)),
            LogicType::Any => logic.rules.iter().any(|r| Self::rule_matches(r, entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pdfgate_types::{EntryId, FormId};

    fn entry() -> Entry {
        Entry::new(EntryId(1), FormId(1), Utc::now())
            .with_field("1", "Jane Doe")
            .with_field("2", "42")
            .with_field("3", "")
    }

    fn eval(rules: Vec<Rule>) -> bool {
        RuleEvaluator.matches(&ConditionalLogic::show_all(rules), &entry())
    }

    #[test]
    fn is_and_isnot() {
        assert!(eval(vec![Rule::new("1", Operator::Is, "jane doe")]));
        assert!(!eval(vec![Rule::new("1", Operator::IsNot, "Jane Doe")]));
        assert!(eval(vec![Rule::new("3", Operator::Is, "")]));
        assert!(eval(vec![Rule::new("missing", Operator::Is, "")]));
        assert!(!eval(vec![Rule::new("missing", Operator::IsNot, "")]));
    }

    #[test]
    fn text_operators() {
        assert!(eval(vec![Rule::new("1", Operator::Contains, "e d")]));
        assert!(eval(vec![Rule::new("1", Operator::StartsWith, "JANE")]));
        assert!(eval(vec![Rule::new("1", Operator::EndsWith, "doe")]));
        assert!(!eval(vec![Rule::new("1", Operator::Contains, "")]));
    }

    #[test]
    fn numeric_operators() {
        assert!(eval(vec![Rule::new("2", Operator::GreaterThan, "41")]));
        assert!(!eval(vec![Rule::new("2", Operator::GreaterThan, "42")]));
        assert!(eval(vec![Rule::new("2", Operator::LessThan, "42.5")]));
        assert!(!eval(vec![Rule::new("1", Operator::GreaterThan, "1")]));
    }

    #[test]
    fn any_vs_all() {
        let rules = vec![
            Rule::new("1", Operator::Is, "nobody"),
            Rule::new("2", Operator::Is, "42"),
        ];
        assert!(!RuleEvaluator.matches(&ConditionalLogic::show_all(rules.clone()), &entry()));
        assert!(RuleEvaluator.matches(&ConditionalLogic::show_any(rules), &entry()));
    }

    #[test]
    fn empty_rules_match() {
        assert!(RuleEvaluator.matches(&ConditionalLogic::show_all(vec![]), &entry()));
        assert!(RuleEvaluator.matches(&ConditionalLogic::show_any(vec![]), &entry()));
    }
}
