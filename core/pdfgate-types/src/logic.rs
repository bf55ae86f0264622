//! Conditional-logic rule sets.
//!
//! Field names follow the host's stored JSON (`actionType`, `logicType`,
//! `fieldId`) so existing form exports deserialize unchanged.

use serde::{Deserialize, Serialize};

/// What to do when the rules match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Show,
    Hide,
}

/// How individual rule results combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicType {
    #[default]
    All,
    Any,
}

/// Comparison applied between an entry value and a rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "isnot")]
    IsNot,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "ends_with")]
    EndsWith,
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub field_id: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl Rule {
    #[must_use]
    pub fn new(field_id: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }
}

/// A rule set deciding whether a PDF applies to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalLogic {
    #[serde(default)]
    pub action_type: ActionType,
    #[serde(default)]
    pub logic_type: LogicType,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl ConditionalLogic {
    /// A `show` rule set combining rules with `all`.
    #[must_use]
    pub fn show_all(rules: Vec<Rule>) -> Self {
        Self {
            action_type: ActionType::Show,
            logic_type: LogicType::All,
            rules,
        }
    }

    /// A `show` rule set combining rules with `any`.
    #[must_use]
    pub fn show_any(rules: Vec<Rule>) -> Self {
        Self {
            action_type: ActionType::Show,
            logic_type: LogicType::Any,
            rules,
        }
    }

    #[must_use]
    pub fn with_action(mut self, action_type: ActionType) -> Self {
        self.action_type = action_type;
        self
    }
}
