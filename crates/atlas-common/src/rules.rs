//! Threshold color rules and ordered first-match evaluation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;

/// Comparison operator for a threshold rule.
///
/// Closed set: the evaluator is exhaustive over these variants, so an
/// unmatchable operator cannot exist at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    /// Exact numeric equality, no tolerance.
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = ">")]
    Gt,
}

impl CompareOp {
    /// Compare a value against a threshold.
    pub fn matches(&self, value: f64, threshold: f64) -> bool {
        match self {
            CompareOp::Lt => value < threshold,
            CompareOp::Le => value <= threshold,
            CompareOp::Eq => value == threshold,
            CompareOp::Ge => value >= threshold,
            CompareOp::Gt => value > threshold,
        }
    }
}

/// One threshold comparison mapping a value range to a display color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRule {
    pub id: Uuid,
    pub op: CompareOp,
    pub value: f64,
    pub color: Color,
    pub label: String,
}

impl ColorRule {
    pub fn new(op: CompareOp, value: f64, color: Color, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            op,
            value,
            color,
            label: label.into(),
        }
    }

    /// Check whether this rule matches the given value.
    pub fn matches(&self, value: f64) -> bool {
        self.op.matches(value, self.value)
    }
}

/// Walk rules in stored order and return the first that matches.
///
/// Rule order is semantically significant: the first match wins even when
/// a later rule would also match.
pub fn first_match(value: f64, rules: &[ColorRule]) -> Option<&ColorRule> {
    rules.iter().find(|rule| rule.matches(value))
}
