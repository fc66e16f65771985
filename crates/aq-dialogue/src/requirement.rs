//! Requirement predicates for variants and choices.

use aq_core::AffinityRecord;
use serde::{Deserialize, Serialize};

/// A conjunction of threshold and flag clauses over an affinity record.
///
/// Every clause is optional. Absent clauses are not evaluated, so the
/// default requirement (no clauses) matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Requirement {
    /// Trust must be at least this.
    pub min_trust: Option<i32>,
    /// Trust must be at most this.
    pub max_trust: Option<i32>,
    /// Affection must be at least this.
    pub min_affection: Option<i32>,
    /// Affection must be at most this.
    pub max_affection: Option<i32>,
    /// Intimacy must be at least this.
    pub min_intimacy: Option<i32>,
    /// Intimacy must be at most this.
    pub max_intimacy: Option<i32>,
    /// This memory event must have been recorded.
    pub memory_event: Option<String>,
}

impl Requirement {
    /// Create a requirement with no clauses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require trust of at least `value`.
    pub fn min_trust(mut self, value: i32) -> Self {
        self.min_trust = Some(value);
        self
    }

    /// Require trust of at most `value`.
    pub fn max_trust(mut self, value: i32) -> Self {
        self.max_trust = Some(value);
        self
    }

    /// Require affection of at least `value`.
    pub fn min_affection(mut self, value: i32) -> Self {
        self.min_affection = Some(value);
        self
    }

    /// Require affection of at most `value`.
    pub fn max_affection(mut self, value: i32) -> Self {
        self.max_affection = Some(value);
        self
    }

    /// Require intimacy of at least `value`.
    pub fn min_intimacy(mut self, value: i32) -> Self {
        self.min_intimacy = Some(value);
        self
    }

    /// Require intimacy of at most `value`.
    pub fn max_intimacy(mut self, value: i32) -> Self {
        self.max_intimacy = Some(value);
        self
    }

    /// Require a memory event.
    pub fn memory_event(mut self, tag: impl Into<String>) -> Self {
        self.memory_event = Some(tag.into());
        self
    }

    /// Returns true if either trust bound is present.
    pub fn has_trust_range(&self) -> bool {
        self.min_trust.is_some() || self.max_trust.is_some()
    }

    /// Returns true if either affection bound is present.
    pub fn has_affection_range(&self) -> bool {
        self.min_affection.is_some() || self.max_affection.is_some()
    }

    /// Evaluate every present clause against the record.
    pub fn matches(&self, record: &AffinityRecord) -> bool {
        at_least(record.trust, self.min_trust)
            && at_most(record.trust, self.max_trust)
            && at_least(record.affection, self.min_affection)
            && at_most(record.affection, self.max_affection)
            && at_least(record.intimacy, self.min_intimacy)
            && at_most(record.intimacy, self.max_intimacy)
            && self
                .memory_event
                .as_deref()
                .is_none_or(|tag| record.has_memory_event(tag))
    }
}

/// Evaluate an optional requirement. A missing requirement always matches.
pub fn requirement_matches(requirement: Option<&Requirement>, record: &AffinityRecord) -> bool {
    requirement.is_none_or(|r| r.matches(record))
}

fn at_least(value: i32, min: Option<i32>) -> bool {
    min.is_none_or(|min| value >= min)
}

fn at_most(value: i32, max: Option<i32>) -> bool {
    max.is_none_or(|max| value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(trust: i32, affection: i32, intimacy: i32) -> AffinityRecord {
        AffinityRecord::with_values(trust, affection, 0, intimacy, 0)
    }

    #[test]
    fn no_clauses_always_match() {
        assert!(Requirement::new().matches(&record(0, 0, 0)));
        assert!(requirement_matches(None, &record(0, 0, 0)));
    }

    #[test]
    fn min_bound_is_inclusive() {
        let req = Requirement::new().min_trust(50);
        assert!(req.matches(&record(50, 0, 0)));
        assert!(!req.matches(&record(49, 0, 0)));
    }

    #[test]
    fn max_bound_is_inclusive() {
        let req = Requirement::new().max_affection(20);
        assert!(req.matches(&record(0, 20, 0)));
        assert!(!req.matches(&record(0, 21, 0)));
    }

    #[test]
    fn all_clauses_must_hold() {
        let req = Requirement::new()
            .min_trust(30)
            .max_trust(70)
            .min_intimacy(10);
        assert!(req.matches(&record(50, 0, 10)));
        assert!(!req.matches(&record(50, 0, 9)));
        assert!(!req.matches(&record(71, 0, 10)));
    }

    #[test]
    fn memory_event_clause() {
        let req = Requirement::new().memory_event("won_first_bout");
        let mut r = record(0, 0, 0);
        assert!(!req.matches(&r));
        r.add_memory_event("won_first_bout");
        assert!(req.matches(&r));
    }

    #[test]
    fn range_presence() {
        let req = Requirement::new().max_trust(10);
        assert!(req.has_trust_range());
        assert!(!req.has_affection_range());
    }

    #[test]
    fn deserializes_with_missing_clauses() {
        let req: Requirement = serde_json::from_str(r#"{"minTrust":40}"#).unwrap();
        assert_eq!(req, Requirement::new().min_trust(40));
    }
}
