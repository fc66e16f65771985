//! Choice effects and how they fold into an affinity record.

use aq_core::{AffinityRecord, Stat};
use serde::{Deserialize, Serialize};

/// Signed stat deltas plus an optional memory event, applied when a choice is
/// picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    /// Change to trust.
    pub trust: Option<i32>,
    /// Change to affection.
    pub affection: Option<i32>,
    /// Change to anger.
    pub anger: Option<i32>,
    /// Change to intimacy.
    pub intimacy: Option<i32>,
    /// Change to respect. Authored content may carry it, but
    /// [`apply_choice`] does not apply it.
    pub respect: Option<i32>,
    /// Memory event to record.
    pub memory_event: Option<String>,
}

impl Effect {
    /// An effect that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delta for one stat.
    pub fn with(mut self, stat: Stat, delta: i32) -> Self {
        *self.slot_mut(stat) = Some(delta);
        self
    }

    /// Set the memory event to record.
    pub fn with_memory_event(mut self, tag: impl Into<String>) -> Self {
        self.memory_event = Some(tag.into());
        self
    }

    /// The authored delta for a stat, if any.
    pub fn delta(&self, stat: Stat) -> Option<i32> {
        match stat {
            Stat::Trust => self.trust,
            Stat::Affection => self.affection,
            Stat::Anger => self.anger,
            Stat::Intimacy => self.intimacy,
            Stat::Respect => self.respect,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut Option<i32> {
        match stat {
            Stat::Trust => &mut self.trust,
            Stat::Affection => &mut self.affection,
            Stat::Anger => &mut self.anger,
            Stat::Intimacy => &mut self.intimacy,
            Stat::Respect => &mut self.respect,
        }
    }
}

/// Stats the choice applier writes. Respect is excluded.
const APPLIED_STATS: [Stat; 4] = [Stat::Trust, Stat::Affection, Stat::Anger, Stat::Intimacy];

/// Apply a picked choice to a copy of `record` and return the copy.
///
/// Each present, non-zero delta is added and clamped to `[0, 100]`. A delta
/// of zero is skipped exactly like a missing one. The memory event, if any,
/// is recorded once. `choices_made[choice_point]` is set to `choice_id`,
/// overwriting an earlier pick at the same point.
pub fn apply_choice(
    record: &AffinityRecord,
    choice_point: &str,
    choice_id: &str,
    effect: &Effect,
) -> AffinityRecord {
    let mut next = record.clone();
    for stat in APPLIED_STATS {
        if let Some(delta) = effect.delta(stat).filter(|d| *d != 0) {
            next.adjust(stat, delta);
        }
    }
    if let Some(tag) = &effect.memory_event {
        next.add_memory_event(tag.as_str());
    }
    next.record_choice(choice_point, choice_id);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> AffinityRecord {
        AffinityRecord::with_values(50, 50, 50, 50, 50)
    }

    #[test]
    fn applies_deltas_to_a_copy() {
        let r = base();
        let effect = Effect::new().with(Stat::Trust, 10).with(Stat::Anger, -20);
        let next = apply_choice(&r, "intro", "polite", &effect);
        assert_eq!(next.trust, 60);
        assert_eq!(next.anger, 30);
        assert_eq!(next.affection, 50);
        assert_eq!(r.trust, 50);
    }

    #[test]
    fn clamps_instead_of_rejecting() {
        let effect = Effect::new()
            .with(Stat::Trust, 500)
            .with(Stat::Intimacy, -500);
        let next = apply_choice(&base(), "intro", "wild", &effect);
        assert_eq!(next.trust, 100);
        assert_eq!(next.intimacy, 0);
    }

    #[test]
    fn respect_is_not_applied() {
        let effect = Effect::new().with(Stat::Respect, 25);
        let next = apply_choice(&base(), "intro", "boast", &effect);
        assert_eq!(next.respect, 50);
    }

    #[test]
    fn zero_delta_is_skipped() {
        let mut r = base();
        r.trust = 100;
        let effect = Effect::new().with(Stat::Trust, 0);
        let next = apply_choice(&r, "intro", "shrug", &effect);
        assert_eq!(next.trust, 100);
        assert_eq!(effect.delta(Stat::Trust), Some(0));
    }

    #[test]
    fn memory_event_added_once() {
        let effect = Effect::new().with_memory_event("shared_a_drink");
        let once = apply_choice(&base(), "tavern", "drink", &effect);
        let twice = apply_choice(&once, "tavern", "drink", &effect);
        assert_eq!(twice.memory_events, vec!["shared_a_drink".to_string()]);
    }

    #[test]
    fn choice_recorded_last_write_wins() {
        let first = apply_choice(&base(), "intro", "polite", &Effect::new());
        let second = apply_choice(&first, "intro", "rude", &Effect::new());
        assert_eq!(second.choice_for("intro"), Some("rude"));
        assert_eq!(second.choices_made.len(), 1);
    }

    proptest! {
        #[test]
        fn scalars_stay_in_bounds(
            trust in 0..=100i32,
            affection in 0..=100i32,
            anger in 0..=100i32,
            intimacy in 0..=100i32,
            dt in -1000..=1000i32,
            da in -1000..=1000i32,
            dg in -1000..=1000i32,
            di in -1000..=1000i32,
        ) {
            let r = AffinityRecord::with_values(trust, affection, anger, intimacy, 0);
            let effect = Effect::new()
                .with(Stat::Trust, dt)
                .with(Stat::Affection, da)
                .with(Stat::Anger, dg)
                .with(Stat::Intimacy, di);
            let next = apply_choice(&r, "p", "c", &effect);
            for stat in APPLIED_STATS {
                prop_assert!((0..=100).contains(&next.get(stat)));
            }
        }
    }
}
