//! Per-NPC relationship state.
//!
//! An [`AffinityRecord`] holds five bounded scalars plus the historical sets
//! that gate later dialogue. Scalars are clamped on every write, so a value
//! outside `[STAT_MIN, STAT_MAX]` cannot be observed.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lowest value any relationship stat can hold.
pub const STAT_MIN: i32 = 0;
/// Highest value any relationship stat can hold.
pub const STAT_MAX: i32 = 100;

/// One of the five bounded relationship scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// How much the NPC believes the player.
    Trust,
    /// How much the NPC likes the player.
    Affection,
    /// How angry the NPC is with the player.
    Anger,
    /// How close the NPC has let the player get.
    Intimacy,
    /// How highly the NPC rates the player as a fighter.
    Respect,
}

impl Stat {
    /// All stats, in display order.
    pub const ALL: [Stat; 5] = [
        Stat::Trust,
        Stat::Affection,
        Stat::Anger,
        Stat::Intimacy,
        Stat::Respect,
    ];

    /// Lowercase name of the stat.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trust => "trust",
            Self::Affection => "affection",
            Self::Anger => "anger",
            Self::Intimacy => "intimacy",
            Self::Respect => "respect",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|stat| stat.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownStat(s.to_string()))
    }
}

/// Coarse standing derived from a record, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    /// The NPC actively dislikes the player.
    Hostile,
    /// The NPC keeps the player at arm's length.
    Wary,
    /// No strong feelings either way.
    Neutral,
    /// The NPC is on the player's side.
    Friendly,
    /// The NPC would go to the wall for the player.
    Devoted,
}

impl Tier {
    /// Human-readable tier name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hostile => "Hostile",
            Self::Wary => "Wary",
            Self::Neutral => "Neutral",
            Self::Friendly => "Friendly",
            Self::Devoted => "Devoted",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Relationship state for a single NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityRecord {
    /// Trust, in `[0, 100]`.
    pub trust: i32,
    /// Affection, in `[0, 100]`.
    pub affection: i32,
    /// Anger, in `[0, 100]`.
    pub anger: i32,
    /// Intimacy, in `[0, 100]`.
    pub intimacy: i32,
    /// Respect, in `[0, 100]`.
    pub respect: i32,
    /// When the last conversation was recorded. Never moves backwards.
    #[serde(default)]
    pub last_interaction: Option<DateTime<Utc>>,
    /// Dialogue node ids seen, in first-seen order, without duplicates.
    #[serde(default)]
    pub conversations_had: Vec<String>,
    /// Choice point id to the option selected there. Last write wins.
    #[serde(default)]
    pub choices_made: BTreeMap<String, String>,
    /// Permanent narrative flags, in first-set order, without duplicates.
    #[serde(default)]
    pub memory_events: Vec<String>,
}

impl AffinityRecord {
    /// Create a record with the given scalars (each clamped) and empty history.
    pub fn with_values(trust: i32, affection: i32, anger: i32, intimacy: i32, respect: i32) -> Self {
        Self {
            trust: clamp_stat(trust),
            affection: clamp_stat(affection),
            anger: clamp_stat(anger),
            intimacy: clamp_stat(intimacy),
            respect: clamp_stat(respect),
            last_interaction: None,
            conversations_had: Vec::new(),
            choices_made: BTreeMap::new(),
            memory_events: Vec::new(),
        }
    }

    /// Current value of a stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Trust => self.trust,
            Stat::Affection => self.affection,
            Stat::Anger => self.anger,
            Stat::Intimacy => self.intimacy,
            Stat::Respect => self.respect,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Trust => &mut self.trust,
            Stat::Affection => &mut self.affection,
            Stat::Anger => &mut self.anger,
            Stat::Intimacy => &mut self.intimacy,
            Stat::Respect => &mut self.respect,
        }
    }

    /// Adjust a stat by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> i32 {
        let slot = self.slot_mut(stat);
        *slot = clamp_stat(slot.saturating_add(delta));
        *slot
    }

    /// Pull every scalar back into bounds. Used on records read from storage.
    pub fn clamp_all(&mut self) {
        for stat in Stat::ALL {
            let slot = self.slot_mut(stat);
            *slot = clamp_stat(*slot);
        }
    }

    /// Returns true if the memory event has been recorded.
    pub fn has_memory_event(&self, tag: &str) -> bool {
        self.memory_events.iter().any(|t| t == tag)
    }

    /// Record a memory event. Returns false if it was already present.
    pub fn add_memory_event(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.has_memory_event(&tag) {
            return false;
        }
        self.memory_events.push(tag);
        true
    }

    /// Returns true if the dialogue node has been seen with this NPC.
    pub fn has_had_conversation(&self, node_id: &str) -> bool {
        self.conversations_had.iter().any(|id| id == node_id)
    }

    /// Record that a dialogue node was seen at `now`.
    ///
    /// The node is added at most once. `last_interaction` is bumped to `now`
    /// unless it already holds a later instant. Returns true if the node was
    /// new.
    pub fn mark_conversation(&mut self, node_id: impl Into<String>, now: DateTime<Utc>) -> bool {
        self.last_interaction = Some(match self.last_interaction {
            Some(prev) if prev > now => prev,
            _ => now,
        });
        let node_id = node_id.into();
        if self.has_had_conversation(&node_id) {
            return false;
        }
        self.conversations_had.push(node_id);
        true
    }

    /// Record the option picked at a choice point, replacing any earlier pick.
    pub fn record_choice(&mut self, choice_point: impl Into<String>, option: impl Into<String>) {
        self.choices_made.insert(choice_point.into(), option.into());
    }

    /// The option picked at a choice point, if any.
    pub fn choice_for(&self, choice_point: &str) -> Option<&str> {
        self.choices_made.get(choice_point).map(String::as_str)
    }

    /// Coarse standing from trust and affection, offset by anger.
    pub fn tier(&self) -> Tier {
        let warmth = (self.trust + self.affection) / 2 - self.anger;
        match warmth {
            i32::MIN..=-30 => Tier::Hostile,
            -29..=9 => Tier::Wary,
            10..=39 => Tier::Neutral,
            40..=69 => Tier::Friendly,
            _ => Tier::Devoted,
        }
    }
}

impl Default for AffinityRecord {
    fn default() -> Self {
        Self::with_values(0, 0, 0, 0, 0)
    }
}

fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}
