//! Win-streak based world event rolls with a post-event cooldown.
//!
//! The engine in [`crate::engine`] only runs events. This module decides when
//! to start one: the chance grows with the player's win streak, and for a
//! fixed number of battles after an event ends it is forced to zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tuning for event rolls.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerConfig {
    /// Consecutive wins needed before any roll can succeed.
    pub min_streak: u32,
    /// Chance at exactly `min_streak` wins.
    pub base_chance: f64,
    /// Extra chance per win beyond `min_streak`.
    pub chance_per_win: f64,
    /// Upper bound on the chance.
    pub max_chance: f64,
    /// Battles after an event ends during which no event can start.
    pub cooldown_battles: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            min_streak: 3,
            base_chance: 0.15,
            chance_per_win: 0.05,
            max_chance: 0.5,
            cooldown_battles: 5,
        }
    }
}

impl TriggerConfig {
    /// Set the streak needed before events can roll.
    pub fn with_min_streak(mut self, streak: u32) -> Self {
        self.min_streak = streak;
        self
    }

    /// Set the base chance (clamped to 0.0-1.0).
    pub fn with_base_chance(mut self, chance: f64) -> Self {
        self.base_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set the chance added per extra win (clamped to 0.0-1.0).
    pub fn with_chance_per_win(mut self, chance: f64) -> Self {
        self.chance_per_win = chance.clamp(0.0, 1.0);
        self
    }

    /// Set the chance ceiling (clamped to 0.0-1.0).
    pub fn with_max_chance(mut self, chance: f64) -> Self {
        self.max_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Set the cooldown length in battles.
    pub fn with_cooldown(mut self, battles: u32) -> Self {
        self.cooldown_battles = battles;
        self
    }
}

/// Streak and cooldown bookkeeping between battles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTrigger {
    win_streak: u32,
    cooldown_remaining: u32,
}

impl EventTrigger {
    /// Fresh bookkeeping: no streak, no cooldown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current consecutive wins.
    pub fn win_streak(&self) -> u32 {
        self.win_streak
    }

    /// Battles left in the cooldown window.
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    /// Whether rolls are currently forced to fail.
    pub fn on_cooldown(&self) -> bool {
        self.cooldown_remaining > 0
    }

    /// Record the outcome of a battle.
    pub fn record_battle(&mut self, won: bool) {
        if won {
            self.win_streak = self.win_streak.saturating_add(1);
        } else {
            self.win_streak = 0;
        }
    }

    /// Spend one battle of cooldown, if any is left.
    pub fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    /// Open a cooldown window. Called when an event ends.
    pub fn start_cooldown(&mut self, config: &TriggerConfig) {
        self.cooldown_remaining = config.cooldown_battles;
    }

    /// The player died: the streak is lost and a cooldown begins.
    pub fn record_death(&mut self, config: &TriggerConfig) {
        self.win_streak = 0;
        self.start_cooldown(config);
    }

    /// Chance that a roll succeeds right now.
    pub fn chance(&self, config: &TriggerConfig) -> f64 {
        if self.on_cooldown() || self.win_streak < config.min_streak {
            return 0.0;
        }
        let extra = f64::from(self.win_streak - config.min_streak) * config.chance_per_win;
        (config.base_chance + extra).min(config.max_chance).clamp(0.0, 1.0)
    }

    /// Roll for an event. On success the streak is consumed.
    pub fn roll<R: Rng + ?Sized>(&mut self, config: &TriggerConfig, rng: &mut R) -> bool {
        let chance = self.chance(config);
        if chance <= 0.0 {
            return false;
        }
        let hit = rng.random_bool(chance);
        tracing::debug!(streak = self.win_streak, chance, hit, "world event roll");
        if hit {
            self.win_streak = 0;
        }
        hit
    }
}
