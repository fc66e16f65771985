//! The active-event state machine.
//!
//! Two states: inactive, or one [`ActiveEvent`] with a remaining battle
//! count. Activation comes from outside (see [`crate::trigger`]); the engine
//! only counts down and ends events.

use serde::{Deserialize, Serialize};

use crate::catalog::{ActiveEvent, EventDefinition};
use crate::effect::EffectSet;

/// Result of a battle-completed tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTick {
    /// No event was active.
    Idle,
    /// The event is still running with this many battles left.
    Continued {
        /// Battles left.
        remaining: u32,
    },
    /// The event ran out and is no longer active.
    Expired(ActiveEvent),
}

/// Holds zero or one active world event.
///
/// Serializes as the event itself, or `null` when inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventEngine {
    active: Option<ActiveEvent>,
}

impl EventEngine {
    /// An engine with no active event.
    pub fn new() -> Self {
        Self::default()
    }

    /// The running event, if any.
    pub fn active(&self) -> Option<&ActiveEvent> {
        self.active.as_ref()
    }

    /// Whether an event is running.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start an event with its full duration, replacing any running one.
    pub fn activate(&mut self, def: &EventDefinition) -> &ActiveEvent {
        if let Some(prev) = &self.active {
            tracing::debug!(replaced = %prev.id, "world event replaced before expiry");
        }
        tracing::debug!(event = def.id, duration = def.duration, "world event started");
        self.active.insert(ActiveEvent::from_definition(def))
    }

    /// Count one completed battle against the running event.
    pub fn tick(&mut self) -> EventTick {
        let Some(event) = self.active.as_mut() else {
            return EventTick::Idle;
        };
        event.duration_remaining = event.duration_remaining.saturating_sub(1);
        if event.duration_remaining > 0 {
            return EventTick::Continued {
                remaining: event.duration_remaining,
            };
        }
        match self.active.take() {
            Some(expired) => {
                tracing::debug!(event = %expired.id, "world event expired");
                EventTick::Expired(expired)
            }
            None => EventTick::Idle,
        }
    }

    /// End the running event immediately, whatever its remaining count.
    ///
    /// Called when the player dies. Returns the event that was ended.
    pub fn player_died(&mut self) -> Option<ActiveEvent> {
        let ended = self.active.take();
        if let Some(event) = &ended {
            tracing::debug!(
                event = %event.id,
                remaining = event.duration_remaining,
                "world event ended by player death"
            );
        }
        ended
    }

    /// Effects of the running event, or an empty set.
    pub fn current_effects(&self) -> EffectSet {
        self.active
            .as_ref()
            .map(|e| e.effects.iter().copied().collect())
            .unwrap_or_default()
    }
}
