//! World event definitions and the persisted shape of an active event.

use std::fmt;

use aq_core::NpcId;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::effect::{EffectKind, EventEffect};

/// Broad flavor of a world event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Tilts the odds toward the player.
    Blessing,
    /// Tilts the odds toward the arena.
    Curse,
    /// More of everything, on both sides.
    Frenzy,
    /// Richer rewards.
    Bounty,
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blessing => "blessing",
            Self::Curse => "curse",
            Self::Frenzy => "frenzy",
            Self::Bounty => "bounty",
        };
        f.write_str(name)
    }
}

/// A static world event definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefinition {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Display icon.
    pub icon: &'static str,
    /// Flavor category.
    pub category: EventCategory,
    /// How many battles the event lasts.
    pub duration: u32,
    /// Effects in application order.
    pub effects: &'static [EventEffect],
    /// Flavor text.
    pub lore: &'static str,
    /// Who announces the event.
    pub narrator: NpcId,
}

/// A world event that is currently running, as stored in the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveEvent {
    /// Identifier of the definition this came from.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// Flavor category.
    #[serde(rename = "type")]
    pub category: EventCategory,
    /// Effects in application order.
    pub effects: Vec<EventEffect>,
    /// Battles left before the event ends.
    pub duration_remaining: u32,
    /// Flavor text.
    pub lore: String,
    /// Who announced the event.
    pub narrator: NpcId,
}

impl ActiveEvent {
    /// Start a fresh instance of a definition with its full duration.
    pub fn from_definition(def: &EventDefinition) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            icon: def.icon.to_string(),
            category: def.category,
            effects: def.effects.to_vec(),
            duration_remaining: def.duration,
            lore: def.lore.to_string(),
            narrator: def.narrator,
        }
    }
}

const BUILTIN: [EventDefinition; 6] = [
    EventDefinition {
        id: "blood_moon",
        name: "Blood Moon",
        icon: "🩸",
        category: EventCategory::Curse,
        duration: 3,
        effects: &[
            EventEffect::new(EffectKind::EnemyDamage, 25),
            EventEffect::new(EffectKind::SpawnCount, 1),
        ],
        lore: "The moon rises red over the arena and the beasts in the pits smell blood.",
        narrator: NpcId::Malakar,
    },
    EventDefinition {
        id: "golden_hour",
        name: "Golden Hour",
        icon: "💰",
        category: EventCategory::Bounty,
        duration: 3,
        effects: &[EventEffect::new(EffectKind::LootBonus, 50)],
        lore: "The nobles are in the stands tonight, and they throw coin for every kill.",
        narrator: NpcId::Vex,
    },
    EventDefinition {
        id: "fog_of_war",
        name: "Fog of War",
        icon: "🌫️",
        category: EventCategory::Blessing,
        duration: 4,
        effects: &[EventEffect::new(EffectKind::DodgeBonus, 15)],
        lore: "A thick fog rolls off the river. Hard to hit what you cannot see.",
        narrator: NpcId::Lyra,
    },
    EventDefinition {
        id: "berserker_fury",
        name: "Berserker's Fury",
        icon: "🔥",
        category: EventCategory::Frenzy,
        duration: 3,
        effects: &[
            EventEffect::new(EffectKind::RageMultiplier, 50),
            EventEffect::new(EffectKind::EnemyDamage, 10),
        ],
        lore: "The drums never stop. Everyone in the arena fights like they have nothing to lose.",
        narrator: NpcId::Aldric,
    },
    EventDefinition {
        id: "rusted_armor",
        name: "Rusted Armor",
        icon: "🛡️",
        category: EventCategory::Blessing,
        duration: 4,
        effects: &[EventEffect::new(EffectKind::DefenseDebuff, -25)],
        lore: "Someone watered down the armorers' oil. The arena's champions creak as they walk.",
        narrator: NpcId::Brom,
    },
    EventDefinition {
        id: "monster_horde",
        name: "Monster Horde",
        icon: "👹",
        category: EventCategory::Frenzy,
        duration: 2,
        effects: &[
            EventEffect::new(EffectKind::SpawnCount, 2),
            EventEffect::new(EffectKind::LootBonus, 25),
        ],
        lore: "The pit gates jam open. More of them, and more to take off their bodies.",
        narrator: NpcId::Aldric,
    },
];

/// The set of world events that can be triggered.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: Vec<EventDefinition>,
}

impl EventCatalog {
    /// A catalog with the given definitions.
    pub fn new(events: Vec<EventDefinition>) -> Self {
        Self { events }
    }

    /// The events shipped with the game.
    pub fn builtin() -> Self {
        Self::new(BUILTIN.to_vec())
    }

    /// Look up a definition by id.
    pub fn get(&self, id: &str) -> Option<&EventDefinition> {
        self.events.iter().find(|e| e.id == id)
    }

    /// All definitions.
    pub fn all(&self) -> &[EventDefinition] {
        &self.events
    }

    /// Pick a definition uniformly at random. `None` if the catalog is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EventDefinition> {
        if self.events.is_empty() {
            return None;
        }
        self.events.get(rng.random_range(0..self.events.len()))
    }
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builtin_has_six_unique_events() {
        let catalog = EventCatalog::builtin();
        assert_eq!(catalog.all().len(), 6);
        let mut ids: Vec<_> = catalog.all().iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn every_event_has_effects_and_duration() {
        for def in EventCatalog::builtin().all() {
            assert!(def.duration > 0, "{} has no duration", def.id);
            assert!(!def.effects.is_empty(), "{} has no effects", def.id);
        }
    }

    #[test]
    fn lookup() {
        let catalog = EventCatalog::builtin();
        assert_eq!(catalog.get("golden_hour").map(|e| e.duration), Some(3));
        assert!(catalog.get("apocalypse").is_none());
    }

    #[test]
    fn pick_is_deterministic_for_a_seed() {
        let catalog = EventCatalog::builtin();
        let a = catalog.pick(&mut StdRng::seed_from_u64(7)).map(|e| e.id);
        let b = catalog.pick(&mut StdRng::seed_from_u64(7)).map(|e| e.id);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn pick_from_empty_is_none() {
        let catalog = EventCatalog::new(Vec::new());
        assert!(catalog.pick(&mut StdRng::seed_from_u64(1)).is_none());
    }

    #[test]
    fn active_event_persisted_shape() {
        let def = EventCatalog::builtin().get("blood_moon").copied().unwrap();
        let active = ActiveEvent::from_definition(&def);
        let json = serde_json::to_value(&active).unwrap();
        assert_eq!(json["type"], "curse");
        assert_eq!(json["durationRemaining"], 3);
        assert_eq!(json["narrator"], "malakar");
        assert_eq!(json["effects"][0]["type"], "enemyDamage");
        let back: ActiveEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, active);
    }
}
