//! Timed world events for Arena Quest.
//!
//! At most one event is active at a time. It counts down once per completed
//! battle and ends early if the player dies. While active, its effects feed
//! the combat formulas in [`adjust`].

pub mod adjust;
pub mod catalog;
pub mod effect;
pub mod engine;
pub mod trigger;

pub use adjust::{
    adjust, apply_additive, apply_percentage, calculate_dodge, calculate_enemy_damage,
    calculate_enemy_defense, calculate_enemy_spawn, calculate_loot, calculate_rage,
};
pub use catalog::{ActiveEvent, EventCatalog, EventCategory, EventDefinition};
pub use effect::{Application, EffectKind, EffectSet, EventEffect};
pub use engine::{EventEngine, EventTick};
pub use trigger::{EventTrigger, TriggerConfig};
