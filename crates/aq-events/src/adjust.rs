//! Combat formula adjustments driven by world event effects.
//!
//! Percentage effects scale a base value and round up. Additive effects add
//! a flat amount and respect a floor: 1 for spawn counts, 0 for dodge points.
//! Several effects of the same kind are applied one at a time, in the order
//! the set lists them, with rounding after each step.

use crate::effect::{Application, EffectKind, EffectSet};

/// `ceil(base * (1 + percent / 100))`, computed exactly in integers.
pub fn apply_percentage(base: i64, percent: i32) -> i64 {
    let scaled = base.saturating_mul(100 + i64::from(percent));
    if scaled >= 0 {
        scaled.saturating_add(99) / 100
    } else {
        // Integer division truncates toward zero, which is the ceiling here.
        scaled / 100
    }
}

/// `max(floor, base + delta)`.
pub fn apply_additive(base: i64, delta: i32, floor: i64) -> i64 {
    base.saturating_add(i64::from(delta)).max(floor)
}

/// Number of enemies to spawn: `max(1, base + delta)`.
pub fn calculate_enemy_spawn(base: i64, delta: i32) -> i64 {
    apply_additive(base, delta, 1)
}

/// Apply every effect of `kind` in `effects` to `base`, one after another.
pub fn adjust(base: i64, kind: EffectKind, effects: &EffectSet) -> i64 {
    effects.values(kind).fold(base, |value, effect| match kind.application() {
        Application::Percentage => apply_percentage(value, effect),
        Application::Additive { floor } => apply_additive(value, effect, floor),
    })
}

/// Enemy damage after event bonuses.
pub fn calculate_enemy_damage(base: i64, effects: &EffectSet) -> i64 {
    adjust(base, EffectKind::EnemyDamage, effects)
}

/// Loot after event bonuses.
pub fn calculate_loot(base: i64, effects: &EffectSet) -> i64 {
    adjust(base, EffectKind::LootBonus, effects)
}

/// Player dodge chance in points after event bonuses. Never below zero.
pub fn calculate_dodge(base: i64, effects: &EffectSet) -> i64 {
    adjust(base, EffectKind::DodgeBonus, effects)
}

/// Rage gained after event multipliers.
pub fn calculate_rage(base: i64, effects: &EffectSet) -> i64 {
    adjust(base, EffectKind::RageMultiplier, effects)
}

/// Enemy defense after event debuffs.
pub fn calculate_enemy_defense(base: i64, effects: &EffectSet) -> i64 {
    adjust(base, EffectKind::DefenseDebuff, effects)
}
