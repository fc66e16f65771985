//! Named numeric effects carried by world events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a world event effect perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    /// Percentage bonus to enemy damage.
    EnemyDamage,
    /// Flat change to the number of enemies spawned.
    SpawnCount,
    /// Percentage bonus to loot.
    LootBonus,
    /// Flat change to the player's dodge chance, in points.
    DodgeBonus,
    /// Percentage bonus to rage gained.
    RageMultiplier,
    /// Percentage change to enemy defense. Authored negative.
    DefenseDebuff,
}

/// How an effect value combines with a base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Application {
    /// `ceil(base * (1 + value / 100))`.
    Percentage,
    /// `max(floor, base + value)`.
    Additive {
        /// Lowest result allowed.
        floor: i64,
    },
}

impl EffectKind {
    /// How this kind is applied to a base value.
    pub fn application(&self) -> Application {
        match self {
            Self::EnemyDamage | Self::LootBonus | Self::RageMultiplier | Self::DefenseDebuff => {
                Application::Percentage
            }
            Self::SpawnCount => Application::Additive { floor: 1 },
            Self::DodgeBonus => Application::Additive { floor: 0 },
        }
    }

    /// The camelCase name used in saves.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnemyDamage => "enemyDamage",
            Self::SpawnCount => "spawnCount",
            Self::LootBonus => "lootBonus",
            Self::DodgeBonus => "dodgeBonus",
            Self::RageMultiplier => "rageMultiplier",
            Self::DefenseDebuff => "defenseDebuff",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single effect: a kind and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEffect {
    /// What is perturbed.
    #[serde(rename = "type")]
    pub kind: EffectKind,
    /// Percentage or flat points, depending on the kind.
    pub value: i32,
}

impl EventEffect {
    /// Create an effect.
    pub const fn new(kind: EffectKind, value: i32) -> Self {
        Self { kind, value }
    }
}

impl fmt::Display for EventEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.application() {
            Application::Percentage => write!(f, "{} {:+}%", self.kind, self.value),
            Application::Additive { .. } => write!(f, "{} {:+}", self.kind, self.value),
        }
    }
}

/// The effects currently in force, in enumeration order.
///
/// Order matters: stacked effects of the same kind are applied one after the
/// other, and rounding after each step makes the result order-dependent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectSet {
    effects: Vec<EventEffect>,
}

impl EffectSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of every effect of `kind`, in order.
    pub fn values(&self, kind: EffectKind) -> impl Iterator<Item = i32> + '_ {
        self.effects
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.value)
    }

    /// Value of the first effect of `kind`, if any.
    pub fn get(&self, kind: EffectKind) -> Option<i32> {
        self.values(kind).next()
    }

    /// All effects, in order.
    pub fn iter(&self) -> impl Iterator<Item = &EventEffect> {
        self.effects.iter()
    }

    /// Number of effects.
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether no effect is in force.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl FromIterator<EventEffect> for EffectSet {
    fn from_iter<I: IntoIterator<Item = EventEffect>>(iter: I) -> Self {
        Self {
            effects: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applications() {
        assert_eq!(EffectKind::LootBonus.application(), Application::Percentage);
        assert_eq!(
            EffectKind::SpawnCount.application(),
            Application::Additive { floor: 1 }
        );
        assert_eq!(
            EffectKind::DodgeBonus.application(),
            Application::Additive { floor: 0 }
        );
    }

    #[test]
    fn effect_serializes_with_type_key() {
        let json = serde_json::to_string(&EventEffect::new(EffectKind::EnemyDamage, 20)).unwrap();
        assert_eq!(json, r#"{"type":"enemyDamage","value":20}"#);
    }

    #[test]
    fn set_lookup_keeps_order() {
        let set: EffectSet = [
            EventEffect::new(EffectKind::LootBonus, 50),
            EventEffect::new(EffectKind::SpawnCount, 1),
            EventEffect::new(EffectKind::LootBonus, 25),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.get(EffectKind::LootBonus), Some(50));
        assert_eq!(set.values(EffectKind::LootBonus).collect::<Vec<_>>(), vec![50, 25]);
        assert_eq!(set.get(EffectKind::DodgeBonus), None);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display() {
        assert_eq!(EventEffect::new(EffectKind::LootBonus, 50).to_string(), "lootBonus +50%");
        assert_eq!(EventEffect::new(EffectKind::SpawnCount, -1).to_string(), "spawnCount -1");
    }
}
