use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityRecord;
use crate::error::CoreError;

/// One of the named characters whose relationship with the player is tracked.
///
/// The roster is fixed at compile time. Every lookup keyed by NPC is a `match`
/// over this enum, so adding a character forces every table to be updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpcId {
    /// The arena master who books the player's fights.
    Aldric,
    /// The healer at the infirmary behind the arena.
    Lyra,
    /// The blacksmith who repairs the player's gear.
    Brom,
    /// The fence who trades in loot no one asks about.
    Vex,
    /// The warlord who owns the arena. Tracked through the same record shape.
    Malakar,
}

impl NpcId {
    /// Every tracked NPC, in roster order.
    pub const ALL: [NpcId; 5] = [
        NpcId::Aldric,
        NpcId::Lyra,
        NpcId::Brom,
        NpcId::Vex,
        NpcId::Malakar,
    ];

    /// The stable identifier used in persisted documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aldric => "aldric",
            Self::Lyra => "lyra",
            Self::Brom => "brom",
            Self::Vex => "vex",
            Self::Malakar => "malakar",
        }
    }

    /// The name shown to the player.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Aldric => "Aldric",
            Self::Lyra => "Lyra",
            Self::Brom => "Brom",
            Self::Vex => "Vex",
            Self::Malakar => "Malakar",
        }
    }

    /// A short epithet for status displays.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Aldric => "the Arena Master",
            Self::Lyra => "the Healer",
            Self::Brom => "the Smith",
            Self::Vex => "the Fence",
            Self::Malakar => "the Warlord",
        }
    }

    /// Returns true for the antagonist.
    pub fn is_antagonist(&self) -> bool {
        matches!(self, Self::Malakar)
    }

    /// The hand-authored starting posture for this character.
    ///
    /// Values are `(trust, affection, anger, intimacy, respect)`.
    pub fn initial_record(&self) -> AffinityRecord {
        match self {
            Self::Aldric => AffinityRecord::with_values(40, 20, 10, 0, 30),
            Self::Lyra => AffinityRecord::with_values(50, 30, 0, 5, 20),
            Self::Brom => AffinityRecord::with_values(30, 15, 5, 0, 40),
            Self::Vex => AffinityRecord::with_values(10, 10, 20, 0, 10),
            Self::Malakar => AffinityRecord::with_values(0, 0, 60, 0, 15),
        }
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for NpcId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|npc| npc.as_str() == lower)
            .ok_or_else(|| CoreError::UnknownNpc(s.to_string()))
    }
}
