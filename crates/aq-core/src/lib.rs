//! Core narrative types for Arena Quest.
//!
//! Defines the closed set of tracked NPCs and the per-NPC affinity record
//! that the dialogue engine reads and the choice applier writes. Nothing in
//! this crate touches storage; see `aq-save` for the persisted document.

/// Affinity records and the relationship stats they carry.
pub mod affinity;
/// Error types used throughout the crate.
pub mod error;
/// The fixed NPC roster and each character's starting posture.
pub mod npc;

/// Re-export affinity types.
pub use affinity::{AffinityRecord, STAT_MAX, STAT_MIN, Stat, Tier};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the NPC identifier.
pub use npc::NpcId;
