//! Branching dialogue engine for Arena Quest.
//!
//! A [`DialogueNode`] carries several authored [`Variant`]s of the same line.
//! [`select_variant`] picks the most specific one the current
//! [`AffinityRecord`](aq_core::AffinityRecord) qualifies for, and
//! [`apply_choice`] folds the player's answer back into the record.

/// Static dialogue content.
pub mod catalog;
/// Dialogue nodes, variants, and choices.
pub mod dialogue;
/// Choice effects and the choice applier.
pub mod effect;
/// Static level-milestone narration.
pub mod milestone;
/// Requirement predicates over affinity records.
pub mod requirement;
/// Variant selection by specificity.
pub mod selector;

pub use catalog::DialogueCatalog;
pub use dialogue::{Choice, DialogueNode, Variant};
pub use effect::{Effect, apply_choice};
pub use milestone::{Narration, milestone_narration};
pub use requirement::{Requirement, requirement_matches};
pub use selector::{score_variant, select_variant};
