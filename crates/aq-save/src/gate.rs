//! Shown-once gates for tutorials and level milestones.
//!
//! Tutorials (keyed by dialogue id) and level milestones (keyed by level
//! number) are separate namespaces. A tutorial id is consumed the first time
//! it is checked, whether or not content exists for it. A level is consumed
//! only when narration is actually authored for it, so content added for a
//! level later can still fire.

use std::collections::BTreeSet;

use aq_dialogue::{DialogueCatalog, DialogueNode, Narration, milestone_narration};
use serde::{Deserialize, Serialize};

/// The persisted shown-sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneGate {
    #[serde(default)]
    tutorials_shown: BTreeSet<String>,
    #[serde(default)]
    level_milestones_shown: BTreeSet<u32>,
}

impl MilestoneGate {
    /// A gate with nothing shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a tutorial has been shown.
    pub fn has_been_shown(&self, id: &str) -> bool {
        self.tutorials_shown.contains(id)
    }

    /// Mark a tutorial shown. Returns false if it already was.
    pub fn mark_shown(&mut self, id: impl Into<String>) -> bool {
        self.tutorials_shown.insert(id.into())
    }

    /// Whether a level milestone has been shown.
    pub fn has_milestone_been_shown(&self, level: u32) -> bool {
        self.level_milestones_shown.contains(&level)
    }

    /// Mark a level milestone shown. Returns false if it already was.
    pub fn mark_milestone_shown(&mut self, level: u32) -> bool {
        self.level_milestones_shown.insert(level)
    }

    /// Tutorial ids shown so far.
    pub fn tutorials(&self) -> impl Iterator<Item = &str> {
        self.tutorials_shown.iter().map(String::as_str)
    }

    /// Levels whose milestone has been shown.
    pub fn milestones(&self) -> impl Iterator<Item = u32> + '_ {
        self.level_milestones_shown.iter().copied()
    }

    /// Narration for `level` the first time it is reached.
    ///
    /// Returns `None` without side effects if the level was already shown or
    /// has no authored narration.
    pub fn check_and_trigger_milestone(&mut self, level: u32) -> Option<Narration> {
        if self.has_milestone_been_shown(level) {
            return None;
        }
        let narration = milestone_narration(level)?;
        self.mark_milestone_shown(level);
        Some(narration)
    }

    /// The tutorial node for `id` the first time it is checked.
    ///
    /// The id is marked shown on the first check even if the catalog has no
    /// node for it.
    pub fn check_and_trigger_tutorial<'c>(
        &mut self,
        id: &str,
        catalog: &'c DialogueCatalog,
    ) -> Option<&'c DialogueNode> {
        if !self.mark_shown(id) {
            return None;
        }
        catalog.get(id)
    }
}
