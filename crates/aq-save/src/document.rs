//! The persisted narrative document.
//!
//! Read whole at session start, written whole after each mutation. A document
//! that fails to parse is discarded and replaced by a fresh one; the caller
//! never sees the failure.

use std::collections::BTreeMap;

use aq_core::{AffinityRecord, NpcId};
use aq_events::{EventEngine, EventTrigger};
use serde::{Deserialize, Serialize};

use crate::error::SaveResult;
use crate::gate::MilestoneGate;

/// Relationships, shown-once gates, and world event state for one save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeDocument {
    relationships: BTreeMap<NpcId, AffinityRecord>,
    /// Tutorials and level milestones already shown.
    #[serde(flatten)]
    pub gate: MilestoneGate,
    /// The running world event, if any.
    #[serde(default)]
    pub active_event: EventEngine,
    /// Win streak and cooldown feeding event rolls.
    #[serde(default)]
    pub event_trigger: EventTrigger,
}

impl Default for NarrativeDocument {
    fn default() -> Self {
        Self {
            relationships: NpcId::ALL
                .into_iter()
                .map(|npc| (npc, npc.initial_record()))
                .collect(),
            gate: MilestoneGate::default(),
            active_event: EventEngine::default(),
            event_trigger: EventTrigger::default(),
        }
    }
}

impl NarrativeDocument {
    /// A fresh document with every NPC at its starting posture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored document, recovering from anything malformed.
    ///
    /// Unparseable input yields a fresh document. Records missing for some
    /// NPC are filled from initial values, and out-of-range scalars are
    /// clamped.
    pub fn from_json(json: &str) -> Self {
        let mut doc = match serde_json::from_str::<Self>(json) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("Discarding malformed narrative document: {}", e);
                return Self::default();
            }
        };
        for npc in NpcId::ALL {
            doc.relationships.entry(npc).or_insert_with(|| {
                tracing::debug!(npc = npc.as_str(), "filling missing affinity record");
                npc.initial_record()
            });
        }
        for record in doc.relationships.values_mut() {
            record.clamp_all();
        }
        doc
    }

    /// Serialize the whole document.
    pub fn to_json(&self) -> SaveResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The record for an NPC.
    pub fn record(&self, npc: NpcId) -> Option<&AffinityRecord> {
        self.relationships.get(&npc)
    }

    /// Mutable access to the record for an NPC, created from initial values
    /// if absent.
    pub fn record_mut(&mut self, npc: NpcId) -> &mut AffinityRecord {
        self.relationships
            .entry(npc)
            .or_insert_with(|| npc.initial_record())
    }

    /// Replace the record for an NPC.
    pub fn replace_record(&mut self, npc: NpcId, record: AffinityRecord) {
        self.relationships.insert(npc, record);
    }

    /// All records, in roster order.
    pub fn relationships(&self) -> impl Iterator<Item = (NpcId, &AffinityRecord)> {
        self.relationships.iter().map(|(npc, r)| (*npc, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_events::EventCatalog;

    #[test]
    fn default_has_every_npc() {
        let doc = NarrativeDocument::new();
        for npc in NpcId::ALL {
            assert_eq!(doc.record(npc), Some(&npc.initial_record()));
        }
        assert!(!doc.active_event.is_active());
        assert_eq!(doc.gate.tutorials().count(), 0);
    }

    #[test]
    fn round_trip_preserves_state() {
        let mut doc = NarrativeDocument::new();
        doc.record_mut(NpcId::Lyra).add_memory_event("saved_lyra");
        doc.gate.mark_shown("tutorial_combat");
        doc.gate.mark_milestone_shown(10);
        let def = EventCatalog::builtin().get("golden_hour").copied().unwrap();
        doc.active_event.activate(&def);

        let json = doc.to_json().unwrap();
        let back = NarrativeDocument::from_json(&json);
        assert_eq!(back, doc);
    }

    #[test]
    fn persisted_shape_uses_documented_keys() {
        let json = NarrativeDocument::new().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["relationships"]["aldric"].is_object());
        assert!(value["tutorialsShown"].is_array());
        assert!(value["levelMilestonesShown"].is_array());
        assert!(value["activeEvent"].is_null());
    }

    #[test]
    fn garbage_resets_to_default() {
        assert_eq!(NarrativeDocument::from_json("{not json"), NarrativeDocument::new());
        assert_eq!(NarrativeDocument::from_json(""), NarrativeDocument::new());
    }

    #[test]
    fn schema_mismatch_resets_to_default() {
        let json = r#"{"relationships":{"aldric":{"trust":"lots"}},"tutorialsShown":[]}"#;
        assert_eq!(NarrativeDocument::from_json(json), NarrativeDocument::new());
    }

    #[test]
    fn missing_npcs_are_filled() {
        let json = r#"{"relationships":{"lyra":{"trust":99,"affection":1,"anger":0,"intimacy":0,"respect":0}}}"#;
        let doc = NarrativeDocument::from_json(json);
        assert_eq!(doc.record(NpcId::Lyra).map(|r| r.trust), Some(99));
        assert_eq!(doc.record(NpcId::Brom), Some(&NpcId::Brom.initial_record()));
    }

    #[test]
    fn out_of_range_scalars_are_clamped_on_load() {
        let json = r#"{"relationships":{"vex":{"trust":400,"affection":-2,"anger":0,"intimacy":0,"respect":0}}}"#;
        let doc = NarrativeDocument::from_json(json);
        let vex = doc.record(NpcId::Vex).unwrap();
        assert_eq!(vex.trust, 100);
        assert_eq!(vex.affection, 0);
    }

    #[test]
    fn replace_record_overwrites() {
        let mut doc = NarrativeDocument::new();
        let record = AffinityRecord::with_values(1, 2, 3, 4, 5);
        doc.replace_record(NpcId::Brom, record.clone());
        assert_eq!(doc.record(NpcId::Brom), Some(&record));
    }
}
