//! Narrative session orchestration.
//!
//! `NarrativeSession` owns the one live [`NarrativeDocument`] for a save and
//! is the only place it is mutated. Every mutating call changes the in-memory
//! document first and then writes the whole document back. A failed write is
//! logged and not retried; the in-memory document stays authoritative and the
//! next successful write catches storage up.

use aq_core::{AffinityRecord, NpcId};
use aq_dialogue::{DialogueCatalog, DialogueNode, Narration, apply_choice, select_variant};
use aq_events::{ActiveEvent, EffectSet, EventCatalog, EventTick};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SessionConfig;
use crate::document::NarrativeDocument;
use crate::error::SaveResult;
use crate::storage::Storage;

/// A choice offered to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Choice id, passed back to [`NarrativeSession::choose`].
    pub id: String,
    /// Text shown to the player.
    pub text: String,
}

/// A resolved line of dialogue, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    /// The node this line came from.
    pub node_id: String,
    /// Who says it.
    pub npc: NpcId,
    /// The selected variant's text.
    pub text: String,
    /// The selected variant's flavor text.
    pub context: Option<String>,
    /// Choices the player currently qualifies for.
    pub choices: Vec<ChoiceOption>,
}

impl DialogueLine {
    fn resolve(node: &DialogueNode, record: &AffinityRecord) -> Self {
        let variant = select_variant(node, record);
        Self {
            node_id: node.id.clone(),
            npc: node.npc,
            text: variant.text.clone(),
            context: variant.context.clone(),
            choices: node
                .available_choices(record)
                .into_iter()
                .map(|c| ChoiceOption {
                    id: c.id.clone(),
                    text: c.text.clone(),
                })
                .collect(),
        }
    }
}

/// What happened to world events after a battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    /// Effect of the battle on the event that was running.
    pub tick: EventTick,
    /// A new event started by this battle's roll.
    pub started: Option<ActiveEvent>,
    /// Win streak after this battle.
    pub win_streak: u32,
}

/// A live narrative session over one save.
pub struct NarrativeSession<S: Storage> {
    document: NarrativeDocument,
    storage: S,
    config: SessionConfig,
    dialogue: DialogueCatalog,
    events: EventCatalog,
    rng: StdRng,
    unsaved: bool,
}

impl<S: Storage> NarrativeSession<S> {
    /// Open the save in `storage`, or start fresh if there is none.
    ///
    /// A stored document that cannot be read or parsed is replaced by a fresh
    /// one. Opening never fails.
    pub fn open(storage: S, config: SessionConfig) -> Self {
        let document = match storage.load(&config.storage_key) {
            Ok(Some(json)) => NarrativeDocument::from_json(&json),
            Ok(None) => {
                tracing::debug!(key = %config.storage_key, "no narrative save found, starting fresh");
                NarrativeDocument::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read narrative save, starting fresh: {}", e);
                NarrativeDocument::new()
            }
        };
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            document,
            storage,
            config,
            dialogue: DialogueCatalog::builtin(),
            events: EventCatalog::builtin(),
            rng,
            unsaved: false,
        }
    }

    /// Use a different dialogue catalog.
    pub fn with_dialogue(mut self, catalog: DialogueCatalog) -> Self {
        self.dialogue = catalog;
        self
    }

    /// Use a different world event catalog.
    pub fn with_events(mut self, catalog: EventCatalog) -> Self {
        self.events = catalog;
        self
    }

    /// The live document.
    pub fn document(&self) -> &NarrativeDocument {
        &self.document
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The dialogue catalog in use.
    pub fn dialogue(&self) -> &DialogueCatalog {
        &self.dialogue
    }

    /// The world event catalog in use.
    pub fn events(&self) -> &EventCatalog {
        &self.events
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether the last write to storage failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// The relationship record for an NPC.
    pub fn record(&self, npc: NpcId) -> Option<&AffinityRecord> {
        self.document.record(npc)
    }

    /// Write the whole document to storage.
    pub fn save(&mut self) -> SaveResult<()> {
        let json = self.document.to_json()?;
        self.storage.save(&self.config.storage_key, &json)?;
        tracing::debug!(key = %self.config.storage_key, bytes = json.len(), "narrative document saved");
        Ok(())
    }

    /// Save, logging instead of returning a failure.
    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                tracing::error!("Failed to save narrative document: {}", e);
                self.unsaved = true;
            }
        }
    }

    /// Record that the player saw a dialogue node with an NPC.
    pub fn mark_conversation_seen(&mut self, npc: NpcId, node_id: &str) {
        self.document
            .record_mut(npc)
            .mark_conversation(node_id, Utc::now());
        self.persist();
    }

    /// Resolve one of `npc`'s dialogue nodes against their current record.
    ///
    /// The node is recorded as seen. Returns `None` if the node does not
    /// exist or belongs to someone else.
    pub fn talk(&mut self, npc: NpcId, node_id: &str) -> Option<DialogueLine> {
        let node = self.dialogue.get(node_id).filter(|n| n.npc == npc)?;
        let record = self.document.record_mut(npc);
        record.mark_conversation(node_id, Utc::now());
        let line = DialogueLine::resolve(node, record);
        self.persist();
        Some(line)
    }

    /// Apply the player's choice at a dialogue node.
    ///
    /// Returns the updated record, or `None` if the node or choice does not
    /// exist or the choice is not currently offered.
    pub fn choose(&mut self, node_id: &str, choice_id: &str) -> Option<&AffinityRecord> {
        let node = self.dialogue.get(node_id)?;
        let choice = node.choice(choice_id)?;
        let npc = node.npc;
        let current = self.document.record(npc)?;
        if !node
            .available_choices(current)
            .iter()
            .any(|c| c.id == choice.id)
        {
            tracing::debug!(node = node_id, choice = choice_id, "choice not offered");
            return None;
        }
        let updated = apply_choice(current, node_id, choice_id, &choice.effect);
        self.document.replace_record(npc, updated);
        self.persist();
        self.document.record(npc)
    }

    /// Advance world event state after a battle.
    ///
    /// The running event counts down. If none is running, a won battle may
    /// roll a new one; an event that just expired opens a cooldown instead.
    pub fn battle_completed(&mut self, won: bool) -> BattleReport {
        let trigger_config = &self.config.trigger;
        let tick = self.document.active_event.tick();
        let trigger = &mut self.document.event_trigger;
        trigger.record_battle(won);

        let mut started = None;
        if let EventTick::Expired(_) = &tick {
            trigger.start_cooldown(trigger_config);
        } else if !self.document.active_event.is_active() {
            if won
                && trigger.roll(trigger_config, &mut self.rng)
                && let Some(def) = self.events.pick(&mut self.rng)
            {
                started = Some(self.document.active_event.activate(def).clone());
            }
            trigger.tick_cooldown();
        }

        let report = BattleReport {
            tick,
            started,
            win_streak: self.document.event_trigger.win_streak(),
        };
        self.persist();
        report
    }

    /// The player died: end any running event and reset the streak.
    pub fn player_died(&mut self) -> Option<ActiveEvent> {
        let ended = self.document.active_event.player_died();
        self.document
            .event_trigger
            .record_death(&self.config.trigger);
        self.persist();
        ended
    }

    /// Start a world event by id, replacing any running one.
    ///
    /// Returns `None` if the id is not in the catalog.
    pub fn start_event(&mut self, event_id: &str) -> Option<&ActiveEvent> {
        let def = self.events.get(event_id)?;
        self.document.active_event.activate(def);
        self.persist();
        self.document.active_event.active()
    }

    /// Effects of the running world event.
    pub fn current_effects(&self) -> EffectSet {
        self.document.active_event.current_effects()
    }

    /// Narration for reaching `level`, at most once per save.
    pub fn check_milestone(&mut self, level: u32) -> Option<Narration> {
        let narration = self.document.gate.check_and_trigger_milestone(level)?;
        self.persist();
        Some(narration)
    }

    /// The tutorial line for `id`, at most once per save.
    ///
    /// The id is consumed on the first check even when no node exists.
    pub fn check_tutorial(&mut self, id: &str) -> Option<DialogueLine> {
        if self.document.gate.has_been_shown(id) {
            return None;
        }
        let line = self
            .document
            .gate
            .check_and_trigger_tutorial(id, &self.dialogue)
            .and_then(|node| {
                self.document
                    .record(node.npc)
                    .map(|record| DialogueLine::resolve(node, record))
            });
        self.persist();
        line
    }

    /// Delete the save and start over from initial values.
    pub fn reset(&mut self) {
        self.document = NarrativeDocument::new();
        if let Err(e) = self.storage.remove(&self.config.storage_key) {
            tracing::error!("Failed to delete narrative save: {}", e);
        }
        tracing::debug!(key = %self.config.storage_key, "narrative save reset");
        self.unsaved = false;
    }

    /// Consume the session, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveError;
    use crate::storage::MemoryStorage;
    use aq_events::{EffectKind, TriggerConfig};

    const KEY: &str = "test_save";

    fn config() -> SessionConfig {
        SessionConfig::default().with_storage_key(KEY).with_seed(42)
    }

    fn session() -> NarrativeSession<MemoryStorage> {
        NarrativeSession::open(MemoryStorage::new(), config())
    }

    fn stored(session: &NarrativeSession<MemoryStorage>) -> NarrativeDocument {
        NarrativeDocument::from_json(session.storage().get(KEY).unwrap())
    }

    /// Storage that refuses every write.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn load(&self, _key: &str) -> SaveResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, _key: &str, _value: &str) -> SaveResult<()> {
            Err(SaveError::Unavailable("disk on fire".to_string()))
        }

        fn remove(&mut self, _key: &str) -> SaveResult<()> {
            Ok(())
        }
    }

    #[test]
    fn opens_fresh_without_save() {
        let s = session();
        assert_eq!(s.document(), &NarrativeDocument::new());
        assert!(!s.has_unsaved_changes());
    }

    #[test]
    fn opens_fresh_from_corrupt_save() {
        let storage = MemoryStorage::new().with_entry(KEY, "}}}");
        let s = NarrativeSession::open(storage, config());
        assert_eq!(s.document(), &NarrativeDocument::new());
    }

    #[test]
    fn talk_marks_conversation_and_persists() {
        let mut s = session();
        let line = s.talk(NpcId::Lyra, "lyra_infirmary").unwrap();
        assert_eq!(line.npc, NpcId::Lyra);
        assert!(!line.text.is_empty());
        assert!(line.choices.iter().any(|c| c.id == "thank"));

        let lyra = stored(&s).record(NpcId::Lyra).cloned().unwrap();
        assert!(lyra.has_had_conversation("lyra_infirmary"));
        assert!(lyra.last_interaction.is_some());
    }

    #[test]
    fn talk_twice_does_not_duplicate() {
        let mut s = session();
        s.talk(NpcId::Aldric, "aldric_intro");
        s.talk(NpcId::Aldric, "aldric_intro");
        let aldric = s.record(NpcId::Aldric).unwrap();
        assert_eq!(aldric.conversations_had, vec!["aldric_intro".to_string()]);
    }

    #[test]
    fn mark_conversation_seen_twice_is_idempotent() {
        let mut s = session();
        s.mark_conversation_seen(NpcId::Brom, "brom_forge");
        let once = s.record(NpcId::Brom).unwrap().conversations_had.clone();
        s.mark_conversation_seen(NpcId::Brom, "brom_forge");
        assert_eq!(s.record(NpcId::Brom).unwrap().conversations_had, once);
    }

    #[test]
    fn unknown_node_is_no_content() {
        let mut s = session();
        assert!(s.talk(NpcId::Brom, "nobody_home").is_none());
        assert!(s.talk(NpcId::Brom, "aldric_intro").is_none());
        assert!(s.choose("nobody_home", "x").is_none());
        assert!(s.choose("aldric_intro", "no_such_choice").is_none());
    }

    #[test]
    fn choose_applies_effect_and_persists() {
        let mut s = session();
        let before = s.record(NpcId::Aldric).unwrap().trust;
        let after = s.choose("aldric_intro", "respectful").unwrap().trust;
        assert_eq!(after, before + 10);

        let aldric = stored(&s).record(NpcId::Aldric).cloned().unwrap();
        assert_eq!(aldric.trust, after);
        assert_eq!(aldric.choice_for("aldric_intro"), Some("respectful"));
    }

    #[test]
    fn gated_choice_is_refused() {
        let mut s = session();
        // Lyra's starting affection of 30 allows flirting; drop it first.
        s.choose("lyra_infirmary", "dismiss");
        assert!(s.choose("lyra_infirmary", "flirt").is_none());
        assert!(!s.record(NpcId::Lyra).unwrap().has_memory_event("flirted_with_lyra"));
    }

    #[test]
    fn choice_memory_event_changes_later_dialogue() {
        let mut s = session();
        s.choose("vex_backroom", "sell");
        s.choose("vex_backroom", "sell");
        let vex = s.record(NpcId::Vex).unwrap();
        assert_eq!(vex.memory_events, vec!["sold_to_vex".to_string()]);
        let line = s.talk(NpcId::Vex, "vex_backroom").unwrap();
        assert!(line.text.starts_with("Keep your voice down"));
    }

    #[test]
    fn event_lifecycle_through_battles() {
        let mut s = session();
        s.start_event("monster_horde").unwrap();
        assert_eq!(s.current_effects().get(EffectKind::SpawnCount), Some(2));

        let first = s.battle_completed(true);
        assert_eq!(first.tick, EventTick::Continued { remaining: 1 });
        let second = s.battle_completed(true);
        assert!(matches!(second.tick, EventTick::Expired(_)));
        assert!(s.current_effects().is_empty());
        assert!(s.document().event_trigger.on_cooldown());
        assert!(stored(&s).active_event.active().is_none());
    }

    #[test]
    fn death_ends_event_immediately() {
        let mut s = session();
        s.start_event("fog_of_war");
        let ended = s.player_died().unwrap();
        assert_eq!(ended.id, "fog_of_war");
        assert!(s.current_effects().is_empty());
        assert_eq!(s.document().event_trigger.win_streak(), 0);
    }

    #[test]
    fn win_streak_can_start_an_event() {
        let trigger = TriggerConfig::default()
            .with_min_streak(1)
            .with_base_chance(1.0)
            .with_max_chance(1.0);
        let mut s = NarrativeSession::open(MemoryStorage::new(), config().with_trigger(trigger));
        let report = s.battle_completed(true);
        let started = report.started.unwrap();
        assert!(s.events().get(&started.id).is_some());
        assert_eq!(s.document().active_event.active(), Some(&started));
        assert_eq!(report.win_streak, 0);
    }

    #[test]
    fn no_roll_during_cooldown() {
        let trigger = TriggerConfig::default()
            .with_min_streak(1)
            .with_base_chance(1.0)
            .with_max_chance(1.0)
            .with_cooldown(2);
        let mut s = NarrativeSession::open(MemoryStorage::new(), config().with_trigger(trigger));
        s.player_died();
        assert!(s.battle_completed(true).started.is_none());
        assert!(s.battle_completed(true).started.is_none());
        assert!(s.battle_completed(true).started.is_some());
    }

    #[test]
    fn lost_battle_never_starts_event() {
        let trigger = TriggerConfig::default()
            .with_min_streak(0)
            .with_base_chance(1.0)
            .with_max_chance(1.0);
        let mut s = NarrativeSession::open(MemoryStorage::new(), config().with_trigger(trigger));
        assert!(s.battle_completed(false).started.is_none());
    }

    #[test]
    fn milestone_single_fire_and_persisted() {
        let mut s = session();
        assert!(s.check_milestone(50).is_some());
        assert!(s.check_milestone(50).is_none());
        assert!(stored(&s).gate.has_milestone_been_shown(50));

        let reopened = NarrativeSession::open(s.into_storage(), config());
        assert!(reopened.document().gate.has_milestone_been_shown(50));
    }

    #[test]
    fn tutorial_single_fire() {
        let mut s = session();
        let line = s.check_tutorial("tutorial_rage").unwrap();
        assert_eq!(line.npc, NpcId::Lyra);
        assert!(s.check_tutorial("tutorial_rage").is_none());
        assert!(s.check_tutorial("tutorial_missing").is_none());
        assert!(s.document().gate.has_been_shown("tutorial_missing"));
    }

    #[test]
    fn same_tick_mutations_do_not_lose_updates() {
        let mut s = session();
        s.start_event("golden_hour");
        s.battle_completed(true);
        s.check_milestone(10);
        let doc = stored(&s);
        assert_eq!(
            doc.active_event.active().map(|e| e.duration_remaining),
            Some(2)
        );
        assert!(doc.gate.has_milestone_been_shown(10));
    }

    #[test]
    fn write_failure_keeps_playing_in_memory() {
        let mut s = NarrativeSession::open(BrokenStorage, config());
        let trust = s.choose("aldric_intro", "respectful").unwrap().trust;
        assert!(s.has_unsaved_changes());
        assert_eq!(s.record(NpcId::Aldric).unwrap().trust, trust);
        assert!(s.save().is_err());
    }

    #[test]
    fn quota_failure_is_reported_not_fatal() {
        let mut s = NarrativeSession::open(MemoryStorage::new().with_quota(16), config());
        assert!(s.check_milestone(5).is_some());
        assert!(s.has_unsaved_changes());
        assert!(s.document().gate.has_milestone_been_shown(5));
    }

    #[test]
    fn reset_deletes_save() {
        let mut s = session();
        s.choose("aldric_intro", "cocky");
        s.reset();
        assert_eq!(s.document(), &NarrativeDocument::new());
        assert!(s.storage().get(KEY).is_none());
    }
}
