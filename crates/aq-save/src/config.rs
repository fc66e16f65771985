//! Configuration for a narrative session.

use aq_events::TriggerConfig;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "arena_quest_narrative";

/// Configuration for a narrative session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key the document is stored under.
    pub storage_key: String,
    /// RNG seed for reproducible event rolls. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Tuning for world event rolls.
    pub trigger: TriggerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            seed: None,
            trigger: TriggerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the event roll tuning.
    pub fn with_trigger(mut self, trigger: TriggerConfig) -> Self {
        self.trigger = trigger;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.trigger, TriggerConfig::default());
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_storage_key("slot_2")
            .with_seed(7)
            .with_trigger(TriggerConfig::default().with_cooldown(1));
        assert_eq!(cfg.storage_key, "slot_2");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.trigger.cooldown_battles, 1);
    }
}
