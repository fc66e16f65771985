//! Dialogue nodes, variants, and choices.

use aq_core::{AffinityRecord, NpcId};

use crate::effect::Effect;
use crate::requirement::{Requirement, requirement_matches};

/// One authored phrasing of a dialogue line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// The line itself.
    pub text: String,
    /// Optional stage direction or flavor shown alongside the line.
    pub context: Option<String>,
    /// Gate for this variant. `None` means always eligible.
    pub requires: Option<Requirement>,
}

impl Variant {
    /// Create an ungated variant.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: None,
            requires: None,
        }
    }

    /// Set the flavor text.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Gate this variant behind a requirement.
    pub fn requiring(mut self, requirement: Requirement) -> Self {
        self.requires = Some(requirement);
        self
    }

    /// Returns true if the record satisfies this variant's gate.
    pub fn is_eligible(&self, record: &AffinityRecord) -> bool {
        requirement_matches(self.requires.as_ref(), record)
    }
}

/// An answer the player can give at a dialogue node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Identifier, unique within its node.
    pub id: String,
    /// The text shown to the player.
    pub text: String,
    /// What picking this choice does to the relationship.
    pub effect: Effect,
    /// Gate for offering this choice at all.
    pub requires: Option<Requirement>,
}

impl Choice {
    /// Create an ungated choice with no effect.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            effect: Effect::new(),
            requires: None,
        }
    }

    /// Set the effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Gate this choice behind a requirement.
    pub fn requiring(mut self, requirement: Requirement) -> Self {
        self.requires = Some(requirement);
        self
    }
}

/// A line of dialogue with alternate phrasings and optional answers.
///
/// A node always has at least one variant; the first one is the fallback
/// when nothing else is eligible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueNode {
    /// Unique identifier for this node.
    pub id: String,
    /// The NPC who speaks the line.
    pub npc: NpcId,
    variants: Vec<Variant>,
    /// Answers offered after the line.
    pub choices: Vec<Choice>,
}

impl DialogueNode {
    /// Create a node with its first (fallback) variant.
    pub fn new(id: impl Into<String>, npc: NpcId, first: Variant) -> Self {
        Self {
            id: id.into(),
            npc,
            variants: vec![first],
            choices: Vec::new(),
        }
    }

    /// Add another variant, after the existing ones.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Variants in authoring order. Never empty.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The first authored variant.
    pub fn fallback(&self) -> &Variant {
        &self.variants[0]
    }

    /// Find a choice by id.
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }

    /// Choices whose gates the record satisfies, in authoring order.
    pub fn available_choices<'a>(&'a self, record: &AffinityRecord) -> Vec<&'a Choice> {
        self.choices
            .iter()
            .filter(|c| requirement_matches(c.requires.as_ref(), record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aq_core::Stat;

    #[test]
    fn node_builder() {
        let node = DialogueNode::new("greeting", NpcId::Brom, Variant::new("What do you want?"))
            .with_variant(Variant::new("Back again?").requiring(Requirement::new().min_trust(40)))
            .with_choice(Choice::new("ask_repair", "Can you fix my blade?"));

        assert_eq!(node.id, "greeting");
        assert_eq!(node.variants().len(), 2);
        assert_eq!(node.fallback().text, "What do you want?");
        assert!(node.choice("ask_repair").is_some());
        assert!(node.choice("missing").is_none());
    }

    #[test]
    fn choice_builder() {
        let choice = Choice::new("thank", "Thank you.")
            .with_effect(Effect::new().with(Stat::Affection, 5))
            .requiring(Requirement::new().min_affection(10));
        assert_eq!(choice.effect.affection, Some(5));
        assert!(choice.requires.is_some());
    }

    #[test]
    fn available_choices_respects_gates() {
        let node = DialogueNode::new("n", NpcId::Lyra, Variant::new("Hello."))
            .with_choice(Choice::new("a", "Hi."))
            .with_choice(Choice::new("b", "I missed you.").requiring(Requirement::new().min_intimacy(30)));

        let stranger = AffinityRecord::with_values(50, 50, 0, 0, 0);
        let ids: Vec<_> = node.available_choices(&stranger).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);

        let close = AffinityRecord::with_values(50, 50, 0, 40, 0);
        assert_eq!(node.available_choices(&close).len(), 2);
    }

    #[test]
    fn variant_eligibility() {
        let v = Variant::new("x").requiring(Requirement::new().memory_event("e"));
        let mut r = AffinityRecord::default();
        assert!(!v.is_eligible(&r));
        r.add_memory_event("e");
        assert!(v.is_eligible(&r));
        assert!(Variant::new("y").is_eligible(&AffinityRecord::default()));
    }
}
