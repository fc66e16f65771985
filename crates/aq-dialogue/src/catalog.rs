//! Static dialogue content.
//!
//! The catalog is read-only at runtime. A lookup miss is not an error: callers
//! get `None` and treat it as "nothing to say".

use aq_core::{NpcId, Stat};

use crate::dialogue::{Choice, DialogueNode, Variant};
use crate::effect::Effect;
use crate::requirement::Requirement;

/// An ordered collection of dialogue nodes keyed by id.
#[derive(Debug, Clone, Default)]
pub struct DialogueCatalog {
    nodes: Vec<DialogueNode>,
}

impl DialogueCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. A node with an existing id replaces the earlier one.
    pub fn with_node(mut self, node: DialogueNode) -> Self {
        self.nodes.retain(|n| n.id != node.id);
        self.nodes.push(node);
        self
    }

    /// Look up a node by id.
    pub fn get(&self, id: &str) -> Option<&DialogueNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All nodes spoken by an NPC, in catalog order.
    pub fn for_npc(&self, npc: NpcId) -> impl Iterator<Item = &DialogueNode> {
        self.nodes.iter().filter(move |n| n.npc == npc)
    }

    /// All nodes, in catalog order.
    pub fn nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The content shipped with the game.
    pub fn builtin() -> Self {
        Self::new()
            .with_node(aldric_intro())
            .with_node(lyra_infirmary())
            .with_node(brom_forge())
            .with_node(vex_backroom())
            .with_node(malakar_challenge())
            .with_node(
                DialogueNode::new(
                    "tutorial_combat",
                    NpcId::Aldric,
                    Variant::new("Hit them until they stop getting up. Dodge when they swing back.")
                        .with_context("Aldric taps the sand with his cane."),
                ),
            )
            .with_node(
                DialogueNode::new(
                    "tutorial_events",
                    NpcId::Aldric,
                    Variant::new(
                        "Win enough bouts in a row and the arena changes around you. Blood moons, golden hours. Ride it or survive it.",
                    ),
                ),
            )
            .with_node(
                DialogueNode::new(
                    "tutorial_rage",
                    NpcId::Lyra,
                    Variant::new("Every blow you take feeds your rage. Spend it before it spends you."),
                ),
            )
    }
}

fn aldric_intro() -> DialogueNode {
    DialogueNode::new(
        "aldric_intro",
        NpcId::Aldric,
        Variant::new("Another one. Sign here and try not to bleed on the paperwork."),
    )
    .with_variant(
        Variant::new("You again. The crowd has started asking for you by name.")
            .requiring(Requirement::new().min_trust(50)),
    )
    .with_variant(
        Variant::new("Still breathing after that first bout. I'll put you on the main card.")
            .with_context("He almost smiles.")
            .requiring(Requirement::new().min_trust(40).memory_event("won_first_bout")),
    )
    .with_choice(
        Choice::new("respectful", "I'm here to fight. Put me wherever you need me.")
            .with_effect(Effect::new().with(Stat::Trust, 10).with(Stat::Respect, 5)),
    )
    .with_choice(
        Choice::new("cocky", "Give me your best fighter.")
            .with_effect(Effect::new().with(Stat::Trust, -5).with(Stat::Anger, 10)),
    )
}

fn lyra_infirmary() -> DialogueNode {
    DialogueNode::new(
        "lyra_infirmary",
        NpcId::Lyra,
        Variant::new("Sit. You're bleeding on my floor."),
    )
    .with_variant(
        Variant::new("Again? Hold still, this will sting.")
            .requiring(Requirement::new().min_affection(40)),
    )
    .with_variant(
        Variant::new("I kept the good salve back for you. Don't tell the others.")
            .with_context("She lowers her voice.")
            .requiring(Requirement::new().min_affection(40).min_intimacy(20)),
    )
    .with_choice(
        Choice::new("thank", "Thank you, Lyra.")
            .with_effect(Effect::new().with(Stat::Affection, 8).with(Stat::Trust, 3)),
    )
    .with_choice(
        Choice::new("flirt", "You could patch me up more often.")
            .with_effect(
                Effect::new()
                    .with(Stat::Intimacy, 10)
                    .with_memory_event("flirted_with_lyra"),
            )
            .requiring(Requirement::new().min_affection(30)),
    )
    .with_choice(
        Choice::new("dismiss", "Just do your job.")
            .with_effect(Effect::new().with(Stat::Affection, -10).with(Stat::Anger, 5)),
    )
}

fn brom_forge() -> DialogueNode {
    DialogueNode::new(
        "brom_forge",
        NpcId::Brom,
        Variant::new("Coin first. Then we talk steel."),
    )
    .with_variant(
        Variant::new("That blade's seen worse than you. Leave it with me.")
            .requiring(Requirement::new().min_trust(40).max_trust(79)),
    )
    .with_variant(
        Variant::new("For you, I'll fold it twice. No charge for the second.")
            .requiring(Requirement::new().min_trust(80)),
    )
    .with_choice(
        Choice::new("pay", "Here. Full price.")
            .with_effect(Effect::new().with(Stat::Trust, 5)),
    )
    .with_choice(
        Choice::new("haggle", "Half that, and I'll tell everyone where I got it.")
            .with_effect(Effect::new().with(Stat::Anger, 5).with(Stat::Respect, 2)),
    )
}

fn vex_backroom() -> DialogueNode {
    DialogueNode::new(
        "vex_backroom",
        NpcId::Vex,
        Variant::new("Didn't see you come in. Nobody ever does."),
    )
    .with_variant(
        Variant::new("Keep your voice down. Malakar has ears in the walls.")
            .requiring(Requirement::new().min_trust(30).memory_event("sold_to_vex")),
    )
    .with_choice(
        Choice::new("sell", "I have something you'll want.")
            .with_effect(
                Effect::new()
                    .with(Stat::Trust, 10)
                    .with_memory_event("sold_to_vex"),
            ),
    )
    .with_choice(
        Choice::new("threaten", "Tell me what you know or I take the shop apart.")
            .with_effect(Effect::new().with(Stat::Anger, 25).with(Stat::Trust, -10)),
    )
}

fn malakar_challenge() -> DialogueNode {
    DialogueNode::new(
        "malakar_challenge",
        NpcId::Malakar,
        Variant::new("You are entertainment. Nothing more."),
    )
    .with_variant(
        Variant::new("You again. My champions are starting to fear your name.")
            .requiring(Requirement::new().memory_event("defeated_champion")),
    )
    .with_choice(
        Choice::new("defy", "Your arena will fall.")
            .with_effect(Effect::new().with(Stat::Anger, 15).with(Stat::Respect, 10)),
    )
    .with_choice(
        Choice::new("bow", "I fight for your glory, Warlord.")
            .with_effect(Effect::new().with(Stat::Anger, -10).with(Stat::Trust, 5)),
    )
}
