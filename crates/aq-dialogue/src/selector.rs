//! Picks which variant of a dialogue node gets spoken.
//!
//! Eligible variants are ranked by how specific their requirement is, so a
//! line gated on a memory event beats a line gated on a trust floor when the
//! player qualifies for both. Scores are kept in half-points:
//!
//! | Clause present                          | Half-points |
//! |-----------------------------------------|-------------|
//! | any trust bound                         | 2           |
//! | any affection bound                     | 2           |
//! | intimacy floor                          | 2           |
//! | memory event                            | 4           |
//! | trust floor met by current trust        | 1           |
//! | affection floor met by current affection| 1           |

use aq_core::AffinityRecord;

use crate::dialogue::{DialogueNode, Variant};

/// Specificity score of a variant for a record, in half-points.
pub fn score_variant(variant: &Variant, record: &AffinityRecord) -> u32 {
    let Some(req) = &variant.requires else {
        return 0;
    };
    let mut score = 0;
    if req.has_trust_range() {
        score += 2;
    }
    if req.has_affection_range() {
        score += 2;
    }
    if req.min_intimacy.is_some() {
        score += 2;
    }
    if req.memory_event.is_some() {
        score += 4;
    }
    if req.min_trust.is_some_and(|min| record.trust >= min) {
        score += 1;
    }
    if req.min_affection.is_some_and(|min| record.affection >= min) {
        score += 1;
    }
    score
}

/// Choose the variant to speak.
///
/// Returns the highest-scoring eligible variant, with authoring order
/// breaking ties. If no variant is eligible the node's first variant is
/// returned regardless of its own gate; there is always something to say.
pub fn select_variant<'a>(node: &'a DialogueNode, record: &AffinityRecord) -> &'a Variant {
    let mut best: Option<(&Variant, u32)> = None;
    for variant in node.variants().iter().filter(|v| v.is_eligible(record)) {
        let score = score_variant(variant, record);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((variant, score));
        }
    }
    best.map_or_else(|| node.fallback(), |(variant, _)| variant)
}
