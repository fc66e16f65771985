//! Narration for reaching a player level.

use aq_core::NpcId;

/// A one-shot narration shown when the player reaches a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Narration {
    /// The level this narration is tied to.
    pub level: u32,
    /// Headline shown above the text.
    pub title: &'static str,
    /// Who speaks it.
    pub narrator: NpcId,
    /// The narration itself.
    pub text: &'static str,
}

/// The authored narration for `level`, if there is one.
///
/// Most levels have nothing; a miss means "no content", not an error.
pub fn milestone_narration(level: u32) -> Option<Narration> {
    let (title, narrator, text) = match level {
        5 => (
            "Blooded",
            NpcId::Aldric,
            "Five levels and you still have all your fingers. The bookmakers have noticed.",
        ),
        10 => (
            "A Name on the Board",
            NpcId::Brom,
            "Your name's on the board outside. Someone spelled it wrong. Take that as a compliment.",
        ),
        25 => (
            "Crowd Favorite",
            NpcId::Lyra,
            "They chant for you now. I hear it from the infirmary. Try to come back in one piece.",
        ),
        50 => (
            "The Warlord Watches",
            NpcId::Malakar,
            "Fifty. You have my attention, and that is rarely a gift.",
        ),
        75 => (
            "Whispers in the Pits",
            NpcId::Vex,
            "Word is Malakar is paying people to bet against you. I took the other side.",
        ),
        100 => (
            "Champion of the Sands",
            NpcId::Aldric,
            "There is no one left on the card. Only him.",
        ),
        _ => return None,
    };
    Some(Narration {
        level,
        title,
        narrator,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authored_levels_have_content() {
        for level in [5, 10, 25, 50, 75, 100] {
            let narration = milestone_narration(level).unwrap();
            assert_eq!(narration.level, level);
            assert!(!narration.text.is_empty());
        }
    }

    #[test]
    fn other_levels_have_none() {
        assert_eq!(milestone_narration(0), None);
        assert_eq!(milestone_narration(7), None);
        assert_eq!(milestone_narration(101), None);
    }

    #[test]
    fn level_fifty_is_narrated_by_malakar() {
        assert_eq!(milestone_narration(50).map(|n| n.narrator), Some(NpcId::Malakar));
    }
}
