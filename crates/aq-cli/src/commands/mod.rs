pub mod battle;
pub mod dialogue;
pub mod events;
pub mod gate;
pub mod reset;
pub mod status;

use std::path::Path;

use colored::Colorize;

use aq_core::NpcId;
use aq_events::ActiveEvent;
use aq_save::{DialogueLine, FileStorage, NarrativeSession, SessionConfig};

/// The session type every command works on.
pub type Session = NarrativeSession<FileStorage>;

/// Open the save in `save_dir`, or in the platform data directory.
pub fn open_session(save_dir: Option<&Path>, seed: Option<u64>) -> Result<Session, String> {
    let storage = match save_dir {
        Some(dir) => FileStorage::new(dir),
        None => FileStorage::default_location().map_err(|e| e.to_string())?,
    };
    tracing::debug!(dir = %storage.dir().display(), "opening save");

    let mut config = SessionConfig::default();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(NarrativeSession::open(storage, config))
}

/// Parse an NPC name given on the command line.
fn parse_npc(name: &str) -> Result<NpcId, String> {
    name.parse().map_err(|e: aq_core::CoreError| e.to_string())
}

/// Tell the player their progress only lives in memory.
pub fn warn_if_unsaved(session: &Session) {
    if session.has_unsaved_changes() {
        eprintln!(
            "  {} progress could not be written to {}",
            "WARN".yellow().bold(),
            session.storage().dir().display()
        );
    }
}

/// Print a line of dialogue with its choices.
fn print_line(line: &DialogueLine) {
    println!("  {}:", line.npc.display_name().bold());
    if let Some(context) = &line.context {
        println!("  {}", context.dimmed());
    }
    println!("  \"{}\"", line.text);
    if !line.choices.is_empty() {
        println!();
        for choice in &line.choices {
            println!("    [{}] {}", choice.id.cyan(), choice.text);
        }
        println!();
        println!(
            "  {}",
            format!("aq choose {} <choice>", line.node_id).dimmed()
        );
    }
}

/// Print a running world event.
fn print_event(event: &ActiveEvent) {
    let effects: Vec<String> = event.effects.iter().map(ToString::to_string).collect();
    println!(
        "  {} {} {}",
        event.icon,
        event.name.bold(),
        format!("({}, {} battles left)", event.category, event.duration_remaining).dimmed()
    );
    println!("  {}", effects.join(", "));
    println!("  {}: \"{}\"", event.narrator.display_name(), event.lore.italic());
}
