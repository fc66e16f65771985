//! Terminal frontend for the Arena Quest narrative engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aq",
    about = "Arena Quest: relationships, dialogue and world events from the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the save (default: platform data directory)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// RNG seed for reproducible event rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show relationship standing with every NPC, or one in detail
    Status {
        /// NPC name (aldric, lyra, brom, vex, malakar)
        npc: Option<String>,
    },

    /// Talk to an NPC at a dialogue node
    Talk {
        /// NPC name
        npc: String,

        /// Dialogue node id
        node: String,
    },

    /// Pick a choice at a dialogue node
    Choose {
        /// Dialogue node id
        node: String,

        /// Choice id
        choice: String,
    },

    /// Report a finished battle
    Battle {
        /// The player lost the battle
        #[arg(long)]
        lost: bool,
    },

    /// Report that the player died
    Die,

    /// Check the narration for reaching a level
    Milestone {
        /// Player level
        level: u32,
    },

    /// Check a tutorial by id
    Tutorial {
        /// Tutorial id (e.g. tutorial_combat)
        id: String,
    },

    /// List world events and show the running one
    Events {
        /// Start an event by id, replacing any running one
        #[arg(long)]
        start: Option<String>,
    },

    /// Delete the save and start over
    Reset,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("AQ_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = commands::open_session(cli.save_dir.as_deref(), cli.seed).and_then(|mut session| {
        let outcome = match cli.command {
            Commands::Status { npc } => commands::status::run(&session, npc.as_deref()),
            Commands::Talk { npc, node } => commands::dialogue::talk(&mut session, &npc, &node),
            Commands::Choose { node, choice } => {
                commands::dialogue::choose(&mut session, &node, &choice)
            }
            Commands::Battle { lost } => commands::battle::run(&mut session, !lost),
            Commands::Die => commands::battle::die(&mut session),
            Commands::Milestone { level } => commands::gate::milestone(&mut session, level),
            Commands::Tutorial { id } => commands::gate::tutorial(&mut session, &id),
            Commands::Events { start } => commands::events::run(&mut session, start.as_deref()),
            Commands::Reset => commands::reset::run(&mut session),
        };
        commands::warn_if_unsaved(&session);
        outcome
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
