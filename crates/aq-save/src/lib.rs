//! Persisted narrative state for Arena Quest.
//!
//! [`NarrativeDocument`] is the single document shared by relationships,
//! shown-once gates, and the active world event. [`NarrativeSession`] owns one
//! document plus a [`Storage`] backend and writes the whole document back
//! after every mutation.

pub mod config;
pub mod document;
pub mod error;
pub mod gate;
pub mod session;
pub mod storage;

pub use config::SessionConfig;
pub use document::NarrativeDocument;
pub use error::{SaveError, SaveResult};
pub use gate::MilestoneGate;
pub use session::{BattleReport, ChoiceOption, DialogueLine, NarrativeSession};
pub use storage::{FileStorage, MemoryStorage, Storage};
