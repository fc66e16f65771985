/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when parsing core identifiers from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// The name does not match any tracked NPC.
    #[error("unknown npc: \"{0}\"")]
    UnknownNpc(String),

    /// The name does not match any relationship stat.
    #[error("unknown stat: \"{0}\"")]
    UnknownStat(String),
}
