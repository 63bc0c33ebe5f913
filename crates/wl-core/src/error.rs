/// Alias for `Result<T, WlError>`.
pub type WlResult<T> = Result<T, WlError>;

/// Errors raised while assembling the game tables.
///
/// Gameplay never produces these: a bad direction or a missing item is
/// narration, not an error.
#[derive(Debug, thiserror::Error)]
pub enum WlError {
    /// An alias was defined twice.
    #[error("duplicate alias: \"{0}\"")]
    DuplicateAlias(String),

    /// A room was defined twice.
    #[error("duplicate room: \"{0}\"")]
    DuplicateRoom(String),

    /// A character was defined twice.
    #[error("duplicate character: \"{0}\"")]
    DuplicateCharacter(String),

    /// A `(character, topic)` pair was given two replies.
    #[error("duplicate topic: \"{0}\" about \"{1}\"")]
    DuplicateTopic(String, String),

    /// A character was given two combat rules.
    #[error("duplicate combat rule: \"{0}\"")]
    DuplicateCombatRule(String),
}
