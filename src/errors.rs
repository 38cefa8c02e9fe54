use std::fmt;

/// Recoverable failures surfaced by move and roster operations.
///
/// Every variant is a local, caller-handled condition; none of them should
/// tear down an encounter in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A move type name that is not in the type chart
    InvalidMoveType(String),
    /// A creature already knows the maximum number of moves
    TeachingLimitExceeded { limit: usize },
    /// Asked to forget a move the creature never learned
    UnknownMove(String),
    /// The roster already holds the maximum number of creatures
    RosterFull,
    /// The creature is already present in the roster
    DuplicateRosterEntry(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidMoveType(name) => write!(f, "Invalid move type: {}", name),
            GameError::TeachingLimitExceeded { limit } => {
                write!(f, "I already know {} moves. Delete one move first.", limit)
            }
            GameError::UnknownMove(name) => write!(f, "I don't know any move called {}!", name),
            GameError::RosterFull => write!(f, "You've already got a full roster!"),
            GameError::DuplicateRosterEntry(name) => {
                write!(f, "That there {} is already in your roster!", name)
            }
        }
    }
}

impl std::error::Error for GameError {}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;
