//! Error types for the clue distribution engine

use thiserror::Error;

use super::types::TimeValue;

/// Result type for clue engine operations
pub type ClueResult<T> = Result<T, ClueError>;

/// Errors raised by the clue distribution engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClueError {
    /// No bucket sizes are configured for this player count
    #[error("Unsupported player count {player_count}. Supported: {supported:?}")]
    UnsupportedPlayerCount {
        player_count: usize,
        supported: Vec<usize>,
    },

    /// Fewer players than the game requires
    #[error("Not enough players: {player_count} (minimum {minimum})")]
    NotEnoughPlayers { player_count: usize, minimum: usize },

    /// No bucket holds the terminal clue time
    #[error("Terminal clue time {time} is missing from every bucket")]
    TerminalValueMissing { time: TimeValue },

    /// Rejection sampling gave up after the configured retry cap
    #[error("No valid clue partition found after {attempts} attempts")]
    ConstraintInfeasible { attempts: u64 },

    /// Time value outside the clue domain
    #[error("No clue card exists for time {time}")]
    InvalidTimeValue { time: TimeValue },

    /// `assign` has not run yet
    #[error("Clues have not been assigned")]
    AssignmentNotReady,

    /// `reshuffle_reveals` has not run yet
    #[error("Clues have not been shuffled")]
    RevealNotReady,

    /// Roster length does not match the requested player count
    #[error("Roster has {actual} players but {expected} were requested")]
    RosterSizeMismatch { expected: usize, actual: usize },

    /// The same player appears twice in the roster
    #[error("Player '{player}' appears more than once in the roster")]
    DuplicatePlayer { player: String },

    /// The special player must always be part of the roster
    #[error("Roster is missing the special player '{player}'")]
    SpecialPlayerMissing { player: String },

    /// Player has no bucket in the current assignment
    #[error("Player '{player}' has no clue assignment")]
    UnknownPlayer { player: String },

    /// Player does not hold the requested clue
    #[error("Clue {time} does not belong to '{player}'")]
    ClueNotOwned { player: String, time: TimeValue },
}

impl ClueError {
    /// Create an unsupported player count error
    pub fn unsupported_player_count(player_count: usize, supported: Vec<usize>) -> Self {
        Self::UnsupportedPlayerCount {
            player_count,
            supported,
        }
    }

    /// Create a clue-not-owned error
    pub fn not_owned(player: impl Into<String>, time: TimeValue) -> Self {
        Self::ClueNotOwned {
            player: player.into(),
            time,
        }
    }

    /// Signals a mismatch between the clue domain and the bucket table.
    ///
    /// Callers must not retry these; the configuration itself is broken.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::TerminalValueMissing { .. } | Self::ConstraintInfeasible { .. }
        )
    }

    /// Check if the caller can fix the condition and try again
    pub fn is_recoverable(&self) -> bool {
        !self.is_fatal()
    }
}
