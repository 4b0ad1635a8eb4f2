//! Unified error handling for the whiterabbit crate
//!
//! Wraps the engine's [`ClueError`] together with configuration and I/O
//! failures so the binary and embedding bots can handle one error type.
//!
//! # Usage
//!
//! ```rust,ignore
//! use whiterabbit::error::{Error, WhiteRabbitErrorTrait};
//!
//! fn handle_error(err: Error) {
//!     if err.is_recoverable() {
//!         println!("{}", err.user_message());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

pub use crate::clues::error::ClueError;

/// Common trait for all whiterabbit error types
pub trait WhiteRabbitErrorTrait: std::error::Error {
    /// Check if the caller can correct the input and try again
    fn is_recoverable(&self) -> bool;

    /// Message suitable for showing to players in chat
    fn user_message(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad input from the caller (player count, roster, clue time)
    Input,
    /// A trigger ran out of order (lookup before assign/shuffle)
    State,
    /// Deck or bucket table is inconsistent
    Config,
    /// File and I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Input => "invalid input",
            Self::State => "not ready",
            Self::Config => "configuration error",
            Self::Storage => "storage error",
            Self::Other => "other error",
        }
    }
}

impl WhiteRabbitErrorTrait for ClueError {
    fn is_recoverable(&self) -> bool {
        ClueError::is_recoverable(self)
    }

    fn user_message(&self) -> String {
        match self {
            Self::InvalidTimeValue { .. } => "No clue card found for that time!".to_string(),
            Self::AssignmentNotReady => "Clues have not been assigned!".to_string(),
            Self::RevealNotReady => "Clues have not been shuffled!".to_string(),
            Self::ClueNotOwned { .. } => "That clue doesn't belong to you!".to_string(),
            Self::NotEnoughPlayers { .. } => "Not enough players!".to_string(),
            other => other.to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedPlayerCount { .. }
            | Self::NotEnoughPlayers { .. }
            | Self::InvalidTimeValue { .. }
            | Self::RosterSizeMismatch { .. }
            | Self::DuplicatePlayer { .. }
            | Self::SpecialPlayerMissing { .. }
            | Self::UnknownPlayer { .. }
            | Self::ClueNotOwned { .. } => ErrorCategory::Input,
            Self::AssignmentNotReady | Self::RevealNotReady => ErrorCategory::State,
            Self::TerminalValueMissing { .. } | Self::ConstraintInfeasible { .. } => {
                ErrorCategory::Config
            }
        }
    }
}

/// Unified error type for the whiterabbit crate
#[derive(Error, Debug)]
pub enum Error {
    /// Clue engine errors
    #[error("Clue error: {0}")]
    Clue(#[from] ClueError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WhiteRabbitErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Clue(e) => WhiteRabbitErrorTrait::is_recoverable(e),
            Self::Io(_) => true,
            Self::Config(_) | Self::Toml(_) | Self::Json(_) => false,
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Clue(e) => e.user_message(),
            other => other.to_string(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Clue(e) => e.category(),
            Self::Config(_) | Self::Toml(_) => ErrorCategory::Config,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
