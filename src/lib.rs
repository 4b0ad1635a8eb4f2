//! whiterabbit - clue distribution for "Alice is Missing" sessions
//!
//! Deals time-stamped clue cards to players so that no player holds two clues
//! too close together in time, the final clue always reaches the right
//! character, and the deal can be regenerated on demand.
//!
//! # Architecture
//!
//! - [`clues`] - The distribution engine (partition, validation, assignment, reveals)
//! - [`session`] - Registry of independent per-session engines
//! - [`config`] - Deck configuration and settings
//! - [`metrics`] - Prometheus counters for the partition search
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```
//! use whiterabbit::clues::ClueEngine;
//! use whiterabbit::config::Config;
//!
//! let config = Config::default();
//! let mut engine = ClueEngine::new(config.clues);
//! let assignment = engine.assign(3, &["alice", "bob", "charlie"]).unwrap();
//! assert_eq!(assignment.owner_of(90), Some("charlie"));
//! ```

pub mod clues;
pub mod config;
pub mod error;
pub mod metrics;
pub mod session;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clues::{Assignment, ClueCard, ClueEngine, ClueError, ClueResult};
    pub use crate::config::{ClueConfig, Config};
    pub use crate::error::{Error, ErrorCategory, Result, WhiteRabbitErrorTrait};
    pub use crate::session::SessionRegistry;
}

// Direct re-exports for convenience
pub use clues::{ClueEngine, ClueError};
pub use session::SessionRegistry;
