//! Clue distribution engine
//!
//! Deals the clue deck of an "Alice is Missing" session out to the players.
//!
//! # Overview
//!
//! Every player receives a bucket of clue times whose size comes from the
//! configured bucket table. Two clues in one bucket must be more than
//! `min_separation` minutes apart, and the final (terminal) clue always goes
//! to the special player. Separately, each clue time has several printed
//! cards, and a reveal shuffle picks which one is shown.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────┐   reject   ┌──────────────┐
//!  │   partition   │◄───────────┤  validator   │
//!  │ (shuffle+cut) ├───────────►│ (|a-b| > 10) │
//!  └───────────────┘  candidate └──────┬───────┘
//!                                      │ accept
//!                              ┌───────▼───────┐
//!                              │  generation   │  shuffle bucket order
//!                              └───────┬───────┘
//!                                      │
//!                              ┌───────▼───────┐
//!                  roster ───► │  assignment   │ ──► player → clues
//!                              └───────────────┘
//!
//!                              ┌───────────────┐
//!                              │    reveal     │ ──► time → card variant
//!                              └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`partition`] - Random slicing of the shuffled deck into buckets
//! - [`validator`] - Minimum-separation check
//! - [`generation`] - Rejection-sampling loop and attempt statistics
//! - [`assignment`] - Roster checks and bucket-to-player routing
//! - [`reveal`] - Card variant selection
//! - [`engine`] - Per-session state tying it all together
//!
//! # Quick Start
//!
//! ```
//! use whiterabbit::clues::ClueEngine;
//! use whiterabbit::config::ClueConfig;
//!
//! let mut engine = ClueEngine::with_seed(ClueConfig::default(), 7);
//! engine.assign(3, &["alice", "bob", "charlie"]).unwrap();
//! engine.reshuffle_reveals();
//!
//! // The 90 minute clue always belongs to Charlie and has a single card
//! assert_eq!(engine.lookup("charlie", 90).unwrap(), 1);
//! ```

pub mod assignment;
pub mod engine;
pub mod error;
pub mod generation;
pub mod partition;
pub mod reveal;
pub mod types;
pub mod validator;

// Re-export main types
pub use engine::ClueEngine;
pub use error::{ClueError, ClueResult};
pub use generation::{GenerationStats, SimulationReport};
pub use types::{
    Assignment, Bucket, ClueCard, Partition, PlayerClues, RevealSelection, TimeValue, VariantId,
};
