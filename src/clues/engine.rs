//! Per-session clue engine
//!
//! Owns the current assignment and reveal selection for one game session,
//! along with the random source that produced them. Every trigger replaces
//! its state wholesale; nothing is merged with a previous generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use super::assignment;
use super::error::{ClueError, ClueResult};
use super::generation::{self, GenerationStats, SimulationReport};
use super::reveal;
use super::types::{Assignment, ClueCard, RevealSelection, TimeValue, VariantId};
use crate::config::ClueConfig;
use crate::metrics;

/// Clue distribution state for one game session
#[derive(Debug, Clone)]
pub struct ClueEngine<R = ChaCha8Rng> {
    config: ClueConfig,
    rng: R,
    assignment: Option<Assignment>,
    reveals: Option<RevealSelection>,
    last_stats: Option<GenerationStats>,
}

impl ClueEngine<ChaCha8Rng> {
    /// Create an engine seeded from OS entropy
    pub fn new(config: ClueConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Create an engine with a fixed seed (reproducible draws)
    pub fn with_seed(config: ClueConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> ClueEngine<R> {
    /// Create an engine with a caller-supplied random source
    pub fn with_rng(config: ClueConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            assignment: None,
            reveals: None,
            last_stats: None,
        }
    }

    pub fn config(&self) -> &ClueConfig {
        &self.config
    }

    /// Current assignment, if `assign` has succeeded
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Current reveal selection, if `reshuffle_reveals` has run
    pub fn reveals(&self) -> Option<&RevealSelection> {
        self.reveals.as_ref()
    }

    /// Search statistics from the most recent successful `assign`
    pub fn last_stats(&self) -> Option<GenerationStats> {
        self.last_stats
    }

    /// Redraw which card variant is shown for every clue time
    pub fn reshuffle_reveals(&mut self) -> &RevealSelection {
        let selection = reveal::draw(
            &self.config.clue_times,
            self.config.reveal_variants,
            self.config.terminal_time,
            self.config.terminal_variant,
            &mut self.rng,
        );

        tracing::info!(clues = selection.len(), "Shuffled clue piles");
        tracing::debug!(selection = ?selection.iter().collect::<Vec<_>>(), "Reveal variants");
        metrics::record_reshuffle();

        let stored = self.reveals.insert(selection);
        &*stored
    }

    /// Generate a fresh assignment for `roster`
    ///
    /// On error the previous assignment is left untouched.
    pub fn assign<S: AsRef<str>>(
        &mut self,
        player_count: usize,
        roster: &[S],
    ) -> ClueResult<&Assignment> {
        if self.config.sizes_for(player_count).is_none() {
            return Err(ClueError::unsupported_player_count(
                player_count,
                self.config.supported_player_counts(),
            ));
        }

        if player_count < self.config.min_players {
            return Err(ClueError::NotEnoughPlayers {
                player_count,
                minimum: self.config.min_players,
            });
        }

        let names = assignment::prepare_roster(roster, player_count, &self.config.special_player)?;

        let (partition, stats) =
            generation::generate_valid(&self.config, player_count, &mut self.rng)?;

        let resolved = assignment::resolve(
            partition.into_buckets(),
            &names,
            self.config.terminal_time,
            &self.config.special_player,
        )?;

        tracing::info!(
            player_count,
            attempts = stats.attempts,
            "Randomly assigned clue cards"
        );
        tracing::debug!(assignment = %resolved, "Clue assignment");
        metrics::record_assignment(player_count);

        self.last_stats = Some(stats);
        let stored = self.assignment.insert(resolved);
        Ok(&*stored)
    }

    /// Variant to reveal when `player` draws the clue at `time`
    ///
    /// Checks, in order: the time is a real clue, clues are assigned, piles
    /// are shuffled, and the player owns the clue.
    pub fn lookup(&self, player: &str, time: TimeValue) -> ClueResult<VariantId> {
        if !self.config.is_clue_time(time) {
            return Err(ClueError::InvalidTimeValue { time });
        }

        let assignment = self
            .assignment
            .as_ref()
            .ok_or(ClueError::AssignmentNotReady)?;
        let reveals = self.reveals.as_ref().ok_or(ClueError::RevealNotReady)?;

        let clues = assignment
            .clues_for(player)
            .ok_or_else(|| ClueError::UnknownPlayer {
                player: player.to_string(),
            })?;

        if !clues.owns(time) {
            return Err(ClueError::not_owned(clues.player.clone(), time));
        }

        reveals.variant(time).ok_or(ClueError::RevealNotReady)
    }

    /// The card `player` reveals for `time`
    pub fn lookup_card(&self, player: &str, time: TimeValue) -> ClueResult<ClueCard> {
        let variant = self.lookup(player, time)?;
        Ok(ClueCard::new(time, variant))
    }

    /// Image path of the card `player` reveals for `time`
    pub fn card_path(&self, player: &str, time: TimeValue) -> ClueResult<PathBuf> {
        let card = self.lookup_card(player, time)?;
        Ok(card.path_in(&self.config.clue_dir))
    }

    /// One line per player: `Name: t1, t2, ...`
    pub fn describe_assignment(&self) -> ClueResult<String> {
        self.assignment
            .as_ref()
            .map(|a| a.to_string())
            .ok_or(ClueError::AssignmentNotReady)
    }

    /// Measure how many draws the search needs for a player count
    pub fn simulate(&mut self, player_count: usize, trials: u64) -> ClueResult<SimulationReport> {
        generation::simulate(&self.config, player_count, trials, &mut self.rng)
    }

    /// Forget the current assignment and reveal selection
    pub fn reset(&mut self) {
        self.assignment = None;
        self.reveals = None;
        self.last_stats = None;
    }
}
