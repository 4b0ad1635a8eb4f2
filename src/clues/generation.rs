//! Rejection-sampling search for a valid partition
//!
//! Draws fresh partitions until one satisfies the separation constraint,
//! then shuffles the bucket order so slot position carries no bias.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::error::{ClueError, ClueResult};
use super::partition;
use super::types::Partition;
use super::validator;
use crate::config::ClueConfig;
use crate::metrics;

/// Diagnostics for one successful generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Partitions drawn, including the accepted one
    pub attempts: u64,

    /// Wall time spent searching
    pub elapsed: Duration,
}

/// Draw partitions until one is valid, then shuffle bucket order
///
/// Unbounded unless `config.max_attempts` is set, in which case the search
/// fails with [`ClueError::ConstraintInfeasible`] once the cap is reached.
pub fn generate_valid<R: Rng + ?Sized>(
    config: &ClueConfig,
    player_count: usize,
    rng: &mut R,
) -> ClueResult<(Partition, GenerationStats)> {
    let sizes = partition::bucket_sizes(config, player_count)?;
    let started = Instant::now();
    let mut attempts: u64 = 0;

    let mut accepted = loop {
        if let Some(cap) = config.max_attempts {
            if attempts >= cap {
                tracing::warn!(
                    player_count,
                    attempts,
                    min_separation = config.min_separation,
                    "Giving up on clue partition search"
                );
                metrics::record_infeasible(player_count);
                return Err(ClueError::ConstraintInfeasible { attempts });
            }
        }

        attempts += 1;
        let candidate = partition::random_partition(&config.clue_times, sizes, rng);
        if validator::is_partition_valid(&candidate, config.min_separation) {
            break candidate;
        }

        tracing::trace!(
            attempts,
            violation = ?candidate
                .buckets()
                .iter()
                .find_map(|b| validator::first_violation(b, config.min_separation)),
            "Rejected clue partition"
        );
    };

    accepted.buckets_mut().shuffle(rng);

    let stats = GenerationStats {
        attempts,
        elapsed: started.elapsed(),
    };

    tracing::debug!(
        player_count,
        attempts = stats.attempts,
        elapsed_us = stats.elapsed.as_micros() as u64,
        "Found valid clue partition"
    );
    metrics::record_generation(player_count, stats.attempts);

    Ok((accepted, stats))
}

/// Attempt statistics over many generations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub player_count: usize,
    pub trials: u64,
    pub mean_attempts: f64,
    pub max_attempts: u64,
    pub min_attempts: u64,
    pub total_elapsed: Duration,
}

impl SimulationReport {
    /// Format as display string
    pub fn display(&self) -> String {
        let mut output = format!("Generation statistics ({} players)\n", self.player_count);
        output.push_str(&format!("{:-<40}\n", ""));
        output.push_str(&format!("Trials: {}\n", self.trials));
        output.push_str(&format!("Mean attempts: {:.1}\n", self.mean_attempts));
        output.push_str(&format!(
            "Min/Max attempts: {}/{}\n",
            self.min_attempts, self.max_attempts
        ));
        output.push_str(&format!("Total time: {:?}\n", self.total_elapsed));
        output
    }
}

/// Run the search `trials` times and summarize how many draws it needed
pub fn simulate<R: Rng + ?Sized>(
    config: &ClueConfig,
    player_count: usize,
    trials: u64,
    rng: &mut R,
) -> ClueResult<SimulationReport> {
    let mut total: u64 = 0;
    let mut max = 0;
    let mut min = u64::MAX;
    let mut elapsed = Duration::ZERO;

    for _ in 0..trials {
        let (_, stats) = generate_valid(config, player_count, rng)?;
        total += stats.attempts;
        max = max.max(stats.attempts);
        min = min.min(stats.attempts);
        elapsed += stats.elapsed;
    }

    Ok(SimulationReport {
        player_count,
        trials,
        mean_attempts: if trials == 0 {
            0.0
        } else {
            total as f64 / trials as f64
        },
        max_attempts: max,
        min_attempts: if trials == 0 { 0 } else { min },
        total_elapsed: elapsed,
    })
}
