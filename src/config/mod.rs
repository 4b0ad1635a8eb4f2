//! Configuration management for the clue engine
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files. The clue deck (times, bucket table, special
//! routing) is data here, not logic in the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::clues::types::{normalize_player, TimeValue, VariantId};
use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Clue deck configuration
    #[serde(default)]
    pub clues: ClueConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bucket sizes for one supported player count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRow {
    /// Number of players this row applies to
    pub players: usize,

    /// Bucket sizes, one per player slot
    pub sizes: Vec<usize>,
}

impl BucketRow {
    pub fn new(players: usize, sizes: Vec<usize>) -> Self {
        Self { players, sizes }
    }
}

/// Clue deck and distribution rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClueConfig {
    /// Every clue time in the deck
    pub clue_times: Vec<TimeValue>,

    /// Bucket size table, keyed by player count
    pub bucket_sizes: Vec<BucketRow>,

    /// Two clues in one bucket must be more than this many minutes apart
    pub min_separation: TimeValue,

    /// The final clue; always routed to `special_player`
    pub terminal_time: TimeValue,

    /// Player who always receives the terminal clue
    pub special_player: String,

    /// Number of printed variants per clue time
    pub reveal_variants: VariantId,

    /// Variant used for the terminal clue (only one card exists)
    pub terminal_variant: VariantId,

    /// Fewest players a game can run with
    pub min_players: usize,

    /// Optional cap on rejection-sampling attempts (unbounded when `None`)
    pub max_attempts: Option<u64>,

    /// Directory holding `<time>/<time>-<variant>.png` card images
    pub clue_dir: PathBuf,
}

impl Default for ClueConfig {
    fn default() -> Self {
        Self {
            clue_times: vec![90, 80, 70, 60, 50, 45, 40, 35, 30, 25, 20, 15, 10],
            bucket_sizes: vec![
                BucketRow::new(3, vec![5, 4, 4]),
                BucketRow::new(4, vec![4, 3, 3, 3]),
                BucketRow::new(5, vec![3, 3, 3, 2, 2]),
            ],
            min_separation: 10,
            terminal_time: 90,
            special_player: String::from("charlie"),
            reveal_variants: 3,
            terminal_variant: 1,
            min_players: 3,
            max_attempts: None,
            clue_dir: PathBuf::from("assets/clues"),
        }
    }
}

impl ClueConfig {
    /// Bucket sizes for a player count
    pub fn sizes_for(&self, player_count: usize) -> Option<&[usize]> {
        self.bucket_sizes
            .iter()
            .find(|row| row.players == player_count)
            .map(|row| row.sizes.as_slice())
    }

    /// Player counts with a bucket table entry, ascending
    pub fn supported_player_counts(&self) -> Vec<usize> {
        let mut counts: Vec<_> = self.bucket_sizes.iter().map(|row| row.players).collect();
        counts.sort_unstable();
        counts
    }

    /// Check whether a time belongs to the deck
    pub fn is_clue_time(&self, time: TimeValue) -> bool {
        self.clue_times.contains(&time)
    }

    /// Normalized special player identifier
    pub fn special_player_id(&self) -> String {
        normalize_player(&self.special_player)
    }

    /// Validate the deck against the bucket table
    pub fn validate(&self) -> Result<()> {
        if self.clue_times.is_empty() {
            return Err(Error::config("clue_times must not be empty"));
        }

        let unique: HashSet<_> = self.clue_times.iter().collect();
        if unique.len() != self.clue_times.len() {
            return Err(Error::config("clue_times must not contain duplicates"));
        }

        let max = self.clue_times.iter().copied().max().unwrap_or_default();
        if self.terminal_time != max {
            return Err(Error::config(format!(
                "terminal_time {} must be the latest clue time ({})",
                self.terminal_time,
                max
            )));
        }

        if self.bucket_sizes.is_empty() {
            return Err(Error::config("bucket_sizes must have at least one row"));
        }

        let mut seen = HashSet::new();
        for row in &self.bucket_sizes {
            if !seen.insert(row.players) {
                return Err(Error::config(format!(
                    "bucket_sizes has more than one row for {} players",
                    row.players
                )));
            }
            if row.sizes.len() != row.players {
                return Err(Error::config(format!(
                    "bucket_sizes row for {} players lists {} buckets",
                    row.players,
                    row.sizes.len()
                )));
            }
            let total: usize = row.sizes.iter().sum();
            if total != self.clue_times.len() {
                return Err(Error::config(format!(
                    "bucket_sizes row for {} players sums to {} but the deck has {} clues",
                    row.players,
                    total,
                    self.clue_times.len()
                )));
            }
        }

        if self.special_player_id().is_empty() {
            return Err(Error::config("special_player must not be empty"));
        }

        if self.reveal_variants == 0 {
            return Err(Error::config("reveal_variants must be greater than 0"));
        }

        if self.terminal_variant == 0 || self.terminal_variant > self.reveal_variants {
            return Err(Error::config(format!(
                "terminal_variant must be between 1 and {}",
                self.reveal_variants
            )));
        }

        if self.min_players == 0 {
            return Err(Error::config("min_players must be greater than 0"));
        }

        if self.max_attempts == Some(0) {
            return Err(Error::config("max_attempts must be positive when set"));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("WHITERABBIT_CLUE_DIR") {
            config.clues.clue_dir = PathBuf::from(dir);
        }

        if let Ok(player) = std::env::var("WHITERABBIT_SPECIAL_PLAYER") {
            config.clues.special_player = player;
        }

        if let Ok(value) = std::env::var("WHITERABBIT_MAX_ATTEMPTS") {
            let attempts = value.parse::<u64>().map_err(|e| {
                Error::config(format!("Invalid WHITERABBIT_MAX_ATTEMPTS '{value}': {e}"))
            })?;
            config.clues.max_attempts = Some(attempts);
        }

        if let Ok(level) = std::env::var("WHITERABBIT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(format) = std::env::var("WHITERABBIT_LOG_FORMAT") {
            config.logging.format = format;
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// Fails with [`Error::Io`] if the file cannot be read and
    /// [`Error::Toml`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.clues.validate()?;

        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(Error::config(format!(
                    "logging.format must be 'text' or 'json', got '{other}'"
                )))
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_table() {
        let clues = ClueConfig::default();
        assert_eq!(clues.supported_player_counts(), vec![3, 4, 5]);
        assert_eq!(clues.sizes_for(4), Some(&[4, 3, 3, 3][..]));
        assert_eq!(clues.sizes_for(2), None);
        assert_eq!(clues.special_player_id(), "charlie");
    }

    #[test]
    fn test_row_sum_mismatch_rejected() {
        let mut clues = ClueConfig::default();
        clues.bucket_sizes.push(BucketRow::new(6, vec![3, 3, 3, 2, 1, 1]));
        assert!(clues.validate().is_ok());

        clues.bucket_sizes.push(BucketRow::new(2, vec![6, 6]));
        let err = clues.validate().unwrap_err();
        assert!(err.to_string().contains("sums to 12"));
    }

    #[test]
    fn test_terminal_must_be_max() {
        let clues = ClueConfig {
            terminal_time: 80,
            ..Default::default()
        };
        assert!(clues.validate().is_err());
    }

    #[test]
    fn test_duplicate_times_rejected() {
        let mut clues = ClueConfig::default();
        clues.clue_times.push(10);
        assert!(clues.validate().is_err());
    }

    #[test]
    fn test_terminal_variant_range() {
        let clues = ClueConfig {
            terminal_variant: 4,
            ..Default::default()
        };
        assert!(clues.validate().is_err());
    }

    #[test]
    fn test_zero_attempt_cap_rejected() {
        let clues = ClueConfig {
            max_attempts: Some(0),
            ..Default::default()
        };
        assert!(clues.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [clues]
            clue_times = [10, 20, 30, 40, 50, 60, 70, 80, 90]
            terminal_time = 90
            min_separation = 10

            [[clues.bucket_sizes]]
            players = 3
            sizes = [3, 3, 3]
            "#,
        )
        .unwrap();

        assert_eq!(config.clues.sizes_for(3), Some(&[3, 3, 3][..]));
        assert_eq!(config.clues.special_player, "charlie");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }
}
