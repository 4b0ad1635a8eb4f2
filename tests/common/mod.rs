//! Common test utilities

use whiterabbit::config::{BucketRow, ClueConfig};

/// Nine clues ten minutes apart, three buckets of three
#[allow(dead_code)]
pub fn nine_clue_config() -> ClueConfig {
    ClueConfig {
        clue_times: (1..=9).map(|t| t * 10).collect(),
        bucket_sizes: vec![BucketRow::new(3, vec![3, 3, 3])],
        ..Default::default()
    }
}

/// Roster of owned names
#[allow(dead_code)]
pub fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Default roster for a player count, with charlie included
#[allow(dead_code)]
pub fn default_roster(player_count: usize) -> Vec<String> {
    ["alice", "bob", "charlie", "dana", "erin"]
        .iter()
        .take(player_count)
        .map(|n| n.to_string())
        .collect()
}
