//! Bucket-to-player assignment
//!
//! Routes the bucket holding the terminal clue to the special player, then
//! hands the remaining buckets to the rest of the roster in roster order.

use std::collections::HashSet;

use super::error::{ClueError, ClueResult};
use super::types::{normalize_player, Assignment, Bucket, PlayerClues, TimeValue};

/// Normalize and check a roster against the requested player count
///
/// The special player must be present; identifiers must be unique after
/// normalization. Roster order is preserved.
pub fn prepare_roster<S: AsRef<str>>(
    roster: &[S],
    player_count: usize,
    special_player: &str,
) -> ClueResult<Vec<String>> {
    if roster.len() != player_count {
        return Err(ClueError::RosterSizeMismatch {
            expected: player_count,
            actual: roster.len(),
        });
    }

    let names: Vec<String> = roster
        .iter()
        .map(|n| normalize_player(n.as_ref()))
        .collect();

    let mut seen = HashSet::with_capacity(names.len());
    for name in &names {
        if !seen.insert(name.as_str()) {
            return Err(ClueError::DuplicatePlayer {
                player: name.clone(),
            });
        }
    }

    let special = normalize_player(special_player);
    if !seen.contains(special.as_str()) {
        return Err(ClueError::SpecialPlayerMissing { player: special });
    }

    Ok(names)
}

/// Build an assignment from an order-shuffled pool of buckets
///
/// The terminal bucket goes to `special_player` wherever it sits in the pool.
/// Every other roster entry, in roster order, takes the bucket popped next
/// from the end of the pool. Stored times are sorted descending.
pub fn resolve(
    mut pool: Vec<Bucket>,
    roster: &[String],
    terminal_time: TimeValue,
    special_player: &str,
) -> ClueResult<Assignment> {
    let Some(position) = pool.iter().position(|b| b.contains(terminal_time)) else {
        tracing::error!(
            terminal_time,
            buckets = pool.len(),
            "Terminal clue missing from every bucket; deck and bucket table disagree"
        );
        return Err(ClueError::TerminalValueMissing {
            time: terminal_time,
        });
    };

    let special = normalize_player(special_player);
    let mut entries = Vec::with_capacity(roster.len());
    entries.push(PlayerClues {
        player: special.clone(),
        times: pool.remove(position).into_sorted_desc(),
    });

    let others: Vec<&String> = roster.iter().filter(|name| **name != special).collect();
    if others.len() != pool.len() {
        return Err(ClueError::RosterSizeMismatch {
            expected: pool.len() + 1,
            actual: others.len() + 1,
        });
    }

    for name in others {
        if let Some(bucket) = pool.pop() {
            entries.push(PlayerClues {
                player: name.clone(),
                times: bucket.into_sorted_desc(),
            });
        }
    }

    Ok(Assignment::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_terminal_bucket_routed_to_special_player() {
        let pool = vec![
            Bucket::new(vec![10, 40, 70]),
            Bucket::new(vec![20, 50, 80]),
            Bucket::new(vec![30, 60, 90]),
        ];

        let assignment =
            resolve(pool, &roster(&["alice", "bob", "charlie"]), 90, "charlie").unwrap();

        assert_eq!(
            assignment.clues_for("charlie").unwrap().times,
            vec![90, 60, 30]
        );
        assert_eq!(assignment.owner_of(90), Some("charlie"));
    }

    #[test]
    fn test_remaining_buckets_follow_roster_order() {
        let pool = vec![
            Bucket::new(vec![30, 60, 90]),
            Bucket::new(vec![10, 40, 70]),
            Bucket::new(vec![20, 50, 80]),
        ];

        let assignment =
            resolve(pool, &roster(&["alice", "bob", "charlie"]), 90, "charlie").unwrap();

        // alice pops first (last bucket left in the pool), bob next
        assert_eq!(
            assignment.clues_for("alice").unwrap().times,
            vec![80, 50, 20]
        );
        assert_eq!(
            assignment.clues_for("bob").unwrap().times,
            vec![70, 40, 10]
        );

        let players: Vec<_> = assignment.players().collect();
        assert_eq!(players, vec!["charlie", "alice", "bob"]);
    }

    #[test]
    fn test_special_player_position_in_roster_is_irrelevant() {
        let pool = vec![
            Bucket::new(vec![20, 50, 80]),
            Bucket::new(vec![10, 40, 70]),
            Bucket::new(vec![30, 60, 90]),
        ];

        let assignment =
            resolve(pool, &roster(&["charlie", "bob", "alice"]), 90, "charlie").unwrap();

        assert_eq!(
            assignment.clues_for("charlie").unwrap().times,
            vec![90, 60, 30]
        );
        assert_eq!(
            assignment.clues_for("bob").unwrap().times,
            vec![70, 40, 10]
        );
        assert_eq!(
            assignment.clues_for("alice").unwrap().times,
            vec![80, 50, 20]
        );
    }

    #[test]
    fn test_missing_terminal_is_error() {
        let pool = vec![Bucket::new(vec![10, 40]), Bucket::new(vec![20, 50])];
        let err = resolve(pool, &roster(&["alice", "charlie"]), 90, "charlie").unwrap_err();
        assert_eq!(err, ClueError::TerminalValueMissing { time: 90 });
        assert!(err.is_fatal());
    }

    #[test]
    fn test_prepare_roster_normalizes() {
        let names = prepare_roster(&[" Alice", "BOB", "Charlie "], 3, "charlie").unwrap();
        assert_eq!(names, vec!["alice", "bob", "charlie"]);
    }

    #[test]
    fn test_prepare_roster_size_mismatch() {
        let err = prepare_roster(&["alice", "charlie"], 3, "charlie").unwrap_err();
        assert_eq!(
            err,
            ClueError::RosterSizeMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_prepare_roster_duplicates() {
        let err = prepare_roster(&["alice", "Alice", "charlie"], 3, "charlie").unwrap_err();
        assert!(matches!(
            err,
            ClueError::DuplicatePlayer { player } if player == "alice"
        ));
    }

    #[test]
    fn test_prepare_roster_requires_special_player() {
        let err = prepare_roster(&["alice", "bob", "dana"], 3, "Charlie").unwrap_err();
        assert!(matches!(
            err,
            ClueError::SpecialPlayerMissing { player } if player == "charlie"
        ));
    }
}
