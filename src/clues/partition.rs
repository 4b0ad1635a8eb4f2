//! Random partitioning of the clue deck into player buckets

use rand::{seq::SliceRandom, Rng};

use super::error::{ClueError, ClueResult};
use super::types::{Bucket, Partition, TimeValue};
use crate::config::ClueConfig;

/// Look up the bucket sizes for a player count
pub fn bucket_sizes(config: &ClueConfig, player_count: usize) -> ClueResult<&[usize]> {
    config.sizes_for(player_count).ok_or_else(|| {
        ClueError::unsupported_player_count(player_count, config.supported_player_counts())
    })
}

/// Shuffle the deck and slice it into buckets of the given sizes
///
/// Every permutation of `domain` is equally likely. Bucket `i` takes the next
/// `sizes[i]` times from the front of the shuffled deck.
pub fn random_partition<R: Rng + ?Sized>(
    domain: &[TimeValue],
    sizes: &[usize],
    rng: &mut R,
) -> Partition {
    let mut deck = domain.to_vec();
    deck.shuffle(rng);

    let mut remaining = deck.into_iter();
    let buckets = sizes
        .iter()
        .map(|&size| Bucket::new(remaining.by_ref().take(size).collect()))
        .collect();

    Partition::new(buckets)
}

/// Draw one partition for a player count using the configured deck
pub fn generate<R: Rng + ?Sized>(
    config: &ClueConfig,
    player_count: usize,
    rng: &mut R,
) -> ClueResult<Partition> {
    let sizes = bucket_sizes(config, player_count)?;
    Ok(random_partition(&config.clue_times, sizes, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_partition_matches_sizes() {
        let config = ClueConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for players in config.supported_player_counts() {
            let partition = generate(&config, players, &mut rng).unwrap();
            assert_eq!(partition.shape(), config.sizes_for(players).unwrap());
        }
    }

    #[test]
    fn test_partition_uses_every_time_once() {
        let config = ClueConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let partition = generate(&config, 4, &mut rng).unwrap();

        let mut expected = config.clue_times.clone();
        expected.sort_unstable();
        assert_eq!(partition.all_times(), expected);
    }

    #[test]
    fn test_unsupported_player_count() {
        let config = ClueConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = generate(&config, 2, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            ClueError::UnsupportedPlayerCount { player_count: 2, .. }
        ));
    }

    #[test]
    fn test_same_seed_same_partition() {
        let config = ClueConfig::default();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(
            generate(&config, 5, &mut a).unwrap(),
            generate(&config, 5, &mut b).unwrap()
        );
    }

    #[test]
    fn test_zero_sized_bucket() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let partition = random_partition(&[10, 20, 30], &[2, 0, 1], &mut rng);
        assert_eq!(partition.shape(), vec![2, 0, 1]);
    }
}
