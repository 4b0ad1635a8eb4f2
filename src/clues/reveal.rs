//! Reveal variant selection
//!
//! Each clue time has several printed cards; one is picked per shuffle.

use rand::Rng;
use std::collections::BTreeMap;

use super::types::{RevealSelection, TimeValue, VariantId};

/// Draw a variant in `1..=variants` for every time, pinning `terminal_time`
/// to `terminal_variant`
pub fn draw<R: Rng + ?Sized>(
    clue_times: &[TimeValue],
    variants: VariantId,
    terminal_time: TimeValue,
    terminal_variant: VariantId,
    rng: &mut R,
) -> RevealSelection {
    let upper = variants.max(1);
    let picks: BTreeMap<TimeValue, VariantId> = clue_times
        .iter()
        .map(|&time| {
            let variant = if time == terminal_time {
                terminal_variant
            } else {
                rng.gen_range(1..=upper)
            };
            (time, variant)
        })
        .collect();

    RevealSelection::new(picks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TIMES: [TimeValue; 13] = [90, 80, 70, 60, 50, 45, 40, 35, 30, 25, 20, 15, 10];

    #[test]
    fn test_terminal_always_variant_one() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let selection = draw(&TIMES, 3, 90, 1, &mut rng);
            assert_eq!(selection.variant(90), Some(1));
        }
    }

    #[test]
    fn test_variants_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let selection = draw(&TIMES, 3, 90, 1, &mut rng);

        assert_eq!(selection.len(), TIMES.len());
        for (_, variant) in selection.iter() {
            assert!((1..=3).contains(&variant));
        }
    }

    #[test]
    fn test_all_variants_eventually_drawn() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut seen = [false; 3];
        for _ in 0..30 {
            let selection = draw(&TIMES, 3, 90, 1, &mut rng);
            let v = selection.variant(45).unwrap();
            seen[(v - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
