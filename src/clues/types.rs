//! Core data structures for clue distribution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Clue time in minutes before the end of the game
pub type TimeValue = u32;

/// Which printed card to show for a clue time
pub type VariantId = u8;

/// Normalize a roster identifier (trimmed, lowercase)
pub fn normalize_player(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Title-case a name the way the bot displayed roles
///
/// A letter is uppercased when it follows a non-letter (start, space, `-`,
/// `'`, digit) and lowercased otherwise, so `o'brien-smith` becomes
/// `O'Brien-Smith`.
pub fn title_case(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut prev_is_letter = false;

    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
        } else {
            output.push(c);
        }
        prev_is_letter = c.is_alphabetic();
    }

    output
}

// ============================================================================
// Bucket
// ============================================================================

/// An unordered group of clue times destined for one player slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    times: Vec<TimeValue>,
}

impl Bucket {
    pub fn new(times: Vec<TimeValue>) -> Self {
        Self { times }
    }

    pub fn times(&self) -> &[TimeValue] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn contains(&self, time: TimeValue) -> bool {
        self.times.contains(&time)
    }

    /// Consume the bucket, returning its times in descending order
    pub fn into_sorted_desc(mut self) -> Vec<TimeValue> {
        self.times.sort_unstable_by(|a, b| b.cmp(a));
        self.times
    }
}

impl From<Vec<TimeValue>> for Bucket {
    fn from(times: Vec<TimeValue>) -> Self {
        Self::new(times)
    }
}

// ============================================================================
// Partition
// ============================================================================

/// Full division of the clue domain into buckets, one per player slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    buckets: Vec<Bucket>,
}

impl Partition {
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn buckets_mut(&mut self) -> &mut [Bucket] {
        &mut self.buckets
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket sizes in slot order
    pub fn shape(&self) -> Vec<usize> {
        self.buckets.iter().map(Bucket::len).collect()
    }

    /// Every time in the partition, sorted ascending
    pub fn all_times(&self) -> Vec<TimeValue> {
        let mut times: Vec<_> = self
            .buckets
            .iter()
            .flat_map(|b| b.times().iter().copied())
            .collect();
        times.sort_unstable();
        times
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// One player's share of the clue deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClues {
    /// Normalized player identifier
    pub player: String,

    /// Clue times, descending
    pub times: Vec<TimeValue>,
}

impl PlayerClues {
    pub fn owns(&self, time: TimeValue) -> bool {
        self.times.contains(&time)
    }
}

/// Final player → bucket mapping for one game session
///
/// Entries keep insertion order: the special player first, then the
/// remaining players in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    entries: Vec<PlayerClues>,

    /// When this assignment was generated
    pub generated_at: DateTime<Utc>,
}

impl Assignment {
    pub fn new(entries: Vec<PlayerClues>) -> Self {
        Self {
            entries,
            generated_at: Utc::now(),
        }
    }

    pub fn entries(&self) -> &[PlayerClues] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clues held by a player (identifier is normalized before lookup)
    pub fn clues_for(&self, player: &str) -> Option<&PlayerClues> {
        let player = normalize_player(player);
        self.entries.iter().find(|e| e.player == player)
    }

    /// Player holding a given clue time
    pub fn owner_of(&self, time: TimeValue) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.owns(time))
            .map(|e| e.player.as_str())
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.player.as_str())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| {
                let times: Vec<String> = e.times.iter().map(|t| t.to_string()).collect();
                format!("{}: {}", title_case(&e.player), times.join(", "))
            })
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

// ============================================================================
// Reveal Selection
// ============================================================================

/// Per-time choice of which printed card is revealed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealSelection {
    variants: BTreeMap<TimeValue, VariantId>,

    /// When this selection was drawn
    pub shuffled_at: Option<DateTime<Utc>>,
}

impl RevealSelection {
    pub fn new(variants: BTreeMap<TimeValue, VariantId>) -> Self {
        Self {
            variants,
            shuffled_at: Some(Utc::now()),
        }
    }

    pub fn variant(&self, time: TimeValue) -> Option<VariantId> {
        self.variants.get(&time).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeValue, VariantId)> + '_ {
        self.variants.iter().map(|(t, v)| (*t, *v))
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

// ============================================================================
// Clue Card
// ============================================================================

/// A resolved clue card: the time plus the variant chosen for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClueCard {
    pub time: TimeValue,
    pub variant: VariantId,
}

impl ClueCard {
    pub fn new(time: TimeValue, variant: VariantId) -> Self {
        Self { time, variant }
    }

    /// Image file name, e.g. `45-2.png`
    pub fn file_name(&self) -> String {
        format!("{}-{}.png", self.time, self.variant)
    }

    /// Cards are grouped in one directory per time: `<dir>/<time>/<time>-<variant>.png`
    pub fn path_in(&self, clue_dir: &Path) -> PathBuf {
        clue_dir.join(self.time.to_string()).join(self.file_name())
    }
}

impl fmt::Display for ClueCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minute clue (card {})", self.time, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_player() {
        assert_eq!(normalize_player("  Charlie "), "charlie");
        assert_eq!(normalize_player("BOB"), "bob");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("charlie"), "Charlie");
        assert_eq!(title_case("mister rabbit"), "Mister Rabbit");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("o'brien-smith"), "O'Brien-Smith");
        assert_eq!(title_case("mcDONALD"), "Mcdonald");
        assert_eq!(title_case("player 2nd"), "Player 2Nd");
    }

    #[test]
    fn test_bucket_sorted_desc() {
        let bucket = Bucket::new(vec![20, 90, 45]);
        assert!(bucket.contains(45));
        assert_eq!(bucket.into_sorted_desc(), vec![90, 45, 20]);
    }

    #[test]
    fn test_partition_shape_and_times() {
        let partition = Partition::new(vec![
            Bucket::new(vec![30, 10]),
            Bucket::new(vec![20]),
            Bucket::new(vec![]),
        ]);
        assert_eq!(partition.shape(), vec![2, 1, 0]);
        assert_eq!(partition.all_times(), vec![10, 20, 30]);
    }

    #[test]
    fn test_assignment_lookup_is_normalized() {
        let assignment = Assignment::new(vec![
            PlayerClues {
                player: "charlie".to_string(),
                times: vec![90, 60],
            },
            PlayerClues {
                player: "alice".to_string(),
                times: vec![70, 40],
            },
        ]);

        assert!(assignment.clues_for("Charlie").is_some());
        assert_eq!(assignment.owner_of(40), Some("alice"));
        assert_eq!(assignment.owner_of(15), None);
    }

    #[test]
    fn test_assignment_display() {
        let assignment = Assignment::new(vec![
            PlayerClues {
                player: "charlie".to_string(),
                times: vec![90, 60],
            },
            PlayerClues {
                player: "alice".to_string(),
                times: vec![70, 40],
            },
        ]);
        assert_eq!(assignment.to_string(), "Charlie: 90, 60\nAlice: 70, 40");
    }

    #[test]
    fn test_clue_card_path() {
        let card = ClueCard::new(45, 2);
        assert_eq!(card.file_name(), "45-2.png");
        assert_eq!(
            card.path_in(Path::new("assets/clues")),
            PathBuf::from("assets/clues/45/45-2.png")
        );
    }
}
