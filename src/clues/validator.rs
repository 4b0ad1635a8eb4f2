//! Minimum-separation constraint on clue buckets

use super::types::{Bucket, Partition, TimeValue};

/// Check a single bucket: every pair of times must be more than `min_separation` apart
pub fn is_bucket_valid(bucket: &Bucket, min_separation: TimeValue) -> bool {
    let times = bucket.times();
    times.iter().enumerate().all(|(i, &a)| {
        times[i + 1..]
            .iter()
            .all(|&b| a.abs_diff(b) > min_separation)
    })
}

/// Check every bucket independently; buckets are never compared to each other
pub fn is_partition_valid(partition: &Partition, min_separation: TimeValue) -> bool {
    partition
        .buckets()
        .iter()
        .all(|bucket| is_bucket_valid(bucket, min_separation))
}

/// First offending pair in a bucket, logged when a draw is rejected
pub fn first_violation(
    bucket: &Bucket,
    min_separation: TimeValue,
) -> Option<(TimeValue, TimeValue)> {
    let times = bucket.times();
    for (i, &a) in times.iter().enumerate() {
        for &b in &times[i + 1..] {
            if a.abs_diff(b) <= min_separation {
                return Some((a, b));
            }
        }
    }
    None
}
