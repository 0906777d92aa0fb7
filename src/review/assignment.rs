//! Bucket assignment: partitions the catalog among reviewers at ingestion.

use crate::review_store::Song;

/// Bucket for songs beyond the last reviewer chunk, and for logins that match
/// no registered reviewer.
pub const OVERFLOW_BUCKET: &str = "others";

/// Splits the ordered song list into contiguous chunks, one per registered
/// user name plus the overflow bucket, and stamps each song with its bucket
/// and 1-based catalog position.
///
/// `chunk_size` is `ceil(N / (M + 1))`, so integer rounding can leave the
/// tail buckets short or even empty. That skew is kept as-is; assignments are
/// recomputed from scratch on every ingestion.
pub fn assign_buckets(songs: &mut [Song], user_names: &[String]) {
    let mut buckets: Vec<&str> = user_names.iter().map(String::as_str).collect();
    buckets.push(OVERFLOW_BUCKET);
    let chunk_size = songs.len().div_ceil(buckets.len());

    for (index, song) in songs.iter_mut().enumerate() {
        let bucket_index = index / chunk_size;
        song.assigned_user = buckets
            .get(bucket_index)
            .copied()
            .unwrap_or(OVERFLOW_BUCKET)
            .to_string();
        song.song_number = index as i64 + 1;
    }
}
