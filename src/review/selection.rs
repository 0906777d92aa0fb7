//! Pair selection: finds the next candidate awaiting a decision in a bucket.

use crate::review_store::{CandidateCover, Song};

/// Once a song has this many confirmed covers it stops being offered for
/// review, even if unvoted candidates remain.
pub const RESOLVED_COVERS_CAP: usize = 3;

/// A candidate offered for review, together with the stable reference to its
/// owning song and its position in the song's candidate list.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingPair {
    pub song_id: i64,
    pub original_id: String,
    pub original_title: Option<String>,
    pub candidate: CandidateCover,
    pub candidate_position: usize,
}

/// Scans the bucket's songs (already in `song_number` order) and returns the
/// first unvoted candidate of the first unresolved song.
///
/// Songs with [`RESOLVED_COVERS_CAP`] or more confirmed covers are skipped
/// wholesale, remaining candidates included. The scan holds no state between
/// calls: with no intervening vote, repeated calls return the identical pair.
/// `None` means the bucket is exhausted, which is a terminal signal rather
/// than an error.
pub fn next_pending_pair(songs: &[Song]) -> Option<PendingPair> {
    for song in songs {
        let confirmed = song
            .candidate_covers
            .iter()
            .filter(|c| c.is_cover.is_cover())
            .count();
        if confirmed >= RESOLVED_COVERS_CAP {
            continue;
        }

        for (position, candidate) in song.candidate_covers.iter().enumerate() {
            if candidate.is_cover.is_unvoted() {
                return Some(PendingPair {
                    song_id: song.song_id,
                    original_id: song.original_id.clone(),
                    original_title: song.original_title.clone(),
                    candidate: candidate.clone(),
                    candidate_position: position,
                });
            }
        }
    }

    None
}
