//! Vote consensus: tally accumulation and strict-majority recomputation.

use crate::review_store::{CandidateCover, CoverStatus};
use chrono::{DateTime, Utc};

/// Strict majority: more yes than no votes makes a cover; a tie does not.
pub fn consensus(yes_votes: i64, no_votes: i64) -> CoverStatus {
    if yes_votes > no_votes {
        CoverStatus::Cover
    } else {
        CoverStatus::NotCover
    }
}

/// Applies one vote to the candidate: bumps the matching tally, recomputes
/// the consensus state and stamps the vote time.
///
/// Votes are deliberately not deduplicated per reviewer; a repeated vote
/// counts again and reinforces (or erodes) the consensus.
pub fn apply_vote(candidate: &mut CandidateCover, is_cover: bool, now: DateTime<Utc>) {
    if is_cover {
        candidate.is_cover_votes += 1;
    } else {
        candidate.is_not_cover_votes += 1;
    }
    candidate.is_cover = consensus(candidate.is_cover_votes, candidate.is_not_cover_votes);
    candidate.vote_timestamp = Some(now);
}
