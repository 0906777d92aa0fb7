//! Candidate deduplication at ingestion time.

use crate::review_store::CandidateCover;
use std::collections::HashSet;

/// Drops candidates whose `id` already appeared earlier in the list, keeping
/// the first occurrence and the original relative order. Idempotent.
pub fn dedup_candidates(candidates: Vec<CandidateCover>) -> Vec<CandidateCover> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.id.clone()))
        .collect()
}
