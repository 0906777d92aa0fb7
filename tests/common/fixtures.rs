//! Test fixture creation for the review database
//!
//! The seeded catalog covers the interesting selection states: a fresh
//! bucket, a song already capped at three confirmed covers, and the overflow
//! bucket.

use super::constants::*;
use anyhow::Result;
use chrono::Utc;
use covervet_server::review_store::{CandidateCover, CoverStatus, Song, User};
use covervet_server::{ReviewStore, SqliteReviewStore};
use std::path::PathBuf;
use tempfile::TempDir;

fn unvoted_candidate(id: &str, title: &str) -> CandidateCover {
    CandidateCover {
        id: id.to_string(),
        title: Some(title.to_string()),
        uploader: Some("fixture uploader".to_string()),
        duration: Some(180.0),
        view_count: Some(12_345),
        like_count: Some(678),
        url: Some(format!("https://example.com/watch?v={}", id)),
        search_query: Some(format!("{} cover", title)),
        cover_num: Some(1),
        is_cover_votes: 0,
        is_not_cover_votes: 0,
        is_cover: CoverStatus::Unvoted,
        vote_timestamp: None,
    }
}

fn confirmed_candidate(id: &str, title: &str) -> CandidateCover {
    CandidateCover {
        is_cover_votes: 1,
        is_cover: CoverStatus::Cover,
        vote_timestamp: Some(Utc::now()),
        ..unvoted_candidate(id, title)
    }
}

fn song(
    original_id: &str,
    bucket: &str,
    number: i64,
    candidates: Vec<CandidateCover>,
) -> Song {
    Song {
        song_id: 0,
        original_id: original_id.to_string(),
        original_title: Some(format!("Original {}", original_id)),
        original_search_query: Some(format!("{} original song", original_id)),
        candidate_covers: candidates,
        assigned_user: bucket.to_string(),
        song_number: number,
    }
}

/// Creates a temporary review database seeded with 2 reviewers and 5 songs.
///
/// - `orig-1`, `orig-2`: Alice's bucket, all candidates unvoted
/// - `orig-3`: Bob's bucket, 3 confirmed covers + 2 unvoted (capped)
/// - `orig-4`: Bob's bucket, one unvoted candidate
/// - `orig-5`: overflow bucket
pub fn create_test_db() -> Result<(TempDir, PathBuf, SqliteReviewStore)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("review.db");
    let store = SqliteReviewStore::new(&db_path)?;

    let users = vec![
        User {
            name: TEST_USER_ALICE.to_string(),
        },
        User {
            name: TEST_USER_BOB.to_string(),
        },
    ];

    let songs = vec![
        song(
            SONG_1_ID,
            TEST_USER_ALICE,
            1,
            vec![
                unvoted_candidate("cand-a", "Cover A"),
                unvoted_candidate("cand-b", "Cover B"),
            ],
        ),
        song(
            "orig-2",
            TEST_USER_ALICE,
            2,
            vec![unvoted_candidate("cand-c", "Cover C")],
        ),
        song(
            SONG_3_ID,
            TEST_USER_BOB,
            3,
            vec![
                confirmed_candidate("cand-d", "Cover D"),
                confirmed_candidate("cand-e", "Cover E"),
                confirmed_candidate("cand-f", "Cover F"),
                unvoted_candidate("cand-g", "Cover G"),
                unvoted_candidate("cand-h", "Cover H"),
            ],
        ),
        song(
            SONG_4_ID,
            TEST_USER_BOB,
            4,
            vec![unvoted_candidate("cand-i", "Cover I")],
        ),
        song(
            "orig-5",
            "others",
            5,
            vec![unvoted_candidate("cand-j", "Cover J")],
        ),
    ];

    store.replace_all(&users, &songs)?;

    Ok((temp_dir, db_path, store))
}
