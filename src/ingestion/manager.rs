//! Bulk ingestion: reads the external dataset files, deduplicates candidate
//! lists, distributes songs into reviewer buckets and swaps the store content
//! in one transaction.

use super::models::{SongRecord, UserRecord};
use crate::review::{assign_buckets, dedup_candidates};
use crate::review_store::{ReviewStore, Song, User};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// What an import run did, for logging and assertions.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImportSummary {
    pub users: usize,
    pub songs: usize,
    pub candidates: usize,
    pub duplicates_dropped: usize,
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestionError> {
    let content = fs::read_to_string(path).map_err(|source| IngestionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| IngestionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Runs a full import: previous users and songs are replaced wholesale.
///
/// The store swap is a single transaction, so a failure at any point leaves
/// the previously ingested data intact.
pub fn run_import(
    store: &dyn ReviewStore,
    users_path: &Path,
    covers_path: &Path,
) -> Result<ImportSummary, IngestionError> {
    let user_records: Vec<UserRecord> = read_json_file(users_path)?;
    let song_records: Vec<SongRecord> = read_json_file(covers_path)?;
    info!(
        "Loaded {} users and {} songs from dataset files",
        user_records.len(),
        song_records.len()
    );

    let users: Vec<User> = user_records
        .into_iter()
        .map(|record| User { name: record.name })
        .collect();
    let user_names: Vec<String> = users.iter().map(|user| user.name.clone()).collect();

    let mut duplicates_dropped = 0;
    let mut songs: Vec<Song> = song_records
        .into_iter()
        .map(|record| {
            let raw_count = record.candidate_covers.len();
            let candidate_covers = dedup_candidates(record.candidate_covers);
            duplicates_dropped += raw_count - candidate_covers.len();
            Song {
                song_id: 0,
                original_id: record.original_id,
                original_title: record.original_title,
                original_search_query: record.original_search_query,
                candidate_covers,
                assigned_user: String::new(),
                song_number: 0,
            }
        })
        .collect();

    assign_buckets(&mut songs, &user_names);

    store.replace_all(&users, &songs)?;

    let summary = ImportSummary {
        users: users.len(),
        songs: songs.len(),
        candidates: songs.iter().map(|song| song.candidate_covers.len()).sum(),
        duplicates_dropped,
    };
    info!(
        "Imported {} users, {} songs, {} candidates ({} duplicate candidates dropped)",
        summary.users, summary.songs, summary.candidates, summary.duplicates_dropped
    );
    Ok(summary)
}
