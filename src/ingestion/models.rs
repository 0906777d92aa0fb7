//! Raw record shapes for the external ingestion files.

use crate::review_store::CandidateCover;
use serde::Deserialize;

/// One entry of the reviewer list file (`users.json`).
#[derive(Clone, Debug, Deserialize)]
pub struct UserRecord {
    pub name: String,
}

/// One entry of the song dataset file (`covers.json`): an original song with
/// its raw, possibly duplicated candidate list.
#[derive(Clone, Debug, Deserialize)]
pub struct SongRecord {
    pub original_id: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_search_query: Option<String>,
    #[serde(default)]
    pub candidate_covers: Vec<CandidateCover>,
}
