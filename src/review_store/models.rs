//! Models for the review store.
//!
//! These mirror the shapes consumed and produced by the JSON API: a song
//! catalog where each song owns an ordered list of candidate covers, and
//! reviewers accumulate yes/no votes on each candidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered reviewer. The name keeps its original casing; matching
/// against login input is case-insensitive.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// Validation state of a candidate cover.
///
/// Explicit tri-state rather than `Option<bool>` so "never voted on" cannot
/// be confused with "voted down". On the wire and in the database it still
/// travels as a nullable boolean for compatibility with the existing dataset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CoverStatus {
    #[default]
    Unvoted,
    Cover,
    NotCover,
}

impl CoverStatus {
    pub fn is_unvoted(self) -> bool {
        self == CoverStatus::Unvoted
    }

    pub fn is_cover(self) -> bool {
        self == CoverStatus::Cover
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            CoverStatus::Unvoted => None,
            CoverStatus::Cover => Some(true),
            CoverStatus::NotCover => Some(false),
        }
    }

    /// Convert from the nullable integer column representation.
    pub fn from_db(value: Option<i64>) -> Self {
        match value {
            None => CoverStatus::Unvoted,
            Some(0) => CoverStatus::NotCover,
            Some(_) => CoverStatus::Cover,
        }
    }

    /// Convert to the nullable integer column representation.
    pub fn to_db(self) -> Option<i64> {
        self.as_bool().map(i64::from)
    }
}

impl From<Option<bool>> for CoverStatus {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => CoverStatus::Unvoted,
            Some(true) => CoverStatus::Cover,
            Some(false) => CoverStatus::NotCover,
        }
    }
}

impl Serialize for CoverStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_bool().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CoverStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.into())
    }
}

/// A candidate recording that may or may not be a cover of its owning song.
///
/// Owned exclusively by one [`Song`]; `id` is the source identifier of the
/// recording and is only unique within the owning song's list (after
/// deduplication), not across the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateCover {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub view_count: Option<i64>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub cover_num: Option<i64>,
    #[serde(default)]
    pub is_cover_votes: i64,
    #[serde(default)]
    pub is_not_cover_votes: i64,
    #[serde(rename = "isCover", default)]
    pub is_cover: CoverStatus,
    #[serde(default)]
    pub vote_timestamp: Option<DateTime<Utc>>,
}

/// An original song with its candidate covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Store-assigned identifier, the stable reference used by the pair and
    /// vote operations. Zero until the song has been persisted.
    #[serde(default)]
    pub song_id: i64,
    pub original_id: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_search_query: Option<String>,
    #[serde(default)]
    pub candidate_covers: Vec<CandidateCover>,
    /// Bucket label: a registered user name or the overflow sentinel.
    pub assigned_user: String,
    /// 1-based position in the original ingestion order.
    pub song_number: i64,
}

/// One row of the global votes dump: a candidate that has received at least
/// one vote, flattened together with its owning song.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VotedPair {
    pub user: String,
    pub original_title: Option<String>,
    pub candidate_title: Option<String>,
    pub candidate_id: String,
    pub is_cover: bool,
    pub votes_yes: i64,
    pub votes_no: i64,
}
