//! ReviewStore trait definition.
//!
//! Abstracts persistence of the reviewer list and the song catalog so the
//! server and the import pipeline never touch a concrete database handle.

use super::models::{Song, User, VotedPair};
use anyhow::Result;

/// Aggregate counts, logged at startup and after an import.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StoreCounts {
    pub users: usize,
    pub songs: usize,
    pub candidates: usize,
}

pub trait ReviewStore: Send + Sync {
    /// Replaces the entire content of the store with the given users and
    /// songs, as a single transaction. Either everything is swapped or the
    /// previous content survives untouched.
    ///
    /// Songs are inserted in slice order; the store-assigned ids are not
    /// reported back, callers re-read through the query methods.
    fn replace_all(&self, users: &[User], songs: &[Song]) -> Result<()>;

    /// Returns all registered user names in registration order, with their
    /// original casing.
    fn get_user_names(&self) -> Result<Vec<String>>;

    /// Returns the songs assigned to the given bucket, ordered by
    /// `song_number` ascending, each with its candidates in stored order.
    fn get_songs_by_bucket(&self, bucket: &str) -> Result<Vec<Song>>;

    /// Returns a song by its store id.
    /// Returns Ok(None) if the song does not exist.
    fn get_song(&self, song_id: i64) -> Result<Option<Song>>;

    /// Applies one vote to the candidate at `position` within the song.
    /// Increments the matching tally, recomputes the consensus state and
    /// stamps the vote time, all inside one transaction.
    ///
    /// Returns Ok(None) if the song does not exist or the position is out of
    /// range. Returns Err if there is a database error.
    fn record_vote(&self, song_id: i64, position: usize, is_cover: bool) -> Result<Option<()>>;

    /// Returns every candidate that has received at least one vote, flattened
    /// with its owning song, ordered by `(song_number, position)`.
    fn list_voted(&self) -> Result<Vec<VotedPair>>;

    /// Returns all songs with at least one confirmed cover, candidates
    /// filtered down to the confirmed ones.
    fn list_confirmed(&self) -> Result<Vec<Song>>;

    /// Returns the full, unfiltered catalog.
    fn dump_all(&self) -> Result<Vec<Song>>;

    /// Returns aggregate counts over the whole store.
    fn counts(&self) -> Result<StoreCounts>;
}
