//! SQLite-backed review store implementation.

use super::models::{CandidateCover, CoverStatus, Song, User, VotedPair};
use super::schema::REVIEW_VERSIONED_SCHEMAS;
use super::trait_def::{ReviewStore, StoreCounts};
use crate::review::consensus::apply_vote;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ToSql};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SONG_COLUMNS: &str =
    "id, original_id, original_title, original_search_query, assigned_user, song_number";

const CANDIDATE_COLUMNS: &str = "source_id, title, uploader, duration, view_count, like_count, \
     url, search_query, cover_num, is_cover_votes, is_not_cover_votes, is_cover, vote_timestamp";

/// Store for reviewers and the song catalog.
#[derive(Clone)]
pub struct SqliteReviewStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteReviewStore {
    /// Open (or create) the review database at the given path.
    ///
    /// Initializes the schema if the tables don't exist. Use `":memory:"`
    /// for an ephemeral database.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open review database")?;
        conn.execute("PRAGMA foreign_keys = ON;", params![])?;

        let schema = REVIEW_VERSIONED_SCHEMAS.first().unwrap();
        conn.execute_batch(schema.up)
            .context("Failed to initialize review schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn song_from_row(row: &rusqlite::Row) -> rusqlite::Result<Song> {
    Ok(Song {
        song_id: row.get(0)?,
        original_id: row.get(1)?,
        original_title: row.get(2)?,
        original_search_query: row.get(3)?,
        candidate_covers: Vec::new(),
        assigned_user: row.get(4)?,
        song_number: row.get(5)?,
    })
}

fn candidate_from_row(row: &rusqlite::Row) -> rusqlite::Result<CandidateCover> {
    let vote_timestamp: Option<i64> = row.get(12)?;
    Ok(CandidateCover {
        id: row.get(0)?,
        title: row.get(1)?,
        uploader: row.get(2)?,
        duration: row.get(3)?,
        view_count: row.get(4)?,
        like_count: row.get(5)?,
        url: row.get(6)?,
        search_query: row.get(7)?,
        cover_num: row.get(8)?,
        is_cover_votes: row.get(9)?,
        is_not_cover_votes: row.get(10)?,
        is_cover: CoverStatus::from_db(row.get(11)?),
        vote_timestamp: vote_timestamp.and_then(|secs| DateTime::from_timestamp(secs, 0)),
    })
}

/// Loads songs matching `where_sql` (candidates not yet attached).
fn query_songs(conn: &Connection, where_sql: &str, args: &[&dyn ToSql]) -> Result<Vec<Song>> {
    let sql = format!(
        "SELECT {} FROM songs {} ORDER BY song_number ASC",
        SONG_COLUMNS, where_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let songs = stmt
        .query_map(args, song_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(songs)
}

/// Attaches candidates to each song, in stored (position) order.
fn fill_candidates(conn: &Connection, songs: &mut [Song], only_confirmed: bool) -> Result<()> {
    let filter = if only_confirmed { "AND is_cover = 1" } else { "" };
    let sql = format!(
        "SELECT {} FROM candidate_covers WHERE song_id = ?1 {} ORDER BY position ASC",
        CANDIDATE_COLUMNS, filter
    );
    let mut stmt = conn.prepare(&sql)?;
    for song in songs.iter_mut() {
        song.candidate_covers = stmt
            .query_map(params![song.song_id], candidate_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
    }
    Ok(())
}

impl ReviewStore for SqliteReviewStore {
    fn replace_all(&self, users: &[User], songs: &[Song]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            tx.execute("DELETE FROM candidate_covers", [])?;
            tx.execute("DELETE FROM songs", [])?;
            tx.execute("DELETE FROM users", [])?;

            let mut insert_user = tx.prepare("INSERT INTO users (name) VALUES (?1)")?;
            for user in users {
                insert_user
                    .execute(params![user.name])
                    .with_context(|| format!("Failed to insert user {}", user.name))?;
            }

            let mut insert_song = tx.prepare(
                "INSERT INTO songs (original_id, original_title, original_search_query, \
                 assigned_user, song_number) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            let mut insert_candidate = tx.prepare(&format!(
                "INSERT INTO candidate_covers (song_id, position, {}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                CANDIDATE_COLUMNS
            ))?;

            for song in songs {
                insert_song.execute(params![
                    song.original_id,
                    song.original_title,
                    song.original_search_query,
                    song.assigned_user,
                    song.song_number,
                ])?;
                let song_id = tx.last_insert_rowid();
                for (position, candidate) in song.candidate_covers.iter().enumerate() {
                    insert_candidate.execute(params![
                        song_id,
                        position as i64,
                        candidate.id,
                        candidate.title,
                        candidate.uploader,
                        candidate.duration,
                        candidate.view_count,
                        candidate.like_count,
                        candidate.url,
                        candidate.search_query,
                        candidate.cover_num,
                        candidate.is_cover_votes,
                        candidate.is_not_cover_votes,
                        candidate.is_cover.to_db(),
                        candidate.vote_timestamp.map(|ts| ts.timestamp()),
                    ])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_user_names(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT name FROM users ORDER BY id ASC")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn get_songs_by_bucket(&self, bucket: &str) -> Result<Vec<Song>> {
        let conn = self.conn.lock().unwrap();
        let mut songs = query_songs(&conn, "WHERE assigned_user = ?1", &[&bucket])?;
        fill_candidates(&conn, &mut songs, false)?;
        Ok(songs)
    }

    fn get_song(&self, song_id: i64) -> Result<Option<Song>> {
        let conn = self.conn.lock().unwrap();
        let mut songs = query_songs(&conn, "WHERE id = ?1", &[&song_id])?;
        fill_candidates(&conn, &mut songs, false)?;
        Ok(songs.into_iter().next())
    }

    fn record_vote(&self, song_id: i64, position: usize, is_cover: bool) -> Result<Option<()>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let sql = format!(
            "SELECT {}, id FROM candidate_covers WHERE song_id = ?1 AND position = ?2",
            CANDIDATE_COLUMNS
        );
        let row = tx.query_row(&sql, params![song_id, position as i64], |row| {
            Ok((candidate_from_row(row)?, row.get::<_, i64>(13)?))
        });

        let (mut candidate, row_id) = match row {
            Ok(found) => found,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        apply_vote(&mut candidate, is_cover, Utc::now());

        tx.execute(
            "UPDATE candidate_covers SET is_cover_votes = ?1, is_not_cover_votes = ?2, \
             is_cover = ?3, vote_timestamp = ?4 WHERE id = ?5",
            params![
                candidate.is_cover_votes,
                candidate.is_not_cover_votes,
                candidate.is_cover.to_db(),
                candidate.vote_timestamp.map(|ts| ts.timestamp()),
                row_id,
            ],
        )?;
        tx.commit()?;
        Ok(Some(()))
    }

    fn list_voted(&self) -> Result<Vec<VotedPair>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT s.assigned_user, s.original_title, c.title, c.source_id, c.is_cover, \
             c.is_cover_votes, c.is_not_cover_votes \
             FROM candidate_covers c JOIN songs s ON s.id = c.song_id \
             WHERE c.is_cover IS NOT NULL \
             ORDER BY s.song_number ASC, c.position ASC",
        )?;
        let pairs = stmt
            .query_map([], |row| {
                Ok(VotedPair {
                    user: row.get(0)?,
                    original_title: row.get(1)?,
                    candidate_title: row.get(2)?,
                    candidate_id: row.get(3)?,
                    is_cover: row.get::<_, i64>(4)? != 0,
                    votes_yes: row.get(5)?,
                    votes_no: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pairs)
    }

    fn list_confirmed(&self) -> Result<Vec<Song>> {
        let conn = self.conn.lock().unwrap();
        let mut songs = query_songs(
            &conn,
            "WHERE id IN (SELECT song_id FROM candidate_covers WHERE is_cover = 1)",
            &[],
        )?;
        fill_candidates(&conn, &mut songs, true)?;
        Ok(songs)
    }

    fn dump_all(&self) -> Result<Vec<Song>> {
        let conn = self.conn.lock().unwrap();
        let mut songs = query_songs(&conn, "", &[])?;
        fill_candidates(&conn, &mut songs, false)?;
        Ok(songs)
    }

    fn counts(&self) -> Result<StoreCounts> {
        let conn = self.conn.lock().unwrap();
        let count = |table: &str| -> Result<usize> {
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
            Ok(n as usize)
        };
        Ok(StoreCounts {
            users: count("users")?,
            songs: count("songs")?,
            candidates: count("candidate_covers")?,
        })
    }
}
