//! Schema definition for the review store tables.

/// Schema definition for review tables.
pub struct ReviewSchema {
    pub version: usize,
    pub up: &'static str,
}

pub const REVIEW_VERSIONED_SCHEMAS: &[ReviewSchema] = &[ReviewSchema {
    version: 1,
    up: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS songs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                original_id TEXT NOT NULL,
                original_title TEXT,
                original_search_query TEXT,
                assigned_user TEXT NOT NULL DEFAULT 'others',
                song_number INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS candidate_covers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                song_id INTEGER NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
                position INTEGER NOT NULL,
                source_id TEXT NOT NULL,
                title TEXT,
                uploader TEXT,
                duration REAL,
                view_count INTEGER,
                like_count INTEGER,
                url TEXT,
                search_query TEXT,
                cover_num INTEGER,
                is_cover_votes INTEGER NOT NULL DEFAULT 0,
                is_not_cover_votes INTEGER NOT NULL DEFAULT 0,
                is_cover INTEGER,
                vote_timestamp INTEGER,
                UNIQUE (song_id, position)
            );

            CREATE INDEX IF NOT EXISTS idx_songs_assigned_user ON songs(assigned_user);
            CREATE INDEX IF NOT EXISTS idx_songs_song_number ON songs(song_number);
            CREATE INDEX IF NOT EXISTS idx_candidate_covers_song ON candidate_covers(song_id);
        "#,
}];
