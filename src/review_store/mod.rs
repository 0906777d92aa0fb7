//! Persistence for reviewers and the song catalog.

pub mod models;
pub mod schema;
mod store;
mod trait_def;

pub use models::{CandidateCover, CoverStatus, Song, User, VotedPair};
pub use store::SqliteReviewStore;
pub use trait_def::{ReviewStore, StoreCounts};
