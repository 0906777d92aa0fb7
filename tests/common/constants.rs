//! Shared constants for end-to-end tests

// Registered reviewers seeded by the fixtures
pub const TEST_USER_ALICE: &str = "Alice";
pub const TEST_USER_BOB: &str = "Bob";

// Fixture song ids
pub const SONG_1_ID: &str = "orig-1";
pub const SONG_3_ID: &str = "orig-3";
pub const SONG_4_ID: &str = "orig-4";

// Server lifecycle
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
