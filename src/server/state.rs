use axum::extract::FromRef;

use crate::review_store::ReviewStore;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedReviewStore = Arc<dyn ReviewStore>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub review_store: GuardedReviewStore,
}

impl FromRef<ServerState> for GuardedReviewStore {
    fn from_ref(input: &ServerState) -> Self {
        input.review_store.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
