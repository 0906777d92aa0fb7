use anyhow::Result;
use std::time::{Duration, Instant};

use crate::review::{next_pending_pair, resolve_bucket};
use crate::review_store::{CandidateCover, Song, VotedPair};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use axum::{
    extract::{Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ApiError, ServerConfig};

/// Terminal response body for an exhausted bucket.
const EXHAUSTED_MESSAGE: &str = "All pairs validated for this user!";

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub name: Option<String>,
}

#[derive(Serialize)]
struct LoginResponse {
    user: String,
}

#[derive(Deserialize, Debug)]
struct PairQuery {
    pub user: Option<String>,
}

#[derive(Serialize)]
struct PendingPairResponse {
    original_id: String,
    original_title: Option<String>,
    candidate: CandidateCover,
    /// Store id of the owning song, echoed back by the vote request.
    original_index: i64,
    candidate_index: usize,
}

#[derive(Serialize)]
struct ExhaustedResponse {
    message: String,
}

#[derive(Deserialize, Debug)]
struct VoteBody {
    pub original_index: Option<i64>,
    pub candidate_index: Option<usize>,
    pub is_cover: Option<bool>,
}

#[derive(Serialize)]
struct VoteResponse {
    success: bool,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(stats)
}

async fn login(
    State(store): State<GuardedReviewStore>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let name = body
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Name required".to_string()))?;

    let registered = store.get_user_names()?;
    Ok(Json(LoginResponse {
        user: resolve_bucket(&name, &registered),
    }))
}

async fn get_pair(
    State(store): State<GuardedReviewStore>,
    Query(query): Query<PairQuery>,
) -> Result<Response, ApiError> {
    let bucket = query
        .user
        .filter(|user| !user.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("User required".to_string()))?;

    let songs = store.get_songs_by_bucket(&bucket)?;
    match next_pending_pair(&songs) {
        Some(pair) => Ok(Json(PendingPairResponse {
            original_id: pair.original_id,
            original_title: pair.original_title,
            candidate: pair.candidate,
            original_index: pair.song_id,
            candidate_index: pair.candidate_position,
        })
        .into_response()),
        None => Ok(Json(ExhaustedResponse {
            message: EXHAUSTED_MESSAGE.to_string(),
        })
        .into_response()),
    }
}

async fn post_vote(
    State(store): State<GuardedReviewStore>,
    Json(body): Json<VoteBody>,
) -> Result<Json<VoteResponse>, ApiError> {
    let song_id = body
        .original_index
        .ok_or_else(|| ApiError::Validation("original_index required".to_string()))?;
    let position = body
        .candidate_index
        .ok_or_else(|| ApiError::Validation("candidate_index required".to_string()))?;
    let is_cover = body
        .is_cover
        .ok_or_else(|| ApiError::Validation("is_cover required".to_string()))?;

    match store.record_vote(song_id, position, is_cover)? {
        Some(()) => Ok(Json(VoteResponse { success: true })),
        None => Err(ApiError::NotFound("Pair not found".to_string())),
    }
}

async fn get_votes(
    State(store): State<GuardedReviewStore>,
) -> Result<Json<Vec<VotedPair>>, ApiError> {
    Ok(Json(store.list_voted()?))
}

async fn get_final_list(
    State(store): State<GuardedReviewStore>,
) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(store.list_confirmed()?))
}

async fn get_validated_covers(
    State(store): State<GuardedReviewStore>,
) -> Result<Json<Vec<Song>>, ApiError> {
    Ok(Json(store.dump_all()?))
}

pub fn make_app(config: ServerConfig, review_store: GuardedReviewStore) -> Router {
    let state = ServerState {
        config: config.clone(),
        start_time: Instant::now(),
        review_store,
    };

    let api_routes: Router = Router::new()
        .route("/login", post(login))
        .route("/pair", get(get_pair))
        .route("/vote", post(post_vote))
        .route("/votes", get(get_votes))
        .route("/final-list", get(get_final_list))
        .route("/validated-covers", get(get_validated_covers))
        .with_state(state.clone());

    let home_router: Router = match &config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router.nest("/api", api_routes);

    // The browser UI is served from a different origin during development.
    app = app.layer(CorsLayer::permissive());
    app = app.layer(middleware::from_fn_with_state(state, log_requests));
    app
}

pub async fn run_server(review_store: GuardedReviewStore, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, review_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
