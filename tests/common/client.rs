//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API endpoint. When routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("home request failed")
    }

    pub async fn login(&self, name: &str) -> Response {
        self.login_raw(json!({ "name": name })).await
    }

    /// Sends an arbitrary login body, for validation tests.
    pub async fn login_raw(&self, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}/api/login", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("login request failed")
    }

    pub async fn get_pair(&self, user: &str) -> Response {
        self.client
            .get(format!("{}/api/pair", self.base_url))
            .query(&[("user", user)])
            .send()
            .await
            .expect("pair request failed")
    }

    pub async fn get_pair_without_user(&self) -> Response {
        self.client
            .get(format!("{}/api/pair", self.base_url))
            .send()
            .await
            .expect("pair request failed")
    }

    pub async fn vote(&self, original_index: i64, candidate_index: usize, is_cover: bool) -> Response {
        self.vote_raw(json!({
            "original_index": original_index,
            "candidate_index": candidate_index,
            "is_cover": is_cover,
        }))
        .await
    }

    /// Sends an arbitrary vote body, for validation tests.
    pub async fn vote_raw(&self, body: serde_json::Value) -> Response {
        self.client
            .post(format!("{}/api/vote", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("vote request failed")
    }

    pub async fn get_votes(&self) -> Response {
        self.client
            .get(format!("{}/api/votes", self.base_url))
            .send()
            .await
            .expect("votes request failed")
    }

    pub async fn get_final_list(&self) -> Response {
        self.client
            .get(format!("{}/api/final-list", self.base_url))
            .send()
            .await
            .expect("final-list request failed")
    }

    pub async fn get_validated_covers(&self) -> Response {
        self.client
            .get(format!("{}/api/validated-covers", self.base_url))
            .send()
            .await
            .expect("validated-covers request failed")
    }
}
