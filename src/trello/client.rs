use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::Credentials;

use super::{Action, ActionWindow, ApiError, BoardSummary, CardSummary, ListSummary, TrelloApi};

const API_ROOT: &str = "https://api.trello.com/1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST implementation of [TrelloApi]. Authentication rides along as `key`
/// and `token` query parameters on every request.
pub struct TrelloClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl TrelloClient {
    pub fn new(credentials: Credentials) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("boardtally/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, credentials })
    }

    /// GETs `path` with the credential pair and `query` attached and decodes
    /// the JSON body. Errors carry the query-less URL; the reqwest sources
    /// are stripped of theirs so the credentials stay out of logs.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{API_ROOT}{path}");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.credentials.app_key.as_str()),
                ("token", self.credentials.token.as_str()),
            ])
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e.without_url(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }
        response.json::<T>().await.map_err(|e| ApiError::Decode {
            url,
            source: e.without_url(),
        })
    }
}

#[async_trait]
impl TrelloApi for TrelloClient {
    async fn board(&self, board_id: &str) -> Result<BoardSummary, ApiError> {
        self.get_json(
            &format!("/boards/{board_id}"),
            &[("fields", "name".to_string())],
        )
        .await
    }

    async fn member_boards(&self) -> Result<Vec<BoardSummary>, ApiError> {
        self.get_json("/members/me/boards", &[("fields", "name".to_string())])
            .await
    }

    async fn board_lists(&self, board_id: &str) -> Result<Vec<ListSummary>, ApiError> {
        self.get_json(
            &format!("/boards/{board_id}/lists"),
            &[("fields", "name".to_string())],
        )
        .await
    }

    async fn list_cards(&self, list_id: &str) -> Result<Vec<CardSummary>, ApiError> {
        self.get_json(
            &format!("/lists/{list_id}/cards"),
            &[("fields", "name".to_string())],
        )
        .await
    }

    async fn list_actions(
        &self,
        list_id: &str,
        window: &ActionWindow,
    ) -> Result<Vec<Action>, ApiError> {
        self.get_json(
            &format!("/lists/{list_id}/actions"),
            &[
                ("since", window.since_param()),
                ("limit", window.limit.to_string()),
            ],
        )
        .await
    }
}
