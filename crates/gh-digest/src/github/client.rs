//! GitHub REST API client for notifications.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, instrument};

use super::types::{Comment, NotificationRecord};
use crate::config::GitHubConfig;
use crate::error::SourceError;
use crate::source::{CommentLookup, NotificationSource};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("gh-digest/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the notification endpoints of the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new client.
    pub fn new(config: GitHubConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Attach auth and API headers to a request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.config.token)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn notifications_url(&self) -> String {
        format!(
            "{}/notifications?per_page={}",
            self.config.api_url, self.config.per_page
        )
    }

    fn thread_url(&self, thread_id: &str) -> String {
        format!("{}/notifications/threads/{thread_id}", self.config.api_url)
    }
}

#[async_trait]
impl CommentLookup for GitHubClient {
    #[instrument(skip(self))]
    async fn comment_body(&self, url: &str) -> Result<Option<String>, SourceError> {
        let response = self.authorized(self.client.get(url)).send().await?;

        if let Some(err) = SourceError::from_status(response.status()) {
            return Err(err);
        }

        let body = response.text().await?;
        let comment: Comment = serde_json::from_str(&body)?;
        Ok(comment.body)
    }
}

#[async_trait]
impl NotificationSource for GitHubClient {
    #[instrument(skip(self))]
    async fn fetch_notifications(&self) -> Result<Vec<NotificationRecord>, SourceError> {
        let url = self.notifications_url();
        debug!(url = %url, "Fetching notifications");

        let response = self.authorized(self.client.get(&url)).send().await?;

        let status = response.status();
        if let Some(err) = SourceError::from_status(status) {
            debug!(status = status.as_u16(), "Notification fetch rejected");
            return Err(err);
        }

        let body = response.text().await?;
        let records: Vec<NotificationRecord> = serde_json::from_str(&body)?;

        debug!(count = records.len(), "Fetched notifications");
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, thread_id: &str) -> Result<(), SourceError> {
        let url = self.thread_url(thread_id);
        let response = self.authorized(self.client.patch(&url)).send().await?;

        match SourceError::from_status(response.status()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
