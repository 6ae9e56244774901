//! GitHub notification API types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Base URL for repository pages when the API omits `html_url`.
const GITHUB_WEB: &str = "https://github.com";

/// A notification thread as returned by `GET /notifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    /// Thread ID, used to mark the thread as read.
    pub id: String,
    /// Whether the thread is still unread.
    #[serde(default = "default_unread")]
    pub unread: bool,
    /// Why the user received this notification (`mention`, `subscribed`, ...).
    #[serde(default)]
    pub reason: String,
    /// When the thread last changed. Threads without it sort last.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// What the notification is about.
    pub subject: Subject,
    /// The repository the thread belongs to.
    pub repository: Repository,
}

fn default_unread() -> bool {
    true
}

/// Subject of a notification thread.
#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    /// Issue, pull request, release, ... title.
    pub title: String,
    /// API URL of the subject itself.
    #[serde(default)]
    pub url: Option<String>,
    /// API URL of the latest comment on the subject.
    #[serde(default)]
    pub latest_comment_url: Option<String>,
    /// Subject type tag (`Issue`, `PullRequest`, `Release`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

impl Subject {
    /// API URL of the subject, if present and non-empty.
    #[must_use]
    pub fn api_url(&self) -> Option<&str> {
        non_empty(self.url.as_deref())
    }

    /// API URL of the latest comment, if present and non-empty.
    #[must_use]
    pub fn comment_url(&self) -> Option<&str> {
        non_empty(self.latest_comment_url.as_deref())
    }
}

/// Repository a notification belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    pub full_name: String,
    /// Browser URL of the repository.
    #[serde(default)]
    pub html_url: Option<String>,
}

impl Repository {
    /// Browser URL, falling back to `https://github.com/{full_name}`.
    #[must_use]
    pub fn web_url(&self) -> String {
        non_empty(self.html_url.as_deref()).map_or_else(
            || format!("{GITHUB_WEB}/{}", self.full_name),
            str::to_string,
        )
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// A comment fetched through `latest_comment_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "id": "1234",
            "unread": true,
            "reason": "mention",
            "updated_at": "2024-05-01T10:00:00Z",
            "last_read_at": null,
            "subject": {
                "title": "Fix crash",
                "url": "https://api.github.com/repos/acme/widget/issues/7",
                "latest_comment_url": null,
                "type": "Issue"
            },
            "repository": {
                "id": 1,
                "full_name": "acme/widget",
                "html_url": "https://github.com/acme/widget",
                "private": false
            },
            "url": "https://api.github.com/notifications/threads/1234"
        }"#;

        let record: NotificationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "1234");
        assert_eq!(record.subject.kind, "Issue");
        assert!(record.subject.latest_comment_url.is_none());
        assert_eq!(record.repository.web_url(), "https://github.com/acme/widget");
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{
            "id": "9",
            "updated_at": "2024-05-01T10:00:00Z",
            "subject": { "title": "v1.0.0", "type": "Release" },
            "repository": { "full_name": "acme/widget" }
        }"#;

        let record: NotificationRecord = serde_json::from_str(json).unwrap();
        assert!(record.unread);
        assert_eq!(record.reason, "");
        assert!(record.subject.url.is_none());
        assert_eq!(record.repository.web_url(), "https://github.com/acme/widget");
    }

    #[test]
    fn test_missing_updated_at() {
        let json = r#"{
            "id": "3",
            "subject": { "title": "Bump deps", "type": "PullRequest" },
            "repository": { "full_name": "acme/widget" }
        }"#;

        let record: NotificationRecord = serde_json::from_str(json).unwrap();
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn test_empty_urls_count_as_missing() {
        let json = r#"{
            "id": "4",
            "updated_at": "2024-05-01T10:00:00Z",
            "subject": {
                "title": "Fix crash",
                "url": "",
                "latest_comment_url": "",
                "type": "Issue"
            },
            "repository": { "full_name": "acme/widget", "html_url": "" }
        }"#;

        let record: NotificationRecord = serde_json::from_str(json).unwrap();
        assert!(record.subject.api_url().is_none());
        assert!(record.subject.comment_url().is_none());
        assert_eq!(record.repository.web_url(), "https://github.com/acme/widget");
    }
}
