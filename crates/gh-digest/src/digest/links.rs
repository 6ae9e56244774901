//! Turning API URLs into links a browser can open.

use crate::github::NotificationRecord;

/// Subject type whose link always points at the releases page.
const RELEASE: &str = "Release";

/// Marker of an issue comment API URL (`.../issues/comments/{id}`).
const ISSUE_COMMENT_PATH: &str = "issues/comments";

/// API-to-web substitutions, applied in order.
const WEB_REWRITES: &[(&str, &str)] = &[
    ("api.github.com/repos", "github.com"),
    ("/pulls/", "/pull/"),
    ("/issues/comments/", "/issues/"),
];

/// Resolve the browser link for a notification.
///
/// `repo_url` is the web URL of the owning repository.
pub fn resolve_link(record: &NotificationRecord, repo_url: &str) -> String {
    if record.subject.kind == RELEASE {
        return format!("{repo_url}/releases");
    }

    let subject = &record.subject;
    let link = match (subject.comment_url(), subject.api_url()) {
        (Some(comment_url), subject_url) if comment_url.contains(ISSUE_COMMENT_PATH) => {
            let base = subject_url.unwrap_or(repo_url);
            format!("{base}#issuecomment-{}", last_segment(comment_url))
        }
        (Some(comment_url), _) => comment_url.to_string(),
        (None, Some(subject_url)) => subject_url.to_string(),
        (None, None) => repo_url.to_string(),
    };

    to_web_url(&link)
}

/// Apply the fixed API-to-web rewrites.
pub fn to_web_url(url: &str) -> String {
    WEB_REWRITES
        .iter()
        .fold(url.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn last_segment(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or(url)
}
