//! Error types for the digest job.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors reported by the GitHub notification source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// 401 - the token was rejected.
    #[error("Invalid GitHub token. Please check the configuration")]
    Unauthorized,

    /// 403 - the API refused to serve more requests for now.
    #[error("GitHub API rate limit exceeded. Please try again later.")]
    RateLimited,

    /// 404 - the endpoint does not exist at the configured base URL.
    #[error("GitHub API endpoint not found. Please check the URL.")]
    NotFound,

    /// 503 - GitHub is down or degraded.
    #[error("GitHub API service unavailable. Please try again later.")]
    Unavailable,

    /// Any other non-success status.
    #[error("Unexpected error: {0}")]
    UnexpectedStatus(u16),

    /// HTTP request failed before a status was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SourceError {
    /// Map a non-success HTTP status onto the fixed set of failures.
    ///
    /// Returns `None` for success statuses.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        if status.is_success() {
            return None;
        }

        Some(match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::RateLimited,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable,
            other => Self::UnexpectedStatus(other.as_u16()),
        })
    }
}

/// Errors that can occur while composing or delivering the digest email.
#[derive(Debug, Error)]
pub enum MailError {
    /// A sender or recipient address could not be parsed.
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),

    /// Connecting, authenticating or submitting to the SMTP server failed.
    #[error("Failed to send email via SMTP: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Fatal failures of a digest run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Fetching notifications failed; nothing was sent.
    #[error("Failed to fetch notifications: {0}")]
    Fetch(#[from] SourceError),

    /// The digest could not be delivered; nothing was marked read.
    #[error("Failed to send digest: {0}")]
    Send(#[from] MailError),
}
